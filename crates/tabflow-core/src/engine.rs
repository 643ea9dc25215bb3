#![forbid(unsafe_code)]

//! Scroll-to-transform engine.
//!
//! [`TransformEngine::step`] maps one scroll sample (in panel units) plus the
//! [`TrackingState`] carried from the previous sample onto the indicator's
//! [`Transform`]. The engine is pure: it never touches the host, and it never
//! changes the selected index. It only reports which tab the indicator has
//! just landed on ([`Step::crossed`]) so the caller can reconcile.
//!
//! # Three-pointer tracking
//!
//! Each step resolves three tabs:
//!
//! - **previous**: the tab the indicator was anchored on before the sample.
//! - **current**: the tab the indicator is animating out of. It only moves
//!   when the sample crosses a whole-panel boundary in the direction of
//!   travel, so the indicator keeps leaving the old tab while the scroll has
//!   already entered the next cell.
//! - **next**: `ceil` (moving right) or `floor` (moving left) of the sample.
//!
//! When `current == next == previous` the user reversed mid-swipe without
//! crossing a boundary. Progress is then measured against the neighbor the
//! motion came from, so the indicator keeps following the finger.
//!
//! # Invariants
//!
//! 1. All three tabs are always inside `[0, N-1]`.
//! 2. At an integral sample `k` inside `[0, N-1]` the transform rests on `k`:
//!    `translate_x == offset(k)` and `scale_x == 1`.
//! 3. `scale_x` is finite, positive and lies between `1` and the width ratio
//!    of the target tab to the current tab.
//! 4. Repeating a sample leaves the tracking state unchanged and reports no
//!    crossing.
//! 5. Samples outside `[0, N-1]` (rubber-band overscroll) pin the indicator to
//!    the nearest end tab at rest.
//!
//! # Failure Modes
//!
//! - Non-finite samples are treated as a repeat of the previous sample.
//! - Sub-pixel jitter near a boundary is absorbed by the snap band
//!   ([`DEFAULT_SNAP_EPSILON`]), which snaps a sample just past an integer
//!   back onto it.

use std::fmt;

use crate::geometry::PanelStrip;

/// Default hysteresis band, in panel units (0.1% of a panel).
pub const DEFAULT_SNAP_EPSILON: f64 = 0.001;

/// Largest accepted snap band; wider bands would swallow half a panel.
const MAX_SNAP_EPSILON: f64 = 0.5;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Direction of travel between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward higher panel indices. Ties resolve here.
    Right,
    /// Toward lower panel indices.
    Left,
}

impl Direction {
    /// Direction from `previous` to `current`; equal samples are `Right`.
    #[inline]
    #[must_use]
    pub fn between(previous: f64, current: f64) -> Self {
        if current >= previous {
            Self::Right
        } else {
            Self::Left
        }
    }
}

/// Indicator transform relative to the track origin.
///
/// The host applies it with a left transform origin: the indicator's left
/// edge sits at `translate_x` and its rendered width is the element width
/// times `scale_x`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transform {
    pub translate_x: f64,
    pub scale_x: f64,
}

impl Transform {
    /// No translation, natural width.
    pub const IDENTITY: Self = Self {
        translate_x: 0.0,
        scale_x: 1.0,
    };

    /// Resting on a tab whose left edge is `offset`.
    #[inline]
    #[must_use]
    pub const fn resting_at(offset: f64) -> Self {
        Self {
            translate_x: offset,
            scale_x: 1.0,
        }
    }

    /// Rendered width of an element whose natural width is `element_width`.
    #[inline]
    #[must_use]
    pub fn rendered_width(&self, element_width: f64) -> f64 {
        element_width * self.scale_x
    }

    /// Rendered right edge of an element whose natural width is `element_width`.
    #[inline]
    #[must_use]
    pub fn rendered_right(&self, element_width: f64) -> f64 {
        self.translate_x + self.rendered_width(element_width)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// CSS `transform` value, e.g. `translateX(50px) scaleX(1.25)`.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translateX({}px) scaleX({})",
            self.translate_x, self.scale_x
        )
    }
}

/// State carried from one scroll sample to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingState {
    /// Anchor the indicator held before the last sample.
    pub previous_tab: usize,
    /// Anchor after the last sample; the next sample starts from here.
    pub current_tab: usize,
    /// Last sample, in panel units.
    pub previous_relative_scroll: f64,
}

impl TrackingState {
    /// Tracking at rest on `tab`.
    #[must_use]
    pub fn anchored(tab: usize) -> Self {
        Self {
            previous_tab: tab,
            current_tab: tab,
            previous_relative_scroll: tab as f64,
        }
    }

    /// Whether the last sample finished moving the anchor.
    #[inline]
    #[must_use]
    pub fn is_transition_complete(&self) -> bool {
        self.previous_tab == self.current_tab
    }
}

impl Default for TrackingState {
    fn default() -> Self {
        Self::anchored(0)
    }
}

/// The three tabs resolved for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingTabs {
    pub previous: usize,
    pub current: usize,
    pub next: usize,
}

impl WorkingTabs {
    /// Whether the indicator is moving between two distinct anchors.
    #[inline]
    #[must_use]
    pub fn in_transition(&self) -> bool {
        self.current != self.next || self.previous != self.current
    }
}

/// Result of one engine step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Sample after hysteresis snapping, in panel units.
    pub relative_scroll: f64,
    pub direction: Direction,
    pub tabs: WorkingTabs,
    /// Tab whose width the indicator is scaling toward.
    pub target: usize,
    /// Interpolation factor in `[0, 1]`.
    pub progress: f64,
    pub transform: Transform,
    /// Tracking to carry into the next sample.
    pub tracking: TrackingState,
    /// Set when the indicator anchor moved onto a new tab in this sample.
    pub crossed: Option<usize>,
    /// Whether the sample lay outside `[0, N-1]`.
    pub out_of_bounds: bool,
}

impl Step {
    /// Whether the sample rests exactly on a tab inside the strip.
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        !self.out_of_bounds && self.relative_scroll.fract() == 0.0
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Stateless transform engine; holds only tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEngine {
    snap_epsilon: f64,
}

impl Default for TransformEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformEngine {
    /// Engine with the default snap band.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            snap_epsilon: DEFAULT_SNAP_EPSILON,
        }
    }

    /// Set the snap band (builder pattern). Clamped to `[0, 0.5)`; NaN disables
    /// snapping.
    #[must_use]
    pub fn with_snap_epsilon(mut self, epsilon: f64) -> Self {
        self.snap_epsilon = if epsilon.is_nan() {
            0.0
        } else {
            epsilon.clamp(0.0, MAX_SNAP_EPSILON - f64::EPSILON)
        };
        self
    }

    /// Current snap band, in panel units.
    #[inline]
    #[must_use]
    pub fn snap_epsilon(&self) -> f64 {
        self.snap_epsilon
    }

    /// Snap a sample that sits just past an integer back onto it.
    #[inline]
    #[must_use]
    pub fn snap(&self, relative_scroll: f64) -> f64 {
        if relative_scroll >= 0.0 && relative_scroll.fract() < self.snap_epsilon {
            relative_scroll.trunc()
        } else {
            relative_scroll
        }
    }

    /// Advance the tracking state by one sample.
    #[must_use]
    pub fn step(
        &self,
        tracking: &TrackingState,
        relative_scroll: f64,
        strip: &PanelStrip,
    ) -> Step {
        let previous_rs = tracking.previous_relative_scroll;
        let rs = if relative_scroll.is_finite() {
            self.snap(relative_scroll)
        } else {
            previous_rs
        };
        let direction = Direction::between(previous_rs, rs);
        let anchor = tracking.current_tab.min(strip.last_index());
        let out_of_bounds = !strip.contains_relative(rs);
        let tabs = resolve_tabs(anchor, previous_rs, rs, direction, strip);

        let (target, progress, translate_x) = if out_of_bounds {
            (tabs.next, 0.0, strip.offset(tabs.next))
        } else {
            interpolate(&tabs, rs, direction, strip)
        };
        let scale_x = scale_toward(strip.width(target), strip.width(tabs.current), progress);

        // Compared against the anchor, not `tabs.previous`: overscroll pins
        // `previous` to the end tab but can still move the anchor onto it.
        let crossed = (anchor != tabs.current).then_some(tabs.current);

        #[cfg(feature = "tracing")]
        if let Some(tab) = crossed {
            tracing::trace!(
                target: "tabflow.engine",
                tab,
                relative_scroll = rs,
                ?direction,
                "indicator anchor moved"
            );
        }

        Step {
            relative_scroll: rs,
            direction,
            tabs,
            target,
            progress,
            transform: Transform {
                translate_x,
                scale_x,
            },
            tracking: TrackingState {
                previous_tab: tabs.previous,
                current_tab: tabs.current,
                previous_relative_scroll: rs,
            },
            crossed,
            out_of_bounds,
        }
    }
}

/// Horizontal scale that morphs a tab of `current_width` toward
/// `target_width` as `progress` goes from 0 to 1.
///
/// Returns exactly `1.0` at progress 0 and the width ratio at progress 1.
#[inline]
#[must_use]
pub fn scale_toward(target_width: f64, current_width: f64, progress: f64) -> f64 {
    let ratio = target_width / current_width;
    if ratio < 1.0 {
        1.0 - progress * (1.0 - ratio)
    } else {
        1.0 + progress * (ratio - 1.0)
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn resolve_tabs(
    anchor: usize,
    previous_rs: f64,
    rs: f64,
    direction: Direction,
    strip: &PanelStrip,
) -> WorkingTabs {
    let cell = rs.trunc();
    let previous_cell = previous_rs.trunc();

    let next = match direction {
        Direction::Right => strip.clamp_tab(rs.ceil()),
        Direction::Left => strip.clamp_tab(rs.floor()),
    };

    if !strip.contains_relative(rs) {
        return WorkingTabs {
            previous: next,
            current: next,
            next,
        };
    }

    let current = match direction {
        Direction::Right if cell > previous_cell => strip.clamp_tab(cell),
        // Landing exactly on a tab while moving left anchors on it.
        Direction::Left if rs.fract() == 0.0 => strip.clamp_tab(rs),
        // Moving left into cell [k, k+1) anchors on its right edge, never
        // further than one cell away even when samples are sparse.
        Direction::Left if cell < previous_cell => strip.clamp_tab(previous_cell.min(cell + 1.0)),
        _ => anchor,
    };

    WorkingTabs {
        previous: anchor,
        current,
        next,
    }
}

/// Returns `(target, progress, translate_x)` for an in-bounds sample.
fn interpolate(
    tabs: &WorkingTabs,
    rs: f64,
    direction: Direction,
    strip: &PanelStrip,
) -> (usize, f64, f64) {
    let frac = rs.fract();
    // Distance already covered into the cell; a boundary counts as a full cell.
    let covered = if frac == 0.0 { 1.0 } else { frac };
    let current = tabs.current;
    let origin = strip.offset(current);

    if tabs.in_transition() {
        match direction {
            Direction::Right => (tabs.next, frac, origin + frac * strip.width(current)),
            Direction::Left => (
                tabs.next,
                1.0 - frac,
                origin - (1.0 - covered) * strip.width(tabs.next),
            ),
        }
    } else {
        match direction {
            Direction::Right => {
                let target = current.saturating_sub(1);
                let progress = 1.0 - covered;
                (target, progress, origin - progress * strip.width(target))
            }
            Direction::Left => {
                let target = (current + 1).min(strip.last_index());
                (target, frac, origin + frac * strip.width(current))
            }
        }
    }
}
