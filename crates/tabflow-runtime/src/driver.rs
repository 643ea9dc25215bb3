#![forbid(unsafe_code)]

//! Host collaborators.
//!
//! The controller never measures or scrolls anything itself. Hosts plug in:
//!
//! - a [`GeometryProvider`] that reports tab and container measurements,
//! - a [`ScrollDriver`] that performs (and later settles) programmatic
//!   scrolls and toggles native snapping,
//! - optionally a [`TouchSignal`] for preemptive index commits.
//!
//! [`StaticGeometry`] is a plain in-memory provider for headless hosts.

use std::fmt;

use tabflow_core::{GeometryError, Panel, PanelStrip, ScrollTicket, Settlement};

use crate::tween::ScrollAnimation;

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Source of tab and container measurements.
///
/// `None` means "not measured yet" (e.g. before first layout).
pub trait GeometryProvider {
    /// Number of panels (and tabs).
    fn panel_count(&self) -> usize;

    /// Width of tab `index`, in pixels.
    fn panel_width(&self, index: usize) -> Option<f64>;

    /// Left edge of tab `index`, in pixels.
    fn panel_offset(&self, index: usize) -> Option<f64>;

    /// Width of one page of the scroll container, in pixels.
    fn container_width(&self) -> Option<f64>;
}

/// Snapshot the provider into a validated [`PanelStrip`].
pub fn measure_strip<G: GeometryProvider + ?Sized>(geometry: &G) -> Result<PanelStrip, GeometryError> {
    let count = geometry.panel_count();
    if count == 0 {
        return Err(GeometryError::Empty);
    }
    let container_width = geometry
        .container_width()
        .ok_or(GeometryError::UnmeasuredContainer)?;

    let mut panels = Vec::with_capacity(count);
    for index in 0..count {
        let (Some(offset), Some(width)) = (geometry.panel_offset(index), geometry.panel_width(index))
        else {
            return Err(GeometryError::UnmeasuredPanel { index });
        };
        panels.push(Panel::new(offset, width));
    }
    PanelStrip::new(panels, container_width)
}

/// In-memory geometry, for hosts that lay out tabs themselves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticGeometry {
    panels: Vec<Panel>,
    container_width: Option<f64>,
}

impl StaticGeometry {
    /// Tabs laid out left to right from offset 0.
    #[must_use]
    pub fn contiguous(widths: &[f64], container_width: f64) -> Self {
        let mut geometry = Self::default();
        geometry.set_widths(widths);
        geometry.container_width = Some(container_width);
        geometry
    }

    /// Geometry whose container has not been measured yet.
    #[must_use]
    pub fn unmeasured(widths: &[f64]) -> Self {
        let mut geometry = Self::default();
        geometry.set_widths(widths);
        geometry
    }

    /// Replace every tab, re-laying them out contiguously.
    pub fn set_widths(&mut self, widths: &[f64]) {
        let mut offset = 0.0;
        self.panels = widths
            .iter()
            .map(|&width| {
                let panel = Panel::new(offset, width);
                offset += width;
                panel
            })
            .collect();
    }

    /// Update the measured container width.
    pub fn set_container_width(&mut self, width: Option<f64>) {
        self.container_width = width;
    }
}

impl GeometryProvider for StaticGeometry {
    fn panel_count(&self) -> usize {
        self.panels.len()
    }

    fn panel_width(&self, index: usize) -> Option<f64> {
        self.panels.get(index).map(|p| p.width)
    }

    fn panel_offset(&self, index: usize) -> Option<f64> {
        self.panels.get(index).map(|p| p.offset)
    }

    fn container_width(&self) -> Option<f64> {
        self.container_width
    }
}

// ---------------------------------------------------------------------------
// Scrolling
// ---------------------------------------------------------------------------

/// One programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    /// Echo this back through `IndicatorController::scroll_settled`.
    pub ticket: ScrollTicket,
    /// Raw scroll offset to reach, in pixels.
    pub target_offset: f64,
    pub animation: ScrollAnimation,
}

/// Why a driver could not complete a scroll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollDriverError {
    /// The container went away mid-scroll.
    Detached,
    /// The host reported a failure.
    Host(String),
}

impl fmt::Display for ScrollDriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detached => write!(f, "scroll container detached"),
            Self::Host(msg) => write!(f, "scroll driver failed: {msg}"),
        }
    }
}

impl std::error::Error for ScrollDriverError {}

/// Outcome of a programmatic scroll: `Ok(true)` when it reached the target,
/// `Ok(false)` when it stopped short (interrupted or superseded).
pub type ScrollSettlement = Result<bool, ScrollDriverError>;

/// Collapse a driver outcome into the reconciler's view of it.
#[must_use]
pub fn settlement_of(result: &ScrollSettlement) -> Settlement {
    match result {
        Ok(true) => Settlement::Arrived,
        Ok(false) => Settlement::NotArrived,
        Err(_) => Settlement::Failed,
    }
}

/// Performs scrolls on the host surface.
///
/// `scroll_to` is fire-and-forget; the host reports the outcome later
/// through `IndicatorController::scroll_settled` with the request's ticket.
/// Starting a new request or jumping supersedes any scroll in flight.
pub trait ScrollDriver {
    /// Start an animated scroll.
    fn scroll_to(&mut self, request: ScrollRequest);

    /// Move to `offset` immediately, without animation.
    fn jump_to(&mut self, offset: f64);

    /// Enable or disable native scroll snapping.
    fn set_snapping(&mut self, enabled: bool);
}

impl<D: ScrollDriver + ?Sized> ScrollDriver for &mut D {
    fn scroll_to(&mut self, request: ScrollRequest) {
        (**self).scroll_to(request);
    }

    fn jump_to(&mut self, offset: f64) {
        (**self).jump_to(offset);
    }

    fn set_snapping(&mut self, enabled: bool) {
        (**self).set_snapping(enabled);
    }
}

// ---------------------------------------------------------------------------
// Touch
// ---------------------------------------------------------------------------

/// Reports whether the user is touching the scroll container.
pub trait TouchSignal {
    fn is_touching(&self) -> bool;
}

/// Touch signal for hosts without touch input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoTouch;

impl TouchSignal for NoTouch {
    #[inline]
    fn is_touching(&self) -> bool {
        false
    }
}

impl<F: Fn() -> bool> TouchSignal for F {
    #[inline]
    fn is_touching(&self) -> bool {
        self()
    }
}
