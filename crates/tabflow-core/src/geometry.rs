#![forbid(unsafe_code)]

//! Panel geometry snapshots.
//!
//! A [`PanelStrip`] is the measured layout of one scroll-container-width
//! epoch: the tab extent of every panel plus the container width that maps
//! raw scroll pixels to panel units. Strips are immutable; the host measures a
//! new one whenever the container is resized.
//!
//! # Invariants
//!
//! 1. A strip always holds at least one panel.
//! 2. Every panel width is finite and strictly positive.
//! 3. Every panel offset is finite. Offsets are read from the host and are
//!    expected (not required) to be contiguous and non-decreasing.
//! 4. The container width is finite and strictly positive.
//! 5. Index lookups through [`PanelStrip::clamp_tab`] never leave `[0, N-1]`.

use std::fmt;

/// Horizontal extent of one panel's tab, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panel {
    /// Left edge relative to the indicator track.
    pub offset: f64,
    /// Width of the tab.
    pub width: f64,
}

impl Panel {
    /// Create a panel from its left edge and width.
    #[inline]
    #[must_use]
    pub const fn new(offset: f64, width: f64) -> Self {
        Self { offset, width }
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub fn right(&self) -> f64 {
        self.offset + self.width
    }
}

/// Errors raised while building a [`PanelStrip`] from host measurements.
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The container has no panels.
    Empty,
    /// The host could not measure a panel yet.
    UnmeasuredPanel { index: usize },
    /// The host could not measure the scroll container yet.
    UnmeasuredContainer,
    /// A panel reported a zero, negative or non-finite width.
    InvalidWidth { index: usize, width: f64 },
    /// A panel reported a non-finite offset.
    InvalidOffset { index: usize, offset: f64 },
    /// The container reported a zero, negative or non-finite width.
    InvalidContainerWidth { width: f64 },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "panel strip has no panels"),
            Self::UnmeasuredPanel { index } => write!(f, "panel {index} has not been measured"),
            Self::UnmeasuredContainer => write!(f, "scroll container has not been measured"),
            Self::InvalidWidth { index, width } => {
                write!(f, "panel {index} has invalid width {width}")
            }
            Self::InvalidOffset { index, offset } => {
                write!(f, "panel {index} has invalid offset {offset}")
            }
            Self::InvalidContainerWidth { width } => {
                write!(f, "scroll container has invalid width {width}")
            }
        }
    }
}

impl std::error::Error for GeometryError {}

/// Measured geometry of every panel for one container-width epoch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelStrip {
    panels: Vec<Panel>,
    container_width: f64,
}

impl PanelStrip {
    /// Build a strip from host measurements.
    pub fn new(panels: Vec<Panel>, container_width: f64) -> Result<Self, GeometryError> {
        if panels.is_empty() {
            return Err(GeometryError::Empty);
        }
        if !(container_width.is_finite() && container_width > 0.0) {
            return Err(GeometryError::InvalidContainerWidth {
                width: container_width,
            });
        }
        for (index, panel) in panels.iter().enumerate() {
            if !(panel.width.is_finite() && panel.width > 0.0) {
                return Err(GeometryError::InvalidWidth {
                    index,
                    width: panel.width,
                });
            }
            if !panel.offset.is_finite() {
                return Err(GeometryError::InvalidOffset {
                    index,
                    offset: panel.offset,
                });
            }
        }
        Ok(Self {
            panels,
            container_width,
        })
    }

    /// Build a contiguous strip from tab widths, starting at offset 0.
    pub fn contiguous(widths: &[f64], container_width: f64) -> Result<Self, GeometryError> {
        let mut offset = 0.0;
        let panels = widths
            .iter()
            .map(|&width| {
                let panel = Panel::new(offset, width);
                offset += width;
                panel
            })
            .collect();
        Self::new(panels, container_width)
    }

    /// Number of panels (always at least 1).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Index of the last panel.
    #[inline]
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.panels.len() - 1
    }

    /// Width of the scroll container (one page of scroll travel).
    #[inline]
    #[must_use]
    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    /// Panel at `index`, if in range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    /// Panel at `index`, clamped into range.
    #[inline]
    #[must_use]
    pub fn panel(&self, index: usize) -> &Panel {
        &self.panels[index.min(self.last_index())]
    }

    /// Tab width of panel `index` (clamped).
    #[inline]
    #[must_use]
    pub fn width(&self, index: usize) -> f64 {
        self.panel(index).width
    }

    /// Tab offset of panel `index` (clamped).
    #[inline]
    #[must_use]
    pub fn offset(&self, index: usize) -> f64 {
        self.panel(index).offset
    }

    /// Iterate over panels in order.
    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    /// Whether a relative scroll lies inside `[0, N-1]`.
    #[inline]
    #[must_use]
    pub fn contains_relative(&self, relative_scroll: f64) -> bool {
        relative_scroll >= 0.0 && relative_scroll <= self.last_index() as f64
    }

    /// Convert a whole-panel position (already rounded by the caller) into a
    /// valid tab index. NaN maps to 0.
    #[inline]
    #[must_use]
    pub fn clamp_tab(&self, position: f64) -> usize {
        if position.is_nan() || position <= 0.0 {
            return 0;
        }
        let last = self.last_index();
        if position >= last as f64 {
            last
        } else {
            position as usize
        }
    }

    /// Convert a raw scroll offset in pixels into panel units.
    #[inline]
    #[must_use]
    pub fn relative_scroll(&self, raw_offset: f64) -> f64 {
        raw_offset / self.container_width
    }

    /// Raw scroll offset that shows panel `index` (clamped).
    #[inline]
    #[must_use]
    pub fn scroll_offset_of(&self, index: usize) -> f64 {
        index.min(self.last_index()) as f64 * self.container_width
    }
}
