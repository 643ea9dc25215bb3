#![forbid(unsafe_code)]

//! tabflow public facade crate.
//!
//! Re-exports the pure core and the runtime controller, and offers a
//! prelude plus a top-level [`Error`] so hosts can use `?` across both.
//!
//! ```rust,ignore
//! use tabflow::prelude::*;
//!
//! let geometry = StaticGeometry::contiguous(&[96.0, 148.0, 96.0], 390.0);
//! let mut indicator =
//!     IndicatorController::new(geometry, TweenDriver::new(), 0, &IndicatorConfig::default())?;
//! indicator.start()?;
//! indicator.select(2)?;
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use tabflow_core::{
    DEFAULT_SNAP_EPSILON, Direction, EasingFn, EasingKind, GeometryError, IndexChange, IndexOrigin,
    Panel, PanelStrip, Phase, Reconciler, ScrollTicket, SelectError, Settlement, Step,
    TrackingState, Transform, TransformEngine, WorkingTabs,
};

// --- Runtime re-exports ----------------------------------------------------

pub use tabflow_runtime::{
    ConfigError, GeometryProvider, IndicatorConfig, IndicatorController, IndicatorFrame, NoTouch,
    ScrollAnimation, ScrollAnimationConfig, ScrollDriver, ScrollDriverError, ScrollRequest,
    ScrollSettlement, ScrollTween, StaticGeometry, TouchSignal, TweenDriver,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tabflow hosts.
#[derive(Debug)]
pub enum Error {
    /// Tab or container geometry is missing or invalid.
    Geometry(GeometryError),
    /// A tab index was rejected.
    Select(SelectError),
    /// The scroll driver failed.
    Driver(ScrollDriverError),
    /// Configuration could not be loaded or validated.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(err) => write!(f, "{err}"),
            Self::Select(err) => write!(f, "{err}"),
            Self::Driver(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Geometry(err) => Some(err),
            Self::Select(err) => Some(err),
            Self::Driver(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<GeometryError> for Error {
    fn from(err: GeometryError) -> Self {
        Self::Geometry(err)
    }
}

impl From<SelectError> for Error {
    fn from(err: SelectError) -> Self {
        Self::Select(err)
    }
}

impl From<ScrollDriverError> for Error {
    fn from(err: ScrollDriverError) -> Self {
        Self::Driver(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for tabflow APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, GeometryProvider, IndexChange, IndicatorConfig, IndicatorController,
        IndicatorFrame, Result, ScrollDriver, ScrollSettlement, StaticGeometry, TouchSignal,
        Transform, TweenDriver,
    };

    pub use crate::{core, runtime};
}

pub use tabflow_core as core;
pub use tabflow_runtime as runtime;
