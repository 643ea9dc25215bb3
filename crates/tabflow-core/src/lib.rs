#![forbid(unsafe_code)]

//! Core: indicator geometry, the scroll-to-transform engine, and index
//! reconciliation.
//!
//! # Role in tabflow
//! `tabflow-core` is the pure layer. It never measures anything and never
//! scrolls anything; it turns measurements and scroll samples into indicator
//! transforms and index decisions.
//!
//! # Primary responsibilities
//! - **PanelStrip**: validated snapshot of tab geometry for one container width.
//! - **TransformEngine**: three-pointer tracking of the indicator across panels.
//! - **Reconciler**: authoritative selected index without scroll/index echo.
//! - **Easing**: curves for programmatic scroll animation.
//!
//! # How it fits in the system
//! `tabflow-runtime` wires these pieces to host collaborators (geometry
//! provider, scroll driver, touch signal) behind `IndicatorController`.

pub mod easing;
pub mod engine;
pub mod geometry;
pub mod reconcile;

pub use easing::{EasingFn, EasingKind};
pub use engine::{
    DEFAULT_SNAP_EPSILON, Direction, Step, TrackingState, Transform, TransformEngine, WorkingTabs,
    scale_toward,
};
pub use geometry::{GeometryError, Panel, PanelStrip};
pub use reconcile::{
    IndexChange, IndexOrigin, Phase, Reaction, Reconciler, ScrollCommand, ScrollObservation,
    ScrollTicket, SelectError, SettleEffects, Settlement,
};
