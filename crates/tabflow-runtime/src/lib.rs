#![forbid(unsafe_code)]

//! Runtime: wires the pure core to a host.
//!
//! # Role in tabflow
//! `tabflow-runtime` owns the stateful [`IndicatorController`]. Hosts
//! implement [`GeometryProvider`] and [`ScrollDriver`] (or use the bundled
//! [`StaticGeometry`] and [`TweenDriver`]) and forward scroll, resize and
//! settlement events to it.
//!
//! # Logging
//! Events are emitted through `tracing` under the `tabflow.controller` and
//! `tabflow.tween` targets. Enable the `core-tracing` feature to also see
//! `tabflow.engine` and `tabflow.reconcile`.

pub mod config;
pub mod controller;
pub mod driver;
pub mod tween;

pub use config::{ConfigError, IndicatorConfig, ScrollAnimationConfig};
pub use controller::{IndicatorController, IndicatorFrame};
pub use driver::{
    GeometryProvider, NoTouch, ScrollDriver, ScrollDriverError, ScrollRequest, ScrollSettlement,
    StaticGeometry, TouchSignal, measure_strip, settlement_of,
};
pub use tween::{ScrollAnimation, ScrollTween, TweenDriver};
