#![forbid(unsafe_code)]

//! Indicator configuration.
//!
//! Captures every tunable of the controller as a single [`IndicatorConfig`]
//! that can be loaded from TOML or JSON at startup (feature `config`).
//!
//! # Loading
//!
//! ```toml
//! # tabflow.toml
//! snap_epsilon = 0.001
//! preemptive = false
//!
//! [scroll]
//! min_duration_ms = 500
//! max_duration_ms = 1000
//! speed_ms_per_1000px = 500.0
//! easing = "ease_in_out_cubic"
//! ```
//!
//! ```rust,ignore
//! let config = IndicatorConfig::from_toml_file("tabflow.toml")?.validated()?;
//! ```
//!
//! # Defaults
//!
//! `IndicatorConfig::default()` matches the hardcoded behavior of the
//! engine and the reference scroll animation.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use tabflow_core::{DEFAULT_SNAP_EPSILON, EasingKind, TransformEngine};
use web_time::Duration;

use crate::tween::ScrollAnimation;

// ---------------------------------------------------------------------------
// Top-level IndicatorConfig
// ---------------------------------------------------------------------------

/// Controller configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct IndicatorConfig {
    /// Hysteresis band around integral scroll positions, in panel units.
    pub snap_epsilon: f64,

    /// Commit the selected index at the midpoint while the user is touching.
    pub preemptive: bool,

    /// Programmatic scroll animation.
    pub scroll: ScrollAnimationConfig,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            snap_epsilon: DEFAULT_SNAP_EPSILON,
            preemptive: false,
            scroll: ScrollAnimationConfig::default(),
        }
    }
}

/// Programmatic scroll animation parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ScrollAnimationConfig {
    /// Shortest animation, however close the target.
    pub min_duration_ms: u64,
    /// Longest animation, however far the target.
    pub max_duration_ms: u64,
    /// Animation time per 1000px of distance.
    pub speed_ms_per_1000px: f64,
    /// Easing curve.
    pub easing: EasingKind,
}

impl Default for ScrollAnimationConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 500,
            max_duration_ms: 1000,
            speed_ms_per_1000px: 500.0,
            easing: EasingKind::EaseInOutCubic,
        }
    }
}

impl IndicatorConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSer)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.snap_epsilon.is_finite() && (0.0..0.5).contains(&self.snap_epsilon)) {
            errors.push(format!(
                "snap_epsilon must be in [0, 0.5), got {}",
                self.snap_epsilon
            ));
        }

        if self.scroll.min_duration_ms > self.scroll.max_duration_ms {
            errors.push(format!(
                "scroll.min_duration_ms ({}) must be <= scroll.max_duration_ms ({})",
                self.scroll.min_duration_ms, self.scroll.max_duration_ms
            ));
        }

        if !(self.scroll.speed_ms_per_1000px.is_finite() && self.scroll.speed_ms_per_1000px >= 0.0)
        {
            errors.push(format!(
                "scroll.speed_ms_per_1000px must be >= 0, got {}",
                self.scroll.speed_ms_per_1000px
            ));
        }

        errors
    }

    /// Return `self` if valid, or every validation error at once.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Engine tuned by this config.
    #[must_use]
    pub fn engine(&self) -> TransformEngine {
        TransformEngine::new().with_snap_epsilon(self.snap_epsilon)
    }

    /// Scroll animation described by this config.
    #[must_use]
    pub fn scroll_animation(&self) -> ScrollAnimation {
        ScrollAnimation {
            min_duration: Duration::from_millis(self.scroll.min_duration_ms),
            max_duration: Duration::from_millis(self.scroll.max_duration_ms),
            speed_ms_per_1000px: self.scroll.speed_ms_per_1000px,
            easing: self.scroll.easing,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors from loading or validating an [`IndicatorConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config")]
    TomlSer(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::TomlSer(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
