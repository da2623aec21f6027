#![forbid(unsafe_code)]

//! Keyboard inset configuration as data.
//!
//! Captures the tunables of the keyboard widget (zero-inset gating and the
//! per-family curve table) as a single [`InsetConfig`] that can be loaded
//! from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # kbinset.toml
//! zero_inset = "retain"
//!
//! [curves.material]
//! duration_ms = 280
//! easing = "ease_out_cubic"
//! ```
//!
//! ```rust,ignore
//! let config = InsetConfig::from_toml_file("kbinset.toml")?;
//! let config = InsetConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! `InsetConfig::default()` reproduces the built-in curve table and the
//! retaining gate exactly.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use kbinset_core::animation::Easing;
use kbinset_core::inset::ZeroInsetPolicy;
use kbinset_core::platform::{CurveFamily, KeyboardCurve, Platform};

/// Longest curve override accepted by [`InsetConfig::validate`].
pub const MAX_CURVE_DURATION_MS: u64 = 5_000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InsetConfig {
    /// Whether the dismissed (all-zero) frame is published. Default: retain.
    pub zero_inset: ZeroInsetPolicy,
    /// Curve table overrides.
    pub curves: CurveTableConfig,
}

/// One entry per curve family.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CurveTableConfig {
    pub cupertino: CurveConfig,
    pub material: CurveConfig,
}

impl Default for CurveTableConfig {
    fn default() -> Self {
        Self {
            cupertino: CurveConfig::from(KeyboardCurve::CUPERTINO),
            material: CurveConfig::from(KeyboardCurve::MATERIAL),
        }
    }
}

/// Duration and easing for one family.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct CurveConfig {
    pub duration_ms: u64,
    pub easing: Easing,
}

impl From<KeyboardCurve> for CurveConfig {
    fn from(curve: KeyboardCurve) -> Self {
        Self {
            duration_ms: curve.duration.as_millis() as u64,
            easing: curve.easing,
        }
    }
}

impl From<CurveConfig> for KeyboardCurve {
    fn from(config: CurveConfig) -> Self {
        KeyboardCurve::new(Duration::from_millis(config.duration_ms), config.easing)
    }
}

impl InsetConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.into_validated()
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
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.into_validated()
    }

    /// Resolve the curve for `platform` through the family table.
    #[must_use]
    pub fn curve_for(&self, platform: Platform) -> KeyboardCurve {
        match platform.curve_family() {
            CurveFamily::Cupertino => self.curves.cupertino.into(),
            CurveFamily::Material => self.curves.material.into(),
        }
    }

    /// Check every parameter. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for (name, curve) in [
            ("cupertino", &self.curves.cupertino),
            ("material", &self.curves.material),
        ] {
            if curve.duration_ms > MAX_CURVE_DURATION_MS {
                errors.push(format!(
                    "curves.{name}.duration_ms must be <= {MAX_CURVE_DURATION_MS}, got {}",
                    curve.duration_ms
                ));
            }
        }
        errors
    }

    /// `Ok(self)` if [`validate`](Self::validate) finds nothing.
    pub fn into_validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an [`InsetConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
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
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
