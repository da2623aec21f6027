#![forbid(unsafe_code)]

//! Platform detection and the native keyboard curve table.
//!
//! Each platform family animates its software keyboard with a fixed
//! duration and curve. [`select`] maps a [`Platform`] to the
//! [`KeyboardCurve`] the layout spacer should follow. iOS uses the
//! Cupertino curve; every other platform falls through to Material.
//!
//! Adding a family means adding a [`CurveFamily`] variant, its
//! [`KeyboardCurve`] constant, and a match arm in
//! [`Platform::curve_family`].

use std::time::Duration;

use crate::animation::Easing;

/// Host platform identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
    Android,
    MacOs,
    Windows,
    Linux,
    Web,
    Other,
}

impl Platform {
    /// Platform of the running binary, resolved from the compilation target.
    #[must_use]
    pub fn current() -> Self {
        if cfg!(target_os = "ios") {
            Self::Ios
        } else if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Other
        }
    }

    /// Parse a platform identifier (case-insensitive). Unknown names map
    /// to [`Platform::Other`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "ios" | "iphoneos" => Self::Ios,
            "android" => Self::Android,
            "macos" | "osx" | "darwin" => Self::MacOs,
            "windows" | "win32" => Self::Windows,
            "linux" => Self::Linux,
            "web" | "wasm" | "wasm32" => Self::Web,
            _ => Self::Other,
        }
    }

    /// Which curve family this platform's keyboard follows.
    #[must_use]
    pub const fn curve_family(self) -> CurveFamily {
        match self {
            Self::Ios => CurveFamily::Cupertino,
            _ => CurveFamily::Material,
        }
    }
}

/// Keyboard animation families with published timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurveFamily {
    Cupertino,
    Material,
}

impl CurveFamily {
    #[must_use]
    pub const fn curve(self) -> KeyboardCurve {
        match self {
            Self::Cupertino => KeyboardCurve::CUPERTINO,
            Self::Material => KeyboardCurve::MATERIAL,
        }
    }
}

/// Duration and easing of a platform's keyboard show/hide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardCurve {
    pub duration: Duration,
    pub easing: Easing,
}

impl KeyboardCurve {
    /// iOS keyboard: 250ms standard ease-in-out.
    pub const CUPERTINO: KeyboardCurve = KeyboardCurve {
        duration: Duration::from_millis(250),
        easing: Easing::EaseInOut,
    };

    /// Android and fallback: 300ms, gentle quadratic deceleration.
    pub const MATERIAL: KeyboardCurve = KeyboardCurve {
        duration: Duration::from_millis(300),
        easing: Easing::EaseOutQuad,
    };

    #[must_use]
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

/// Curve table lookup.
#[must_use]
pub const fn select(platform: Platform) -> KeyboardCurve {
    platform.curve_family().curve()
}
