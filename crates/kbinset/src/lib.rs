#![forbid(unsafe_code)]

//! kbinset public facade crate.
//!
//! Re-exports the types needed to mount a keyboard-attachable spacer and
//! drive it from window metrics, plus a prelude for day-to-day usage.
//!
//! ```ignore
//! use kbinset::prelude::*;
//!
//! let hub = WindowMetricsHub::new();
//! let scheduler = FrameScheduler::new();
//! let mut state = KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::current());
//! let widget = KeyboardAttachable::new().child(Placeholder::new("composer"));
//!
//! hub.dispatch(WindowMetrics::new(300.0, 800.0));
//! scheduler.advance(std::time::Duration::from_millis(16));
//! widget.render(area, &mut frame, &mut state);
//! state.unmount();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use kbinset_core::animation::{
    AnimationStatus, Easing, Interval, KeyboardAnimationController, Ticker, TickerProvider,
};
pub use kbinset_core::color::Color;
pub use kbinset_core::geometry::Rect;
pub use kbinset_core::inset::{AnimationData, InsetTracker, ZeroInsetPolicy};
pub use kbinset_core::platform::{CurveFamily, KeyboardCurve, Platform};

// --- Runtime re-exports ----------------------------------------------------

pub use kbinset_runtime::{
    ConfigError, FrameScheduler, InsetConfig, KeyboardVisibility, WindowMetrics, WindowMetricsHub,
};

// --- Widget re-exports -----------------------------------------------------

pub use kbinset_widgets::frame::{DrawOp, Frame};
pub use kbinset_widgets::{
    ColoredBox, KeyboardAttachable, KeyboardAttachableState, Placeholder, SizeTransition,
    StatefulWidget, TransitionContext, Widget,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for kbinset apps.
#[derive(Debug)]
pub enum Error {
    /// Configuration could not be loaded or failed validation.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for kbinset APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load an [`InsetConfig`] from a TOML file.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<InsetConfig> {
    Ok(InsetConfig::from_toml_file(path)?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Color, Error, Frame, FrameScheduler, KeyboardAttachable, KeyboardAttachableState,
        KeyboardCurve, Placeholder, Platform, Rect, Result, StatefulWidget, Widget, WindowMetrics,
        WindowMetricsHub, ZeroInsetPolicy,
    };

    pub use crate::{core, runtime, widgets};
}

pub use kbinset_core as core;
pub use kbinset_runtime as runtime;
pub use kbinset_widgets as widgets;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use std::time::Duration;

    #[test]
    fn prelude_covers_mount_render_unmount() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let mut state =
            KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        let widget = KeyboardAttachable::new()
            .background_color(Color::BLACK)
            .child(Placeholder::new("composer"));
        let area = Rect::new(0.0, 0.0, 360.0, 800.0);
        let mut frame = Frame::new(360.0, 800.0);

        widget.render(area, &mut frame, &mut state);
        hub.dispatch(WindowMetrics::new(300.0, 800.0));
        for _ in 0..20 {
            scheduler.advance(Duration::from_millis(16));
        }
        frame.clear();
        widget.render(area, &mut frame, &mut state);

        assert_eq!(frame.filled_height(Color::BLACK), 300.0);
        state.unmount();
    }

    #[test]
    fn config_error_converts() {
        let err: Error = crate::ConfigError::Validation(vec!["bad".into()]).into();
        assert_eq!(err.to_string(), "validation errors: bad");
        assert!(std::error::Error::source(&err).is_some());
    }
}
