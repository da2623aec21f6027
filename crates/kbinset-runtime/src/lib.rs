#![forbid(unsafe_code)]

//! kbinset runtime
//!
//! The host-side primitives the keyboard widget is driven by.
//!
//! # Key Components
//!
//! - [`FrameScheduler`] - Ticker provider; advances animations once per frame
//! - [`WindowMetricsHub`] - Fan-out of window metrics with scoped observers
//! - [`KeyboardVisibility`] - Boolean keyboard visible/hidden transitions
//! - [`Observable`] - Shared value with change subscriptions
//! - [`InsetConfig`] - Configuration as data (TOML/JSON behind `config`)
//!
//! # Role in kbinset
//! The runtime sits between the embedder and `kbinset-core`: it receives
//! metrics and frame callbacks from the host and turns them into ticks and
//! notifications. Everything is single-threaded and `Rc`-based.

pub mod config;
pub mod reactive;
pub mod scheduler;
pub mod visibility;
pub mod window;

pub use config::{ConfigError, CurveConfig, CurveTableConfig, InsetConfig};
pub use reactive::{Observable, Subscription};
pub use scheduler::{FrameScheduler, MAX_FRAME_DT};
pub use visibility::KeyboardVisibility;
pub use window::{MetricsObserver, WindowMetrics, WindowMetricsHub};
