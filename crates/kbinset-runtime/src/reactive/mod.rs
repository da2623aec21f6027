#![forbid(unsafe_code)]

//! Reactive state containers.

pub mod observable;

pub use observable::{Observable, Subscription};
