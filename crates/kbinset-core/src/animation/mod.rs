#![forbid(unsafe_code)]

//! Animation primitives: the [`Animation`] trait, easing curves, interval
//! remapping, tickers, and the keyboard animation controller.
//!
//! # Invariants
//!
//! 1. Every easing maps 0.0 → 0.0 and 1.0 → 1.0, and clamps its input to
//!    [0.0, 1.0] first.
//! 2. [`Interval::transform`] output is always in [0.0, 1.0].
//! 3. `Animation::value()` of every type in this module is in [0.0, 1.0].

pub mod controller;
pub mod ticker;

use std::time::Duration;

pub use controller::{AnimationStatus, KeyboardAnimationController};
pub use ticker::{Ticker, TickerProvider};

/// A time-driven animation producing a normalized value.
pub trait Animation {
    /// Advance by `dt`.
    fn tick(&mut self, dt: Duration);

    /// Whether the animation has nothing left to do until it is retargeted.
    fn is_complete(&self) -> bool;

    /// Current value in [0.0, 1.0].
    fn value(&self) -> f32;

    /// Return to the initial state.
    fn reset(&mut self);

    /// Time left over from the last tick that crossed completion.
    fn overshoot(&self) -> Duration {
        Duration::ZERO
    }
}

/// Plain easing function signature.
pub type EasingFn = fn(f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Quadratic ease-in.
#[inline]
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t
}

/// Quadratic ease-out.
#[inline]
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Cubic S-curve.
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let inv = -2.0 * t + 2.0;
        1.0 - inv * inv * inv / 2.0
    }
}

#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Named easing curve, usable in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Easing {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOut,
    EaseInCubic,
    EaseOutCubic,
}

impl Easing {
    /// The function backing this curve.
    pub const fn function(self) -> EasingFn {
        match self {
            Self::Linear => linear,
            Self::EaseInQuad => ease_in,
            Self::EaseOutQuad => ease_out,
            Self::EaseInOut => ease_in_out,
            Self::EaseInCubic => ease_in_cubic,
            Self::EaseOutCubic => ease_out_cubic,
        }
    }

    /// Apply the easing to a progress value (clamped to [0.0, 1.0]).
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }
}

/// Sub-range of a parent timeline.
///
/// A parent progress of `begin` maps to 0.0 and `end` maps to 1.0; values
/// outside the range clamp. The eased result is then passed through
/// `easing`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub begin: f32,
    pub end: f32,
    pub easing: Easing,
}

impl Interval {
    #[must_use]
    pub const fn new(begin: f32, end: f32) -> Self {
        Self {
            begin,
            end,
            easing: Easing::Linear,
        }
    }

    /// Set the curve applied inside the interval (builder pattern).
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Remap a parent progress value into this interval.
    pub fn transform(&self, parent: f32) -> f32 {
        let span = self.end - self.begin;
        let local = if span.abs() <= f32::EPSILON {
            if parent < self.begin { 0.0 } else { 1.0 }
        } else {
            (parent - self.begin) / span
        };
        self.easing.apply(local)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}
