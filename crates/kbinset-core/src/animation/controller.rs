#![forbid(unsafe_code)]

//! Keyboard animation controller.
//!
//! Drives a single linear timeline position `t` toward 1.0 ([`forward`]) or
//! 0.0 ([`reverse`]) at the pace of the platform's [`KeyboardCurve`], and
//! exposes the eased value as [`progress`].
//!
//! # Invariants
//!
//! 1. `t` is always in [0.0, 1.0].
//! 2. `forward()`/`reverse()` retarget from the current `t`; `t` never jumps,
//!    and since progress is `easing(t)` the visible value never jumps either.
//! 3. Remaining time after a retarget is proportional to the remaining
//!    distance: `duration × (1 − t)` forward, `duration × t` in reverse.
//! 4. The ticker registration is released exactly once: by [`dispose`] or,
//!    failing that, on drop.
//!
//! # Failure Modes
//!
//! - Zero duration: any tick jumps straight to the target.
//! - Dropping without `dispose()`: the registration is still released, and a
//!   warning is logged when the `tracing` feature is enabled.
//!
//! [`forward`]: KeyboardAnimationController::forward
//! [`reverse`]: KeyboardAnimationController::reverse
//! [`progress`]: KeyboardAnimationController::progress
//! [`dispose`]: KeyboardAnimationController::dispose

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use super::ticker::{Ticker, TickerProvider};
use super::Animation;
use crate::platform::{KeyboardCurve, Platform, select};

/// Where the controller is on its timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Stopped at 0.0.
    Dismissed,
    /// Running (or stopped mid-way) toward 1.0.
    Forward,
    /// Running (or stopped mid-way) toward 0.0.
    Reverse,
    /// Stopped at 1.0.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Reverse,
}

#[derive(Debug)]
struct ControllerState {
    t: f32,
    direction: Direction,
    animating: bool,
    curve: KeyboardCurve,
    overshoot: Duration,
}

impl ControllerState {
    fn new(curve: KeyboardCurve) -> Self {
        Self {
            t: 0.0,
            direction: Direction::Forward,
            animating: false,
            curve,
            overshoot: Duration::ZERO,
        }
    }

    fn target(&self) -> f32 {
        match self.direction {
            Direction::Forward => 1.0,
            Direction::Reverse => 0.0,
        }
    }

    fn start(&mut self, direction: Direction) {
        self.direction = direction;
        self.overshoot = Duration::ZERO;
        self.animating = self.t != self.target();
    }

    fn status(&self) -> AnimationStatus {
        if !self.animating && self.t >= 1.0 {
            AnimationStatus::Completed
        } else if !self.animating && self.t <= 0.0 {
            AnimationStatus::Dismissed
        } else {
            match self.direction {
                Direction::Forward => AnimationStatus::Forward,
                Direction::Reverse => AnimationStatus::Reverse,
            }
        }
    }
}

impl Animation for ControllerState {
    fn tick(&mut self, dt: Duration) {
        if !self.animating {
            return;
        }
        let target = self.target();
        let total = self.curve.duration.as_secs_f64();
        if total <= 0.0 {
            self.t = target;
            self.overshoot = dt;
            self.animating = false;
            return;
        }

        let remaining = f64::from((target - self.t).abs()) * total;
        let step = dt.as_secs_f64();
        if step >= remaining {
            self.t = target;
            self.overshoot = Duration::from_secs_f64(step - remaining);
            self.animating = false;
        } else {
            let delta = (step / total) as f32;
            self.t = match self.direction {
                Direction::Forward => (self.t + delta).min(1.0),
                Direction::Reverse => (self.t - delta).max(0.0),
            };
        }
    }

    fn is_complete(&self) -> bool {
        !self.animating
    }

    fn value(&self) -> f32 {
        self.curve.easing.apply(self.t)
    }

    fn reset(&mut self) {
        self.t = 0.0;
        self.direction = Direction::Forward;
        self.animating = false;
        self.overshoot = Duration::ZERO;
    }

    fn overshoot(&self) -> Duration {
        self.overshoot
    }
}

/// Animation controller configured with a platform keyboard curve.
///
/// Exclusively owned by one widget instance. Interior state is shared with
/// the ticker provider, so all operations take `&self`.
pub struct KeyboardAnimationController {
    state: Rc<RefCell<ControllerState>>,
    ticker: Option<Ticker>,
}

impl KeyboardAnimationController {
    /// Create a controller ticked by `vsync`.
    pub fn new(curve: KeyboardCurve, vsync: &dyn TickerProvider) -> Self {
        let state = Rc::new(RefCell::new(ControllerState::new(curve)));
        let target: Rc<RefCell<dyn Animation>> = state.clone();
        let ticker = vsync.create_ticker(target);
        #[cfg(feature = "tracing")]
        tracing::debug!(ticker = ticker.id(), ?curve, "keyboard controller attached");
        Self {
            state,
            ticker: Some(ticker),
        }
    }

    /// Create a controller with no frame source; drive it with [`tick`](Self::tick).
    #[must_use]
    pub fn unattached(curve: KeyboardCurve) -> Self {
        Self {
            state: Rc::new(RefCell::new(ControllerState::new(curve))),
            ticker: None,
        }
    }

    /// Pick the curve for `platform` and build a controller for it.
    pub fn for_platform(platform: Platform, vsync: &dyn TickerProvider) -> Self {
        Self::new(select(platform), vsync)
    }

    /// Same as [`for_platform`](Self::for_platform) with [`Platform::current`].
    pub fn for_current_platform(vsync: &dyn TickerProvider) -> Self {
        Self::for_platform(Platform::current(), vsync)
    }

    #[must_use]
    pub fn curve(&self) -> KeyboardCurve {
        self.state.borrow().curve
    }

    /// Eased progress in [0.0, 1.0].
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.state.borrow().value()
    }

    /// Raw timeline position in [0.0, 1.0].
    #[must_use]
    pub fn linear_progress(&self) -> f32 {
        self.state.borrow().t
    }

    #[must_use]
    pub fn status(&self) -> AnimationStatus {
        self.state.borrow().status()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state.borrow().animating
    }

    /// Whether a ticker registration is still held.
    #[must_use]
    pub fn has_ticker(&self) -> bool {
        self.ticker.is_some()
    }

    /// Animate toward 1.0 from wherever the timeline is now.
    pub fn forward(&self) {
        self.state.borrow_mut().start(Direction::Forward);
    }

    /// Animate toward 0.0 from wherever the timeline is now.
    pub fn reverse(&self) {
        self.state.borrow_mut().start(Direction::Reverse);
    }

    /// Jump to `t` (clamped) and stop animating.
    pub fn set_value(&self, t: f32) {
        let mut state = self.state.borrow_mut();
        state.t = t.clamp(0.0, 1.0);
        state.animating = false;
    }

    /// Advance manually. Attached controllers are advanced by their ticker
    /// provider; calling this as well would double the pace.
    pub fn tick(&self, dt: Duration) {
        self.state.borrow_mut().tick(dt);
    }

    /// Release the ticker. Consumes the controller.
    pub fn dispose(mut self) {
        if let Some(ticker) = self.ticker.take() {
            #[cfg(feature = "tracing")]
            tracing::debug!(ticker = ticker.id(), "keyboard controller disposed");
            ticker.dispose();
        }
    }
}

impl Drop for KeyboardAnimationController {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                ticker = ticker.id(),
                "keyboard controller dropped without dispose"
            );
            drop(ticker);
        }
    }
}

impl std::fmt::Debug for KeyboardAnimationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("KeyboardAnimationController")
            .field("t", &state.t)
            .field("status", &state.status())
            .field("curve", &state.curve)
            .field("ticker", &self.ticker)
            .finish()
    }
}
