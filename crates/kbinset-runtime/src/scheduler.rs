#![forbid(unsafe_code)]

//! Frame scheduler: the ticker provider for keyboard animations.
//!
//! The embedder calls [`FrameScheduler::advance`] (deterministic, explicit
//! `dt`) or [`FrameScheduler::pump`] (wall clock) once per frame. Every
//! registered animation that is still running is ticked exactly once.
//!
//! # Invariants
//!
//! 1. Each registration is ticked at most once per frame.
//! 2. A released [`Ticker`] is never ticked again.
//! 3. `pump()` caps the wall-clock delta at [`MAX_FRAME_DT`] so a stalled
//!    frame does not teleport animations to their end.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use kbinset_core::animation::{Animation, Ticker, TickerProvider};
use tracing::{debug, trace};
use web_time::Instant;

/// Largest delta a single `pump()` will feed to animations.
pub const MAX_FRAME_DT: Duration = Duration::from_millis(100);

struct Registration {
    id: u64,
    target: Rc<RefCell<dyn Animation>>,
}

#[derive(Default)]
struct SchedulerInner {
    next_id: u64,
    registrations: Vec<Registration>,
    frames: u64,
    last_frame: Option<Instant>,
}

/// Single-threaded frame source.
///
/// Cloning yields another handle to the same scheduler.
#[derive(Clone, Default)]
pub struct FrameScheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl FrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live ticker registrations.
    #[must_use]
    pub fn active_tickers(&self) -> usize {
        self.inner.borrow().registrations.len()
    }

    /// Frames advanced so far.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.inner.borrow().frames
    }

    /// Whether any registered animation is still running.
    #[must_use]
    pub fn has_pending_work(&self) -> bool {
        self.inner
            .borrow()
            .registrations
            .iter()
            .any(|r| !r.target.borrow().is_complete())
    }

    /// Advance one frame by `dt`. Returns how many animations were ticked.
    pub fn advance(&self, dt: Duration) -> usize {
        let targets: Vec<Rc<RefCell<dyn Animation>>> = {
            let mut inner = self.inner.borrow_mut();
            inner.frames += 1;
            inner
                .registrations
                .iter()
                .map(|r| Rc::clone(&r.target))
                .collect()
        };

        let mut ticked = 0;
        for target in targets {
            let mut animation = target.borrow_mut();
            if animation.is_complete() {
                continue;
            }
            animation.tick(dt);
            ticked += 1;
        }
        trace!(dt_us = dt.as_micros() as u64, ticked, "frame advanced");
        ticked
    }

    /// Advance by the wall-clock time since the previous `pump()`.
    ///
    /// The first call advances by zero. Returns the delta used.
    pub fn pump(&self) -> Duration {
        let now = Instant::now();
        let dt = {
            let mut inner = self.inner.borrow_mut();
            let dt = inner
                .last_frame
                .map_or(Duration::ZERO, |last| now.duration_since(last));
            inner.last_frame = Some(now);
            dt.min(MAX_FRAME_DT)
        };
        self.advance(dt);
        dt
    }

    fn release(inner: &Weak<RefCell<SchedulerInner>>, id: u64) {
        if let Some(inner) = inner.upgrade() {
            inner.borrow_mut().registrations.retain(|r| r.id != id);
            debug!(ticker = id, "ticker released");
        }
    }
}

impl TickerProvider for FrameScheduler {
    fn create_ticker(&self, target: Rc<RefCell<dyn Animation>>) -> Ticker {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.registrations.push(Registration { id, target });
            id
        };
        debug!(ticker = id, "ticker registered");
        let weak = Rc::downgrade(&self.inner);
        Ticker::new(id, move |id| Self::release(&weak, id))
    }
}

impl std::fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameScheduler")
            .field("active_tickers", &inner.registrations.len())
            .field("frames", &inner.frames)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbinset_core::animation::KeyboardAnimationController;
    use kbinset_core::platform::KeyboardCurve;

    const MS_16: Duration = Duration::from_millis(16);

    #[test]
    fn controller_registers_and_disposes() {
        let scheduler = FrameScheduler::new();
        let controller = KeyboardAnimationController::new(KeyboardCurve::CUPERTINO, &scheduler);
        assert_eq!(scheduler.active_tickers(), 1);
        controller.dispose();
        assert_eq!(scheduler.active_tickers(), 0);
    }

    #[test]
    fn advance_drives_controller() {
        let scheduler = FrameScheduler::new();
        let controller = KeyboardAnimationController::new(KeyboardCurve::CUPERTINO, &scheduler);
        assert_eq!(scheduler.advance(MS_16), 0, "idle controller is skipped");

        controller.forward();
        assert!(scheduler.has_pending_work());
        for _ in 0..16 {
            scheduler.advance(MS_16);
        }
        assert_eq!(controller.progress(), 1.0);
        assert!(!scheduler.has_pending_work());
        assert_eq!(scheduler.frame_count(), 17);
        controller.dispose();
    }

    #[test]
    fn released_ticker_is_not_ticked() {
        let scheduler = FrameScheduler::new();
        let a = KeyboardAnimationController::new(KeyboardCurve::MATERIAL, &scheduler);
        let b = KeyboardAnimationController::new(KeyboardCurve::MATERIAL, &scheduler);
        a.forward();
        b.forward();
        b.dispose();
        assert_eq!(scheduler.advance(MS_16), 1);
        assert!(a.progress() > 0.0);
        a.dispose();
    }

    #[test]
    fn ticker_outliving_scheduler_releases_quietly() {
        let scheduler = FrameScheduler::new();
        let controller = KeyboardAnimationController::new(KeyboardCurve::MATERIAL, &scheduler);
        drop(scheduler);
        controller.dispose();
    }

    #[test]
    fn first_pump_is_zero() {
        let scheduler = FrameScheduler::new();
        assert_eq!(scheduler.pump(), Duration::ZERO);
        assert!(scheduler.pump() <= MAX_FRAME_DT);
        assert_eq!(scheduler.frame_count(), 2);
    }
}
