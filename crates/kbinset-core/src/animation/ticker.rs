#![forbid(unsafe_code)]

//! Ticker registrations: the seam between animations and a frame source.
//!
//! A [`TickerProvider`] (typically the runtime's frame scheduler) drives
//! registered animations once per frame. Registering returns a [`Ticker`]
//! guard that owns the registration. Releasing the guard, explicitly via
//! [`Ticker::dispose`] or implicitly on drop, removes the animation from
//! the provider exactly once.

use std::cell::RefCell;
use std::rc::Rc;

use super::Animation;

/// Source of per-frame ticks.
pub trait TickerProvider {
    /// Register `target` to be ticked every frame until the returned
    /// [`Ticker`] is released.
    fn create_ticker(&self, target: Rc<RefCell<dyn Animation>>) -> Ticker;
}

/// Owned ticker registration.
pub struct Ticker {
    id: u64,
    release: Option<Box<dyn FnOnce(u64)>>,
}

impl Ticker {
    /// Wrap a registration. `release` is invoked with `id` exactly once.
    pub fn new(id: u64, release: impl FnOnce(u64) + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    /// Identifier assigned by the provider.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Release the registration now.
    pub fn dispose(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("id", &self.id)
            .field("active", &self.release.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn dispose_releases_once() {
        let calls = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&calls);
        let ticker = Ticker::new(7, move |id| {
            assert_eq!(id, 7);
            c.set(c.get() + 1);
        });
        ticker.dispose();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn drop_releases() {
        let calls = Rc::new(Cell::new(0u32));
        let c = Rc::clone(&calls);
        {
            let _ticker = Ticker::new(1, move |_| c.set(c.get() + 1));
        }
        assert_eq!(calls.get(), 1);
    }
}
