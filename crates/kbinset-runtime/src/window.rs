#![forbid(unsafe_code)]

//! Window metrics and scoped metrics observers.
//!
//! The embedder forwards every platform metrics change (keyboard inset,
//! screen size) to [`WindowMetricsHub::dispatch`]. Components register with
//! [`WindowMetricsHub::observe`] and receive a [`MetricsObserver`] handle;
//! dropping the handle deregisters the callback deterministically.
//!
//! # Invariants
//!
//! 1. Observers are called in registration order.
//! 2. An observer deregistered during a dispatch is not called for any
//!    later dispatch.
//! 3. `current()` always reflects the most recent dispatch, including while
//!    observers for that dispatch are running.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

/// Window metrics relevant to keyboard avoidance, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowMetrics {
    /// Height of the region obscured by the software keyboard.
    pub view_inset_bottom: f64,
    /// Full screen (window) height.
    pub screen_height: f64,
}

impl WindowMetrics {
    #[must_use]
    pub const fn new(view_inset_bottom: f64, screen_height: f64) -> Self {
        Self {
            view_inset_bottom,
            screen_height,
        }
    }

    /// Whether the keyboard currently occupies any space.
    #[must_use]
    pub fn keyboard_visible(&self) -> bool {
        self.view_inset_bottom > 0.0
    }
}

type MetricsCallback = Rc<dyn Fn(&WindowMetrics)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    observers: Vec<(u64, MetricsCallback)>,
    current: Option<WindowMetrics>,
}

/// Fan-out point for window metrics changes.
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct WindowMetricsHub {
    inner: Rc<RefCell<HubInner>>,
}

impl WindowMetricsHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recently dispatched metrics, if any.
    #[must_use]
    pub fn current(&self) -> Option<WindowMetrics> {
        self.inner.borrow().current
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Register `callback` for every future dispatch.
    #[must_use = "dropping the handle deregisters the observer"]
    pub fn observe(&self, callback: impl Fn(&WindowMetrics) + 'static) -> MetricsObserver {
        let id = {
            let mut inner = self.inner.borrow_mut();
            inner.next_id += 1;
            let id = inner.next_id;
            inner.observers.push((id, Rc::new(callback)));
            id
        };
        debug!(observer = id, "metrics observer registered");
        MetricsObserver {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Record new metrics and notify every observer.
    pub fn dispatch(&self, metrics: WindowMetrics) {
        let callbacks: Vec<(u64, MetricsCallback)> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = Some(metrics);
            inner
                .observers
                .iter()
                .map(|(id, cb)| (*id, Rc::clone(cb)))
                .collect()
        };
        debug!(
            view_inset_bottom = metrics.view_inset_bottom,
            screen_height = metrics.screen_height,
            observers = callbacks.len(),
            "window metrics changed"
        );
        for (id, cb) in callbacks {
            // Skip observers removed by an earlier callback in this pass.
            let live = self.inner.borrow().observers.iter().any(|(i, _)| *i == id);
            if live {
                cb(&metrics);
            }
        }
    }
}

impl std::fmt::Debug for WindowMetricsHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("WindowMetricsHub")
            .field("observers", &inner.observers.len())
            .field("current", &inner.current)
            .finish()
    }
}

/// Registration handle returned by [`WindowMetricsHub::observe`].
///
/// Deregisters on drop or on [`MetricsObserver::cancel`].
pub struct MetricsObserver {
    id: u64,
    hub: Weak<RefCell<HubInner>>,
}

impl MetricsObserver {
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Deregister now.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for MetricsObserver {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.borrow_mut().observers.retain(|(id, _)| *id != self.id);
            debug!(observer = self.id, "metrics observer deregistered");
        }
    }
}

impl std::fmt::Debug for MetricsObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsObserver")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
