#![forbid(unsafe_code)]

//! Keyboard visibility notifier.
//!
//! Emits boolean transitions only: a stream of metrics with a growing inset
//! produces a single `true`, and the first zero inset produces a single
//! `false`.

use tracing::debug;

use crate::reactive::{Observable, Subscription};
use crate::window::{MetricsObserver, WindowMetricsHub};

/// Keyboard visible/hidden state with change subscriptions.
#[derive(Debug)]
pub struct KeyboardVisibility {
    visible: Observable<bool>,
    _observer: Option<MetricsObserver>,
}

impl KeyboardVisibility {
    /// A notifier fed manually through [`set_visible`](Self::set_visible),
    /// for embedders with a native keyboard signal.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            visible: Observable::new(false),
            _observer: None,
        }
    }

    /// Derive visibility from `view_inset_bottom > 0` on every dispatch.
    #[must_use]
    pub fn attach(hub: &WindowMetricsHub) -> Self {
        let initial = hub.current().is_some_and(|m| m.keyboard_visible());
        let visible = Observable::new(initial);
        let sink = visible.clone();
        let observer = hub.observe(move |metrics| {
            let now = metrics.keyboard_visible();
            if sink.get() != now {
                debug!(visible = now, "keyboard visibility changed");
            }
            sink.set(now);
        });
        Self {
            visible,
            _observer: Some(observer),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Override the derived state.
    pub fn set_visible(&self, visible: bool) {
        self.visible.set(visible);
    }

    /// Called with the new state on every transition.
    pub fn subscribe(&self, callback: impl Fn(bool) + 'static) -> Subscription {
        self.visible.subscribe(move |v| callback(*v))
    }

    /// Number of transitions so far.
    #[must_use]
    pub fn transitions(&self) -> u64 {
        self.visible.version()
    }
}
