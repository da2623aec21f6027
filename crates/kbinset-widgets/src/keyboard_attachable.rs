#![forbid(unsafe_code)]

//! Keyboard-attachable spacer.
//!
//! [`KeyboardAttachable`] is the immutable configuration (background color,
//! transition builder, child). [`KeyboardAttachableState`] is the mounted
//! part: it owns the animation controller, listens to window metrics and
//! keyboard visibility, and publishes [`AnimationData`] for rendering.
//!
//! # Data flow
//!
//! ```text
//! WindowMetricsHub::dispatch
//!   ├─ KeyboardVisibility ── true ─▶ controller.forward()
//!   │                     └─ false ▶ controller.reverse()
//!   └─ InsetTracker::update(bounds) ─▶ Observable<AnimationData>
//!
//! render: spacer = bottom_inset × Interval(animation_begin, 1).transform(progress)
//! ```
//!
//! # Invariants
//!
//! 1. Until the first render the tracked bounds are [`Rect::ZERO`].
//! 2. With [`ZeroInsetPolicy::Retain`] a dismissed keyboard never replaces
//!    the published data; the spacer collapses through the reverse
//!    animation alone.
//! 3. [`KeyboardAttachableState::unmount`] deregisters the metrics observer,
//!    drops the visibility subscription and disposes the controller exactly
//!    once.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kbinset_core::animation::{Interval, KeyboardAnimationController, TickerProvider};
use kbinset_core::color::Color;
use kbinset_core::geometry::Rect;
use kbinset_core::inset::{AnimationData, InsetTracker, ZeroInsetPolicy};
use kbinset_core::platform::{KeyboardCurve, Platform};
use kbinset_runtime::{
    InsetConfig, KeyboardVisibility, MetricsObserver, Observable, Subscription, WindowMetrics,
    WindowMetricsHub,
};
use tracing::{debug, warn};

use crate::colored_box::ColoredBox;
use crate::frame::Frame;
use crate::size_transition::SizeTransition;
use crate::{StatefulWidget, Widget};

/// Animation state handed to a [`TransitionBuilder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionContext {
    /// Eased controller progress in [0.0, 1.0].
    pub progress: f32,
    /// Currently published bottom inset.
    pub keyboard_height: f64,
}

/// Wraps the child in an arbitrary transition.
pub trait TransitionBuilder {
    fn build(
        &self,
        child: Option<&dyn Widget>,
        ctx: TransitionContext,
        area: Rect,
        frame: &mut Frame,
    );
}

impl<F> TransitionBuilder for F
where
    F: Fn(Option<&dyn Widget>, TransitionContext, Rect, &mut Frame),
{
    fn build(
        &self,
        child: Option<&dyn Widget>,
        ctx: TransitionContext,
        area: Rect,
        frame: &mut Frame,
    ) {
        self(child, ctx, area, frame);
    }
}

/// Renders the child unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl TransitionBuilder for Passthrough {
    fn build(
        &self,
        child: Option<&dyn Widget>,
        _ctx: TransitionContext,
        area: Rect,
        frame: &mut Frame,
    ) {
        if let Some(child) = child {
            child.render(area, frame);
        }
    }
}

/// A child with a keyboard-tracking spacer underneath.
///
/// # Example
///
/// ```ignore
/// let widget = KeyboardAttachable::new()
///     .background_color(Color::BLACK)
///     .child(Placeholder::new("composer"));
/// widget.render(area, &mut frame, &mut state);
/// ```
pub struct KeyboardAttachable {
    background_color: Color,
    transition_builder: Box<dyn TransitionBuilder>,
    child: Option<Box<dyn Widget>>,
}

impl Default for KeyboardAttachable {
    fn default() -> Self {
        Self {
            background_color: Color::TRANSPARENT,
            transition_builder: Box::new(Passthrough),
            child: None,
        }
    }
}

impl KeyboardAttachable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color of the spacer.
    #[must_use]
    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Wrap the child with a closure-based transition.
    #[must_use]
    pub fn transition_builder<F>(mut self, builder: F) -> Self
    where
        F: Fn(Option<&dyn Widget>, TransitionContext, Rect, &mut Frame) + 'static,
    {
        self.transition_builder = Box::new(builder);
        self
    }

    /// Wrap the child with a [`TransitionBuilder`] implementation.
    #[must_use]
    pub fn transition(mut self, builder: impl TransitionBuilder + 'static) -> Self {
        self.transition_builder = Box::new(builder);
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Widget + 'static) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    pub fn get_background_color(&self) -> Color {
        self.background_color
    }

    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }
}

impl std::fmt::Debug for KeyboardAttachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyboardAttachable")
            .field("background_color", &self.background_color)
            .field("has_child", &self.child.is_some())
            .finish_non_exhaustive()
    }
}

impl StatefulWidget for KeyboardAttachable {
    type State = KeyboardAttachableState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "KeyboardAttachable",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        state.set_bounds(area);

        let data = state.animation_data();
        let spacer = SizeTransition::new(data.bottom_inset, ColoredBox::new(self.background_color))
            .factor(state.spacer_factor());
        let (above, _) = area.split_bottom(spacer.visible_extent());

        let ctx = TransitionContext {
            progress: state.progress(),
            keyboard_height: data.bottom_inset,
        };
        self.transition_builder
            .build(self.child.as_deref(), ctx, above, frame);
        spacer.render(area, frame);
    }
}

/// Mounted state of a [`KeyboardAttachable`].
#[derive(Debug)]
pub struct KeyboardAttachableState {
    controller: Rc<KeyboardAnimationController>,
    data: Observable<AnimationData>,
    tracker: Rc<RefCell<InsetTracker>>,
    bounds: Rc<Cell<Rect>>,
    hub: WindowMetricsHub,
    visibility: KeyboardVisibility,
    visibility_sub: Subscription,
    metrics: MetricsObserver,
}

impl KeyboardAttachableState {
    /// Create the controller on `vsync` and start listening to `hub`.
    ///
    /// Keyboard visibility is derived from the hub's metrics. If the
    /// keyboard is already up, the controller starts completed and the
    /// current metrics are applied immediately.
    pub fn mount(
        hub: &WindowMetricsHub,
        vsync: &dyn TickerProvider,
        curve: KeyboardCurve,
        policy: ZeroInsetPolicy,
    ) -> Self {
        Self::mount_with_visibility(hub, vsync, KeyboardVisibility::attach(hub), curve, policy)
    }

    /// Like [`mount`](Self::mount), but forward/reverse follow `visibility`
    /// instead of the inset. Pass a [`KeyboardVisibility::detached`]
    /// notifier to drive the animation from a native keyboard signal
    /// through [`visibility`](Self::visibility).
    pub fn mount_with_visibility(
        hub: &WindowMetricsHub,
        vsync: &dyn TickerProvider,
        visibility: KeyboardVisibility,
        curve: KeyboardCurve,
        policy: ZeroInsetPolicy,
    ) -> Self {
        let controller = Rc::new(KeyboardAnimationController::new(curve, vsync));
        let data = Observable::new(AnimationData::default());
        let tracker = Rc::new(RefCell::new(InsetTracker::new(policy)));
        let bounds = Rc::new(Cell::new(Rect::ZERO));

        if visibility.is_visible() {
            controller.set_value(1.0);
        }
        let weak = Rc::downgrade(&controller);
        let visibility_sub = visibility.subscribe(move |visible| {
            let Some(controller) = weak.upgrade() else {
                return;
            };
            if visible {
                controller.forward();
            } else {
                controller.reverse();
            }
        });

        let metrics = {
            let data = data.clone();
            let tracker = Rc::clone(&tracker);
            let bounds = Rc::clone(&bounds);
            hub.observe(move |m| apply_metrics(&tracker, &data, bounds.get(), m))
        };

        if let Some(current) = hub.current() {
            apply_metrics(&tracker, &data, bounds.get(), &current);
        }
        debug!(
            duration_ms = curve.duration.as_millis() as u64,
            ?policy,
            "keyboard attachable mounted"
        );

        Self {
            controller,
            data,
            tracker,
            bounds,
            hub: hub.clone(),
            visibility,
            visibility_sub,
            metrics,
        }
    }

    /// Mount with the built-in curve for `platform` and the retaining gate.
    pub fn mount_for_platform(
        hub: &WindowMetricsHub,
        vsync: &dyn TickerProvider,
        platform: Platform,
    ) -> Self {
        Self::mount(
            hub,
            vsync,
            kbinset_core::platform::select(platform),
            ZeroInsetPolicy::default(),
        )
    }

    /// Mount with the curve and gate taken from `config`.
    pub fn mount_with_config(
        hub: &WindowMetricsHub,
        vsync: &dyn TickerProvider,
        platform: Platform,
        config: &InsetConfig,
    ) -> Self {
        Self::mount(hub, vsync, config.curve_for(platform), config.zero_inset)
    }

    /// Last published inset geometry.
    pub fn animation_data(&self) -> AnimationData {
        self.data.get()
    }

    /// The observable behind [`animation_data`](Self::animation_data).
    pub fn data(&self) -> &Observable<AnimationData> {
        &self.data
    }

    /// Eased controller progress.
    pub fn progress(&self) -> f32 {
        self.controller.progress()
    }

    /// Fraction of `bottom_inset` the spacer currently occupies.
    pub fn spacer_factor(&self) -> f32 {
        let begin = self.data.with(|d| d.animation_begin) as f32;
        Interval::new(begin, 1.0)
            .transform(self.controller.progress())
            .clamp(0.0, 1.0)
    }

    pub fn spacer_height(&self) -> f64 {
        self.data.with(|d| d.bottom_inset).max(0.0) * f64::from(self.spacer_factor())
    }

    /// Bounds from the most recent layout.
    pub fn bounds(&self) -> Rect {
        self.bounds.get()
    }

    pub fn controller(&self) -> &KeyboardAnimationController {
        &self.controller
    }

    pub fn is_keyboard_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// The notifier driving forward/reverse.
    pub fn visibility(&self) -> &KeyboardVisibility {
        &self.visibility
    }

    /// Number of metrics updates withheld by the zero-inset gate.
    pub fn skipped_updates(&self) -> u64 {
        self.tracker.borrow().skipped()
    }

    /// Record the laid-out bounds. A change recomputes the inset against
    /// the current metrics.
    pub fn set_bounds(&self, area: Rect) {
        if self.bounds.get() == area {
            return;
        }
        self.bounds.set(area);
        if let Some(current) = self.hub.current() {
            apply_metrics(&self.tracker, &self.data, area, &current);
        }
    }

    /// Tear down: deregister from the hub, drop the visibility
    /// subscription and dispose the controller.
    pub fn unmount(self) {
        let Self {
            controller,
            visibility_sub,
            metrics,
            visibility,
            ..
        } = self;
        metrics.cancel();
        drop(visibility_sub);
        drop(visibility);
        match Rc::try_unwrap(controller) {
            Ok(controller) => controller.dispose(),
            Err(_) => warn!("keyboard controller still shared at unmount"),
        }
        debug!("keyboard attachable unmounted");
    }
}

fn apply_metrics(
    tracker: &RefCell<InsetTracker>,
    data: &Observable<AnimationData>,
    bounds: Rect,
    metrics: &WindowMetrics,
) {
    let published = {
        let mut tracker = tracker.borrow_mut();
        tracker
            .update(metrics.view_inset_bottom, metrics.screen_height, bounds)
            .then(|| tracker.current())
    };
    match published {
        Some(next) => {
            debug!(
                bottom_inset = next.bottom_inset,
                animation_begin = next.animation_begin,
                "animation data published"
            );
            data.set(next);
        }
        None => debug!(
            keyboard_height = metrics.view_inset_bottom,
            "animation data unchanged: zero inset"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::Placeholder;
    use kbinset_core::animation::AnimationStatus;
    use kbinset_runtime::FrameScheduler;
    use std::time::Duration;

    const SCREEN: f64 = 800.0;
    const MS_16: Duration = Duration::from_millis(16);

    fn settle(scheduler: &FrameScheduler) {
        for _ in 0..64 {
            scheduler.advance(MS_16);
        }
    }

    #[test]
    fn defaults() {
        let widget = KeyboardAttachable::default();
        assert_eq!(widget.get_background_color(), Color::TRANSPARENT);
        assert!(!widget.has_child());
    }

    #[test]
    fn bounds_are_zero_before_layout() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        assert_eq!(state.bounds(), Rect::ZERO);
        assert_eq!(state.animation_data(), AnimationData::default());
        state.unmount();
    }

    #[test]
    fn flush_widget_gets_full_keyboard_height() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        state.set_bounds(Rect::new(0.0, 0.0, 360.0, SCREEN));

        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        assert_eq!(state.animation_data(), AnimationData::new(0.0, 300.0));
        assert!(state.controller().is_animating());

        settle(&scheduler);
        assert_eq!(state.spacer_height(), 300.0);
        state.unmount();
    }

    #[test]
    fn dismissed_keyboard_retains_inset_and_reverses() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        state.set_bounds(Rect::new(0.0, 0.0, 360.0, SCREEN));

        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        settle(&scheduler);
        hub.dispatch(WindowMetrics::new(0.0, SCREEN));

        assert_eq!(state.animation_data().bottom_inset, 300.0);
        assert_eq!(state.skipped_updates(), 1);
        assert!(!state.is_keyboard_visible());
        settle(&scheduler);
        assert_eq!(state.spacer_height(), 0.0);
        state.unmount();
    }

    #[test]
    fn publish_policy_delivers_zero_frame() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount(
            &hub,
            &scheduler,
            KeyboardCurve::MATERIAL,
            ZeroInsetPolicy::Publish,
        );
        state.set_bounds(Rect::new(0.0, 0.0, 360.0, SCREEN));
        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        hub.dispatch(WindowMetrics::new(0.0, SCREEN));
        assert_eq!(state.animation_data(), AnimationData::default());
        assert_eq!(state.skipped_updates(), 0);
        state.unmount();
    }

    #[test]
    fn already_open_keyboard_starts_completed() {
        let hub = WindowMetricsHub::new();
        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Android);
        assert!(state.is_keyboard_visible());
        assert_eq!(state.progress(), 1.0);
        state.unmount();
    }

    #[test]
    fn native_visibility_signal_drives_controller() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_with_visibility(
            &hub,
            &scheduler,
            KeyboardVisibility::detached(),
            KeyboardCurve::CUPERTINO,
            ZeroInsetPolicy::Retain,
        );
        assert_eq!(hub.observer_count(), 1, "only the metrics observer");

        state.visibility().set_visible(true);
        assert_eq!(state.controller().status(), AnimationStatus::Forward);
        assert!(state.is_keyboard_visible());

        settle(&scheduler);
        assert_eq!(state.controller().status(), AnimationStatus::Completed);
        state.visibility().set_visible(false);
        assert_eq!(state.controller().status(), AnimationStatus::Reverse);
        state.unmount();
        assert_eq!(hub.observer_count(), 0);
    }

    #[test]
    fn native_visibility_ignores_metrics_for_direction() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_with_visibility(
            &hub,
            &scheduler,
            KeyboardVisibility::detached(),
            KeyboardCurve::MATERIAL,
            ZeroInsetPolicy::Retain,
        );
        state.set_bounds(Rect::new(0.0, 0.0, 360.0, SCREEN));

        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        assert_eq!(state.animation_data().bottom_inset, 300.0);
        assert_eq!(state.controller().status(), AnimationStatus::Dismissed);
        state.unmount();
    }

    #[test]
    fn unmount_releases_everything() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let state = KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        assert_eq!(scheduler.active_tickers(), 1);
        assert_eq!(hub.observer_count(), 2);

        state.unmount();
        assert_eq!(scheduler.active_tickers(), 0);
        assert_eq!(hub.observer_count(), 0);
    }

    #[test]
    fn render_places_child_above_spacer() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let mut state =
            KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        let widget = KeyboardAttachable::new()
            .background_color(Color::BLACK)
            .child(Placeholder::new("composer"));
        let area = Rect::new(0.0, 0.0, 360.0, SCREEN);

        let mut frame = Frame::new(360.0, SCREEN);
        widget.render(area, &mut frame, &mut state);
        assert_eq!(frame.child_area("composer"), Some(area));
        assert_eq!(frame.filled_height(Color::BLACK), 0.0);

        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        settle(&scheduler);

        let mut frame = Frame::new(360.0, SCREEN);
        widget.render(area, &mut frame, &mut state);
        assert_eq!(
            frame.child_area("composer"),
            Some(Rect::new(0.0, 0.0, 360.0, 500.0))
        );
        assert_eq!(frame.filled_height(Color::BLACK), 300.0);
        state.unmount();
    }

    #[test]
    fn transition_builder_sees_progress() {
        let hub = WindowMetricsHub::new();
        let scheduler = FrameScheduler::new();
        let mut state =
            KeyboardAttachableState::mount_for_platform(&hub, &scheduler, Platform::Ios);
        let seen = Rc::new(Cell::new(None));
        let s = Rc::clone(&seen);
        let widget = KeyboardAttachable::new()
            .child(Placeholder::new("child"))
            .transition_builder(move |child, ctx, area, frame| {
                s.set(Some(ctx));
                if let Some(child) = child {
                    child.render(area, frame);
                }
            });
        let area = Rect::new(0.0, 0.0, 360.0, SCREEN);
        widget.render(area, &mut Frame::new(360.0, SCREEN), &mut state);
        hub.dispatch(WindowMetrics::new(300.0, SCREEN));
        settle(&scheduler);
        widget.render(area, &mut Frame::new(360.0, SCREEN), &mut state);

        assert_eq!(
            seen.get(),
            Some(TransitionContext {
                progress: 1.0,
                keyboard_height: 300.0
            })
        );
        state.unmount();
    }
}
