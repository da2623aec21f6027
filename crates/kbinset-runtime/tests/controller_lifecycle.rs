//! Controller lifecycle against the frame scheduler, including the log
//! records emitted on attach, dispose, and leaked drops.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use kbinset_core::animation::{AnimationStatus, KeyboardAnimationController};
use kbinset_core::platform::{KeyboardCurve, Platform};
use kbinset_runtime::FrameScheduler;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

const MS_16: Duration = Duration::from_millis(16);

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<(Level, String)>>>);

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

impl<S: Subscriber> Layer<S> for Captured {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .lock()
            .expect("capture lock")
            .push((*event.metadata().level(), visitor.0));
    }
}

fn capture(run: impl FnOnce()) -> Vec<(Level, String)> {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::registry().with(captured.clone());
    tracing::subscriber::with_default(subscriber, run);
    let records = captured.0.lock().expect("capture lock").clone();
    records
}

#[test]
fn forward_reverse_dispose_leaves_no_tickers() {
    let scheduler = FrameScheduler::new();
    let controller = KeyboardAnimationController::for_platform(Platform::Android, &scheduler);
    assert_eq!(controller.curve(), KeyboardCurve::MATERIAL);

    controller.forward();
    for _ in 0..5 {
        scheduler.advance(MS_16);
    }
    let peak = controller.progress();
    controller.reverse();
    assert_eq!(controller.progress(), peak);
    while scheduler.has_pending_work() {
        scheduler.advance(MS_16);
    }
    assert_eq!(controller.status(), AnimationStatus::Dismissed);

    controller.dispose();
    assert_eq!(scheduler.active_tickers(), 0);
}

#[test]
fn dispose_logs_release() {
    let records = capture(|| {
        let scheduler = FrameScheduler::new();
        let controller = KeyboardAnimationController::new(KeyboardCurve::CUPERTINO, &scheduler);
        controller.dispose();
    });
    assert!(records.iter().any(|(_, m)| m == "ticker registered"));
    assert!(records.iter().any(|(_, m)| m == "keyboard controller disposed"));
    assert!(records.iter().any(|(_, m)| m == "ticker released"));
    assert!(records.iter().all(|(level, _)| *level != Level::WARN));
}

#[test]
fn leaked_controller_warns_and_still_releases() {
    let scheduler = FrameScheduler::new();
    let records = capture(|| {
        let controller = KeyboardAnimationController::new(KeyboardCurve::MATERIAL, &scheduler);
        drop(controller);
    });
    assert_eq!(scheduler.active_tickers(), 0);
    assert!(
        records
            .iter()
            .any(|(level, m)| *level == Level::WARN && m.contains("without dispose"))
    );
}
