//! Property-based invariant tests for the inset geometry calculator.
//!
//! ## Invariants
//!
//! 1. Clamp: `0 <= bottom_inset <= keyboard_height`
//! 2. Out of reach: `bottom_offset >= keyboard_height` implies `bottom_inset == 0`
//! 3. Dismissed: `keyboard_height == 0` implies `animation_begin == 0`
//! 4. Range: `animation_begin` stays in [0, 1]
//! 5. Idempotence: identical inputs give identical output
//! 6. Retain gating never publishes a zero inset

use kbinset_core::animation::Interval;
use kbinset_core::geometry::Rect;
use kbinset_core::inset::{AnimationData, InsetTracker, ZeroInsetPolicy, compute};
use proptest::prelude::*;

// ── Strategies ────────────────────────────────────────────────────────────

fn arb_height() -> impl Strategy<Value = f64> {
    (0u32..=4000).prop_map(|x| x as f64 / 2.0)
}

fn arb_y() -> impl Strategy<Value = f64> {
    (-1000i32..=5000).prop_map(|x| x as f64 / 2.0)
}

// ── 1-5. Geometry ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn bottom_inset_is_clamped(kb in arb_height(), screen in arb_height(), bottom in arb_y()) {
        let data = compute(kb, screen, bottom);
        prop_assert!(data.bottom_inset >= 0.0);
        prop_assert!(data.bottom_inset <= kb);
    }

    #[test]
    fn out_of_reach_widget_has_no_inset(kb in arb_height(), screen in arb_height(), gap in arb_height()) {
        let bottom = screen - kb - gap;
        prop_assert_eq!(compute(kb, screen, bottom).bottom_inset, 0.0);
    }

    #[test]
    fn dismissed_keyboard_begins_at_zero(screen in arb_height(), bottom in arb_y()) {
        prop_assert_eq!(compute(0.0, screen, bottom).animation_begin, 0.0);
    }

    #[test]
    fn animation_begin_in_unit_range(kb in arb_height(), screen in arb_height(), bottom in arb_y()) {
        let begin = compute(kb, screen, bottom).animation_begin;
        prop_assert!((0.0..=1.0).contains(&begin), "begin = {}", begin);
    }

    #[test]
    fn compute_is_idempotent(kb in arb_height(), screen in arb_height(), bottom in arb_y()) {
        prop_assert_eq!(compute(kb, screen, bottom), compute(kb, screen, bottom));
    }
}

// ── 6. Gating ─────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn retain_never_publishes_zero(
        frames in prop::collection::vec((arb_height(), arb_y()), 1..40),
    ) {
        let mut tracker = InsetTracker::new(ZeroInsetPolicy::Retain);
        for (kb, y) in frames {
            let bounds = Rect::new(0.0, 0.0, 360.0, y);
            let published = tracker.update(kb, 800.0, bounds);
            if published {
                prop_assert!(tracker.current().bottom_inset > 0.0);
            }
        }
        let current = tracker.current();
        prop_assert!(current == AnimationData::default() || current.bottom_inset > 0.0);
    }

    #[test]
    fn interval_output_in_unit_range(begin in 0u32..=100, p in 0u32..=100) {
        let iv = Interval::new(begin as f32 / 100.0, 1.0);
        let v = iv.transform(p as f32 / 100.0);
        prop_assert!((0.0..=1.0).contains(&v));
    }
}
