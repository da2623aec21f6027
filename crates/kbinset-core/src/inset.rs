#![forbid(unsafe_code)]

//! Inset geometry: how much of the keyboard overlaps a widget, and where
//! in the keyboard's timeline the widget's spacer should start growing.
//!
//! # Algorithm
//!
//! ```text
//! bottom_offset   = screen_height - widget_bottom_y
//! raw_inset       = keyboard_height - bottom_offset
//! bottom_inset    = clamp(raw_inset, 0, keyboard_height)
//! animation_begin = keyboard_height == 0 ? 0 : 1 - bottom_inset / keyboard_height
//! ```
//!
//! A widget sitting `bottom_offset` pixels above the screen edge is only
//! reached by the keyboard once it has risen that far, so its spacer starts
//! at `animation_begin` of the overall timeline.
//!
//! # Invariants
//!
//! 1. `bottom_inset ∈ [0, keyboard_height]` for `keyboard_height >= 0`.
//! 2. `keyboard_height == 0` ⇒ `animation_begin == 0`.
//! 3. `bottom_offset >= keyboard_height` ⇒ `bottom_inset == 0`.
//! 4. Under [`ZeroInsetPolicy::Retain`], a computed `bottom_inset <= 0` is
//!    never published; the previous value stays in effect.
//!
//! # Failure Modes
//!
//! - Inputs are not validated. Negative heights flow through the arithmetic;
//!   the clamp is written as `max(0).min(keyboard_height)` so it cannot panic
//!   when `keyboard_height < 0`.
//! - A widget that has not been laid out reports [`Rect::ZERO`], i.e. a
//!   bottom of 0, which yields a degenerate but finite result.

use crate::geometry::Rect;

/// Geometry published to the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AnimationData {
    /// Normalized start point of the spacer within the keyboard timeline.
    pub animation_begin: f64,
    /// Keyboard overlap the widget reserves space for.
    pub bottom_inset: f64,
}

impl AnimationData {
    #[must_use]
    pub const fn new(animation_begin: f64, bottom_inset: f64) -> Self {
        Self {
            animation_begin,
            bottom_inset,
        }
    }
}

/// Whether a computed zero inset replaces the last published data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZeroInsetPolicy {
    /// Keep the last non-zero data. The spacer then shrinks only through the
    /// controller's reverse animation.
    #[default]
    Retain,
    /// Publish the all-zero data as well.
    Publish,
}

/// Compute the inset geometry for one metrics snapshot.
#[must_use]
pub fn compute(keyboard_height: f64, screen_height: f64, widget_bottom_y: f64) -> AnimationData {
    let bottom_offset = screen_height - widget_bottom_y;
    let raw_inset = keyboard_height - bottom_offset;
    let bottom_inset = raw_inset.max(0.0).min(keyboard_height);
    let animation_begin = if keyboard_height != 0.0 {
        1.0 - bottom_inset / keyboard_height
    } else {
        0.0
    };
    AnimationData {
        animation_begin,
        bottom_inset,
    }
}

/// Gate a computed value: `Some` if it should replace the published data.
#[must_use]
pub fn publish(computed: AnimationData, policy: ZeroInsetPolicy) -> Option<AnimationData> {
    match policy {
        ZeroInsetPolicy::Retain if computed.bottom_inset <= 0.0 => None,
        _ => Some(computed),
    }
}

/// Last published [`AnimationData`] plus the gating policy.
#[derive(Debug, Clone, Default)]
pub struct InsetTracker {
    current: AnimationData,
    policy: ZeroInsetPolicy,
    skipped: u64,
}

impl InsetTracker {
    #[must_use]
    pub fn new(policy: ZeroInsetPolicy) -> Self {
        Self {
            current: AnimationData::default(),
            policy,
            skipped: 0,
        }
    }

    #[must_use]
    pub fn current(&self) -> AnimationData {
        self.current
    }

    #[must_use]
    pub fn policy(&self) -> ZeroInsetPolicy {
        self.policy
    }

    /// Number of updates whose result was withheld by the gate.
    #[must_use]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Recompute from a metrics snapshot and the widget's bounds.
    ///
    /// Returns `true` if the published data was replaced.
    pub fn update(&mut self, keyboard_height: f64, screen_height: f64, widget_bounds: Rect) -> bool {
        let computed = compute(keyboard_height, screen_height, widget_bounds.bottom());
        match publish(computed, self.policy) {
            Some(data) => {
                self.current = data;
                true
            }
            None => {
                self.skipped += 1;
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    keyboard_height,
                    retained_inset = self.current.bottom_inset,
                    "zero inset withheld"
                );
                false
            }
        }
    }
}
