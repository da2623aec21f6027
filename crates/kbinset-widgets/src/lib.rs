#![forbid(unsafe_code)]

//! Widgets for keyboard-aware layouts.
//!
//! [`KeyboardAttachable`] reserves a spacer under its child that grows and
//! shrinks with the software keyboard, so the child slides up in step with
//! the keyboard instead of being covered by it.

pub mod colored_box;
pub mod frame;
pub mod keyboard_attachable;
pub mod placeholder;
pub mod size_transition;

use frame::Frame;
use kbinset_core::geometry::Rect;

pub use colored_box::ColoredBox;
pub use keyboard_attachable::{
    KeyboardAttachable, KeyboardAttachableState, Passthrough, TransitionBuilder, TransitionContext,
};
pub use placeholder::Placeholder;
pub use size_transition::SizeTransition;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;
    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        (**self).render(area, frame);
    }
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render(&self, area: Rect, frame: &mut Frame) {
        (**self).render(area, frame);
    }
}
