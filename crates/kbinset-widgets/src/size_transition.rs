#![forbid(unsafe_code)]

//! Vertical size transition.
//!
//! Shows `extent × factor` of its child, anchored to the bottom edge of
//! the area it is given. The factor is clamped to [0.0, 1.0].

use crate::Widget;
use crate::frame::Frame;
use kbinset_core::geometry::Rect;

#[derive(Debug, Clone)]
pub struct SizeTransition<W> {
    extent: f64,
    factor: f32,
    child: W,
}

impl<W: Widget> SizeTransition<W> {
    /// A transition over a child of full height `extent`, fully expanded.
    pub fn new(extent: f64, child: W) -> Self {
        Self {
            extent,
            factor: 1.0,
            child,
        }
    }

    #[must_use]
    pub fn factor(mut self, factor: f32) -> Self {
        self.factor = factor.clamp(0.0, 1.0);
        self
    }

    /// Height currently shown.
    pub fn visible_extent(&self) -> f64 {
        self.extent.max(0.0) * f64::from(self.factor)
    }
}

impl<W: Widget> Widget for SizeTransition<W> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let (_, band) = area.split_bottom(self.visible_extent());
        if band.is_empty() {
            return;
        }
        self.child.render(band, frame);
    }
}
