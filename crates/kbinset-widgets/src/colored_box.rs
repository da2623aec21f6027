#![forbid(unsafe_code)]

use crate::Widget;
use crate::frame::Frame;
use kbinset_core::color::Color;
use kbinset_core::geometry::Rect;

/// Fills its whole area with one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColoredBox {
    color: Color,
}

impl ColoredBox {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }

    pub const fn color(&self) -> Color {
        self.color
    }
}

impl Widget for ColoredBox {
    fn render(&self, area: Rect, frame: &mut Frame) {
        frame.fill(area, self.color);
    }
}
