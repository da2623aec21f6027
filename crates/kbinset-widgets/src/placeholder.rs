#![forbid(unsafe_code)]

use crate::Widget;
use crate::frame::Frame;
use kbinset_core::geometry::Rect;

/// Marks its area with a label. Stands in for real content in layouts and
/// tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    label: String,
}

impl Placeholder {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Widget for Placeholder {
    fn render(&self, area: Rect, frame: &mut Frame) {
        frame.mark(area, self.label.clone());
    }
}
