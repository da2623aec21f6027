#![forbid(unsafe_code)]

//! Frame = draw list + viewport for a render pass.
//!
//! The `Frame` is the render target widgets write to. Instead of
//! rasterizing, it records [`DrawOp`]s so a host renderer (or a test) can
//! replay them.
//!
//! # Usage
//!
//! ```
//! use kbinset_core::color::Color;
//! use kbinset_core::geometry::Rect;
//! use kbinset_widgets::frame::Frame;
//!
//! let mut frame = Frame::new(360.0, 800.0);
//! frame.fill(Rect::new(0.0, 700.0, 360.0, 100.0), Color::BLACK);
//! assert_eq!(frame.filled_height(Color::BLACK), 100.0);
//! ```

use kbinset_core::color::Color;
use kbinset_core::geometry::Rect;

/// One recorded drawing command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Solid fill of `area`.
    Fill { area: Rect, color: Color },
    /// Placement of a labelled child region.
    Child { area: Rect, label: String },
}

/// Recording render target.
#[derive(Debug, Clone)]
pub struct Frame {
    viewport: Rect,
    ops: Vec<DrawOp>,
}

impl Frame {
    /// Create a frame whose viewport starts at the origin.
    pub fn new(width: f64, height: f64) -> Self {
        Self::with_viewport(Rect::from_size(width, height))
    }

    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            viewport,
            ops: Vec::new(),
        }
    }

    /// Fill `area` (clipped to the viewport). Transparent colors and empty
    /// areas record nothing.
    pub fn fill(&mut self, area: Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        if let Some(area) = area.intersection_opt(&self.viewport) {
            self.ops.push(DrawOp::Fill { area, color });
        }
    }

    /// Record that a child labelled `label` was placed at `area`.
    pub fn mark(&mut self, area: Rect, label: impl Into<String>) {
        self.ops.push(DrawOp::Child {
            area,
            label: label.into(),
        });
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Area recorded for the child labelled `label`, if it was placed.
    pub fn child_area(&self, label: &str) -> Option<Rect> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Child { area, label: l } if l == label => Some(*area),
            _ => None,
        })
    }

    /// Total height of fills with `color`.
    pub fn filled_height(&self, color: Color) -> f64 {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { area, color: c } if *c == color => Some(area.height),
                _ => None,
            })
            .sum()
    }
}
