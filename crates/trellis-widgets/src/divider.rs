#![forbid(unsafe_code)]

//! A one-cell line separating stack children.
//!
//! The stack a divider is pushed into tells it its axis: in a vertical stack
//! it is a horizontal rule one row tall, in a horizontal stack a vertical
//! rule one column wide. It never grows along the stack's axis and always
//! spans the cross axis.

use std::cell::Cell;

use trellis_core::geometry::{Rect, Size};
use trellis_layout::Direction;
use trellis_render::Frame;
use trellis_style::Style;

use crate::element::{Element, Oriented};

/// Stack separator line.
#[derive(Debug, Clone, Default)]
pub struct Divider {
    axis: Cell<Direction>,
    style: Option<Style>,
}

impl Divider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the theme's border style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    /// Axis of the stack this divider sits in.
    pub fn axis(&self) -> Direction {
        self.axis.get()
    }
}

impl Element for Divider {
    fn min_size(&self) -> Size {
        match self.axis.get() {
            Direction::Vertical => Size::new(0, 1),
            Direction::Horizontal => Size::new(1, 0),
        }
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        if area.is_empty() {
            return;
        }
        let style = self.style.unwrap_or(frame.theme().border);
        match self.axis.get() {
            Direction::Vertical => frame.hline(area.x, area.y, area.width, '─', style),
            Direction::Horizontal => frame.vline(area.x, area.y, area.height, '│', style),
        }
    }

    fn as_oriented(&self) -> Option<&dyn Oriented> {
        Some(self)
    }
}

impl Oriented for Divider {
    fn set_axis(&self, axis: Direction) {
        self.axis.set(axis);
    }
}
