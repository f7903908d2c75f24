#![forbid(unsafe_code)]

//! Empty, growable filler.

use trellis_core::geometry::Size;

use crate::element::Element;

/// Takes up leftover stack space and draws nothing.
///
/// Grows with weight 1 unless decorated otherwise; its minimum size is zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spacer;

impl Spacer {
    pub fn new() -> Self {
        Self
    }
}

impl Element for Spacer {
    fn min_size(&self) -> Size {
        Size::ZERO
    }

    fn grow_weight(&self) -> u16 {
        1
    }
}
