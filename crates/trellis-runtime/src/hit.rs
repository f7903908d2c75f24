#![forbid(unsafe_code)]

//! Hit-testing over a laid-out tree.
//!
//! Later siblings draw over earlier ones, so children are searched last to
//! first and the first match wins. A point inside a node but outside all of
//! its children hits the node itself.

use std::rc::Rc;

use trellis_core::geometry::{Point, Rect};
use trellis_widgets::{ElementRef, LayoutNode};

/// The element under a point.
#[derive(Clone)]
pub struct Hit {
    pub element: ElementRef,
    /// Rect of the element's node.
    pub area: Rect,
    /// The point relative to `area`'s origin.
    pub local: Point,
}

impl std::fmt::Debug for Hit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hit")
            .field("area", &self.area)
            .field("local", &self.local)
            .finish_non_exhaustive()
    }
}

impl Hit {
    fn of(node: &LayoutNode, x: u16, y: u16) -> Self {
        Self {
            element: Rc::clone(&node.element),
            area: node.area,
            local: Point::new(x - node.area.x, y - node.area.y),
        }
    }
}

/// Deepest, topmost element containing `(x, y)`.
pub fn hit_test(node: &LayoutNode, x: u16, y: u16) -> Option<Hit> {
    if !node.area.contains(x, y) {
        return None;
    }
    node.children
        .iter()
        .rev()
        .find_map(|child| hit_test(child, x, y))
        .or_else(|| Some(Hit::of(node, x, y)))
}

/// Every node containing `(x, y)` along the hit chain, outermost first.
/// The last entry is what [`hit_test`] returns.
pub fn hit_path(node: &LayoutNode, x: u16, y: u16) -> Vec<Hit> {
    let mut path = Vec::new();
    let mut current = Some(node);
    while let Some(n) = current.filter(|n| n.area.contains(x, y)) {
        path.push(Hit::of(n, x, y));
        current = n.children.iter().rev().find(|c| c.area.contains(x, y));
    }
    path
}
