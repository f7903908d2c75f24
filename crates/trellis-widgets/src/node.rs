#![forbid(unsafe_code)]

//! Positioned layout nodes.
//!
//! A [`LayoutNode`] is rebuilt from the element tree on every frame. It
//! shares its element (an [`ElementRef`] clone) and owns its children, whose
//! rects always lie inside the node's rect.

use std::rc::Rc;

use trellis_core::geometry::Rect;
use trellis_render::Frame;

use crate::element::{ElementRef, same_element};

/// One element placed at an absolute rect.
#[derive(Clone)]
pub struct LayoutNode {
    pub element: ElementRef,
    pub area: Rect,
    pub children: Vec<LayoutNode>,
}

impl std::fmt::Debug for LayoutNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutNode")
            .field("area", &self.area)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl LayoutNode {
    /// Lay out `element` at `area`, recursively.
    ///
    /// Children that are empty or fall outside `area` are dropped; the rest
    /// are clipped to it.
    pub fn new(element: ElementRef, area: Rect) -> Self {
        let children = if area.is_empty() {
            Vec::new()
        } else {
            element
                .layout_children(area)
                .into_iter()
                .filter_map(|mut child| {
                    let clipped = area.intersection_opt(&child.area)?;
                    if clipped != child.area {
                        child = LayoutNode::new(Rc::clone(&child.element), clipped);
                    }
                    Some(child)
                })
                .collect()
        };
        Self {
            element,
            area,
            children,
        }
    }

    /// A node with explicitly given children.
    pub fn with_children(element: ElementRef, area: Rect, children: Vec<LayoutNode>) -> Self {
        Self {
            element,
            area,
            children,
        }
    }

    /// Draw depth-first: clip to the node, push its inherited style, draw
    /// the element, then its children in order.
    pub fn render(&self, frame: &mut Frame) {
        if self.area.is_empty() {
            return;
        }
        frame.push_clip(self.area);
        frame.push_style(self.element.style());
        self.element.draw(self.area, frame);
        for child in &self.children {
            child.render(frame);
        }
        frame.pop_style();
        frame.pop_clip();
    }

    /// Node of `element` in this subtree.
    pub fn find(&self, element: &ElementRef) -> Option<&LayoutNode> {
        if same_element(&self.element, element) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(element))
    }

    pub fn contains(&self, element: &ElementRef) -> bool {
        self.find(element).is_some()
    }

    /// Number of nodes in the subtree.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(LayoutNode::node_count)
            .sum::<usize>()
    }
}
