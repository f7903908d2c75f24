//! Property tests for hit-testing over random layouts.
//!
//! 1. A point hits something exactly when it lies inside the root.
//! 2. The hit's local point plus its area origin is the queried point, and
//!    the local point lies inside the area.
//! 3. The hit path runs outermost first, each area enclosing the next, and
//!    ends at the element `hit_test` returns.

use proptest::prelude::*;
use trellis_core::geometry::{Rect, Size};
use trellis_layout::Direction;
use trellis_runtime::{hit_path, hit_test};
use trellis_widgets::{
    Decorate, Element, ElementExt, ElementRef, IntoElement, LayoutNode, Stack, same_element,
};

// ── Helpers ─────────────────────────────────────────────────────────────

struct Leaf(u16);

impl Element for Leaf {
    fn min_size(&self) -> Size {
        Size::new(self.0, self.0)
    }
}

#[derive(Debug, Clone)]
enum Shape {
    Leaf(u16, u16),
    Stack(Direction, Vec<Shape>),
    Padded(u16, Box<Shape>),
}

impl Shape {
    fn build(&self) -> ElementRef {
        match self {
            Shape::Leaf(size, grow) => Leaf(*size).grow(*grow),
            Shape::Stack(direction, children) => Stack::new(*direction)
                .children(children.iter().map(Shape::build))
                .into_element(),
            Shape::Padded(pad, inner) => inner.build().pad(*pad),
        }
    }
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = (0u16..4, 0u16..3).prop_map(|(s, g)| Shape::Leaf(s, g));
    leaf.prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            (
                prop_oneof![Just(Direction::Vertical), Just(Direction::Horizontal)],
                prop::collection::vec(inner.clone(), 1..4),
            )
                .prop_map(|(d, c)| Shape::Stack(d, c)),
            (0u16..3, inner).prop_map(|(p, s)| Shape::Padded(p, Box::new(s))),
        ]
    })
}

fn layout(shape: &Shape, width: u16, height: u16) -> LayoutNode {
    shape.build().layout(Rect::new(2, 1, width, height))
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn hits_exactly_inside_root(
        shape in shape_strategy(),
        width in 1u16..20,
        height in 1u16..12,
        x in 0u16..24,
        y in 0u16..16,
    ) {
        let tree = layout(&shape, width, height);
        prop_assert_eq!(hit_test(&tree, x, y).is_some(), tree.area.contains(x, y));
    }

    #[test]
    fn local_point_is_relative_to_area(
        shape in shape_strategy(),
        width in 1u16..20,
        height in 1u16..12,
        x in 2u16..22,
        y in 1u16..13,
    ) {
        let tree = layout(&shape, width, height);
        if let Some(hit) = hit_test(&tree, x, y) {
            prop_assert_eq!(hit.area.x + hit.local.x, x);
            prop_assert_eq!(hit.area.y + hit.local.y, y);
            prop_assert!(hit.local.x < hit.area.width);
            prop_assert!(hit.local.y < hit.area.height);
        }
    }

    #[test]
    fn path_is_nested_and_ends_at_hit(
        shape in shape_strategy(),
        width in 1u16..20,
        height in 1u16..12,
        x in 2u16..22,
        y in 1u16..13,
    ) {
        let tree = layout(&shape, width, height);
        let path = hit_path(&tree, x, y);
        match hit_test(&tree, x, y) {
            None => prop_assert!(path.is_empty()),
            Some(hit) => {
                prop_assert!(!path.is_empty());
                prop_assert!(same_element(&path[0].element, &tree.element));
                for pair in path.windows(2) {
                    prop_assert!(pair[0].area.encloses(&pair[1].area));
                }
                let last = &path[path.len() - 1];
                prop_assert!(same_element(&last.element, &hit.element));
                prop_assert_eq!(last.area, hit.area);
            }
        }
    }
}
