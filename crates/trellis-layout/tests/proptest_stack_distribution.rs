//! Property tests for stack space distribution.
//!
//! 1. With room to spare and at least one grower, extents plus spacing fill
//!    the available length exactly.
//! 2. Placed rects stay inside the area, in order, without overlap.
//! 3. Non-growing items never receive more than their minimum.

use proptest::prelude::*;
use trellis_core::geometry::Rect;
use trellis_layout::{Direction, Flex, Item};

// ── Helpers ─────────────────────────────────────────────────────────────

fn item_strategy() -> impl Strategy<Value = Item> {
    prop_oneof![
        (0u16..20).prop_map(Item::fixed),
        (0u16..20, 1u16..5).prop_map(|(min, w)| Item::new(min, w)),
    ]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![Just(Direction::Vertical), Just(Direction::Horizontal)]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Exact fill
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn growers_fill_exactly(
        items in proptest::collection::vec(item_strategy(), 1..8),
        spacing in 0u16..3,
        extra in 0u16..200,
    ) {
        prop_assume!(items.iter().any(Item::is_growing));
        let flex = Flex::horizontal().spacing(spacing);
        let fixed: u16 = items.iter().filter(|i| !i.is_growing()).map(|i| i.min).sum();
        let gaps = spacing * (items.len() as u16 - 1);
        let available = fixed + gaps + extra;

        let extents = flex.extents(available, &items);
        let total: u16 = extents.iter().sum::<u16>() + gaps;
        prop_assert_eq!(total, available, "extents {:?} for {:?}", extents, items);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Placement stays inside and ordered
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn rects_inside_and_ordered(
        items in proptest::collection::vec(item_strategy(), 0..8),
        spacing in 0u16..4,
        dir in direction_strategy(),
        w in 0u16..120,
        h in 0u16..60,
    ) {
        let area = Rect::new(3, 5, w, h);
        let rects = Flex::vertical().direction(dir).spacing(spacing).split(area, &items);
        prop_assert_eq!(rects.len(), items.len());

        let mut prev_end: Option<u16> = None;
        for r in &rects {
            prop_assert!(area.encloses(r), "{:?} escapes {:?}", r, area);
            let (start, end) = match dir {
                Direction::Vertical => {
                    prop_assert_eq!(r.width, area.width);
                    (r.y, r.bottom())
                }
                Direction::Horizontal => {
                    prop_assert_eq!(r.height, area.height);
                    (r.x, r.right())
                }
            };
            if let Some(prev) = prev_end {
                prop_assert!(start >= prev);
            }
            prev_end = Some(end);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Fixed items keep their minimum
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fixed_items_get_min(
        items in proptest::collection::vec(item_strategy(), 0..8),
        available in 0u16..300,
    ) {
        let extents = Flex::vertical().extents(available, &items);
        for (item, extent) in items.iter().zip(&extents) {
            if !item.is_growing() {
                prop_assert_eq!(*extent, item.min);
            } else {
                prop_assert!(*extent <= available);
            }
        }
    }
}
