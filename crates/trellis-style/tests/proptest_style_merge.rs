//! Property-based invariant tests for style inheritance.
//!
//! 1. Fields set on the child are never overridden by the parent.
//! 2. Fields unset on the child take the parent's value.
//! 3. Merging with a fully unset style is the identity on either side.
//! 4. Merge is associative, so nesting depth does not change the result.
//! 5. `patch` is merge with the arguments swapped.

use proptest::prelude::*;
use trellis_style::{Color, Style, StyleFlags};

// ── Helpers ─────────────────────────────────────────────────────────────

const FLAGS: [StyleFlags; 5] = [
    StyleFlags::BOLD,
    StyleFlags::ITALIC,
    StyleFlags::UNDERLINE,
    StyleFlags::DIM,
    StyleFlags::REVERSE,
];

fn color_strategy() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Default),
        any::<u8>().prop_map(Color::Ansi256),
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b)),
    ]
}

/// Each attribute is unset, off, or on.
fn style_strategy() -> impl Strategy<Value = Style> {
    (
        proptest::option::of(color_strategy()),
        proptest::option::of(color_strategy()),
        proptest::collection::vec(proptest::option::of(any::<bool>()), FLAGS.len()),
    )
        .prop_map(|(fg, bg, flags)| {
            let mut style = Style::new();
            style.fg = fg;
            style.bg = bg;
            for (flag, value) in FLAGS.iter().zip(flags) {
                if let Some(on) = value {
                    style = style.with_flag(*flag, on);
                }
            }
            style
        })
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Set fields win, unset fields inherit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn child_fields_win_and_unset_fields_inherit(
        child in style_strategy(),
        parent in style_strategy(),
    ) {
        let merged = child.merge(&parent);
        prop_assert_eq!(merged.fg, child.fg.or(parent.fg));
        prop_assert_eq!(merged.bg, child.bg.or(parent.bg));
        for flag in FLAGS {
            let expected = child.flag(flag).or(parent.flag(flag));
            prop_assert_eq!(merged.flag(flag), expected, "{:?}", flag);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unset_style_is_identity(style in style_strategy()) {
        prop_assert_eq!(style.merge(&Style::new()), style);
        prop_assert_eq!(Style::new().merge(&style), style);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4–5. Associativity and patch
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn merge_is_associative(
        a in style_strategy(),
        b in style_strategy(),
        c in style_strategy(),
    ) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn patch_is_swapped_merge(base in style_strategy(), top in style_strategy()) {
        prop_assert_eq!(base.patch(top), top.merge(&base));
    }
}
