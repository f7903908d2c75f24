#![forbid(unsafe_code)]

//! Mergeable text styles.
//!
//! Each attribute is tri-state: unset, explicitly on, or explicitly off. The
//! `attrs` field holds the on/off values and `attrs_set` records which flags
//! were assigned at all, so `Style::new().bold(false)` differs from
//! `Style::new()`.
//!
//! # Example
//! ```
//! use trellis_style::{Color, Style, StyleFlags};
//!
//! let parent = Style::new().fg(Color::rgb(200, 200, 200)).bold(true);
//! let child = Style::new().bold(false);
//! let merged = child.merge(&parent);
//! assert_eq!(merged.fg, Some(Color::rgb(200, 200, 200)));
//! assert_eq!(merged.flag(StyleFlags::BOLD), Some(false));
//! ```

use bitflags::bitflags;

use crate::color::Color;

bitflags! {
    /// Text attributes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const ITALIC    = 0b0000_0010;
        const UNDERLINE = 0b0000_0100;
        const DIM       = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// A partially specified style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    /// On/off value of each attribute; meaningful only where `attrs_set` has the bit.
    pub attrs: StyleFlags,
    /// Which attributes were explicitly assigned.
    pub attrs_set: StyleFlags,
}

impl Style {
    /// Fully unset style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: StyleFlags::empty(),
            attrs_set: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Explicitly set a group of attributes on or off.
    #[must_use]
    pub fn with_flag(mut self, flag: StyleFlags, on: bool) -> Self {
        self.attrs_set |= flag;
        self.attrs.set(flag, on);
        self
    }

    #[must_use]
    pub fn bold(self, on: bool) -> Self {
        self.with_flag(StyleFlags::BOLD, on)
    }

    #[must_use]
    pub fn italic(self, on: bool) -> Self {
        self.with_flag(StyleFlags::ITALIC, on)
    }

    #[must_use]
    pub fn underline(self, on: bool) -> Self {
        self.with_flag(StyleFlags::UNDERLINE, on)
    }

    #[must_use]
    pub fn dim(self, on: bool) -> Self {
        self.with_flag(StyleFlags::DIM, on)
    }

    #[must_use]
    pub fn reverse(self, on: bool) -> Self {
        self.with_flag(StyleFlags::REVERSE, on)
    }

    /// Tri-state lookup of a single attribute: `None` when unset.
    #[must_use]
    pub fn flag(&self, flag: StyleFlags) -> Option<bool> {
        self.attrs_set
            .contains(flag)
            .then(|| self.attrs.contains(flag))
    }

    /// Attributes that are explicitly on. Unset counts as off.
    #[must_use]
    pub fn effective_flags(&self) -> StyleFlags {
        self.attrs & self.attrs_set
    }

    /// True when nothing is set.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs_set.is_empty()
    }

    /// Combine with a parent style.
    ///
    /// Fields set on `self` are kept; unset fields take the parent's value.
    #[must_use]
    pub fn merge(&self, parent: &Style) -> Style {
        let inherited = parent.attrs_set - self.attrs_set;
        Style {
            fg: self.fg.or(parent.fg),
            bg: self.bg.or(parent.bg),
            attrs: (self.attrs & self.attrs_set) | (parent.attrs & inherited),
            attrs_set: self.attrs_set | parent.attrs_set,
        }
    }

    /// Layer `top` over `self`; shorthand for `top.merge(self)`.
    #[must_use]
    pub fn patch(&self, top: Style) -> Style {
        top.merge(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_differs_from_off() {
        let unset = Style::new();
        let off = Style::new().bold(false);
        assert_ne!(unset, off);
        assert_eq!(unset.flag(StyleFlags::BOLD), None);
        assert_eq!(off.flag(StyleFlags::BOLD), Some(false));
    }

    #[test]
    fn child_set_fields_win() {
        let parent = Style::new()
            .fg(Color::rgb(1, 1, 1))
            .bg(Color::rgb(2, 2, 2))
            .bold(true);
        let child = Style::new().fg(Color::rgb(9, 9, 9)).bold(false);
        let merged = child.merge(&parent);
        assert_eq!(merged.fg, Some(Color::rgb(9, 9, 9)));
        assert_eq!(merged.bg, Some(Color::rgb(2, 2, 2)));
        assert_eq!(merged.flag(StyleFlags::BOLD), Some(false));
    }

    #[test]
    fn unset_fields_inherit() {
        let parent = Style::new().italic(true).underline(false);
        let merged = Style::new().dim(true).merge(&parent);
        assert_eq!(merged.flag(StyleFlags::ITALIC), Some(true));
        assert_eq!(merged.flag(StyleFlags::UNDERLINE), Some(false));
        assert_eq!(merged.flag(StyleFlags::DIM), Some(true));
        assert_eq!(merged.flag(StyleFlags::REVERSE), None);
        assert_eq!(
            merged.effective_flags(),
            StyleFlags::ITALIC | StyleFlags::DIM
        );
    }

    #[test]
    fn merge_with_unset_is_identity() {
        let style = Style::new().fg(Color::Default).reverse(true);
        assert_eq!(style.merge(&Style::new()), style);
        assert_eq!(Style::new().merge(&style), style);
        assert!(Style::default().is_unset());
    }

    #[test]
    fn patch_layers_on_top() {
        let base = Style::new().bold(true).fg(Color::rgb(5, 5, 5));
        let patched = base.patch(Style::new().bold(false));
        assert_eq!(patched.flag(StyleFlags::BOLD), Some(false));
        assert_eq!(patched.fg, Some(Color::rgb(5, 5, 5)));
    }
}
