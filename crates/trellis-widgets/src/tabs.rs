#![forbid(unsafe_code)]

//! Tabbed pages.
//!
//! A [`Tabs`] element draws a one-row header strip and lays out only the
//! active page below it. Focus assigned to the tabs is delegated to the
//! active page, and clicking a header title switches pages.
//!
//! Switching pages removes the old page from the layout tree; the event loop
//! notices that the focused element disappeared and re-resolves focus
//! through the tabs, which lands on the new page.

use std::cell::Cell;
use std::rc::Rc;

use trellis_core::event::MouseEvent;
use trellis_core::geometry::{Point, Rect, Size};
use trellis_render::Frame;
use unicode_width::UnicodeWidthStr;

use crate::element::{Clickable, Element, ElementExt, ElementRef, FocusTarget, IntoElement};
use crate::node::LayoutNode;

/// Titled pages with one visible at a time.
#[derive(Default)]
pub struct Tabs {
    pages: Vec<(String, ElementRef)>,
    active: Cell<usize>,
}

impl std::fmt::Debug for Tabs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let titles: Vec<&str> = self.pages.iter().map(|(t, _)| t.as_str()).collect();
        f.debug_struct("Tabs")
            .field("titles", &titles)
            .field("active", &self.active.get())
            .finish()
    }
}

impl Tabs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    #[must_use]
    pub fn page(mut self, title: impl Into<String>, page: impl IntoElement) -> Self {
        self.pages.push((title.into(), page.into_element()));
        self
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Index of the visible page.
    pub fn active(&self) -> usize {
        self.active.get()
    }

    pub fn active_page(&self) -> Option<&ElementRef> {
        self.pages.get(self.active.get()).map(|(_, page)| page)
    }

    pub fn title(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(|(title, _)| title.as_str())
    }

    /// Show page `index`. Returns `false` if there is no such page.
    pub fn select(&self, index: usize) -> bool {
        if index >= self.pages.len() {
            return false;
        }
        self.active.set(index);
        true
    }

    /// Show the next page, wrapping around.
    pub fn next(&self) {
        if !self.pages.is_empty() {
            self.active.set((self.active.get() + 1) % self.pages.len());
        }
    }

    /// Show the previous page, wrapping around.
    pub fn prev(&self) {
        if !self.pages.is_empty() {
            let n = self.pages.len();
            self.active.set((self.active.get() + n - 1) % n);
        }
    }

    /// Column spans of the header titles, relative to the tabs' left edge.
    /// Each title is drawn with one cell of padding on both sides.
    fn header_spans(&self) -> impl Iterator<Item = (u16, u16)> + '_ {
        let mut x = 0u16;
        self.pages.iter().map(move |(title, _)| {
            let width = u16::try_from(title.width())
                .unwrap_or(u16::MAX)
                .saturating_add(2);
            let span = (x, x.saturating_add(width));
            x = span.1;
            span
        })
    }

    fn header_at(&self, col: u16) -> Option<usize> {
        self.header_spans()
            .position(|(start, end)| start <= col && col < end)
    }
}

impl Element for Tabs {
    fn min_size(&self) -> Size {
        let header = self.header_spans().last().map_or(0, |(_, end)| end);
        let pages = self
            .pages
            .iter()
            .fold(Size::ZERO, |acc, (_, page)| acc.max(page.min_size()));
        Size::new(header.max(pages.width), pages.height.saturating_add(1))
    }

    fn layout_children(&self, area: Rect) -> Vec<LayoutNode> {
        let body = Rect::new(
            area.x,
            area.y.saturating_add(1),
            area.width,
            area.height.saturating_sub(1),
        );
        match self.active_page() {
            Some(page) if !body.is_empty() => vec![page.layout(body)],
            _ => Vec::new(),
        }
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        let theme = *frame.theme();
        let header = Rect::new(area.x, area.y, area.width, 1);
        frame.fill(header, theme.tab_inactive);
        for (i, ((start, end), (title, _))) in self.header_spans().zip(&self.pages).enumerate() {
            let style = if i == self.active.get() {
                theme.tab_active
            } else {
                theme.tab_inactive
            };
            let x = area.x.saturating_add(start);
            let max_x = area.x.saturating_add(end).min(area.right());
            if x >= max_x {
                break;
            }
            frame.fill(Rect::new(x, area.y, max_x - x, 1), style);
            frame.print(x.saturating_add(1), area.y, title, style, max_x);
        }
    }

    fn as_clickable(&self) -> Option<&dyn Clickable> {
        Some(self)
    }

    fn as_focus_target(&self) -> Option<&dyn FocusTarget> {
        Some(self)
    }
}

impl FocusTarget for Tabs {
    fn focus_target(&self) -> Option<ElementRef> {
        self.active_page().map(Rc::clone)
    }
}

impl Clickable for Tabs {
    fn on_click(&self, local: Point, _event: &MouseEvent) {
        if local.y != 0 {
            return;
        }
        if let Some(index) = self.header_at(local.x) {
            self.select(index);
        }
    }
}
