#![forbid(unsafe_code)]

//! Static text.

use trellis_core::geometry::{Rect, Size};
use trellis_render::Frame;
use trellis_style::Style;
use unicode_width::UnicodeWidthStr;

use crate::element::Element;

/// One or more lines of unstyled text, clipped to its rect.
#[derive(Debug, Clone, Default)]
pub struct Label {
    text: String,
    style: Style,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::new(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Element for Label {
    fn min_size(&self) -> Size {
        let mut size = Size::ZERO;
        for line in self.text.lines() {
            let width = u16::try_from(line.width()).unwrap_or(u16::MAX);
            size = Size::new(size.width.max(width), size.height.saturating_add(1));
        }
        size
    }

    fn draw(&self, area: Rect, frame: &mut Frame) {
        for (y, line) in (area.y..area.bottom()).zip(self.text.lines()) {
            frame.print(area.x, y, line, Style::new(), area.right());
        }
    }

    fn style(&self) -> Style {
        self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ElementExt, IntoElement};
    use trellis_style::Theme;

    #[test]
    fn min_size_is_widest_line_by_line_count() {
        assert_eq!(Label::new("ab\nwide 字").min_size(), Size::new(7, 2));
        assert_eq!(Label::new("").min_size(), Size::ZERO);
    }

    #[test]
    fn draws_clipped_lines() {
        let node = Label::new("hello\nworld\nextra")
            .into_element()
            .layout(Rect::new(1, 0, 3, 2));
        let mut frame = Frame::new(5, 3, Theme::default());
        node.render(&mut frame);
        assert_eq!(frame.buffer.row_text(0), " hel ");
        assert_eq!(frame.buffer.row_text(1), " wor ");
        assert_eq!(frame.buffer.row_text(2), "     ");
    }
}
