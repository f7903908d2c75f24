#![forbid(unsafe_code)]

//! Bracket matching for `()`, `[]`, and `{}` across rows.
//!
//! ```
//! use trellis_text::bracket::matching_bracket;
//! use trellis_text::{Pos, TextBuffer};
//!
//! let buf = TextBuffer::from_text("((hello))");
//! assert_eq!(matching_bracket(&buf, Pos::new(0, 0)), Some(Pos::new(0, 8)));
//! assert_eq!(matching_bracket(&buf, Pos::new(0, 7)), Some(Pos::new(0, 1)));
//! ```

use crate::buffer::TextBuffer;
use crate::position::Pos;

const PAIRS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// Closer for an opener.
pub fn closer_for(open: char) -> Option<char> {
    PAIRS.iter().find(|(o, _)| *o == open).map(|(_, c)| *c)
}

/// Opener for a closer.
pub fn opener_for(close: char) -> Option<char> {
    PAIRS.iter().find(|(_, c)| *c == close).map(|(o, _)| *o)
}

/// Iterate positions strictly after `pos`, in buffer order.
fn forward(buf: &TextBuffer, pos: Pos) -> impl Iterator<Item = (Pos, char)> + '_ {
    let first_row = pos.row;
    (first_row..buf.row_count()).flat_map(move |row| {
        let skip = if row == first_row { pos.col + 1 } else { 0 };
        buf.row(row)
            .iter()
            .enumerate()
            .skip(skip)
            .map(move |(col, &ch)| (Pos::new(row, col), ch))
    })
}

/// Iterate positions strictly before `pos`, in reverse buffer order.
fn backward(buf: &TextBuffer, pos: Pos) -> impl Iterator<Item = (Pos, char)> + '_ {
    (0..=pos.row.min(buf.row_count() - 1)).rev().flat_map(move |row| {
        let chars = buf.row(row);
        let take = if row == pos.row {
            pos.col.min(chars.len())
        } else {
            chars.len()
        };
        chars[..take]
            .iter()
            .enumerate()
            .rev()
            .map(move |(col, &ch)| (Pos::new(row, col), ch))
    })
}

/// Closer matching the opener at `open`, tracking nesting depth of the same
/// kind. `None` if `open` is not an opener or the buffer runs out.
pub fn find_closer(buf: &TextBuffer, open: Pos) -> Option<Pos> {
    let open_ch = buf.char_at(open)?;
    let close_ch = closer_for(open_ch)?;
    let mut depth = 1usize;
    for (pos, ch) in forward(buf, open) {
        if ch == open_ch {
            depth += 1;
        } else if ch == close_ch {
            depth -= 1;
            if depth == 0 {
                return Some(pos);
            }
        }
    }
    None
}

/// Nearest unclosed opener of any kind before `pos`.
///
/// Walks backward keeping a stack of the openers that closers seen so far
/// still expect; an opener found with an empty stack encloses `pos`. This is
/// also the backward half of [`matching_bracket`]: the opener paired with a
/// closer is the one enclosing the closer's position.
pub fn enclosing_opener(buf: &TextBuffer, pos: Pos) -> Option<Pos> {
    let mut expected: Vec<char> = Vec::new();
    for (at, ch) in backward(buf, pos) {
        if let Some(open) = opener_for(ch) {
            expected.push(open);
        } else if closer_for(ch).is_some() {
            match expected.last() {
                None => return Some(at),
                Some(&want) if want == ch => {
                    expected.pop();
                }
                // Mismatched nesting: the inner pair is unbalanced, skip it.
                Some(_) => {
                    expected.pop();
                }
            }
        }
    }
    None
}

/// Bracket paired with the one at `pos`, or with the one just before `pos`
/// when `pos` itself is not a bracket.
pub fn matching_bracket(buf: &TextBuffer, pos: Pos) -> Option<Pos> {
    let try_at = |at: Pos| -> Option<Pos> {
        let ch = buf.char_at(at)?;
        if closer_for(ch).is_some() {
            find_closer(buf, at)
        } else if opener_for(ch).is_some() {
            enclosing_opener(buf, at)
        } else {
            None
        }
    };
    try_at(pos).or_else(|| {
        pos.col
            .checked_sub(1)
            .and_then(|col| try_at(Pos::new(pos.row, col)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_same_kind() {
        let buf = TextBuffer::from_text("((hello))");
        assert_eq!(find_closer(&buf, Pos::new(0, 0)), Some(Pos::new(0, 8)));
        assert_eq!(find_closer(&buf, Pos::new(0, 1)), Some(Pos::new(0, 7)));
        assert_eq!(matching_bracket(&buf, Pos::new(0, 8)), Some(Pos::new(0, 0)));
    }

    #[test]
    fn across_rows() {
        let buf = TextBuffer::from_text("fn x() {\n    [1, 2]\n}");
        assert_eq!(find_closer(&buf, Pos::new(0, 7)), Some(Pos::new(2, 0)));
        assert_eq!(matching_bracket(&buf, Pos::new(2, 0)), Some(Pos::new(0, 7)));
        assert_eq!(find_closer(&buf, Pos::new(1, 4)), Some(Pos::new(1, 9)));
    }

    #[test]
    fn unmatched_returns_none() {
        let buf = TextBuffer::from_text("(()");
        assert_eq!(find_closer(&buf, Pos::new(0, 0)), None);
        assert_eq!(enclosing_opener(&buf, Pos::new(0, 0)), None);
        assert_eq!(find_closer(&buf, Pos::new(0, 9)), None);
        let buf = TextBuffer::from_text("abc");
        assert_eq!(find_closer(&buf, Pos::new(0, 1)), None);
    }

    #[test]
    fn other_kinds_do_not_count() {
        let buf = TextBuffer::from_text("{ ( } )");
        assert_eq!(find_closer(&buf, Pos::new(0, 0)), Some(Pos::new(0, 4)));
    }

    #[test]
    fn enclosing_uses_stack() {
        let buf = TextBuffer::from_text("f(a, [b], {c}, d");
        assert_eq!(enclosing_opener(&buf, Pos::new(0, 16)), Some(Pos::new(0, 1)));
        assert_eq!(enclosing_opener(&buf, Pos::new(0, 7)), Some(Pos::new(0, 5)));
        assert_eq!(enclosing_opener(&TextBuffer::from_text("a) b"), Pos::new(0, 4)), None);
    }

    #[test]
    fn closer_pairs_with_nearest_unclosed_opener_of_any_kind() {
        let buf = TextBuffer::from_text("[(])");
        assert_eq!(matching_bracket(&buf, Pos::new(0, 2)), Some(Pos::new(0, 1)));

        let buf = TextBuffer::from_text("(a]b)");
        assert_eq!(matching_bracket(&buf, Pos::new(0, 4)), None);

        let buf = TextBuffer::from_text("{ [x] (y) }");
        assert_eq!(matching_bracket(&buf, Pos::new(0, 10)), Some(Pos::new(0, 0)));
    }

    #[test]
    fn matching_falls_back_to_previous_char() {
        let buf = TextBuffer::from_text("[x]");
        assert_eq!(matching_bracket(&buf, Pos::new(0, 3)), Some(Pos::new(0, 0)));
        assert_eq!(matching_bracket(&buf, Pos::new(0, 1)), Some(Pos::new(0, 2)));
        assert_eq!(matching_bracket(&TextBuffer::from_text("ab"), Pos::new(0, 1)), None);
    }
}
