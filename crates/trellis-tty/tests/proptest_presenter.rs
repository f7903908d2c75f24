//! Property tests for the diff presenter.
//!
//! 1. Presenting an unchanged frame writes no cell content, only the
//!    cursor bookkeeping.
//! 2. Every character of a changed cell appears in the output of the frame
//!    that changed it.

use proptest::prelude::*;
use trellis_render::{Buffer, Cell};
use trellis_tty::Presenter;

// ── Helpers ─────────────────────────────────────────────────────────────

const HIDE: &str = "\x1b[?25l";

fn grid(width: u16, height: u16, chars: &[char]) -> Buffer {
    let mut buf = Buffer::new(width, height);
    for (i, &ch) in chars.iter().enumerate() {
        let i = i as u16;
        if i >= width * height {
            break;
        }
        buf.set(i % width, i / width, Cell::from_char(ch));
    }
    buf
}

fn ascii() -> impl Strategy<Value = char> {
    prop::char::range('a', 'z')
}

// ═════════════════════════════════════════════════════════════════════════
// Properties
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn unchanged_frame_is_silent(
        width in 1u16..12,
        height in 1u16..6,
        chars in prop::collection::vec(ascii(), 0..72),
    ) {
        let buf = grid(width, height, &chars);
        let mut p = Presenter::new(Vec::new());
        p.present(&buf, None).unwrap();
        let before = p.writer().len();
        p.present(&buf, None).unwrap();
        let tail = String::from_utf8_lossy(&p.writer()[before..]).into_owned();
        prop_assert_eq!(tail, HIDE);
    }

    #[test]
    fn changed_cell_is_written(
        width in 1u16..12,
        height in 1u16..6,
        chars in prop::collection::vec(ascii(), 0..72),
        at in 0usize..72,
    ) {
        let before_frame = grid(width, height, &chars);
        let mut after_frame = before_frame.clone();
        let x = (at as u16) % width;
        let y = ((at as u16) / width) % height;
        after_frame.set(x, y, Cell::from_char('#'));

        let mut p = Presenter::new(Vec::new());
        p.present(&before_frame, None).unwrap();
        let before = p.writer().len();
        p.present(&after_frame, None).unwrap();
        let tail = String::from_utf8_lossy(&p.writer()[before..]).into_owned();
        prop_assert!(tail.contains('#'));
        let move_to = format!("\x1b[{};{}H", y + 1, x + 1);
        prop_assert!(tail.contains(&move_to));
    }
}
