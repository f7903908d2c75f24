#![forbid(unsafe_code)]

//! Render kernel: cells, clipped buffers, per-frame draw context, and the
//! [`Screen`](screen::Screen) capability the event loop draws into.
//!
//! ```text
//! Element::draw -> Frame (style stack, clip, cursor) -> Buffer -> Screen::present
//! ```

pub mod buffer;
pub mod cell;
pub mod drawing;
pub mod frame;
pub mod headless;
pub mod screen;

pub use buffer::Buffer;
pub use cell::Cell;
pub use drawing::BorderChars;
pub use frame::Frame;
pub use headless::HeadlessScreen;
pub use screen::{Screen, Waker};
