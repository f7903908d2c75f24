#![forbid(unsafe_code)]

//! Elements and widgets for Trellis.
//!
//! Every UI node implements [`Element`]. [`Stack`] arranges children along
//! one axis, [`Decorate`] adds grow weight, padding, borders, fixed frames,
//! and styles, and [`LayoutNode`] is the positioned tree built from a root
//! element each frame.
//!
//! Built-in widgets: [`TextEditor`], [`Tabs`], [`Label`], [`Divider`], and
//! [`Spacer`].

pub mod decorate;
pub mod divider;
pub mod element;
pub mod label;
pub mod node;
pub mod spacer;
pub mod stack;
pub mod tabs;
pub mod textarea;

pub use decorate::{Decorate, Decorated};
pub use divider::Divider;
pub use element::{
    Clickable, Element, ElementExt, ElementRef, FocusTarget, Focusable, Hoverable, IntoElement,
    KeyHandler, Oriented, Scrollable, same_element, undecorated,
};
pub use label::Label;
pub use node::LayoutNode;
pub use spacer::Spacer;
pub use stack::Stack;
pub use tabs::Tabs;
pub use textarea::{Highlighter, TextEditor};
