#![forbid(unsafe_code)]

//! Event loop and interaction for Trellis.
//!
//! [`Manager`] drives a [`Screen`](trellis_render::Screen): it lays out the
//! root element, renders it with an optional [`Overlay`] on top, and routes
//! input by focus ([`resolve_focus`]) and position ([`hit_test`]). Global
//! shortcuts live in [`Bindings`]; callbacks talk back to the loop through a
//! [`Control`] handle.

pub mod bindings;
pub mod config;
pub mod focus;
pub mod hit;
pub mod manager;
pub mod overlay;

pub use bindings::{Action, Bindings, Command, Control, KeyCombo};
pub use config::ManagerConfig;
pub use focus::resolve_focus;
pub use hit::{Hit, hit_path, hit_test};
pub use manager::{Manager, ShutdownHandle};
pub use overlay::Overlay;
