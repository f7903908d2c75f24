#![forbid(unsafe_code)]

//! Notes editor built on Trellis.
//!
//! The binary in `main.rs` is a thin wrapper; the tree, bindings, and helpers
//! live here so they can be driven headlessly in tests.

pub mod app;
pub mod assist;
pub mod cli;
pub mod prompt;
pub mod status;
