//! `skincare-dash` library crate.
//!
//! The binary (`skincare`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the data transformations are reusable behind any presentation layer
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod ingredients;
pub mod io;
pub mod normalize;
pub mod report;
pub mod tui;
