//! Input handling (CSV loading).

pub mod load;

pub use load::{load, load_from_reader};
