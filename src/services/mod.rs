//! External service interactions
//!
//! Loading the dataset from disk or from the embedded sample.

pub mod loader;

pub use loader::load_rows;
