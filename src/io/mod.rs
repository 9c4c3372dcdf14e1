//! Input/output helpers.
//!
//! - input and assumption JSON files (`input`)
//! - comparison JSON export (`export`)

pub mod export;
pub mod input;

pub use export::*;
pub use input::*;
