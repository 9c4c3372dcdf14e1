//! Mathematical utilities: annuity payments and present values.

pub mod annuity;

pub use annuity::*;
