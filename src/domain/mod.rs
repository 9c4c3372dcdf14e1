//! Domain types used throughout the comparison.
//!
//! This module defines:
//!
//! - option and preference enums (`FinancingOption`, `Preference`)
//! - the validated user input (`FinancingInput`) and the per-option parameter subsets
//! - calculator outputs (`DetailedCosts`, `AdditionalFees`) and the recommendation record

pub mod types;
pub mod validate;

pub use types::*;
pub use validate::*;
