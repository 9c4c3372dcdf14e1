//! Cost calculation per financing option.
//!
//! Responsibilities:
//!
//! - loan: theoretical annuity, interest, remaining debt and retained value (`credit`)
//! - LOA / LLD: rents, purchase option and mileage penalties (`lease`)
//! - default rate and residual-value suggestions (`profile`)
//!
//! Every function here is pure: identical inputs give bit-identical outputs.
//!
//! Accounting convention for `total_cost_usage`, shared by all three options:
//! payments made within the comparison horizon, plus the upfront amount, plus any
//! loan principal still owed at the horizon end, minus the value the user keeps.
//! LOA and LLD keep nothing when the vehicle is returned. Fees are reported
//! separately in `additional_fees` and are not folded in.

pub mod credit;
pub mod lease;
pub mod profile;

pub use credit::*;
pub use lease::*;
pub use profile::*;
