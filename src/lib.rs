//! `autofinance` library crate.
//!
//! The binary (`autofin`) is a thin wrapper around this library so that:
//!
//! - the cost calculators are testable without spawning processes
//! - the recommendation backend can be swapped behind a trait
//! - presentation stays separate from the arithmetic

pub mod advisor;
pub mod app;
pub mod calc;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod plot;
pub mod report;
