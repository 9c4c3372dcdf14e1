//! Read financing inputs and cost assumptions from JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::config::CostAssumptions;
use crate::domain::FinancingInput;
use crate::error::{AppError, EXIT_IO, EXIT_USAGE};

/// Read a financing input file (snake_case or camelCase keys).
///
/// The input is not validated here; the pipeline does that before calculating.
pub fn read_input_json(path: &Path) -> Result<FinancingInput, AppError> {
    read_json(path, "input")
}

/// Read a cost assumptions file. Missing keys keep their default value.
pub fn read_assumptions_json(path: &Path) -> Result<CostAssumptions, AppError> {
    read_json(path, "assumptions")
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_IO, format!("Failed to open {what} JSON '{}': {e}", path.display()))
    })?;
    let value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        AppError::new(EXIT_USAGE, format!("Invalid {what} JSON '{}': {e}", path.display()))
    })?;
    tracing::debug!(path = %path.display(), "loaded {what} JSON");
    Ok(value)
}
