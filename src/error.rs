//! Binary-level error: an exit code plus a message for the user.
//!
//! Library modules report typed errors (`ValidationError`, `RecommendationError`);
//! they are folded into an `AppError` at the CLI boundary.

use crate::advisor::{GENERIC_FAILURE_MESSAGE, RecommendationError};
use crate::domain::ValidationError;

/// Invalid usage, input or configuration.
pub const EXIT_USAGE: u8 = 2;
/// The recommendation service could not produce an answer.
pub const EXIT_RECOMMENDATION: u8 = 3;
/// Reading or writing files failed.
pub const EXIT_IO: u8 = 4;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(EXIT_USAGE, format!("Invalid input: {err}"))
    }
}

impl From<RecommendationError> for AppError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::MissingApiKey => AppError::new(EXIT_USAGE, err.to_string()),
            _ => AppError::new(EXIT_RECOMMENDATION, GENERIC_FAILURE_MESSAGE),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
