//! Natural-language recommendation from an external text-generation service.
//!
//! The deterministic cost core never depends on this module: the service is
//! reached through the `Recommender` trait, so the comparison runs (and is
//! tested) without network access, and a failing service only affects the
//! recommendation section of the output.
//!
//! - prompt rendering from the user input (`prompt`)
//! - strict parsing of the two-field answer (`parse`)
//! - an OpenAI-compatible chat-completions backend (`chat`)

use thiserror::Error;

use crate::domain::{FinancingInput, RecommendationResult};

pub mod chat;
pub mod parse;
pub mod prompt;

pub use chat::ChatCompletionsRecommender;
pub use parse::parse_recommendation;
pub use prompt::render_prompt;

/// What the user sees when the recommendation cannot be obtained.
pub const GENERIC_FAILURE_MESSAGE: &str = "Analysis failed, please retry.";

/// Any backend able to recommend one of the three financing options.
pub trait Recommender {
    /// One attempt, no retries. Resolves exactly once.
    fn recommend(&self, input: &FinancingInput) -> Result<RecommendationResult, RecommendationError>;
}

/// Why a recommendation could not be obtained.
#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("no API key configured (set AUTOFIN_API_KEY or OPENAI_API_KEY)")]
    MissingApiKey,

    #[error("recommendation request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("recommendation service returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed recommendation response: {0}")]
    MalformedResponse(String),

    #[error("recommendation service returned no output")]
    EmptyOutput,

    #[error("recommendation response is missing `{0}`")]
    MissingField(&'static str),

    #[error("recommendation names no known financing option: {0:?}")]
    UnknownOption(String),
}
