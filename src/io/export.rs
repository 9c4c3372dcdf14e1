//! Export a comparison run to JSON.
//!
//! The export carries everything needed to reproduce the numbers: the input,
//! the assumptions in force, the three cost breakdowns with the ranking, and
//! the recommendation when one was requested.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::advisor::RecommendationError;
use crate::config::CostAssumptions;
use crate::domain::{FinancingInput, RecommendationResult};
use crate::error::{AppError, EXIT_IO};
use crate::report::Comparison;

/// Schema of the exported JSON file.
#[derive(Debug, Serialize)]
pub struct ComparisonExport<'a> {
    pub tool: &'static str,
    pub generated_at: DateTime<Utc>,
    pub input: &'a FinancingInput,
    pub assumptions: &'a CostAssumptions,
    pub comparison: &'a Comparison,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<&'a RecommendationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation_error: Option<String>,
}

impl<'a> ComparisonExport<'a> {
    pub fn new(
        input: &'a FinancingInput,
        assumptions: &'a CostAssumptions,
        comparison: &'a Comparison,
        recommendation: Option<&'a Result<RecommendationResult, RecommendationError>>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let (recommendation, recommendation_error) = match recommendation {
            Some(Ok(r)) => (Some(r), None),
            Some(Err(e)) => (None, Some(e.to_string())),
            None => (None, None),
        };
        Self {
            tool: "autofin",
            generated_at,
            input,
            assumptions,
            comparison,
            recommendation,
            recommendation_error,
        }
    }
}

/// Write the comparison (and the recommendation outcome, if any) to `path`.
pub fn write_comparison_json(
    path: &Path,
    input: &FinancingInput,
    assumptions: &CostAssumptions,
    comparison: &Comparison,
    recommendation: Option<&Result<RecommendationResult, RecommendationError>>,
) -> Result<(), AppError> {
    let export = ComparisonExport::new(input, assumptions, comparison, recommendation, Utc::now());

    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_IO, format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(BufWriter::new(file), &export)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to write export JSON: {e}")))?;

    tracing::info!(path = %path.display(), "comparison exported");
    Ok(())
}
