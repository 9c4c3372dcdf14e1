//! Strict parsing of the service answer.
//!
//! The contract is a JSON object with two non-empty string fields,
//! `recommendation` and `reasoning`. Models often wrap JSON in a Markdown code
//! fence; that wrapper is tolerated, anything else is a distinguishable error.

use serde::Deserialize;

use super::RecommendationError;
use crate::domain::{FinancingOption, RecommendationResult};

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    recommendation: Option<String>,
    reasoning: Option<String>,
}

/// Parse the text produced by the service.
pub fn parse_recommendation(text: &str) -> Result<RecommendationResult, RecommendationError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(RecommendationError::EmptyOutput);
    }

    let raw: RawRecommendation = serde_json::from_str(body)
        .map_err(|e| RecommendationError::MalformedResponse(e.to_string()))?;

    let label = non_empty(raw.recommendation).ok_or(RecommendationError::MissingField("recommendation"))?;
    let reasoning = non_empty(raw.reasoning).ok_or(RecommendationError::MissingField("reasoning"))?;

    let recommendation =
        FinancingOption::from_label(&label).ok_or(RecommendationError::UnknownOption(label))?;

    Ok(RecommendationResult {
        recommendation,
        reasoning,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Remove a surrounding ```` ``` ```` / ```` ```json ```` fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let r = parse_recommendation(r#"{"recommendation": "Crédit", "reasoning": "Vous gardez la voiture."}"#)
            .unwrap();
        assert_eq!(r.recommendation, FinancingOption::Credit);
        assert_eq!(r.reasoning, "Vous gardez la voiture.");
    }

    #[test]
    fn parses_fenced_json() {
        let text = "```json\n{\"recommendation\": \"LLD\", \"reasoning\": \"Aucune contrainte.\"}\n```\n";
        let r = parse_recommendation(text).unwrap();
        assert_eq!(r.recommendation, FinancingOption::Lld);
    }

    #[test]
    fn empty_output_is_reported() {
        assert!(matches!(parse_recommendation("  \n"), Err(RecommendationError::EmptyOutput)));
        assert!(matches!(parse_recommendation("```\n```"), Err(RecommendationError::EmptyOutput)));
    }

    #[test]
    fn prose_is_malformed() {
        let err = parse_recommendation("Je recommande la LOA.").unwrap_err();
        assert!(matches!(err, RecommendationError::MalformedResponse(_)));
    }

    #[test]
    fn missing_or_blank_fields_are_reported() {
        let err = parse_recommendation(r#"{"recommendation": "LOA"}"#).unwrap_err();
        assert!(matches!(err, RecommendationError::MissingField("reasoning")));

        let err = parse_recommendation(r#"{"recommendation": " ", "reasoning": "x"}"#).unwrap_err();
        assert!(matches!(err, RecommendationError::MissingField("recommendation")));
    }

    #[test]
    fn unknown_option_is_reported() {
        let err = parse_recommendation(r#"{"recommendation": "Leasing", "reasoning": "x"}"#).unwrap_err();
        match err {
            RecommendationError::UnknownOption(label) => assert_eq!(label, "Leasing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
