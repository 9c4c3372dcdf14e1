//! Shared comparison pipeline used by every subcommand.
//!
//! validate -> compare -> payment evolution -> (optional) recommendation
//!
//! The front-end only decides what to print. A failed recommendation never
//! discards the computed costs; it is kept next to them as an `Err`.

use crate::advisor::{RecommendationError, Recommender};
use crate::config::CostAssumptions;
use crate::domain::{FinancingInput, RecommendationResult};
use crate::error::AppError;
use crate::report::{Comparison, EvolutionPoint, compare, payment_evolution};

/// All computed outputs of a single run.
#[derive(Debug)]
pub struct RunOutput {
    pub input: FinancingInput,
    pub assumptions: CostAssumptions,
    pub comparison: Comparison,
    pub evolution: Vec<EvolutionPoint>,
    /// `None` when no recommendation was requested.
    pub recommendation: Option<Result<RecommendationResult, RecommendationError>>,
}

/// Validate the input and run the three calculators.
pub fn run_comparison(input: FinancingInput, assumptions: CostAssumptions) -> Result<RunOutput, AppError> {
    input.validate()?;

    let comparison = compare(&input, &assumptions);
    let evolution = payment_evolution(&comparison);
    tracing::debug!(
        cheapest = %comparison.cheapest(),
        savings = comparison.savings,
        "comparison computed"
    );

    Ok(RunOutput {
        input,
        assumptions,
        comparison,
        evolution,
        recommendation: None,
    })
}

/// Same as [`run_comparison`], then ask `recommender` once.
pub fn run_with_advice(
    input: FinancingInput,
    assumptions: CostAssumptions,
    recommender: &dyn Recommender,
) -> Result<RunOutput, AppError> {
    let mut run = run_comparison(input, assumptions)?;
    run.recommendation = Some(advise(recommender, &run.input));
    Ok(run)
}

fn advise(
    recommender: &dyn Recommender,
    input: &FinancingInput,
) -> Result<RecommendationResult, RecommendationError> {
    match recommender.recommend(input) {
        Ok(result) => {
            tracing::info!(recommendation = %result.recommendation, "recommendation received");
            Ok(result)
        }
        Err(err) => {
            tracing::warn!(error = %err, "recommendation failed");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FinancingOption, ValidationError};
    use crate::report::tests::form_defaults;

    struct Fixed(FinancingOption);

    impl Recommender for Fixed {
        fn recommend(&self, _: &FinancingInput) -> Result<RecommendationResult, RecommendationError> {
            Ok(RecommendationResult {
                recommendation: self.0,
                reasoning: "ok".to_string(),
            })
        }
    }

    #[test]
    fn comparison_covers_the_horizon() {
        let run = run_comparison(form_defaults(), CostAssumptions::default()).unwrap();
        assert_eq!(run.evolution.len(), 48);
        assert_eq!(run.comparison.cheapest(), FinancingOption::Credit);
        assert!(run.recommendation.is_none());
    }

    #[test]
    fn invalid_input_stops_before_calculating() {
        let input = FinancingInput { duration: 0, ..form_defaults() };
        let err = run_comparison(input, CostAssumptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
        assert_eq!(
            err.to_string(),
            format!("Invalid input: {}", ValidationError::Duration(0))
        );
    }

    #[test]
    fn advice_is_attached_to_the_run() {
        let run = run_with_advice(form_defaults(), CostAssumptions::default(), &Fixed(FinancingOption::Lld))
            .unwrap();
        let rec = run.recommendation.unwrap().unwrap();
        assert_eq!(rec.recommendation, FinancingOption::Lld);
    }
}
