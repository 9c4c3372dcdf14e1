//! Top-level application orchestration.
//!
//! `src/main.rs` stays tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - builds the financing input (flags, JSON file, estimator fallbacks)
//! - runs the comparison pipeline
//! - prints tables, charts and the recommendation
//! - writes the optional export

use std::path::Path;

use clap::Parser;

use crate::advisor::ChatCompletionsRecommender;
use crate::calc::{down_payment_ratio, estimate_interest_rate, estimate_residual_value, suggest_defaults};
use crate::cli::{AdviseArgs, AdvisorArgs, Command, CompareArgs, EstimateArgs, InputArgs};
use crate::config::{AdvisorConfig, CostAssumptions};
use crate::domain::{FinancingInput, validate_profile};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `autofin` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::logging::init_tracing(cli.verbose);

    match cli.command {
        Command::Compare(args) => handle_compare(args),
        Command::Advise(args) => handle_advise(args),
        Command::Estimate(args) => handle_estimate(args),
    }
}

fn handle_compare(args: CompareArgs) -> Result<(), AppError> {
    let input = input_from_args(&args.input)?;
    let assumptions = load_assumptions(args.assumptions.as_deref())?;

    let run = if args.advise {
        // A missing key here only costs the recommendation section.
        match ChatCompletionsRecommender::new(advisor_config_from_args(&args.advisor)) {
            Ok(recommender) => pipeline::run_with_advice(input, assumptions, &recommender)?,
            Err(err) => {
                tracing::warn!(error = %err, "recommendation unavailable");
                let mut run = pipeline::run_comparison(input, assumptions)?;
                run.recommendation = Some(Err(err));
                run
            }
        }
    } else {
        pipeline::run_comparison(input, assumptions)?
    };

    println!("{}", crate::report::format_comparison(&run.input, &run.comparison));
    println!("{}", crate::report::format_summary(&run.input, &run.comparison));

    if !args.no_chart {
        println!("{}", crate::plot::render_cost_bars(&run.comparison, args.width));
        println!("{}", crate::plot::render_cost_breakdown(&run.comparison, args.width));
        println!(
            "{}",
            crate::plot::render_payment_evolution(&run.evolution, args.width, args.height)
        );
    }

    if let Some(outcome) = &run.recommendation {
        println!("{}", crate::report::format_recommendation(outcome));
    }

    if let Some(path) = &args.export {
        crate::io::write_comparison_json(
            path,
            &run.input,
            &run.assumptions,
            &run.comparison,
            run.recommendation.as_ref(),
        )?;
    }

    Ok(())
}

fn handle_advise(args: AdviseArgs) -> Result<(), AppError> {
    let input = input_from_args(&args.input)?;
    let recommender = ChatCompletionsRecommender::new(advisor_config_from_args(&args.advisor))?;
    let assumptions = load_assumptions(args.assumptions.as_deref())?;
    let run = pipeline::run_with_advice(input, assumptions, &recommender)?;

    println!("{}", crate::report::format_summary(&run.input, &run.comparison));

    match run.recommendation {
        Some(Ok(result)) => {
            println!("{}", crate::report::format_recommendation(&Ok(result)));
            Ok(())
        }
        Some(Err(err)) => Err(err.into()),
        None => Ok(()),
    }
}

fn handle_estimate(args: EstimateArgs) -> Result<(), AppError> {
    validate_profile(args.price, args.down, args.duration)?;
    let defaults = suggest_defaults(args.price, args.down, args.duration);
    println!(
        "{}",
        crate::report::format_profile_defaults(args.price, args.down, args.duration, &defaults)
    );
    Ok(())
}

/// Cost assumptions from a JSON file, or the defaults.
pub fn load_assumptions(path: Option<&Path>) -> Result<CostAssumptions, AppError> {
    match path {
        Some(path) => crate::io::read_assumptions_json(path),
        None => Ok(CostAssumptions::default()),
    }
}

/// Build the financing input from a JSON file or from flags.
///
/// Omitted rates fall back to the profile estimator.
pub fn input_from_args(args: &InputArgs) -> Result<FinancingInput, AppError> {
    if let Some(path) = &args.input {
        return crate::io::read_input_json(path);
    }

    let ratio = down_payment_ratio(args.price, args.down);
    Ok(FinancingInput {
        vehicle_price: args.price,
        down_payment: args.down,
        duration: args.duration,
        mileage: args.mileage,
        interest_rate: args.rate.unwrap_or_else(|| estimate_interest_rate(ratio)),
        residual_value_rate: args
            .residual_rate
            .unwrap_or_else(|| estimate_residual_value(args.duration)),
        monthly_payment_credit: args.credit_payment,
        monthly_payment_loa: args.loa_payment,
        monthly_payment_lld: args.lld_payment,
        first_payment_loa: args.loa_first_payment,
        first_payment_lld: args.lld_first_payment,
        credit_duration: args.credit_duration,
        preference_flexibility: args.flexibility,
        preference_zero_constraint: args.zero_constraint,
        preference_cost_optimization: args.cost_optimization,
    })
}

/// Environment settings with CLI overrides applied.
pub fn advisor_config_from_args(args: &AdvisorArgs) -> AdvisorConfig {
    apply_overrides(AdvisorConfig::from_env(), args)
}

fn apply_overrides(mut config: AdvisorConfig, args: &AdvisorArgs) -> AdvisorConfig {
    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout.filter(|&t| t > 0) {
        config.timeout_secs = timeout;
    }
    config
}
