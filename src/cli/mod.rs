//! Command-line parsing for the financing comparator.
//!
//! Argument parsing stays separate from the calculators; `app` turns these
//! structs into domain inputs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Preference;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "autofin", version, about = "Compare vehicle financing: loan, LOA and LLD")]
pub struct Cli {
    /// Log debug events to stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare the three options, print the table, summary and charts.
    Compare(CompareArgs),
    /// Ask the recommendation service which option fits the profile.
    Advise(AdviseArgs),
    /// Suggest a loan rate and an LOA residual value for a vehicle profile.
    Estimate(EstimateArgs),
}

/// The financing input, from flags or from a JSON file.
///
/// Defaults are the values pre-filled in the comparison form. `--input`
/// cannot be combined with any other input flag.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// JSON file with the full input (snake_case or camelCase keys).
    #[arg(
        long,
        value_name = "JSON",
        conflicts_with_all = [
            "price", "down", "duration", "mileage", "rate", "residual_rate", "credit_duration",
            "credit_payment", "loa_payment", "lld_payment", "loa_first_payment",
            "lld_first_payment", "flexibility", "zero_constraint", "cost_optimization",
        ]
    )]
    pub input: Option<PathBuf>,

    /// Vehicle price (€).
    #[arg(long, default_value_t = 22000.0)]
    pub price: f64,

    /// Loan down payment (€).
    #[arg(long, default_value_t = 2000.0)]
    pub down: f64,

    /// Comparison horizon (years).
    #[arg(long, default_value_t = 4)]
    pub duration: u32,

    /// Kilometres driven per year.
    #[arg(long, default_value_t = 12000)]
    pub mileage: u32,

    /// Annual loan rate (%). Estimated from the down payment when omitted.
    #[arg(long)]
    pub rate: Option<f64>,

    /// LOA purchase option (% of price). Estimated from the duration when omitted.
    #[arg(long = "residual-rate")]
    pub residual_rate: Option<f64>,

    /// Loan term (years) when it runs past the horizon.
    #[arg(long = "credit-duration")]
    pub credit_duration: Option<u32>,

    /// Loan monthly payment (€).
    #[arg(long = "credit-payment", default_value_t = 420.0)]
    pub credit_payment: f64,

    /// LOA monthly rent (€).
    #[arg(long = "loa-payment", default_value_t = 280.0)]
    pub loa_payment: f64,

    /// LLD monthly rent (€).
    #[arg(long = "lld-payment", default_value_t = 264.0)]
    pub lld_payment: f64,

    /// Increased first LOA rent (€).
    #[arg(long = "loa-first-payment", default_value_t = 0.0)]
    pub loa_first_payment: f64,

    /// Increased first LLD rent (€).
    #[arg(long = "lld-first-payment", default_value_t = 0.0)]
    pub lld_first_payment: f64,

    /// Wants flexibility at the end of the contract.
    #[arg(long, value_enum, default_value_t = Preference::No)]
    pub flexibility: Preference,

    /// Wants no maintenance or resale constraint.
    #[arg(long = "zero-constraint", value_enum, default_value_t = Preference::No)]
    pub zero_constraint: Preference,

    /// Wants the lowest total cost.
    #[arg(long = "cost-optimization", value_enum, default_value_t = Preference::Yes)]
    pub cost_optimization: Preference,
}

/// Overrides for the recommendation service settings read from the environment.
#[derive(Debug, Args, Clone, Default)]
pub struct AdvisorArgs {
    /// Model name sent to the chat-completions endpoint.
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long = "base-url")]
    pub base_url: Option<String>,

    /// Request timeout (seconds).
    #[arg(long)]
    pub timeout: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub advisor: AdvisorArgs,

    /// Also ask the recommendation service (costs are printed even if it fails).
    #[arg(long)]
    pub advise: bool,

    /// JSON file overriding cost assumptions (partial files allowed).
    #[arg(long, value_name = "JSON")]
    pub assumptions: Option<PathBuf>,

    /// Export the comparison to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Skip the terminal charts.
    #[arg(long)]
    pub no_chart: bool,

    /// Chart width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Evolution chart height (rows).
    #[arg(long, default_value_t = 15)]
    pub height: usize,
}

#[derive(Debug, Args)]
pub struct AdviseArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub advisor: AdvisorArgs,

    /// JSON file overriding cost assumptions (partial files allowed).
    #[arg(long, value_name = "JSON")]
    pub assumptions: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EstimateArgs {
    /// Vehicle price (€).
    #[arg(long, default_value_t = 22000.0)]
    pub price: f64,

    /// Loan down payment (€).
    #[arg(long, default_value_t = 2000.0)]
    pub down: f64,

    /// Contract duration (years).
    #[arg(long, default_value_t = 4)]
    pub duration: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_defaults_match_the_form() {
        let cli = Cli::try_parse_from(["autofin", "compare"]).unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.input.price, 22000.0);
        assert_eq!(args.input.rate, None);
        assert_eq!(args.input.lld_payment, 264.0);
        assert_eq!(args.input.cost_optimization, Preference::Yes);
        assert!(!args.advise);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_flags_and_global_verbose() {
        let cli = Cli::try_parse_from([
            "autofin", "advise", "--price", "30000", "--rate", "4.9", "--flexibility", "yes",
            "--model", "local", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Advise(args) = cli.command else {
            panic!("expected advise");
        };
        assert_eq!(args.input.price, 30000.0);
        assert_eq!(args.input.rate, Some(4.9));
        assert_eq!(args.input.flexibility, Preference::Yes);
        assert_eq!(args.advisor.model.as_deref(), Some("local"));
    }

    #[test]
    fn input_file_excludes_other_input_flags() {
        let cli = Cli::try_parse_from(["autofin", "compare", "--input", "in.json", "--advise"]).unwrap();
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.input.input, Some(PathBuf::from("in.json")));

        for flag in [["--price", "30000"], ["--residual-rate", "40"], ["--flexibility", "yes"]] {
            let argv = ["autofin", "compare", "--input", "in.json", flag[0], flag[1]];
            let err = Cli::try_parse_from(argv).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        }
    }

    #[test]
    fn rejects_unknown_preference_value() {
        assert!(Cli::try_parse_from(["autofin", "compare", "--flexibility", "maybe"]).is_err());
    }
}
