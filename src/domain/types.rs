//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - read from an input JSON file or assembled from CLI flags
//! - passed by value through the calculators (every record is per-invocation)
//! - exported to JSON alongside the comparison

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// One of the three financing options being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FinancingOption {
    /// Installment loan: the buyer owns the vehicle from day one.
    Credit,
    /// Lease with a purchase option at the contractual residual value.
    Loa,
    /// Long-term rental, no ownership path.
    Lld,
}

impl FinancingOption {
    /// Display order used by tables, charts and tie-breaking in rankings.
    pub const ALL: [FinancingOption; 3] = [
        FinancingOption::Credit,
        FinancingOption::Loa,
        FinancingOption::Lld,
    ];

    /// Short label, as used in the recommendation prompt.
    pub fn label(self) -> &'static str {
        match self {
            FinancingOption::Credit => "Crédit",
            FinancingOption::Loa => "LOA",
            FinancingOption::Lld => "LLD",
        }
    }

    /// Longer label for table headers.
    pub fn display_name(self) -> &'static str {
        match self {
            FinancingOption::Credit => "Crédit classique",
            FinancingOption::Loa => "LOA",
            FinancingOption::Lld => "LLD",
        }
    }

    /// Resolve a free-text label to an option.
    ///
    /// Matching is case-insensitive, ignores French accents and works on whole
    /// words, so `"LOA (location avec option d'achat)"` resolves to `Loa` while
    /// `"loan"` resolves to `Credit`. A label naming zero or several options
    /// returns `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .to_lowercase()
            .chars()
            .map(|c| match c {
                'é' | 'è' | 'ê' | 'ë' => 'e',
                'à' | 'â' => 'a',
                'ô' => 'o',
                other => other,
            })
            .collect();

        let mut found: Option<FinancingOption> = None;
        for word in normalized.split(|c: char| !c.is_alphanumeric()) {
            let option = match word {
                "credit" | "loan" => FinancingOption::Credit,
                "loa" => FinancingOption::Loa,
                "lld" => FinancingOption::Lld,
                _ => continue,
            };
            match found {
                None => found = Some(option),
                Some(existing) if existing == option => {}
                Some(_) => return None,
            }
        }
        found
    }
}

impl std::fmt::Display for FinancingOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A yes/no answer to one of the profile questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Preference {
    Yes,
    #[default]
    No,
}

impl Preference {
    pub fn as_str(self) -> &'static str {
        match self {
            Preference::Yes => "yes",
            Preference::No => "no",
        }
    }
}

fn preference_yes() -> Preference {
    Preference::Yes
}

/// The full user submission.
///
/// `duration` and `mileage` are shared by all three calculations so the options
/// are compared over the same horizon. Field names accept both snake_case and
/// the camelCase keys of the web form payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingInput {
    #[serde(alias = "vehiclePrice")]
    pub vehicle_price: f64,
    #[serde(alias = "downPayment")]
    pub down_payment: f64,
    /// Comparison horizon in years.
    pub duration: u32,
    /// Kilometres driven per year.
    pub mileage: u32,
    /// Annual nominal loan rate, in percent.
    #[serde(alias = "interestRate")]
    pub interest_rate: f64,
    /// LOA purchase-option price, in percent of the vehicle price.
    #[serde(alias = "residualValueRate")]
    pub residual_value_rate: f64,
    #[serde(alias = "monthlyPaymentCredit")]
    pub monthly_payment_credit: f64,
    #[serde(alias = "monthlyPaymentLOA", alias = "monthlyPaymentLoa")]
    pub monthly_payment_loa: f64,
    #[serde(alias = "monthlyPaymentLLD", alias = "monthlyPaymentLld")]
    pub monthly_payment_lld: f64,
    /// Increased first rent for the LOA. Unlike a loan down payment it does not
    /// reduce any financed capital.
    #[serde(default, alias = "firstPaymentLOA", alias = "firstPaymentLoa")]
    pub first_payment_loa: f64,
    #[serde(default, alias = "firstPaymentLLD", alias = "firstPaymentLld")]
    pub first_payment_lld: f64,
    /// Loan term in years when it runs past the comparison horizon.
    #[serde(default, alias = "creditDuration")]
    pub credit_duration: Option<u32>,
    #[serde(default, alias = "preferenceFlexibility")]
    pub preference_flexibility: Preference,
    #[serde(default, alias = "preferenceZeroConstraint", alias = "preferenceZeroContraint")]
    pub preference_zero_constraint: Preference,
    #[serde(default = "preference_yes", alias = "preferenceCostOptimization")]
    pub preference_cost_optimization: Preference,
}

impl FinancingInput {
    /// Loan term in years, defaulting to the comparison horizon.
    pub fn credit_term(&self) -> u32 {
        self.credit_duration.unwrap_or(self.duration).max(self.duration)
    }

    pub fn credit_params(&self) -> CreditParams {
        CreditParams {
            vehicle_price: self.vehicle_price,
            down_payment: self.down_payment,
            duration: self.duration,
            credit_duration: self.credit_term(),
            monthly_payment: self.monthly_payment_credit,
            interest_rate: self.interest_rate,
        }
    }

    pub fn loa_params(&self) -> LoaParams {
        LoaParams {
            vehicle_price: self.vehicle_price,
            first_payment: self.first_payment_loa,
            duration: self.duration,
            residual_value_rate: self.residual_value_rate,
            monthly_payment: self.monthly_payment_loa,
            mileage: self.mileage,
        }
    }

    pub fn lld_params(&self) -> LldParams {
        LldParams {
            vehicle_price: self.vehicle_price,
            first_payment: self.first_payment_lld,
            duration: self.duration,
            monthly_payment: self.monthly_payment_lld,
            mileage: self.mileage,
        }
    }
}

/// Inputs of the loan calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditParams {
    pub vehicle_price: f64,
    pub down_payment: f64,
    /// Comparison horizon in years.
    pub duration: u32,
    /// Full loan term in years (`>= duration`).
    pub credit_duration: u32,
    /// Payment entered by the user; may differ from the theoretical annuity.
    pub monthly_payment: f64,
    pub interest_rate: f64,
}

/// Inputs of the LOA calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoaParams {
    pub vehicle_price: f64,
    pub first_payment: f64,
    pub duration: u32,
    pub residual_value_rate: f64,
    pub monthly_payment: f64,
    pub mileage: u32,
}

/// Inputs of the LLD calculation.
///
/// `vehicle_price` does not enter the totals; it is kept so fee rules can scale with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LldParams {
    pub vehicle_price: f64,
    pub first_payment: f64,
    pub duration: u32,
    pub monthly_payment: f64,
    pub mileage: u32,
}

/// Costs reported next to the payments, over the whole horizon.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AdditionalFees {
    pub establishment_fee: f64,
    pub insurance: f64,
    pub maintenance: f64,
    /// Excess-mileage penalties.
    pub penalties: f64,
}

impl AdditionalFees {
    pub fn total(&self) -> f64 {
        self.establishment_fee + self.insurance + self.maintenance + self.penalties
    }
}

/// Cost breakdown of one financing option.
///
/// Amounts are unrounded euros; rounding happens only when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetailedCosts {
    /// Payment entered by the user; cash flows are built on it.
    pub monthly_payment: f64,
    /// Textbook annuity over the full loan term (loan only).
    #[serde(default)]
    pub theoretical_monthly_payment: Option<f64>,
    /// All cash paid over the horizon, upfront amount included.
    pub total_payments: f64,
    pub total_interest: f64,
    /// Value retained (loan) or purchasable (LOA) at the end of the horizon.
    pub residual_value: Option<f64>,
    /// Loan principal still owed at the end of the horizon.
    pub remaining_debt: Option<f64>,
    pub total_cost_ownership: f64,
    /// Net cash cost of use over the horizon; the ranking field.
    pub total_cost_usage: f64,
    pub additional_fees: AdditionalFees,
}

impl DetailedCosts {
    /// Cost of use with every additional fee folded in.
    pub fn total_cost_with_fees(&self) -> f64 {
        self.total_cost_usage + self.additional_fees.total()
    }
}

/// Output of the recommendation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub recommendation: FinancingOption,
    pub reasoning: String,
}
