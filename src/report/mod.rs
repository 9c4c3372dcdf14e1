//! Comparison of the three options and formatted terminal output.
//!
//! `compare` is the single place where the calculators are combined, so every
//! front-end (CLI table, JSON export, charts) ranks options the same way.

use serde::Serialize;

use crate::calc::{calculate_credit, calculate_lld, calculate_loa};
use crate::config::CostAssumptions;
use crate::domain::{DetailedCosts, FinancingInput, FinancingOption};

pub mod format;

pub use format::*;

/// Above this yearly mileage, lease penalties usually make the loan the better deal.
pub const HIGH_MILEAGE_WARNING_KM: u32 = 20_000;

/// One entry of the ranking by cost of use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedOption {
    pub option: FinancingOption,
    pub total_cost_usage: f64,
}

/// Cost breakdowns for all three options over the same horizon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Comparison horizon in years.
    pub duration: u32,
    pub credit: DetailedCosts,
    pub loa: DetailedCosts,
    pub lld: DetailedCosts,
    /// Cheapest first; ties keep display order.
    pub ranking: Vec<RankedOption>,
    /// Difference between the most and the least expensive cost of use.
    pub savings: f64,
}

impl Comparison {
    pub fn costs(&self, option: FinancingOption) -> &DetailedCosts {
        match option {
            FinancingOption::Credit => &self.credit,
            FinancingOption::Loa => &self.loa,
            FinancingOption::Lld => &self.lld,
        }
    }

    pub fn cheapest(&self) -> FinancingOption {
        self.ranking[0].option
    }

    pub fn most_expensive(&self) -> FinancingOption {
        self.ranking[self.ranking.len() - 1].option
    }
}

/// Run the three calculators on one validated input.
pub fn compare(input: &FinancingInput, assumptions: &CostAssumptions) -> Comparison {
    let credit = calculate_credit(&input.credit_params(), &assumptions.credit);
    let loa = calculate_loa(&input.loa_params(), &assumptions.loa);
    let lld = calculate_lld(&input.lld_params(), &assumptions.lld);

    let mut ranking: Vec<RankedOption> = [
        (FinancingOption::Credit, &credit),
        (FinancingOption::Loa, &loa),
        (FinancingOption::Lld, &lld),
    ]
    .into_iter()
    .map(|(option, costs)| RankedOption {
        option,
        total_cost_usage: costs.total_cost_usage,
    })
    .collect();
    // Stable sort: equal costs keep Crédit, LOA, LLD order.
    ranking.sort_by(|a, b| a.total_cost_usage.total_cmp(&b.total_cost_usage));

    let savings = ranking[ranking.len() - 1].total_cost_usage - ranking[0].total_cost_usage;

    Comparison {
        duration: input.duration,
        credit,
        loa,
        lld,
        ranking,
        savings,
    }
}

/// Cumulative monthly payments at one month of the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvolutionPoint {
    pub month: u32,
    pub credit: f64,
    pub loa: f64,
    pub lld: f64,
}

impl EvolutionPoint {
    pub fn value(&self, option: FinancingOption) -> f64 {
        match option {
            FinancingOption::Credit => self.credit,
            FinancingOption::Loa => self.loa,
            FinancingOption::Lld => self.lld,
        }
    }
}

/// Cumulative monthly payments per option, months `1..=duration*12`.
pub fn payment_evolution(comparison: &Comparison) -> Vec<EvolutionPoint> {
    (1..=comparison.duration * 12)
        .map(|month| {
            let m = month as f64;
            EvolutionPoint {
                month,
                credit: comparison.credit.monthly_payment * m,
                loa: comparison.loa.monthly_payment * m,
                lld: comparison.lld.monthly_payment * m,
            }
        })
        .collect()
}

pub fn is_high_mileage(mileage: u32) -> bool {
    mileage > HIGH_MILEAGE_WARNING_KM
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Preference;

    pub(crate) fn form_defaults() -> FinancingInput {
        FinancingInput {
            vehicle_price: 22000.0,
            down_payment: 2000.0,
            duration: 4,
            mileage: 12000,
            interest_rate: 5.8,
            residual_value_rate: 42.0,
            monthly_payment_credit: 420.0,
            monthly_payment_loa: 280.0,
            monthly_payment_lld: 264.0,
            first_payment_loa: 0.0,
            first_payment_lld: 0.0,
            credit_duration: None,
            preference_flexibility: Preference::No,
            preference_zero_constraint: Preference::No,
            preference_cost_optimization: Preference::Yes,
        }
    }

    #[test]
    fn ranks_by_cost_of_use() {
        let c = compare(&form_defaults(), &CostAssumptions::default());
        // Crédit ≈ 10 676, LLD = 12 672, LOA = 13 440.
        let order: Vec<FinancingOption> = c.ranking.iter().map(|r| r.option).collect();
        assert_eq!(
            order,
            vec![FinancingOption::Credit, FinancingOption::Lld, FinancingOption::Loa]
        );
        assert_eq!(c.cheapest(), FinancingOption::Credit);
        assert_eq!(c.most_expensive(), FinancingOption::Loa);
        assert!((c.savings - (13440.0 - c.credit.total_cost_usage)).abs() < 1e-9);
    }

    #[test]
    fn default_scenario_has_no_penalties() {
        let c = compare(&form_defaults(), &CostAssumptions::default());
        for option in FinancingOption::ALL {
            assert_eq!(c.costs(option).additional_fees.penalties, 0.0);
        }
    }

    #[test]
    fn ties_keep_display_order() {
        let input = FinancingInput {
            monthly_payment_loa: 300.0,
            monthly_payment_lld: 300.0,
            ..form_defaults()
        };
        let c = compare(&input, &CostAssumptions::default());
        let loa_pos = c.ranking.iter().position(|r| r.option == FinancingOption::Loa).unwrap();
        let lld_pos = c.ranking.iter().position(|r| r.option == FinancingOption::Lld).unwrap();
        assert!(loa_pos < lld_pos);
    }

    #[test]
    fn every_cost_of_use_is_non_negative() {
        let mut input = form_defaults();
        for duration in 1..=10 {
            for mileage in [1000, 15000, 30000] {
                for down in [0.0, 11000.0, 22000.0] {
                    input.duration = duration;
                    input.mileage = mileage;
                    input.down_payment = down;
                    input.monthly_payment_credit = 1.0;
                    let c = compare(&input, &CostAssumptions::default());
                    for option in FinancingOption::ALL {
                        assert!(c.costs(option).total_cost_usage >= 0.0);
                        assert!(c.costs(option).total_cost_with_fees() >= 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn evolution_covers_every_month() {
        let c = compare(&form_defaults(), &CostAssumptions::default());
        let points = payment_evolution(&c);
        assert_eq!(points.len(), 48);
        assert_eq!(points[0].month, 1);
        assert_eq!(points[47].credit, 420.0 * 48.0);
        assert_eq!(points[47].value(FinancingOption::Lld), 264.0 * 48.0);
    }

    #[test]
    fn high_mileage_threshold() {
        assert!(!is_high_mileage(20_000));
        assert!(is_high_mileage(20_001));
    }
}
