//! Lease-type options: LOA (lease with purchase option) and LLD (long-term rental).
//!
//! Neither option carries interest of its own (it is priced into the rent), and
//! both charge penalties above a yearly mileage allowance.

use crate::config::{LldAssumptions, LoaAssumptions};
use crate::domain::{AdditionalFees, DetailedCosts, LldParams, LoaParams};

/// Compute the LOA cost breakdown.
///
/// `total_cost_ownership` assumes the purchase option is exercised at term end;
/// `total_cost_usage` assumes the vehicle is returned.
pub fn calculate_loa(params: &LoaParams, assumptions: &LoaAssumptions) -> DetailedCosts {
    let residual_value = params.vehicle_price * params.residual_value_rate / 100.0;
    let total_payments = rent_total(params.monthly_payment, params.duration, params.first_payment);

    let annual_insurance =
        (params.vehicle_price * assumptions.insurance_rate).max(assumptions.insurance_floor);

    DetailedCosts {
        monthly_payment: params.monthly_payment,
        theoretical_monthly_payment: None,
        total_payments,
        total_interest: 0.0,
        residual_value: Some(residual_value),
        remaining_debt: None,
        total_cost_ownership: total_payments + residual_value,
        total_cost_usage: total_payments,
        additional_fees: AdditionalFees {
            establishment_fee: assumptions.establishment_fee,
            insurance: annual_insurance * params.duration as f64,
            maintenance: 0.0,
            penalties: mileage_penalty(
                params.mileage,
                assumptions.mileage_allowance,
                assumptions.penalty_per_km,
                params.duration,
            ),
        },
    }
}

/// Compute the LLD cost breakdown. There is no ownership path.
pub fn calculate_lld(params: &LldParams, assumptions: &LldAssumptions) -> DetailedCosts {
    let total_payments = rent_total(params.monthly_payment, params.duration, params.first_payment);

    DetailedCosts {
        monthly_payment: params.monthly_payment,
        theoretical_monthly_payment: None,
        total_payments,
        total_interest: 0.0,
        residual_value: Some(0.0),
        remaining_debt: None,
        total_cost_ownership: 0.0,
        total_cost_usage: total_payments,
        additional_fees: AdditionalFees {
            establishment_fee: assumptions.establishment_fee,
            insurance: 0.0,
            maintenance: 0.0,
            penalties: mileage_penalty(
                params.mileage,
                assumptions.mileage_allowance,
                assumptions.penalty_per_km,
                params.duration,
            ),
        },
    }
}

/// Excess-mileage penalty over the whole contract.
///
/// Zero at or below the allowance, then linear in the yearly excess.
pub fn mileage_penalty(mileage: u32, allowance: u32, per_km: f64, years: u32) -> f64 {
    if mileage > allowance {
        (mileage - allowance) as f64 * per_km * years as f64
    } else {
        0.0
    }
}

fn rent_total(monthly_payment: f64, years: u32, first_payment: f64) -> f64 {
    monthly_payment * (years * 12) as f64 + first_payment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loa() -> LoaParams {
        LoaParams {
            vehicle_price: 22000.0,
            first_payment: 0.0,
            duration: 4,
            residual_value_rate: 42.0,
            monthly_payment: 280.0,
            mileage: 12000,
        }
    }

    fn lld() -> LldParams {
        LldParams {
            vehicle_price: 22000.0,
            first_payment: 0.0,
            duration: 4,
            monthly_payment: 264.0,
            mileage: 12000,
        }
    }

    #[test]
    fn loa_default_scenario() {
        let c = calculate_loa(&loa(), &LoaAssumptions::default());
        assert_eq!(c.residual_value, Some(9240.0));
        assert_eq!(c.total_payments, 280.0 * 48.0);
        assert_eq!(c.total_cost_usage, c.total_payments);
        assert_eq!(c.total_cost_ownership, 280.0 * 48.0 + 9240.0);
        assert_eq!(c.total_interest, 0.0);
        assert_eq!(c.remaining_debt, None);
        assert_eq!(c.theoretical_monthly_payment, None);
        assert_eq!(c.additional_fees.establishment_fee, 350.0);
        assert_eq!(c.additional_fees.insurance, 500.0 * 4.0);
        assert_eq!(c.additional_fees.maintenance, 0.0);
        assert_eq!(c.additional_fees.penalties, 0.0);
    }

    #[test]
    fn loa_first_payment_is_added_to_rents() {
        let p = LoaParams { first_payment: 3000.0, ..loa() };
        let c = calculate_loa(&p, &LoaAssumptions::default());
        assert_eq!(c.total_payments, 280.0 * 48.0 + 3000.0);
        // The purchase option price does not move with the first rent.
        assert_eq!(c.residual_value, Some(9240.0));
    }

    #[test]
    fn lld_default_scenario() {
        let c = calculate_lld(&lld(), &LldAssumptions::default());
        assert_eq!(c.total_payments, 264.0 * 48.0);
        assert_eq!(c.total_cost_usage, c.total_payments);
        assert_eq!(c.total_cost_ownership, 0.0);
        assert_eq!(c.residual_value, Some(0.0));
        assert_eq!(c.theoretical_monthly_payment, None);
        assert_eq!(c.additional_fees.establishment_fee, 200.0);
        assert_eq!(c.additional_fees.insurance, 0.0);
        assert_eq!(c.additional_fees.maintenance, 0.0);
        assert_eq!(c.additional_fees.penalties, 0.0);
    }

    #[test]
    fn high_mileage_penalties() {
        let loa = LoaParams { mileage: 20000, duration: 3, ..loa() };
        let lld = LldParams { mileage: 20000, duration: 3, ..lld() };
        let loa_pen = calculate_loa(&loa, &LoaAssumptions::default()).additional_fees.penalties;
        let lld_pen = calculate_lld(&lld, &LldAssumptions::default()).additional_fees.penalties;
        assert!((loa_pen - 1500.0).abs() < 1e-9, "got {loa_pen}");
        assert!((lld_pen - 1800.0).abs() < 1e-9, "got {lld_pen}");
    }

    #[test]
    fn penalties_are_zero_up_to_allowance_then_linear() {
        assert_eq!(mileage_penalty(15000, 15000, 0.10, 4), 0.0);
        assert_eq!(mileage_penalty(1000, 15000, 0.12, 4), 0.0);

        let mut prev = 0.0;
        for mileage in (16000..=40000).step_by(1000) {
            let pen = mileage_penalty(mileage, 15000, 0.12, 2);
            assert!(pen > prev);
            let expected = (mileage - 15000) as f64 * 0.12 * 2.0;
            assert!((pen - expected).abs() < 1e-9);
            prev = pen;
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let p = LoaParams { mileage: 23456, ..loa() };
        let a = LoaAssumptions::default();
        assert_eq!(calculate_loa(&p, &a), calculate_loa(&p, &a));
        let p = LldParams { mileage: 23456, ..lld() };
        let a = LldAssumptions::default();
        assert_eq!(calculate_lld(&p, &a), calculate_lld(&p, &a));
    }
}
