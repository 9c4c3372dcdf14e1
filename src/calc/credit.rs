//! Installment loan.
//!
//! The amortization is a single-period estimate. The theoretical payment comes
//! from the annuity formula over the full loan term and is reported as
//! `theoretical_monthly_payment`; cash flows use the payment entered by the user.

use crate::config::CreditAssumptions;
use crate::domain::{AdditionalFees, CreditParams, DetailedCosts};
use crate::math::{annuity_payment, annuity_present_value, monthly_rate};

/// Compute the loan cost breakdown over the comparison horizon.
pub fn calculate_credit(params: &CreditParams, assumptions: &CreditAssumptions) -> DetailedCosts {
    let principal = params.vehicle_price - params.down_payment;
    let rate = monthly_rate(params.interest_rate);

    let horizon_payments = params.duration * 12;
    let credit_payments = params.credit_duration.max(params.duration) * 12;

    let theoretical_payment = annuity_payment(principal, rate, credit_payments);
    let total_interest = if rate > 0.0 {
        theoretical_payment * credit_payments as f64 - principal
    } else {
        0.0
    };

    let remaining_debt = if credit_payments > horizon_payments {
        annuity_present_value(theoretical_payment, rate, credit_payments - horizon_payments)
    } else {
        0.0
    };

    let residual_value = retained_value(params.vehicle_price, params.duration, assumptions);

    let paid_months = horizon_payments.min(credit_payments);
    let total_payments = params.monthly_payment * paid_months as f64 + params.down_payment;

    // A user-entered payment far below the theoretical annuity can leave the
    // retained value above the cash spent; cost of use floors at zero.
    let total_cost_usage = (total_payments + remaining_debt - residual_value).max(0.0);

    let establishment_fee =
        (principal * assumptions.establishment_fee_rate).min(assumptions.establishment_fee_cap);
    let annual_insurance =
        (params.vehicle_price * assumptions.insurance_rate).max(assumptions.insurance_floor);

    DetailedCosts {
        monthly_payment: params.monthly_payment,
        theoretical_monthly_payment: Some(theoretical_payment),
        total_payments,
        total_interest,
        residual_value: Some(residual_value),
        remaining_debt: Some(remaining_debt),
        total_cost_ownership: total_payments + remaining_debt,
        total_cost_usage,
        additional_fees: AdditionalFees {
            establishment_fee,
            insurance: annual_insurance * params.duration as f64,
            maintenance: assumptions.maintenance_per_year * params.duration as f64,
            penalties: 0.0,
        },
    }
}

/// Vehicle value after `years` of flat-rate depreciation.
pub fn retained_value(vehicle_price: f64, years: u32, assumptions: &CreditAssumptions) -> f64 {
    vehicle_price * (1.0 - assumptions.depreciation_rate).powi(years as i32)
}
