//! Closed-form annuity formulas for fixed-rate installment loans.
//!
//! With a monthly rate `r` and `n` payments:
//!
//! - payment: `P·r·(1+r)^n / ((1+r)^n − 1)`
//! - present value of `n` payments `A`: `A·(1 − (1+r)^−n) / r`
//!
//! Numerical notes:
//! - `(1+r)^n − 1` suffers from cancellation for tiny rates, so growth factors are
//!   computed as `exp_m1(n·ln_1p(r))`.
//! - `r = 0` is not a limit case here but an explicit branch: the payment is
//!   exactly `P / n`, with no rounding drift.

/// Convert an annual nominal rate in percent to a monthly decimal rate.
pub fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

/// `(1+r)^n − 1`, computed without cancellation.
fn growth_minus_one(rate: f64, periods: u32) -> f64 {
    (periods as f64 * rate.ln_1p()).exp_m1()
}

/// Constant payment that amortizes `principal` over `periods` payments.
///
/// Returns 0 for zero periods.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    if rate > 0.0 {
        let g = growth_minus_one(rate, periods);
        principal * rate * (g + 1.0) / g
    } else {
        principal / periods as f64
    }
}

/// Present value of `periods` constant payments discounted at `rate`.
///
/// This is the principal still owed on a loan with `periods` payments left.
pub fn annuity_present_value(payment: f64, rate: f64, periods: u32) -> f64 {
    if periods == 0 {
        return 0.0;
    }
    if rate > 0.0 {
        let g = growth_minus_one(rate, periods);
        payment * g / ((g + 1.0) * rate)
    } else {
        payment * periods as f64
    }
}
