//! Default-value suggestions from simple profile tiers.
//!
//! These are lookups, not fitted models: the tiers approximate late-2024 French
//! market averages and only pre-fill inputs the user did not provide.

use serde::Serialize;

/// Share of the price paid upfront (0 when the price is not positive).
pub fn down_payment_ratio(vehicle_price: f64, down_payment: f64) -> f64 {
    if vehicle_price > 0.0 {
        down_payment / vehicle_price
    } else {
        0.0
    }
}

/// Suggested annual loan rate (percent) from the share of the price paid upfront.
pub fn estimate_interest_rate(down_payment_ratio: f64) -> f64 {
    if down_payment_ratio >= 0.30 {
        4.8
    } else if down_payment_ratio >= 0.15 {
        5.8
    } else {
        7.2
    }
}

/// Suggested LOA residual value (percent of the price) from the contract length in years.
pub fn estimate_residual_value(duration: u32) -> f64 {
    match duration {
        0..=2 => 60.0,
        3 => 50.0,
        4 => 42.0,
        5 => 32.0,
        _ => 25.0,
    }
}

/// Both suggestions for one vehicle profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileDefaults {
    pub down_payment_ratio: f64,
    pub interest_rate: f64,
    pub residual_value_rate: f64,
}

pub fn suggest_defaults(vehicle_price: f64, down_payment: f64, duration: u32) -> ProfileDefaults {
    let ratio = down_payment_ratio(vehicle_price, down_payment);
    ProfileDefaults {
        down_payment_ratio: ratio,
        interest_rate: estimate_interest_rate(ratio),
        residual_value_rate: estimate_residual_value(duration),
    }
}
