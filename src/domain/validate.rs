//! Input validation.
//!
//! The calculators assume range-checked inputs: a zero duration would divide by
//! zero in the loan annuity, a down payment above the price would produce a
//! negative principal. Everything is rejected here, before any calculation runs.

use thiserror::Error;

use super::types::FinancingInput;

pub const MIN_VEHICLE_PRICE: f64 = 1000.0;
pub const MIN_DURATION_YEARS: u32 = 1;
pub const MAX_DURATION_YEARS: u32 = 10;
pub const MIN_MILEAGE_KM: u32 = 1000;
pub const MAX_INTEREST_RATE: f64 = 20.0;
pub const MIN_RESIDUAL_VALUE_RATE: f64 = 20.0;
pub const MAX_RESIDUAL_VALUE_RATE: f64 = 80.0;
pub const MIN_MONTHLY_PAYMENT: f64 = 1.0;

/// A rejected input field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("vehicle price must be at least 1000 (got {0})")]
    VehiclePrice(f64),

    #[error("down payment cannot be negative (got {0})")]
    NegativeDownPayment(f64),

    #[error("down payment ({down_payment}) cannot exceed the vehicle price ({vehicle_price})")]
    DownPaymentExceedsPrice { down_payment: f64, vehicle_price: f64 },

    #[error("duration must be between 1 and 10 years (got {0})")]
    Duration(u32),

    #[error("credit duration must be between the comparison duration ({duration}) and 10 years (got {credit_duration})")]
    CreditDuration { credit_duration: u32, duration: u32 },

    #[error("mileage must be at least 1000 km/year (got {0})")]
    Mileage(u32),

    #[error("interest rate must be between 0 and 20% (got {0})")]
    InterestRate(f64),

    #[error("residual value rate must be between 20 and 80% (got {0})")]
    ResidualValueRate(f64),

    #[error("{field} must be at least 1 (got {value})")]
    MonthlyPayment { field: &'static str, value: f64 },

    #[error("{field} cannot be negative (got {value})")]
    NegativeFirstPayment { field: &'static str, value: f64 },
}

/// Check the price, down payment and duration used by the profile estimator.
pub fn validate_profile(vehicle_price: f64, down_payment: f64, duration: u32) -> Result<(), ValidationError> {
    for (field, value) in [("vehicle price", vehicle_price), ("down payment", down_payment)] {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field, value });
        }
    }
    if vehicle_price < MIN_VEHICLE_PRICE {
        return Err(ValidationError::VehiclePrice(vehicle_price));
    }
    if down_payment < 0.0 {
        return Err(ValidationError::NegativeDownPayment(down_payment));
    }
    if down_payment > vehicle_price {
        return Err(ValidationError::DownPaymentExceedsPrice {
            down_payment,
            vehicle_price,
        });
    }
    if !(MIN_DURATION_YEARS..=MAX_DURATION_YEARS).contains(&duration) {
        return Err(ValidationError::Duration(duration));
    }
    Ok(())
}

impl FinancingInput {
    /// Check every field against its allowed range.
    ///
    /// Returns the first violation found, in declaration order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let amounts = [
            ("vehicle price", self.vehicle_price),
            ("down payment", self.down_payment),
            ("interest rate", self.interest_rate),
            ("residual value rate", self.residual_value_rate),
            ("credit monthly payment", self.monthly_payment_credit),
            ("LOA monthly payment", self.monthly_payment_loa),
            ("LLD monthly payment", self.monthly_payment_lld),
            ("LOA first payment", self.first_payment_loa),
            ("LLD first payment", self.first_payment_lld),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field, value });
            }
        }

        validate_profile(self.vehicle_price, self.down_payment, self.duration)?;
        if let Some(credit_duration) = self.credit_duration {
            if credit_duration < self.duration || credit_duration > MAX_DURATION_YEARS {
                return Err(ValidationError::CreditDuration {
                    credit_duration,
                    duration: self.duration,
                });
            }
        }
        if self.mileage < MIN_MILEAGE_KM {
            return Err(ValidationError::Mileage(self.mileage));
        }
        if !(0.0..=MAX_INTEREST_RATE).contains(&self.interest_rate) {
            return Err(ValidationError::InterestRate(self.interest_rate));
        }
        if !(MIN_RESIDUAL_VALUE_RATE..=MAX_RESIDUAL_VALUE_RATE).contains(&self.residual_value_rate) {
            return Err(ValidationError::ResidualValueRate(self.residual_value_rate));
        }

        let payments = [
            ("credit monthly payment", self.monthly_payment_credit),
            ("LOA monthly payment", self.monthly_payment_loa),
            ("LLD monthly payment", self.monthly_payment_lld),
        ];
        for (field, value) in payments {
            if value < MIN_MONTHLY_PAYMENT {
                return Err(ValidationError::MonthlyPayment { field, value });
            }
        }

        let first_payments = [
            ("LOA first payment", self.first_payment_loa),
            ("LLD first payment", self.first_payment_lld),
        ];
        for (field, value) in first_payments {
            if value < 0.0 {
                return Err(ValidationError::NegativeFirstPayment { field, value });
            }
        }

        Ok(())
    }
}
