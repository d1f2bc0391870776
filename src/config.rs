use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::InstallmentTerm;

/// loan book configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanConfig {
    /// how far ahead installments may be paid, in calendar months
    pub payable_window_months: u32,
    /// per-day adjustment applied to the nominal installment amount,
    /// as a discount when early and a penalty when late
    pub daily_adjustment_rate: Decimal,
    /// lowest interest rate accepted at origination
    pub min_interest_rate: Rate,
    /// highest interest rate accepted at origination
    pub max_interest_rate: Rate,
}

impl LoanConfig {
    /// standard configuration: 3-month window, 0.1% per day, rates in [0.1, 0.5]
    pub fn standard() -> Self {
        Self {
            payable_window_months: 3,
            daily_adjustment_rate: dec!(0.001),
            min_interest_rate: Rate::from_decimal(dec!(0.1)),
            max_interest_rate: Rate::from_decimal(dec!(0.5)),
        }
    }

    /// validate the terms of a loan request before any core logic runs
    pub fn validate_loan_terms(&self, amount: Money, interest_rate: Rate) -> Result<()> {
        if !amount.is_positive() {
            return Err(LoanError::InvalidLoanAmount { amount });
        }

        if interest_rate < self.min_interest_rate || interest_rate > self.max_interest_rate {
            return Err(LoanError::InvalidInterestRate {
                rate: interest_rate,
                min: self.min_interest_rate,
                max: self.max_interest_rate,
            });
        }

        Ok(())
    }

    /// validate a payment amount
    pub fn validate_payment_amount(&self, amount: Money) -> Result<()> {
        if !amount.is_positive() {
            return Err(LoanError::InvalidPaymentAmount { amount });
        }
        Ok(())
    }

    /// allowed installment terms
    pub fn allowed_terms(&self) -> &'static [InstallmentTerm] {
        &InstallmentTerm::ALL
    }
}

impl Default for LoanConfig {
    fn default() -> Self {
        Self::standard()
    }
}
