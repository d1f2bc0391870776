use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::LoanError;

/// unique identifier for a customer
pub type CustomerId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for an installment
pub type InstallmentId = Uuid;

/// allowed installment terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallmentTerm {
    Six,
    Nine,
    Twelve,
    TwentyFour,
}

impl InstallmentTerm {
    pub const ALL: [InstallmentTerm; 4] = [
        InstallmentTerm::Six,
        InstallmentTerm::Nine,
        InstallmentTerm::Twelve,
        InstallmentTerm::TwentyFour,
    ];

    /// number of installments for this term
    pub fn count(&self) -> u32 {
        match self {
            InstallmentTerm::Six => 6,
            InstallmentTerm::Nine => 9,
            InstallmentTerm::Twelve => 12,
            InstallmentTerm::TwentyFour => 24,
        }
    }
}

impl TryFrom<u32> for InstallmentTerm {
    type Error = LoanError;

    fn try_from(count: u32) -> Result<Self, Self::Error> {
        match count {
            6 => Ok(InstallmentTerm::Six),
            9 => Ok(InstallmentTerm::Nine),
            12 => Ok(InstallmentTerm::Twelve),
            24 => Ok(InstallmentTerm::TwentyFour),
            _ => Err(LoanError::InvalidInstallmentCount { count }),
        }
    }
}

impl fmt::Display for InstallmentTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// loan standing, derived from paid installment counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStanding {
    /// at least one installment remains unpaid
    Active,
    /// every installment is paid
    Paid,
}

impl fmt::Display for LoanStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanStanding::Active => write!(f, "Not paid installment is available"),
            LoanStanding::Paid => write!(f, "Loan is paid!"),
        }
    }
}

/// optional filters for listing a customer's loans
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanFilter {
    pub is_paid: Option<bool>,
    pub term: Option<InstallmentTerm>,
}

impl LoanFilter {
    pub fn paid(is_paid: bool) -> Self {
        Self {
            is_paid: Some(is_paid),
            ..Self::default()
        }
    }

    pub fn term(term: InstallmentTerm) -> Self {
        Self {
            term: Some(term),
            ..Self::default()
        }
    }
}

/// loan summary returned to the boundary layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_id: LoanId,
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    pub installment_count: u32,
    pub paid_installment_count: u32,
    pub standing: LoanStanding,
    pub status: String,
}

/// installment summary returned to the boundary layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentSummary {
    pub installment_id: InstallmentId,
    pub amount: Money,
    pub paid_amount: Money,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub is_paid: bool,
}

/// result of a pay-loan operation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentOutcome {
    pub installments_paid: u32,
    pub total_spent: Money,
    pub loan_fully_paid: bool,
}
