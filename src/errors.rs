use thiserror::Error;

use crate::decimal::{Money, Rate};
use crate::types::{CustomerId, LoanId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("customer not found: {id}")]
    CustomerNotFound {
        id: CustomerId,
    },

    #[error("loan not found: {id}")]
    LoanNotFound {
        id: LoanId,
    },

    #[error("insufficient credit: available {available}, requested {requested}")]
    InsufficientCredit {
        available: Money,
        requested: Money,
    },

    #[error("no installment can be paid within {window_months} months")]
    PaymentRestriction {
        window_months: u32,
    },

    #[error("amount is insufficient to pay any installment: provided {provided}, nearest due {required}")]
    InsufficientPayment {
        provided: Money,
        required: Money,
    },

    #[error("loan has no unpaid installments: {id}")]
    LoanAlreadySettled {
        id: LoanId,
    },

    #[error("invalid loan amount: {amount}")]
    InvalidLoanAmount {
        amount: Money,
    },

    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("interest rate {rate} outside allowed range [{min}, {max}]")]
    InvalidInterestRate {
        rate: Rate,
        min: Rate,
        max: Rate,
    },

    #[error("invalid installment count: {count}")]
    InvalidInstallmentCount {
        count: u32,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LoanError>;
