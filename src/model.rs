use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{CustomerId, InstallmentId, InstallmentSummary, InstallmentTerm, LoanId};

/// installment loan
///
/// `loan_amount` is principal plus front-loaded interest, fixed at
/// origination. `is_paid` flips exactly once, when the last installment is
/// paid. Installments reference the loan by id; the loan holds no live
/// collection of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    pub id: LoanId,
    pub customer_id: CustomerId,
    pub loan_amount: Money,
    pub term: InstallmentTerm,
    pub create_date: DateTime<Utc>,
    pub is_paid: bool,
}

impl Loan {
    pub fn new(
        customer_id: CustomerId,
        loan_amount: Money,
        term: InstallmentTerm,
        create_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            customer_id,
            loan_amount,
            term,
            create_date,
            is_paid: false,
        }
    }
}

/// single installment of a loan
///
/// `amount` is the nominal due amount, never recalculated. `paid_amount`
/// records the effective amount actually charged, set once. An installment
/// never transitions back from paid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub id: InstallmentId,
    pub loan_id: LoanId,
    pub amount: Money,
    pub paid_amount: Money,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub is_paid: bool,
}

impl Installment {
    pub fn new(loan_id: LoanId, amount: Money, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            loan_id,
            amount,
            paid_amount: Money::ZERO,
            due_date,
            payment_date: None,
            is_paid: false,
        }
    }

    /// mark paid with the effective amount charged
    pub fn mark_paid(&mut self, effective_amount: Money, payment_date: NaiveDate) {
        self.paid_amount = effective_amount;
        self.payment_date = Some(payment_date);
        self.is_paid = true;
    }

    pub fn summary(&self) -> InstallmentSummary {
        InstallmentSummary {
            installment_id: self.id,
            amount: self.amount,
            paid_amount: self.paid_amount,
            due_date: self.due_date,
            payment_date: self.payment_date,
            is_paid: self.is_paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_mark_paid_records_effective_amount() {
        let loan_id = Uuid::new_v4();
        let due = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();

        let mut installment =
            Installment::new(loan_id, Money::from_decimal(dec!(916.67)), due);
        assert!(!installment.is_paid);
        assert_eq!(installment.paid_amount, Money::ZERO);

        installment.mark_paid(Money::from_decimal(dec!(907.50)), today);
        assert!(installment.is_paid);
        assert_eq!(installment.paid_amount, Money::from_decimal(dec!(907.50)));
        assert_eq!(installment.payment_date, Some(today));
        // nominal amount untouched
        assert_eq!(installment.amount, Money::from_decimal(dec!(916.67)));
    }
}
