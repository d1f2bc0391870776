use chrono::NaiveDate;

use crate::config::LoanConfig;
use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::model::Installment;
use crate::payments::pricing::effective_amount;
use crate::schedule::add_calendar_months;

/// outcome of allocating a cash amount across a loan's unpaid installments
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// installments paid in full by this payment, in due-date order
    pub paid: Vec<Installment>,
    /// cash actually spent (sum of effective amounts)
    pub total_spent: Money,
}

impl Allocation {
    pub fn installments_paid(&self) -> u32 {
        self.paid.len() as u32
    }
}

/// payment allocator
///
/// Walks a loan's unpaid installments in ascending due-date order, paying
/// each in full at its effective amount until the cash runs out. No partial
/// payments and no skipping ahead: the first installment that cannot be
/// covered stops the walk.
pub struct PaymentAllocator<'a> {
    config: &'a LoanConfig,
}

impl<'a> PaymentAllocator<'a> {
    pub fn new(config: &'a LoanConfig) -> Self {
        Self { config }
    }

    /// allocate `amount` across `unpaid` installments as of `today`
    ///
    /// `unpaid` must be ordered by ascending due date. Installments due past
    /// the payability window are skipped entirely for this payment.
    pub fn allocate(
        &self,
        unpaid: Vec<Installment>,
        amount: Money,
        today: NaiveDate,
    ) -> Result<Allocation> {
        let window_end = add_calendar_months(today, self.config.payable_window_months)?;

        let payable: Vec<Installment> = unpaid
            .into_iter()
            .filter(|installment| installment.due_date <= window_end)
            .collect();

        if payable.is_empty() {
            return Err(LoanError::PaymentRestriction {
                window_months: self.config.payable_window_months,
            });
        }

        let first_effective = effective_amount(
            payable[0].amount,
            payable[0].due_date,
            today,
            self.config.daily_adjustment_rate,
        );

        let mut remaining = amount;
        let mut total_spent = Money::ZERO;
        let mut paid = Vec::new();

        for mut installment in payable {
            let effective = effective_amount(
                installment.amount,
                installment.due_date,
                today,
                self.config.daily_adjustment_rate,
            );

            if remaining < effective {
                break;
            }

            installment.mark_paid(effective, today);
            remaining -= effective;
            total_spent += effective;
            paid.push(installment);
        }

        if paid.is_empty() {
            return Err(LoanError::InsufficientPayment {
                provided: amount,
                required: first_effective,
            });
        }

        Ok(Allocation { paid, total_spent })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::types::LoanId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn installment(loan_id: LoanId, amount: &str, due: NaiveDate) -> Installment {
        Installment::new(loan_id, Money::from_str_exact(amount).unwrap(), due)
    }

    fn allocate(
        unpaid: Vec<Installment>,
        amount: &str,
        today: NaiveDate,
    ) -> Result<Allocation> {
        let config = LoanConfig::standard();
        PaymentAllocator::new(&config).allocate(
            unpaid,
            Money::from_str_exact(amount).unwrap(),
            today,
        )
    }

    #[test]
    fn test_pays_earliest_due_first() {
        let loan_id = Uuid::new_v4();
        let today = date(2024, 6, 21);
        let unpaid = vec![
            installment(loan_id, "916.67", date(2024, 7, 1)),
            installment(loan_id, "916.67", date(2024, 8, 1)),
        ];

        // covers the first installment only
        let allocation = allocate(unpaid, "1000.00", today).unwrap();
        assert_eq!(allocation.installments_paid(), 1);
        assert_eq!(allocation.paid[0].due_date, date(2024, 7, 1));
        // 10 days early: 916.67 - 9.1667 -> 907.50
        assert_eq!(allocation.paid[0].paid_amount, Money::from_decimal(dec!(907.50)));
        assert_eq!(allocation.total_spent, Money::from_decimal(dec!(907.50)));
    }

    #[test]
    fn test_pays_both_when_cash_covers() {
        let loan_id = Uuid::new_v4();
        let today = date(2024, 6, 21);
        let unpaid = vec![
            installment(loan_id, "916.67", date(2024, 7, 1)),
            installment(loan_id, "916.67", date(2024, 8, 1)),
        ];

        // second is 41 days early: 916.67 - 37.58347 = 879.08653 -> 879.09
        let allocation = allocate(unpaid, "2000.00", today).unwrap();
        assert_eq!(allocation.installments_paid(), 2);
        assert_eq!(
            allocation.total_spent,
            Money::from_decimal(dec!(907.50)) + Money::from_decimal(dec!(879.09))
        );
        for paid in &allocation.paid {
            assert!(paid.is_paid);
            assert_eq!(paid.payment_date, Some(today));
        }
    }

    #[test]
    fn test_stops_at_first_unaffordable() {
        let loan_id = Uuid::new_v4();
        let today = date(2024, 7, 1);
        let unpaid = vec![
            installment(loan_id, "500.00", today),
            installment(loan_id, "500.00", date(2024, 8, 1)),
            // cheap one later in the order must not be skipped ahead to
            installment(loan_id, "10.00", date(2024, 9, 1)),
        ];

        let allocation = allocate(unpaid, "600.00", today).unwrap();
        assert_eq!(allocation.installments_paid(), 1);
        assert_eq!(allocation.total_spent, Money::from_decimal(dec!(500.00)));
    }

    #[test]
    fn test_window_boundary_inclusive() {
        let loan_id = Uuid::new_v4();
        let today = date(2024, 6, 1);

        // due exactly today + 3 months: eligible
        let at_boundary = vec![installment(loan_id, "100.00", date(2024, 9, 1))];
        assert!(allocate(at_boundary, "200.00", today).is_ok());

        // one day past the window: not eligible
        let past_boundary = vec![installment(loan_id, "100.00", date(2024, 9, 2))];
        assert!(matches!(
            allocate(past_boundary, "200.00", today),
            Err(LoanError::PaymentRestriction { window_months: 3 })
        ));
    }

    #[test]
    fn test_beyond_window_skipped_even_with_cash_left() {
        let loan_id = Uuid::new_v4();
        let today = date(2024, 6, 1);
        let unpaid = vec![
            installment(loan_id, "100.00", date(2024, 7, 1)),
            installment(loan_id, "100.00", date(2024, 10, 1)),
        ];

        let allocation = allocate(unpaid, "1000.00", today).unwrap();
        assert_eq!(allocation.installments_paid(), 1);
    }

    #[test]
    fn test_insufficient_for_nearest_installment() {
        let loan_id = Uuid::new_v4();
        let today = date(2024, 7, 1);
        let unpaid = vec![installment(loan_id, "916.67", today)];

        let err = allocate(unpaid, "900.00", today).unwrap_err();
        assert_eq!(
            err,
            LoanError::InsufficientPayment {
                provided: Money::from_decimal(dec!(900.00)),
                required: Money::from_decimal(dec!(916.67)),
            }
        );
    }
}
