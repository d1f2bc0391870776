use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::model::Installment;
use crate::types::{InstallmentTerm, LoanId};

/// add calendar months, clamping the day-of-month into shorter months
pub fn add_calendar_months(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("{date} + {months} months out of range"),
        })
}

/// installment schedule generator
///
/// Splits a principal-plus-interest total into equal installments due on the
/// first day of each of the following `count` months.
pub struct ScheduleGenerator;

impl ScheduleGenerator {
    /// generate the full installment schedule for a loan
    ///
    /// Per-installment rounding means the schedule total may drift from
    /// `total` by up to `(count - 1) * 0.01`; the drift is accepted and not
    /// reconciled on the final installment.
    pub fn generate(
        loan_id: LoanId,
        total: Money,
        term: InstallmentTerm,
        reference_date: NaiveDate,
    ) -> Result<Vec<Installment>> {
        let count = term.count();
        let per_installment = (total / Decimal::from(count)).round_cents();

        let mut installments = Vec::with_capacity(count as usize);
        for i in 1..=count {
            let due_date = add_calendar_months(reference_date, i)?
                .with_day(1)
                .ok_or_else(|| LoanError::InvalidDate {
                    message: "cannot normalize due date to first of month".to_string(),
                })?;
            installments.push(Installment::new(loan_id, per_installment, due_date));
        }

        Ok(installments)
    }
}
