use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal::Money;

/// effective amount charged for an installment paid on `today`
///
/// `days_late = today - due_date` (signed, in days). A payment before the due
/// date earns a discount of `daily_rate` per day early; a payment after it
/// incurs a penalty of `daily_rate` per day late; both are computed on the
/// nominal amount and rounded to cents half-up. An on-time payment returns
/// the nominal amount unchanged, with no rounding applied.
pub fn effective_amount(
    amount: Money,
    due_date: NaiveDate,
    today: NaiveDate,
    daily_rate: Decimal,
) -> Money {
    let days_late = (today - due_date).num_days();

    if days_late == 0 {
        return amount;
    }

    let adjustment = amount * daily_rate * Decimal::from(days_late.abs());
    if days_late > 0 {
        (amount + adjustment).round_cents()
    } else {
        (amount - adjustment).round_cents()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const RATE: Decimal = dec!(0.001);

    #[test]
    fn test_on_time_payment_unchanged() {
        let amount = Money::from_decimal(dec!(916.67));
        let due = date(2024, 7, 1);
        assert_eq!(effective_amount(amount, due, due, RATE), amount);
    }

    #[test]
    fn test_early_payment_discount() {
        // 10 days early: 916.67 - 916.67 * 0.001 * 10 = 907.5033 -> 907.50
        let amount = Money::from_decimal(dec!(916.67));
        let effective = effective_amount(amount, date(2024, 7, 1), date(2024, 6, 21), RATE);
        assert_eq!(effective, Money::from_decimal(dec!(907.50)));
    }

    #[test]
    fn test_late_payment_penalty() {
        // 5 days late: 916.67 + 916.67 * 0.001 * 5 = 921.25335 -> 921.25
        let amount = Money::from_decimal(dec!(916.67));
        let effective = effective_amount(amount, date(2024, 7, 1), date(2024, 7, 6), RATE);
        assert_eq!(effective, Money::from_decimal(dec!(921.25)));
    }

    #[test]
    fn test_penalty_grows_per_day() {
        let amount = Money::from_decimal(dec!(1000.00));
        let due = date(2024, 7, 1);

        let one_day = effective_amount(amount, due, date(2024, 7, 2), RATE);
        let ten_days = effective_amount(amount, due, date(2024, 7, 11), RATE);

        assert_eq!(one_day, Money::from_decimal(dec!(1001.00)));
        assert_eq!(ten_days, Money::from_decimal(dec!(1010.00)));
    }

    #[test]
    fn test_discount_rounds_half_up() {
        // 3 days early on 33.35: 33.35 - 0.10005 = 33.24995 -> 33.25
        let amount = Money::from_decimal(dec!(33.35));
        let effective = effective_amount(amount, date(2024, 7, 4), date(2024, 7, 1), RATE);
        assert_eq!(effective, Money::from_decimal(dec!(33.25)));
    }
}
