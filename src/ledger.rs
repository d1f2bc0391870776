use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::CustomerId;

/// customer credit ledger entry
///
/// Holds the credit limit and the portion of it currently reserved by active
/// loans. Invariant: after any committed operation,
/// `used_credit_limit <= credit_limit`. Mutated only at loan creation
/// (reserve) and full payoff (release).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub surname: String,
    pub credit_limit: Money,
    pub used_credit_limit: Money,
}

impl Customer {
    pub fn new(name: impl Into<String>, surname: impl Into<String>, credit_limit: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            surname: surname.into(),
            credit_limit,
            used_credit_limit: Money::ZERO,
        }
    }

    /// credit not yet reserved by active loans
    pub fn available_credit(&self) -> Money {
        self.credit_limit - self.used_credit_limit
    }

    /// pure check: can `amount` be reserved without breaching the limit
    pub fn has_available_credit(&self, amount: Money) -> bool {
        amount <= self.available_credit()
    }

    /// reserve credit for a new loan; the caller must have passed
    /// [`Customer::has_available_credit`] first
    pub fn reserve_credit(&mut self, amount: Money) {
        self.used_credit_limit += amount;
    }

    /// release credit at full payoff, with the loan's original amount
    pub fn release_credit(&mut self, amount: Money) {
        self.used_credit_limit -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer(limit: i64) -> Customer {
        Customer::new("Ada", "Lovelace", Money::from_major(limit))
    }

    #[test]
    fn test_available_credit() {
        let mut c = customer(50_000);
        assert_eq!(c.available_credit(), Money::from_major(50_000));

        c.reserve_credit(Money::from_decimal(dec!(11000.00)));
        assert_eq!(c.available_credit(), Money::from_decimal(dec!(39000.00)));
    }

    #[test]
    fn test_check_is_pure() {
        let c = customer(100);
        assert!(c.has_available_credit(Money::from_major(100)));
        assert!(!c.has_available_credit(Money::from_decimal(dec!(100.01))));
        assert_eq!(c.used_credit_limit, Money::ZERO);
    }

    #[test]
    fn test_reserve_then_release_restores_balance() {
        let mut c = customer(50_000);
        let amount = Money::from_decimal(dec!(11000.00));

        c.reserve_credit(amount);
        assert_eq!(c.used_credit_limit, amount);
        assert!(c.used_credit_limit <= c.credit_limit);

        c.release_credit(amount);
        assert_eq!(c.used_credit_limit, Money::ZERO);
    }
}
