use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::ledger::Customer;
use crate::model::{Installment, Loan};
use crate::types::{CustomerId, InstallmentId, LoanFilter, LoanId};

/// customer lookup and persistence
pub trait CustomerStore {
    fn customer(&self, id: CustomerId) -> Option<&Customer>;
    fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer>;
    fn insert_customer(&mut self, customer: Customer);
}

/// loan lookup, insertion and filtered querying
pub trait LoanStore {
    fn loan(&self, id: LoanId) -> Option<&Loan>;
    fn insert_loan(&mut self, loan: Loan);
    fn update_loan(&mut self, loan: Loan);
    /// a customer's loans matching the filter, ordered by creation date
    fn loans_for_customer(&self, customer_id: CustomerId, filter: &LoanFilter) -> Vec<Loan>;
}

/// installment persistence and ordered querying
pub trait InstallmentStore {
    fn insert_installments(&mut self, installments: Vec<Installment>);
    /// all installments of a loan, ordered by ascending due date
    fn all_by_loan(&self, loan_id: LoanId) -> Vec<Installment>;
    /// unpaid installments of a loan, ordered by ascending due date
    fn unpaid_by_loan(&self, loan_id: LoanId) -> Vec<Installment>;
    fn update_installment(&mut self, installment: Installment);
}

/// persisted state behind the store lock
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoreState {
    customers: HashMap<CustomerId, Customer>,
    loans: HashMap<LoanId, Loan>,
    installments: HashMap<InstallmentId, Installment>,
}

impl CustomerStore for StoreState {
    fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    fn customer_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        self.customers.get_mut(&id)
    }

    fn insert_customer(&mut self, customer: Customer) {
        self.customers.insert(customer.id, customer);
    }
}

impl LoanStore for StoreState {
    fn loan(&self, id: LoanId) -> Option<&Loan> {
        self.loans.get(&id)
    }

    fn insert_loan(&mut self, loan: Loan) {
        self.loans.insert(loan.id, loan);
    }

    fn update_loan(&mut self, loan: Loan) {
        self.loans.insert(loan.id, loan);
    }

    fn loans_for_customer(&self, customer_id: CustomerId, filter: &LoanFilter) -> Vec<Loan> {
        let mut loans: Vec<Loan> = self
            .loans
            .values()
            .filter(|loan| loan.customer_id == customer_id)
            .filter(|loan| filter.is_paid.map_or(true, |paid| loan.is_paid == paid))
            .filter(|loan| filter.term.map_or(true, |term| loan.term == term))
            .cloned()
            .collect();
        loans.sort_by_key(|loan| loan.create_date);
        loans
    }
}

impl InstallmentStore for StoreState {
    fn insert_installments(&mut self, installments: Vec<Installment>) {
        for installment in installments {
            self.installments.insert(installment.id, installment);
        }
    }

    fn all_by_loan(&self, loan_id: LoanId) -> Vec<Installment> {
        let mut installments: Vec<Installment> = self
            .installments
            .values()
            .filter(|installment| installment.loan_id == loan_id)
            .cloned()
            .collect();
        installments.sort_by_key(|installment| installment.due_date);
        installments
    }

    fn unpaid_by_loan(&self, loan_id: LoanId) -> Vec<Installment> {
        let mut installments: Vec<Installment> = self
            .installments
            .values()
            .filter(|installment| installment.loan_id == loan_id && !installment.is_paid)
            .cloned()
            .collect();
        installments.sort_by_key(|installment| installment.due_date);
        installments
    }

    fn update_installment(&mut self, installment: Installment) {
        self.installments.insert(installment.id, installment);
    }
}

/// in-memory store with per-operation mutual exclusion
///
/// Every loan-book operation runs as a single [`MemoryStore::transaction`]
/// under the lock, so two concurrent payments against one loan, or two
/// concurrent originations against one customer, serialize rather than
/// interleave. Operations check every precondition before the first mutation,
/// so an error leaves no partial effect.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// run a read-only closure under the lock
    pub fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> T {
        let state = self.inner.lock();
        f(&state)
    }

    /// run an infallible write under the lock
    pub fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> T) -> T {
        let mut state = self.inner.lock();
        f(&mut state)
    }

    /// run a fallible unit of work under the lock
    pub fn transaction<T>(&self, f: impl FnOnce(&mut StoreState) -> Result<T>) -> Result<T> {
        self.write(f)
    }

    /// serialize the full store state to JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let state = self.inner.lock();
        serde_json::to_string_pretty(&*state)
    }

    /// restore a store from previously exported JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let state: StoreState = serde_json::from_str(json)?;
        Ok(Self {
            inner: Mutex::new(state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use crate::decimal::Money;
    use crate::types::InstallmentTerm;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_installments_ordered_by_due_date() {
        let mut state = StoreState::default();
        let loan_id = Uuid::new_v4();

        // inserted out of order
        state.insert_installments(vec![
            Installment::new(loan_id, Money::from_major(100), date(2024, 9, 1)),
            Installment::new(loan_id, Money::from_major(100), date(2024, 7, 1)),
            Installment::new(loan_id, Money::from_major(100), date(2024, 8, 1)),
        ]);

        let due_dates: Vec<NaiveDate> = state
            .all_by_loan(loan_id)
            .iter()
            .map(|i| i.due_date)
            .collect();
        assert_eq!(
            due_dates,
            vec![date(2024, 7, 1), date(2024, 8, 1), date(2024, 9, 1)]
        );
    }

    #[test]
    fn test_unpaid_excludes_paid() {
        let mut state = StoreState::default();
        let loan_id = Uuid::new_v4();

        let mut first = Installment::new(loan_id, Money::from_major(100), date(2024, 7, 1));
        first.mark_paid(Money::from_major(100), date(2024, 7, 1));
        let second = Installment::new(loan_id, Money::from_major(100), date(2024, 8, 1));

        state.insert_installments(vec![first, second.clone()]);

        let unpaid = state.unpaid_by_loan(loan_id);
        assert_eq!(unpaid, vec![second]);
        assert_eq!(state.all_by_loan(loan_id).len(), 2);
    }

    #[test]
    fn test_loan_filters() {
        let mut state = StoreState::default();
        let customer_id = Uuid::new_v4();

        let mut paid_loan = Loan::new(
            customer_id,
            Money::from_major(600),
            InstallmentTerm::Six,
            Utc::now(),
        );
        paid_loan.is_paid = true;
        let open_loan = Loan::new(
            customer_id,
            Money::from_major(1200),
            InstallmentTerm::Twelve,
            Utc::now(),
        );
        state.insert_loan(paid_loan.clone());
        state.insert_loan(open_loan.clone());

        let all = state.loans_for_customer(customer_id, &LoanFilter::default());
        assert_eq!(all.len(), 2);

        let paid = state.loans_for_customer(customer_id, &LoanFilter::paid(true));
        assert_eq!(paid, vec![paid_loan]);

        let twelve =
            state.loans_for_customer(customer_id, &LoanFilter::term(InstallmentTerm::Twelve));
        assert_eq!(twelve, vec![open_loan]);

        let other = state.loans_for_customer(Uuid::new_v4(), &LoanFilter::default());
        assert!(other.is_empty());
    }

    #[test]
    fn test_json_round_trip() {
        let store = MemoryStore::new();
        let mut customer = Customer::new("Grace", "Hopper", Money::from_decimal(dec!(50000.00)));
        customer.reserve_credit(Money::from_decimal(dec!(11000.00)));
        let customer_id = customer.id;

        store
            .transaction(|state| {
                state.insert_customer(customer);
                Ok(())
            })
            .unwrap();

        let json = store.to_json().unwrap();
        let restored = MemoryStore::from_json(&json).unwrap();

        restored
            .transaction(|state| {
                let restored_customer = state.customer(customer_id).cloned().unwrap();
                assert_eq!(restored_customer.name, "Grace");
                assert_eq!(
                    restored_customer.used_credit_limit,
                    Money::from_decimal(dec!(11000.00))
                );
                Ok(())
            })
            .unwrap();
    }
}
