use hourglass_rs::SafeTimeProvider;
use parking_lot::Mutex;
use rust_decimal::Decimal;

use crate::config::LoanConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::events::{Event, EventStore};
use crate::ledger::Customer;
use crate::model::Loan;
use crate::payments::PaymentAllocator;
use crate::schedule::ScheduleGenerator;
use crate::store::{CustomerStore, InstallmentStore, LoanStore, MemoryStore};
use crate::types::{
    CustomerId, InstallmentSummary, InstallmentTerm, LoanFilter, LoanId, LoanStanding,
    LoanSummary, PaymentOutcome,
};

/// loan creation request, validated before any core logic runs
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLoanRequest {
    pub customer_id: CustomerId,
    pub amount: Money,
    pub interest_rate: Rate,
    pub term: InstallmentTerm,
}

/// loan lifecycle manager
///
/// Sole entry point over the store: originates loans (credit check, schedule
/// generation, ledger reservation), reports loan and installment status, and
/// settles loans at full payoff. Each operation runs as one store transaction,
/// so concurrent calls against the same customer or loan serialize.
pub struct LoanBook {
    store: MemoryStore,
    config: LoanConfig,
    time: SafeTimeProvider,
    events: Mutex<EventStore>,
}

impl LoanBook {
    pub fn new(config: LoanConfig, time: SafeTimeProvider) -> Self {
        Self::with_store(MemoryStore::new(), config, time)
    }

    /// build over an existing store, e.g. one restored from JSON
    pub fn with_store(store: MemoryStore, config: LoanConfig, time: SafeTimeProvider) -> Self {
        Self {
            store,
            config,
            time,
            events: Mutex::new(EventStore::new()),
        }
    }

    pub fn config(&self) -> &LoanConfig {
        &self.config
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// drain events emitted since the last call
    pub fn take_events(&self) -> Vec<Event> {
        self.events.lock().take_events()
    }

    /// register a customer with a credit limit and no used credit
    pub fn register_customer(
        &self,
        name: impl Into<String>,
        surname: impl Into<String>,
        credit_limit: Money,
    ) -> CustomerId {
        let customer = Customer::new(name, surname, credit_limit);
        let id = customer.id;
        self.store.write(|state| state.insert_customer(customer));
        id
    }

    /// look up a customer
    pub fn customer(&self, id: CustomerId) -> Result<Customer> {
        self.store
            .read(|state| state.customer(id).cloned())
            .ok_or(LoanError::CustomerNotFound { id })
    }

    /// originate a loan: credit check, schedule generation, credit reservation
    pub fn create_loan(&self, request: CreateLoanRequest) -> Result<LoanSummary> {
        self.config
            .validate_loan_terms(request.amount, request.interest_rate)?;

        let now = self.time.now();
        let today = now.date_naive();

        let (summary, used_after) = self.store.transaction(|state| {
            let customer = state
                .customer(request.customer_id)
                .ok_or(LoanError::CustomerNotFound {
                    id: request.customer_id,
                })?;

            // interest is front-loaded at origination
            let total = (request.amount
                * (Decimal::ONE + request.interest_rate.as_decimal()))
            .round_cents();

            if !customer.has_available_credit(total) {
                return Err(LoanError::InsufficientCredit {
                    available: customer.available_credit(),
                    requested: total,
                });
            }

            let loan = Loan::new(request.customer_id, total, request.term, now);
            let installments =
                ScheduleGenerator::generate(loan.id, total, request.term, today)?;

            // all checks passed; mutate
            let summary = summarize(&loan, 0);
            state.insert_loan(loan);
            state.insert_installments(installments);

            let mut used_after = Money::ZERO;
            if let Some(customer) = state.customer_mut(request.customer_id) {
                customer.reserve_credit(total);
                used_after = customer.used_credit_limit;
            }

            Ok((summary, used_after))
        })?;

        let mut events = self.events.lock();
        events.emit(Event::LoanOriginated {
            loan_id: summary.loan_id,
            customer_id: summary.customer_id,
            loan_amount: summary.loan_amount,
            installment_count: summary.installment_count,
            timestamp: now,
        });
        events.emit(Event::CreditReserved {
            customer_id: summary.customer_id,
            amount: summary.loan_amount,
            used_after,
            timestamp: now,
        });

        Ok(summary)
    }

    /// a customer's loans matching the optional filters
    ///
    /// An empty result means the customer has no matching loans.
    pub fn list_loans(&self, customer_id: CustomerId, filter: LoanFilter) -> Vec<LoanSummary> {
        self.store.read(|state| {
            state
                .loans_for_customer(customer_id, &filter)
                .iter()
                .map(|loan| {
                    let paid_count = state
                        .all_by_loan(loan.id)
                        .iter()
                        .filter(|installment| installment.is_paid)
                        .count() as u32;
                    summarize(loan, paid_count)
                })
                .collect()
        })
    }

    /// a loan's installments ordered by due date; empty when it has none
    pub fn list_installments(&self, loan_id: LoanId) -> Vec<InstallmentSummary> {
        self.store.read(|state| {
            state
                .all_by_loan(loan_id)
                .iter()
                .map(|installment| installment.summary())
                .collect()
        })
    }

    /// pay against a loan's unpaid installments, settling the loan when the
    /// last installment is covered
    pub fn pay_loan(&self, loan_id: LoanId, amount: Money) -> Result<PaymentOutcome> {
        self.config.validate_payment_amount(amount)?;

        let now = self.time.now();
        let today = now.date_naive();
        let allocator = PaymentAllocator::new(&self.config);

        let (outcome, allocation, settlement) = self.store.transaction(|state| {
            let loan = state
                .loan(loan_id)
                .ok_or(LoanError::LoanNotFound { id: loan_id })?
                .clone();

            // the owning customer must exist before any mutation happens
            state
                .customer(loan.customer_id)
                .ok_or(LoanError::CustomerNotFound {
                    id: loan.customer_id,
                })?;

            let unpaid = state.unpaid_by_loan(loan_id);
            if unpaid.is_empty() {
                return Err(LoanError::LoanAlreadySettled { id: loan_id });
            }
            let unpaid_count = unpaid.len();

            let allocation = allocator.allocate(unpaid, amount, today)?;

            for installment in &allocation.paid {
                state.update_installment(installment.clone());
            }

            let fully_paid = allocation.paid.len() == unpaid_count;
            let mut settlement = None;
            if fully_paid {
                let mut settled = loan.clone();
                settled.is_paid = true;
                state.update_loan(settled);

                // release the original loan amount, not the cash collected
                if let Some(customer) = state.customer_mut(loan.customer_id) {
                    customer.release_credit(loan.loan_amount);
                    settlement =
                        Some((loan.customer_id, loan.loan_amount, customer.used_credit_limit));
                }
            }

            let outcome = PaymentOutcome {
                installments_paid: allocation.installments_paid(),
                total_spent: allocation.total_spent,
                loan_fully_paid: fully_paid,
            };
            Ok((outcome, allocation, settlement))
        })?;

        let mut events = self.events.lock();
        events.emit(Event::PaymentReceived {
            loan_id,
            amount,
            installments_paid: outcome.installments_paid,
            total_spent: outcome.total_spent,
            timestamp: now,
        });
        for installment in &allocation.paid {
            events.emit(Event::InstallmentPaid {
                installment_id: installment.id,
                loan_id,
                nominal_amount: installment.amount,
                effective_amount: installment.paid_amount,
                payment_date: today,
            });
        }
        if let Some((customer_id, released, used_after)) = settlement {
            events.emit(Event::LoanSettled {
                loan_id,
                timestamp: now,
            });
            events.emit(Event::CreditReleased {
                customer_id,
                amount: released,
                used_after,
                timestamp: now,
            });
        }

        Ok(outcome)
    }
}

fn summarize(loan: &Loan, paid_count: u32) -> LoanSummary {
    let standing = if paid_count == loan.term.count() {
        LoanStanding::Paid
    } else {
        LoanStanding::Active
    };
    LoanSummary {
        loan_id: loan.id,
        customer_id: loan.customer_id,
        loan_amount: loan.loan_amount,
        installment_count: loan.term.count(),
        paid_installment_count: paid_count,
        standing,
        status: standing.to_string(),
    }
}
