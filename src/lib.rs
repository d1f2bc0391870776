pub mod book;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod model;
pub mod payments;
pub mod schedule;
pub mod store;
pub mod types;

// re-export key types
pub use book::{CreateLoanRequest, LoanBook};
pub use config::LoanConfig;
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use ledger::Customer;
pub use model::{Installment, Loan};
pub use payments::{effective_amount, Allocation, PaymentAllocator};
pub use schedule::ScheduleGenerator;
pub use store::{CustomerStore, InstallmentStore, LoanStore, MemoryStore};
pub use types::{
    CustomerId, InstallmentId, InstallmentSummary, InstallmentTerm, LoanFilter, LoanId,
    LoanStanding, LoanSummary, PaymentOutcome,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
