pub mod allocator;
pub mod pricing;

pub use allocator::{Allocation, PaymentAllocator};
pub use pricing::effective_amount;
