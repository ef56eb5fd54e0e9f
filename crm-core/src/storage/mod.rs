pub mod in_memory;
pub mod traits;

pub use in_memory::{InMemoryCustomerStore, InMemoryLeadStore};
pub use traits::{CustomerStore, InsertOutcome, LeadFilter, LeadStore};
