use crate::common::error::Result;
use crate::domain::{ContactEntry, Customer, CustomerStatus, Note};
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

/// Outcome of an insert-unless-phone-exists attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The customer was written and its id assigned.
    Inserted,
    /// A customer with the same phone number already exists; nothing was written.
    DuplicatePhone,
}

/// Selection criteria for lead documents. All provided fields must match.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadFilter {
    pub country: Option<String>,
    pub category: Option<String>,
    pub ids: Option<Vec<String>>,
}

/// Store of canonical customer records.
///
/// Phone number is unique across the store, and `insert_if_absent` is the only
/// write path for new customers: the existence check and the insert are one
/// atomic step, so two concurrent imports of the same phone number cannot both
/// pass the absence check. A database-backed implementation gets this from a
/// unique index, treating the insert conflict as the duplicate signal.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert the customer unless one with the same phone number exists.
    /// Assigns `customer.id` on insert.
    async fn insert_if_absent(&self, customer: &mut Customer) -> Result<InsertOutcome>;

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Customer>>;
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Customer>>;

    async fn list(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<Customer>>;
    async fn count(&self) -> Result<usize>;

    /// Assign a new status. Assignments are unrestricted; the funnel order is
    /// display convention, not a state machine.
    async fn update_status(&self, id: Uuid, status: CustomerStatus) -> Result<Customer>;
    async fn append_note(&self, id: Uuid, note: Note) -> Result<Customer>;
    async fn append_contact(&self, id: Uuid, entry: ContactEntry) -> Result<Customer>;
}

/// Read-only store of crawled lead documents.
///
/// Leads surface as raw JSON documents rather than a typed struct: historical
/// crawler versions wrote misspelled keys (`phoneNumer`, `adress`), and the
/// import normalizer's alias tables are the single place that knows about
/// them.
#[async_trait]
pub trait LeadStore: Send + Sync {
    async fn find(&self, filter: &LeadFilter) -> Result<Vec<serde_json::Value>>;
}
