use super::traits::{CustomerStore, InsertOutcome, LeadFilter, LeadStore};
use crate::common::error::{CrmError, Result};
use crate::domain::{ContactEntry, Customer, CustomerStatus, Note};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// In-memory customer store for development and testing.
///
/// The customer map and the phone index live behind a single mutex, which is
/// what makes `insert_if_absent` atomic: no other writer can slip in between
/// the existence check and the insert.
pub struct InMemoryCustomerStore {
    inner: Arc<Mutex<CustomerTable>>,
}

#[derive(Default)]
struct CustomerTable {
    customers: HashMap<Uuid, Customer>,
    by_phone: HashMap<String, Uuid>,
}

impl Default for InMemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CustomerTable::default())),
        }
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn insert_if_absent(&self, customer: &mut Customer) -> Result<InsertOutcome> {
        let mut table = self.inner.lock().unwrap();

        if table.by_phone.contains_key(&customer.phone_number) {
            return Ok(InsertOutcome::DuplicatePhone);
        }

        let id = Uuid::new_v4();
        customer.id = Some(id);
        table.by_phone.insert(customer.phone_number.clone(), id);
        table.customers.insert(id, customer.clone());

        debug!("Created customer: {} with id {}", customer.name, id);
        Ok(InsertOutcome::Inserted)
    }

    async fn get_by_phone(&self, phone: &str) -> Result<Option<Customer>> {
        let table = self.inner.lock().unwrap();
        let customer = table
            .by_phone
            .get(phone)
            .and_then(|id| table.customers.get(id))
            .cloned();
        Ok(customer)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let table = self.inner.lock().unwrap();
        Ok(table.customers.get(&id).cloned())
    }

    async fn list(&self, limit: Option<usize>, offset: Option<usize>) -> Result<Vec<Customer>> {
        let table = self.inner.lock().unwrap();
        let mut customers: Vec<Customer> = table.customers.values().cloned().collect();
        customers.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));

        let offset = offset.unwrap_or(0);
        let customers: Vec<Customer> = match limit {
            Some(limit) => customers.into_iter().skip(offset).take(limit).collect(),
            None => customers.into_iter().skip(offset).collect(),
        };
        Ok(customers)
    }

    async fn count(&self) -> Result<usize> {
        let table = self.inner.lock().unwrap();
        Ok(table.customers.len())
    }

    async fn update_status(&self, id: Uuid, status: CustomerStatus) -> Result<Customer> {
        let mut table = self.inner.lock().unwrap();
        let customer = table
            .customers
            .get_mut(&id)
            .ok_or(CrmError::CustomerNotFound(id))?;
        customer.status = status;

        debug!("Updated status of customer {} to {}", id, status);
        Ok(customer.clone())
    }

    async fn append_note(&self, id: Uuid, note: Note) -> Result<Customer> {
        let mut table = self.inner.lock().unwrap();
        let customer = table
            .customers
            .get_mut(&id)
            .ok_or(CrmError::CustomerNotFound(id))?;
        customer.notes.push(note);

        debug!("Appended note to customer {}", id);
        Ok(customer.clone())
    }

    async fn append_contact(&self, id: Uuid, entry: ContactEntry) -> Result<Customer> {
        let mut table = self.inner.lock().unwrap();
        let customer = table
            .customers
            .get_mut(&id)
            .ok_or(CrmError::CustomerNotFound(id))?;
        customer.contact_history.push(entry);

        debug!("Appended contact entry to customer {}", id);
        Ok(customer.clone())
    }
}

/// In-memory lead store holding raw crawl documents.
pub struct InMemoryLeadStore {
    leads: Arc<Mutex<Vec<Value>>>,
}

impl Default for InMemoryLeadStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self {
            leads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Replace the stored documents. The crawler that writes real leads is a
    /// separate system; this is for seeding demos and tests.
    pub fn seed(&self, docs: Vec<Value>) {
        let mut leads = self.leads.lock().unwrap();
        *leads = docs;
    }
}

fn matches_filter(doc: &Value, filter: &LeadFilter) -> bool {
    if let Some(country) = &filter.country {
        if doc.get("country").and_then(Value::as_str) != Some(country.as_str()) {
            return false;
        }
    }
    if let Some(category) = &filter.category {
        if doc.get("category").and_then(Value::as_str) != Some(category.as_str()) {
            return false;
        }
    }
    if let Some(ids) = &filter.ids {
        let id = doc.get("id").and_then(Value::as_str);
        if !id.is_some_and(|id| ids.iter().any(|wanted| wanted == id)) {
            return false;
        }
    }
    true
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn find(&self, filter: &LeadFilter) -> Result<Vec<Value>> {
        let leads = self.leads.lock().unwrap();
        Ok(leads
            .iter()
            .filter(|doc| matches_filter(doc, filter))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImportSource;
    use chrono::Utc;
    use serde_json::json;

    fn customer(name: &str, phone: &str) -> Customer {
        Customer {
            id: None,
            name: name.to_string(),
            phone_number: phone.to_string(),
            email: String::new(),
            instagram: String::new(),
            address: String::new(),
            description: String::new(),
            country: String::new(),
            category: String::new(),
            status: CustomerStatus::New,
            source: ImportSource::Manual,
            notes: vec![],
            contact_history: vec![],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_if_absent_rejects_duplicate_phone() {
        let store = InMemoryCustomerStore::new();

        let mut first = customer("Jane", "555-0100");
        assert_eq!(
            store.insert_if_absent(&mut first).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert!(first.id.is_some());

        let mut second = customer("Jane Dup", "555-0100");
        assert_eq!(
            store.insert_if_absent(&mut second).await.unwrap(),
            InsertOutcome::DuplicatePhone
        );
        assert!(second.id.is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_phone_yield_one_customer() {
        let store = Arc::new(InMemoryCustomerStore::new());

        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut c = customer(&format!("Racer {i}"), "555-0199");
                store.insert_if_absent(&mut c).await.unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap() == InsertOutcome::Inserted {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn appends_keep_order_and_status_moves_freely() {
        let store = InMemoryCustomerStore::new();
        let mut c = customer("Acme", "555-0101");
        store.insert_if_absent(&mut c).await.unwrap();
        let id = c.id.unwrap();

        for content in ["first", "second", "third"] {
            store
                .append_note(
                    id,
                    Note {
                        content: content.to_string(),
                        created_at: Utc::now(),
                    },
                )
                .await
                .unwrap();
        }
        let updated = store.get_by_id(id).await.unwrap().unwrap();
        let contents: Vec<&str> = updated.notes.iter().map(|n| n.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);

        // won -> contacted is allowed; the funnel order is not enforced
        store.update_status(id, CustomerStatus::Won).await.unwrap();
        let back = store
            .update_status(id, CustomerStatus::Contacted)
            .await
            .unwrap();
        assert_eq!(back.status, CustomerStatus::Contacted);
    }

    #[tokio::test]
    async fn mutations_on_unknown_id_return_not_found() {
        let store = InMemoryCustomerStore::new();
        let err = store
            .update_status(Uuid::new_v4(), CustomerStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, CrmError::CustomerNotFound(_)));
    }

    #[tokio::test]
    async fn lead_filter_matches_country_category_and_ids() {
        let store = InMemoryLeadStore::new();
        store.seed(vec![
            json!({"id": "a", "name": "Cafe Uno", "country": "Portugal", "category": "cafe"}),
            json!({"id": "b", "name": "Gym Dos", "country": "Spain", "category": "gym"}),
            json!({"id": "c", "name": "Bar Tres", "country": "Spain", "category": "bar"}),
        ]);

        let by_country = store
            .find(&LeadFilter {
                country: Some("Spain".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_country.len(), 2);

        let by_ids = store
            .find(&LeadFilter {
                ids: Some(vec!["a".to_string(), "c".to_string()]),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(by_ids.len(), 2);

        let combined = store
            .find(&LeadFilter {
                country: Some("Spain".to_string()),
                category: Some("gym".to_string()),
                ids: None,
            })
            .await
            .unwrap();
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0]["name"], "Gym Dos");
    }
}
