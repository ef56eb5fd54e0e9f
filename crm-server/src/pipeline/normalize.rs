use chrono::Utc;
use crm_core::domain::{ContactEntry, Customer, CustomerStatus, ImportSource, Note};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// A normalized, not-yet-persisted intake record awaiting validation and
/// deduplication. Lives only for the duration of one import invocation: it
/// either becomes a customer or is discarded.
#[derive(Debug, Clone)]
pub struct IntakeCandidate {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub instagram: String,
    pub address: String,
    pub description: String,
    pub country: String,
    pub category: String,
    pub source: ImportSource,
    pub status: CustomerStatus,
    pub notes: Vec<Note>,
    pub contact_history: Vec<ContactEntry>,
}

impl IntakeCandidate {
    fn empty(source: ImportSource) -> Self {
        Self {
            name: String::new(),
            phone_number: String::new(),
            email: String::new(),
            instagram: String::new(),
            address: String::new(),
            description: String::new(),
            country: String::new(),
            category: String::new(),
            source,
            status: CustomerStatus::New,
            notes: Vec::new(),
            contact_history: Vec::new(),
        }
    }

    pub fn into_customer(self) -> Customer {
        Customer {
            id: None,
            name: self.name,
            phone_number: self.phone_number,
            email: self.email,
            instagram: self.instagram,
            address: self.address,
            description: self.description,
            country: self.country,
            category: self.category,
            status: self.status,
            source: self.source,
            notes: self.notes,
            contact_history: self.contact_history,
            created_at: Utc::now(),
        }
    }
}

/// Ordered accepted keys per canonical field; the first key holding a
/// non-empty value wins.
type FieldMap = &'static [(&'static str, &'static [&'static str])];

/// Crawl documents: canonical keys plus the misspelled variants older crawler
/// versions wrote.
const CRAWL_FIELDS: FieldMap = &[
    ("name", &["name"]),
    ("phoneNumber", &["phoneNumber", "phoneNumer"]),
    ("email", &["email"]),
    ("instagram", &["instagram"]),
    ("address", &["address", "adress"]),
    ("description", &["description"]),
    ("country", &["country"]),
    ("category", &["category"]),
];

/// Spreadsheet rows arrive with whatever header casing the uploaded file used.
const EXCEL_FIELDS: FieldMap = &[
    ("name", &["name", "Name", "NAME"]),
    ("phoneNumber", &["phone", "Phone", "PhoneNumber", "phoneNumber", "PHONE"]),
    ("email", &["email", "Email", "EMAIL"]),
    ("instagram", &["instagram", "Instagram"]),
    ("address", &["address", "Address"]),
    ("description", &["description", "Description"]),
    ("country", &["country", "Country"]),
    ("category", &["category", "Category"]),
];

/// Manual entries come from our own form and use canonical keys.
const MANUAL_FIELDS: FieldMap = &[
    ("name", &["name"]),
    ("phoneNumber", &["phoneNumber"]),
    ("email", &["email"]),
    ("instagram", &["instagram"]),
    ("address", &["address"]),
    ("description", &["description"]),
    ("country", &["country"]),
    ("category", &["category"]),
];

/// First non-empty value among the accepted keys for a field. Strings are
/// trimmed; numbers are stringified, since spreadsheet parsers hand phone
/// columns over as numbers.
fn first_present(row: &Value, keys: &[&str]) -> String {
    for key in keys {
        match row.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return s.trim().to_string(),
            Some(Value::Number(n)) => return n.to_string(),
            _ => {}
        }
    }
    String::new()
}

fn map_row(row: &Value, fields: FieldMap, source: ImportSource) -> IntakeCandidate {
    let mut candidate = IntakeCandidate::empty(source);
    for (canonical, keys) in fields {
        let value = first_present(row, keys);
        match *canonical {
            "name" => candidate.name = value,
            "phoneNumber" => candidate.phone_number = value,
            "email" => candidate.email = value,
            "instagram" => candidate.instagram = value,
            "address" => candidate.address = value,
            "description" => candidate.description = value,
            "country" => candidate.country = value,
            "category" => candidate.category = value,
            _ => {}
        }
    }
    candidate
}

fn parse_list<T: DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value {
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            warn!("discarding malformed list on manual entry: {e}");
            Vec::new()
        }),
        None => Vec::new(),
    }
}

fn normalize_row(source: ImportSource, row: &Value) -> IntakeCandidate {
    match source {
        ImportSource::Crawl => {
            let mut candidate = map_row(row, CRAWL_FIELDS, source);
            if candidate.country.is_empty() {
                candidate.country = "Unknown".to_string();
            }
            if candidate.category.is_empty() {
                candidate.category = "other".to_string();
            }
            candidate
        }
        ImportSource::Excel => map_row(row, EXCEL_FIELDS, source),
        ImportSource::Manual => {
            let mut candidate = map_row(row, MANUAL_FIELDS, source);
            if let Some(status) = row.get("status").and_then(Value::as_str) {
                match CustomerStatus::parse(status) {
                    Some(status) => candidate.status = status,
                    None => warn!(status, "unknown status on manual entry, keeping 'new'"),
                }
            }
            candidate.notes = parse_list(row.get("notes"));
            candidate.contact_history = parse_list(row.get("contactHistory"));
            candidate
        }
    }
}

/// Produce canonical intake candidates from raw rows of the given source, in
/// input order.
pub fn normalize(source: ImportSource, rows: &[Value]) -> Vec<IntakeCandidate> {
    rows.iter().map(|row| normalize_row(source, row)).collect()
}
