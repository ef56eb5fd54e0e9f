use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::common::error::CrmError;

/// Provenance tag recorded on every imported customer. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSource {
    Crawl,
    Excel,
    Manual,
}

impl ImportSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportSource::Crawl => "crawl",
            ImportSource::Excel => "excel",
            ImportSource::Manual => "manual",
        }
    }
}

impl fmt::Display for ImportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ImportSource {
    type Err = CrmError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "crawl" => Ok(ImportSource::Crawl),
            "excel" => Ok(ImportSource::Excel),
            "manual" => Ok(ImportSource::Manual),
            other => Err(CrmError::InvalidSource(other.to_string())),
        }
    }
}

/// Where a customer sits in the sales funnel.
///
/// The order below mirrors how the panel displays the progression, but
/// assignments are unrestricted: any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    New,
    Contacted,
    Interested,
    NotInterested,
    MeetingScheduled,
    ProposalSent,
    Negotiation,
    Won,
    Lost,
}

impl CustomerStatus {
    /// Parse the wire representation; `None` for anything unrecognized.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(CustomerStatus::New),
            "contacted" => Some(CustomerStatus::Contacted),
            "interested" => Some(CustomerStatus::Interested),
            "not_interested" => Some(CustomerStatus::NotInterested),
            "meeting_scheduled" => Some(CustomerStatus::MeetingScheduled),
            "proposal_sent" => Some(CustomerStatus::ProposalSent),
            "negotiation" => Some(CustomerStatus::Negotiation),
            "won" => Some(CustomerStatus::Won),
            "lost" => Some(CustomerStatus::Lost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::New => "new",
            CustomerStatus::Contacted => "contacted",
            CustomerStatus::Interested => "interested",
            CustomerStatus::NotInterested => "not_interested",
            CustomerStatus::MeetingScheduled => "meeting_scheduled",
            CustomerStatus::ProposalSent => "proposal_sent",
            CustomerStatus::Negotiation => "negotiation",
            CustomerStatus::Won => "won",
            CustomerStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// A free-text note attached to a customer. Notes are append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub content: String,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// One entry in a customer's contact history (a call, an email, a visit).
/// Append-only, like notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactEntry {
    #[serde(rename = "type")]
    pub contact_type: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_timestamp")]
    pub date: DateTime<Utc>,
}

/// The canonical persisted customer entity.
///
/// Phone number is unique across the store; `name` and `phone_number` are the
/// only fields required at creation. `country` and `category` stay plain
/// strings because their defaults differ by import path (crawl substitutes
/// "Unknown"/"other", spreadsheet and manual entry leave them empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Option<Uuid>,
    pub name: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: CustomerStatus,
    pub source: ImportSource,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub contact_history: Vec<ContactEntry>,
    #[serde(default = "default_timestamp")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_source_round_trips_through_str() {
        for s in ["crawl", "excel", "manual"] {
            let source: ImportSource = s.parse().unwrap();
            assert_eq!(source.as_str(), s);
        }
        assert!("spreadsheet".parse::<ImportSource>().is_err());
    }

    #[test]
    fn status_parse_matches_wire_format() {
        assert_eq!(
            CustomerStatus::parse("meeting_scheduled"),
            Some(CustomerStatus::MeetingScheduled)
        );
        assert_eq!(CustomerStatus::parse("MeetingScheduled"), None);
    }

    #[test]
    fn customer_serializes_camel_case() {
        let customer = Customer {
            id: None,
            name: "Acme".to_string(),
            phone_number: "555-0100".to_string(),
            email: String::new(),
            instagram: String::new(),
            address: String::new(),
            description: String::new(),
            country: "Unknown".to_string(),
            category: "other".to_string(),
            status: CustomerStatus::New,
            source: ImportSource::Crawl,
            notes: vec![],
            contact_history: vec![],
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["phoneNumber"], "555-0100");
        assert_eq!(json["status"], "new");
        assert_eq!(json["source"], "crawl");
        assert!(json["contactHistory"].as_array().unwrap().is_empty());
    }
}
