use std::sync::Arc;

use crm_core::storage::{CustomerStore, InsertOutcome};
use tracing::{debug, warn};

use super::normalize::IntakeCandidate;
use super::report::ImportSummary;
use crate::observability::metrics;

/// Applies valid candidates to the customer store one at a time, in input
/// order.
///
/// The store's insert-unless-phone-exists is the duplicate check, so a
/// candidate that shares a phone number with anything already stored — or
/// with an earlier candidate in the same batch — is skipped. A store failure
/// on one candidate is recorded and the batch continues; candidates already
/// written stay written.
pub struct DedupEngine {
    store: Arc<dyn CustomerStore>,
}

impl DedupEngine {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    pub async fn run(&self, candidates: Vec<IntakeCandidate>) -> ImportSummary {
        let mut summary = ImportSummary::new(candidates.len());

        for candidate in candidates {
            let phone = candidate.phone_number.clone();
            let mut customer = candidate.into_customer();

            match self.store.insert_if_absent(&mut customer).await {
                Ok(InsertOutcome::Inserted) => {
                    debug!(phone = %phone, "imported customer");
                    metrics::import::customer_imported(customer.source.as_str());
                    summary.record_imported();
                }
                Ok(InsertOutcome::DuplicatePhone) => {
                    debug!(phone = %phone, "skipped duplicate phone number");
                    metrics::import::duplicate_skipped();
                    summary.record_duplicate(phone);
                }
                Err(e) => {
                    warn!(phone = %phone, "failed to import candidate: {e}");
                    metrics::import::record_error();
                    summary.record_error();
                }
            }
        }

        summary
    }
}
