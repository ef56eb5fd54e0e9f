use std::sync::Arc;
use std::time::Duration;

use crm_core::common::error::{CrmError, Result};
use crm_core::domain::ImportSource;
use crm_core::storage::{CustomerStore, LeadFilter, LeadStore};
use serde_json::Value;
use tracing::info;

use crate::observability::metrics;
use crate::pipeline::{filter_valid, normalize, DedupEngine, ImportSummary};

/// One import invocation: gather rows for the requested source, normalize,
/// validate, then run the dedup engine against the customer store under a
/// whole-batch timeout.
///
/// The timeout bounds the batch as a unit; candidates written before it trips
/// stay written, since no transaction spans the batch.
pub struct ImportUseCase {
    customers: Arc<dyn CustomerStore>,
    leads: Arc<dyn LeadStore>,
    batch_timeout: Duration,
}

impl ImportUseCase {
    pub fn new(
        customers: Arc<dyn CustomerStore>,
        leads: Arc<dyn LeadStore>,
        batch_timeout: Duration,
    ) -> Self {
        Self {
            customers,
            leads,
            batch_timeout,
        }
    }

    pub async fn run(
        &self,
        source: &str,
        data: Option<Value>,
        filters: Option<LeadFilter>,
    ) -> Result<ImportSummary> {
        let source: ImportSource = source.parse()?;

        let rows = self.gather_rows(source, data, filters).await?;
        let candidates = normalize(source, &rows);
        metrics::import::batch_normalized(source.as_str(), candidates.len());

        let valid = filter_valid(candidates);
        if valid.is_empty() {
            return Err(CrmError::NoValidCustomers);
        }
        info!(source = source.as_str(), candidates = valid.len(), "importing customers");

        let engine = DedupEngine::new(self.customers.clone());
        let summary = tokio::time::timeout(self.batch_timeout, engine.run(valid))
            .await
            .map_err(|_| CrmError::Timeout(self.batch_timeout.as_secs()))?;

        info!(
            imported = summary.imported,
            skipped = summary.skipped,
            errors = summary.errors,
            "import finished"
        );
        Ok(summary)
    }

    async fn gather_rows(
        &self,
        source: ImportSource,
        data: Option<Value>,
        filters: Option<LeadFilter>,
    ) -> Result<Vec<Value>> {
        match source {
            ImportSource::Crawl => {
                let filter = filters.unwrap_or_default();
                self.leads.find(&filter).await
            }
            ImportSource::Excel | ImportSource::Manual => match data {
                Some(Value::Array(rows)) => Ok(rows),
                // The one-off manual form posts a single object.
                Some(row @ Value::Object(_)) if source == ImportSource::Manual => Ok(vec![row]),
                _ => Ok(Vec::new()),
            },
        }
    }
}
