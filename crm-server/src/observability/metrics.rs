//! Metric recording helpers for the import pipeline.
//!
//! Thin wrappers over the `metrics` facade so call sites stay free of metric
//! name strings. Installing an exporter (or not) is the deployment's concern.

pub mod import {
    /// Record a normalized batch and its size for a source.
    pub fn batch_normalized(source: &str, size: usize) {
        ::metrics::counter!("crm_import_batches_total", "source" => source.to_string())
            .increment(1);
        ::metrics::histogram!("crm_import_batch_size").record(size as f64);
    }

    /// Record a customer successfully inserted.
    pub fn customer_imported(source: &str) {
        ::metrics::counter!("crm_import_customers_imported_total", "source" => source.to_string())
            .increment(1);
    }

    /// Record a candidate skipped as a duplicate phone number.
    pub fn duplicate_skipped() {
        ::metrics::counter!("crm_import_duplicates_skipped_total").increment(1);
    }

    /// Record a candidate that failed on the store.
    pub fn record_error() {
        ::metrics::counter!("crm_import_errors_total").increment(1);
    }
}
