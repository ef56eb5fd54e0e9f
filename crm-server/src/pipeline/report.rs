use serde::{Deserialize, Serialize};

/// Outcome tally of one import invocation.
///
/// `imported + skipped + errors == total` holds for every batch, and
/// `duplicates` carries one phone number per skipped candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: usize,
    pub duplicates: Vec<String>,
}

impl ImportSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_duplicate(&mut self, phone: impl Into<String>) {
        self.skipped += 1;
        self.duplicates.push(phone.into());
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
    }
}
