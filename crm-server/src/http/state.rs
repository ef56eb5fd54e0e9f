use std::sync::Arc;
use std::time::Duration;

use crm_core::storage::{CustomerStore, LeadStore};

use crate::app::ImportUseCase;

/// Shared handler state: the two stores and the import configuration.
#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomerStore>,
    pub leads: Arc<dyn LeadStore>,
    pub batch_timeout: Duration,
}

impl AppState {
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

    pub fn import_use_case(&self) -> ImportUseCase {
        ImportUseCase::new(self.customers.clone(), self.leads.clone(), self.batch_timeout)
    }
}
