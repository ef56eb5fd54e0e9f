use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid import source: {0}")]
    InvalidSource(String),

    #[error("no valid customers to import")]
    NoValidCustomers,

    #[error("customer not found: {0}")]
    CustomerNotFound(uuid::Uuid),

    #[error("storage error: {message}")]
    Storage { message: String },

    #[error("import timed out after {0}s")]
    Timeout(u64),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CrmError>;
