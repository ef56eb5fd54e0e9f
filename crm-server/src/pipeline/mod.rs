pub mod dedupe;
pub mod normalize;
pub mod report;
pub mod validate;

pub use dedupe::DedupEngine;
pub use normalize::{normalize, IntakeCandidate};
pub use report::ImportSummary;
pub use validate::filter_valid;
