use super::normalize::IntakeCandidate;

/// A candidate can only become a customer if it carries both a name and a
/// phone number; every other field is optional.
pub fn is_valid(candidate: &IntakeCandidate) -> bool {
    !candidate.name.trim().is_empty() && !candidate.phone_number.trim().is_empty()
}

/// Drop candidates that cannot legally become customers. Pure filter, order
/// preserved.
pub fn filter_valid(candidates: Vec<IntakeCandidate>) -> Vec<IntakeCandidate> {
    candidates.into_iter().filter(is_valid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize::normalize;
    use crm_core::domain::ImportSource;
    use serde_json::json;

    #[test]
    fn candidates_without_name_or_phone_are_dropped() {
        let rows = vec![
            json!({"name": "Has Both", "phoneNumber": "555-0100"}),
            json!({"name": "No Phone"}),
            json!({"phoneNumber": "555-0101"}),
            json!({"name": "   ", "phoneNumber": "555-0102"}),
        ];
        let valid = filter_valid(normalize(ImportSource::Manual, &rows));

        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].name, "Has Both");
    }

    #[test]
    fn order_is_preserved() {
        let rows = vec![
            json!({"name": "First", "phoneNumber": "1"}),
            json!({"name": "Dropped"}),
            json!({"name": "Second", "phoneNumber": "2"}),
        ];
        let valid = filter_valid(normalize(ImportSource::Manual, &rows));
        let names: Vec<&str> = valid.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
