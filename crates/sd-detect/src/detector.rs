use sd_core::{CustomEntities, DetectedEntities};
use tracing::debug;

use crate::PatternRegistry;

/// Find the distinct sensitive values in `text`, grouped by entity type.
///
/// Every rule in `patterns` contributes its non-overlapping matches. Custom
/// entities contribute each listed literal that occurs anywhere in the text
/// (plain substring test, not whole-word). Results for the same type are
/// merged and types without any match are left out.
pub fn detect(
    text: &str,
    patterns: &PatternRegistry,
    custom_entities: Option<&CustomEntities>,
) -> DetectedEntities {
    let mut detected = DetectedEntities::new();

    for (entity_type, pattern) in patterns.iter() {
        for found in pattern.find_iter(text) {
            detected.insert(entity_type.clone(), found.as_str());
        }
    }

    if let Some(custom) = custom_entities {
        for (entity_type, values) in custom {
            for value in values {
                if !value.is_empty() && text.contains(value.as_str()) {
                    detected.insert(entity_type.clone(), value.as_str());
                }
            }
        }
    }

    debug!(
        types = detected.len(),
        values = detected.value_count(),
        "Detected entities"
    );

    detected
}

#[cfg(test)]
mod tests {
    use super::*;
    use sd_core::EntityType;

    const SAMPLE: &str = "Hello John Doe, your email is john.doe@example.com and phone is 555-123-4567.\n\
        Please contact Jane Smith at jane.smith@company.org or call 555-987-6543.\n\
        The server IP is 192.168.1.100 and SSN is 123-45-6789.";

    fn ty(name: &str) -> EntityType {
        EntityType::new(name).unwrap()
    }

    #[test]
    fn test_detect_builtin_entities() {
        let patterns = PatternRegistry::with_defaults();
        let detected = detect(SAMPLE, &patterns, None);

        assert!(detected.contains(&ty("email"), "john.doe@example.com"));
        assert!(detected.contains(&ty("email"), "jane.smith@company.org"));
        assert!(detected.contains(&ty("phone"), "555-123-4567"));
        assert!(detected.contains(&ty("phone"), "555-987-6543"));
        assert!(detected.contains(&ty("ip_address"), "192.168.1.100"));
        assert!(detected.contains(&ty("ssn"), "123-45-6789"));
        assert!(detected.contains(&ty("name"), "Jane Smith"));
        assert!(detected.get(&ty("credit_card")).is_none());
    }

    #[test]
    fn test_detect_is_deterministic() {
        let patterns = PatternRegistry::with_defaults();
        let first = detect(SAMPLE, &patterns, None);
        let second = detect(SAMPLE, &patterns, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_matches_collapse() {
        let patterns = PatternRegistry::with_defaults();
        let text = "a@example.com wrote to b@example.com, cc a@example.com";
        let detected = detect(text, &patterns, None);

        assert_eq!(detected.get(&ty("email")).unwrap().len(), 2);
    }

    #[test]
    fn test_custom_entities_substring_match() {
        let patterns = PatternRegistry::new();
        let mut custom = CustomEntities::new();
        custom.insert(
            ty("secret_code"),
            vec![
                "ALPHA-123".to_string(),
                "BETA-456".to_string(),
                "GAMMA-789".to_string(),
                String::new(),
            ],
        );

        let detected = detect("Codes: ALPHA-123 and xBETA-456x", &patterns, Some(&custom));
        let codes = detected.get(&ty("secret_code")).unwrap();

        assert_eq!(codes.len(), 2);
        assert!(codes.contains("ALPHA-123"));
        assert!(codes.contains("BETA-456"));
    }

    #[test]
    fn test_custom_entities_merge_with_pattern_matches() {
        let patterns = PatternRegistry::with_defaults();
        let mut custom = CustomEntities::new();
        custom.insert(ty("email"), vec!["ops@internal".to_string()]);

        let detected = detect("mail a@example.com or ops@internal", &patterns, Some(&custom));
        let emails = detected.get(&ty("email")).unwrap();

        assert!(emails.contains("a@example.com"));
        assert!(emails.contains("ops@internal"));
    }

    #[test]
    fn test_no_matches_yields_empty() {
        let patterns = PatternRegistry::with_defaults();
        let detected = detect("just some normal text here", &patterns, None);
        assert!(detected.is_empty());
    }
}
