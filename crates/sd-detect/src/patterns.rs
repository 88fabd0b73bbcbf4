use regex::Regex;
use sd_core::EntityType;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// A detection rule that failed to compile. Only its own entity type is affected.
#[derive(Error, Debug)]
#[error("Invalid pattern for entity type '{entity_type}': {source}")]
pub struct PatternError {
    pub entity_type: EntityType,
    #[source]
    pub source: regex::Error,
}

/// Built-in detection rules (order is irrelevant, keys are unique)
const DEFAULT_PATTERNS: [(&str, &str); 6] = [
    (
        "email",
        r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
    ),
    ("phone", r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b"),
    ("ssn", r"\b\d{3}-?\d{2}-?\d{4}\b"),
    (
        "credit_card",
        r"\b\d{4}[\s-]?\d{4}[\s-]?\d{4}[\s-]?\d{4}\b",
    ),
    ("ip_address", r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b"),
    // Naive two capitalized words heuristic
    ("name", r"\b[A-Z][a-z]+ [A-Z][a-z]+\b"),
];

/// Mapping from entity type to its compiled detection rule.
///
/// Overlays are union-merges: a later rule for the same type replaces the
/// earlier one, other types are kept.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    patterns: BTreeMap<EntityType, Regex>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (entity_type, pattern) in DEFAULT_PATTERNS {
            registry.patterns.insert(
                EntityType::from_static(entity_type),
                Regex::new(pattern).unwrap(),
            );
        }
        registry
    }

    /// Compile and insert a rule, replacing any rule for the same type.
    ///
    /// On failure the type's previous rule is removed as well, so the type is
    /// not detected until a valid rule is supplied.
    pub fn insert(&mut self, entity_type: EntityType, pattern: &str) -> Result<(), PatternError> {
        match Regex::new(pattern) {
            Ok(regex) => {
                self.patterns.insert(entity_type, regex);
                Ok(())
            }
            Err(source) => {
                self.patterns.remove(&entity_type);
                Err(PatternError {
                    entity_type,
                    source,
                })
            }
        }
    }

    /// Overlay several rules, collecting per-type failures instead of aborting.
    pub fn overlay<I, S>(&mut self, patterns: I) -> Vec<PatternError>
    where
        I: IntoIterator<Item = (EntityType, S)>,
        S: AsRef<str>,
    {
        let mut errors = Vec::new();
        for (entity_type, pattern) in patterns {
            if let Err(err) = self.insert(entity_type, pattern.as_ref()) {
                warn!(entity_type = %err.entity_type, "Disabling detection: {}", err.source);
                errors.push(err);
            }
        }
        errors
    }

    pub fn get(&self, entity_type: &EntityType) -> Option<&Regex> {
        self.patterns.get(entity_type)
    }

    pub fn contains(&self, entity_type: &EntityType) -> bool {
        self.patterns.contains_key(entity_type)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityType, &Regex)> {
        self.patterns.iter()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
