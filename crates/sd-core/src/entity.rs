use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::{Error, Result};

/// Identifying tag for a kind of sensitive value ("email", "ssn", ...).
///
/// The set of types is open: configuration and custom entity input can
/// introduce new ones. Names are normalized to lower case and restricted to
/// `[a-z][a-z0-9_]*` so that the upper-cased segment embedded in a token can
/// always be mapped back to the same type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityType(String);

impl EntityType {
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_lowercase();
        if !is_valid_name(&normalized) {
            return Err(Error::InvalidEntityType(name.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Built-in names known at compile time. Panics on an invalid literal.
    pub fn from_static(name: &'static str) -> Self {
        match Self::new(name) {
            Ok(ty) => ty,
            Err(_) => panic!("invalid built-in entity type: {name}"),
        }
    }

    /// Sentinel reported when a token's type can be neither looked up nor parsed.
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form used inside token strings.
    pub fn token_segment(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl TryFrom<String> for EntityType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<EntityType> for String {
    fn from(value: EntityType) -> Self {
        value.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller-supplied literal values to detect, keyed by entity type.
pub type CustomEntities = BTreeMap<EntityType, Vec<String>>;

/// Build [`CustomEntities`] from raw string keys.
///
/// Keys that normalize to the same type ("Client", "client") have their
/// value lists merged; no listed value is dropped.
pub fn custom_entities_from_raw<I>(raw: I) -> Result<CustomEntities>
where
    I: IntoIterator<Item = (String, Vec<String>)>,
{
    let mut custom = CustomEntities::new();
    for (name, values) in raw {
        let merged = custom.entry(EntityType::new(&name)?).or_default();
        for value in values {
            if !merged.contains(&value) {
                merged.push(value);
            }
        }
    }
    Ok(custom)
}

/// Externalized token -> original value mapping.
///
/// Carries no type metadata; the type is recovered from the token string.
pub type TokenMap = BTreeMap<String, String>;

/// Distinct matched values per entity type for one document.
///
/// Types without matches are never present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedEntities {
    by_type: BTreeMap<EntityType, BTreeSet<String>>,
}

impl DetectedEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a matched value. Empty values are ignored.
    pub fn insert(&mut self, entity_type: EntityType, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            return;
        }
        self.by_type.entry(entity_type).or_default().insert(value);
    }

    pub fn get(&self, entity_type: &EntityType) -> Option<&BTreeSet<String>> {
        self.by_type.get(entity_type)
    }

    pub fn contains(&self, entity_type: &EntityType, value: &str) -> bool {
        self.by_type
            .get(entity_type)
            .is_some_and(|values| values.contains(value))
    }

    pub fn types(&self) -> impl Iterator<Item = &EntityType> {
        self.by_type.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EntityType, &BTreeSet<String>)> {
        self.by_type.iter()
    }

    /// Number of entity types with at least one match.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }

    /// Total number of distinct (type, value) pairs.
    pub fn value_count(&self) -> usize {
        self.by_type.values().map(BTreeSet::len).sum()
    }
}
