//! Redaction and restoration engine
//!
//! Ties detection, role policy and the token registry together:
//! [`Engine::redact`] replaces every value a role may not see with a token,
//! [`Engine::restore`] puts back the values a restoring role may see.

pub mod substitute;

use std::collections::BTreeMap;

use sd_core::{CustomEntities, DetectedEntities, EntityType, RolePolicy, RoleTable, TokenMap};
use sd_detect::PatternRegistry;
use sd_tokens::TokenRegistry;
use tracing::{debug, info, warn};

pub use substitute::substitute;

pub struct Engine {
    patterns: PatternRegistry,
    roles: RoleTable,
    registry: TokenRegistry,
}

impl Engine {
    pub fn new(patterns: PatternRegistry, roles: RoleTable) -> Self {
        Self::with_registry(patterns, roles, TokenRegistry::new())
    }

    pub fn with_registry(
        patterns: PatternRegistry,
        roles: RoleTable,
        registry: TokenRegistry,
    ) -> Self {
        Self {
            patterns,
            roles,
            registry,
        }
    }

    /// Built-in patterns and roles with a fresh registry.
    pub fn with_defaults() -> Self {
        Self::new(PatternRegistry::with_defaults(), RoleTable::with_defaults())
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    pub fn roles(&self) -> &RoleTable {
        &self.roles
    }

    /// Mutable role table, for adding or updating roles at runtime.
    pub fn roles_mut(&mut self) -> &mut RoleTable {
        &mut self.roles
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Drop every token minted so far.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    pub fn detect(&self, text: &str, custom_entities: Option<&CustomEntities>) -> DetectedEntities {
        sd_detect::detect(text, &self.patterns, custom_entities)
    }

    /// Prepare `text` for `role`.
    ///
    /// Values of entity types the role may not see are replaced by tokens
    /// in a single pass; everything else is left verbatim. Returns the
    /// redacted text and the token map needed to restore it.
    pub fn redact(
        &mut self,
        text: &str,
        role: &str,
        custom_entities: Option<&CustomEntities>,
    ) -> (String, TokenMap) {
        let policy = self.resolve(role);
        let detected = self.detect(text, custom_entities);
        let plan = plan_redactions(&detected, &policy, custom_entities);

        let mut token_map = TokenMap::new();
        let mut pairs: Vec<(&str, String)> = Vec::with_capacity(plan.len());
        for (value, entity_type) in plan {
            let token = self.registry.mint(entity_type, value);
            token_map.insert(token.clone(), value.to_string());
            pairs.push((value, token));
        }

        let replacements: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(value, token)| (*value, token.as_str()))
            .collect();
        let (redacted, replaced) = substitute(text, &replacements);

        info!(
            role,
            tokens = token_map.len(),
            replaced,
            "Redacted document"
        );

        (redacted, token_map)
    }

    /// Put back the original values `role` is allowed to see.
    ///
    /// Roles that cannot restore get `text` back unchanged. Each token's type
    /// comes from this engine's registry, or from the token string itself
    /// when the token was minted elsewhere; tokens of types the role may not
    /// see, and tokens absent from `token_map`, stay in place.
    pub fn restore(&self, text: &str, token_map: &TokenMap, role: &str) -> String {
        let policy = self.resolve(role);
        if !policy.can_restore {
            debug!(role, "Role cannot restore, returning text unchanged");
            return text.to_string();
        }

        let replacements: Vec<(&str, &str)> = token_map
            .iter()
            .filter(|(token, _)| policy.allows(&self.registry.type_of(token)))
            .map(|(token, value)| (token.as_str(), value.as_str()))
            .collect();

        let (restored, replaced) = substitute(text, &replacements);

        info!(
            role,
            allowed = replacements.len(),
            total = token_map.len(),
            replaced,
            "Restored document"
        );

        restored
    }

    fn resolve(&self, role: &str) -> RolePolicy {
        if !self.roles.contains(role) {
            warn!(role, "Unknown role, applying the strictest policy");
        }
        self.roles.get(role)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Pick the values to tokenize and the type each token will carry.
///
/// A value is tokenized when any type it was detected under is hidden from
/// the role. Its token type is a custom entity type listing that value if
/// there is one, otherwise the first hidden type in name order.
fn plan_redactions<'a>(
    detected: &'a DetectedEntities,
    policy: &RolePolicy,
    custom_entities: Option<&CustomEntities>,
) -> BTreeMap<&'a str, &'a EntityType> {
    let is_custom = |entity_type: &EntityType, value: &str| {
        custom_entities
            .and_then(|custom| custom.get(entity_type))
            .is_some_and(|values| values.iter().any(|v| v == value))
    };

    let mut plan: BTreeMap<&str, &EntityType> = BTreeMap::new();
    for (entity_type, values) in detected.iter() {
        if policy.allows(entity_type) {
            continue;
        }
        for value in values {
            let keep_existing = plan.get(value.as_str()).is_some_and(|chosen| {
                is_custom(*chosen, value.as_str()) || !is_custom(entity_type, value.as_str())
            });
            if !keep_existing {
                plan.insert(value.as_str(), entity_type);
            }
        }
    }

    debug!(values = plan.len(), "Planned redactions");
    plan
}
