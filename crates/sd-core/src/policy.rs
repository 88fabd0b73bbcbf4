//! Role disclosure policies

use std::collections::{BTreeMap, BTreeSet};

use crate::EntityType;

/// What a role may see, and whether it may restore redacted content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolePolicy {
    pub allowed: BTreeSet<EntityType>,
    pub can_restore: bool,
    pub description: String,
}

impl RolePolicy {
    pub fn new<I>(allowed: I, can_restore: bool, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = EntityType>,
    {
        Self {
            allowed: allowed.into_iter().collect(),
            can_restore,
            description: description.into(),
        }
    }

    /// Policy applied to unknown roles: nothing visible, no restoration.
    pub fn strictest() -> Self {
        Self::default()
    }

    pub fn allows(&self, entity_type: &EntityType) -> bool {
        self.allowed.contains(entity_type)
    }
}

/// Built-in ranking used by [`RoleTable::outranks`].
const ROLE_LEVELS: [(&str, i32); 5] = [
    ("public", 0),
    ("internal", 1),
    ("manager", 2),
    ("admin", 3),
    ("security", 4),
];

/// Keyed lookup of role policies.
///
/// Lookups never fail: an unknown role resolves to [`RolePolicy::strictest`].
#[derive(Debug, Clone, Default)]
pub struct RoleTable {
    roles: BTreeMap<String, RolePolicy>,
}

impl RoleTable {
    /// An empty table. Every lookup is fail-closed until roles are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// The five built-in roles, from `public` (sees nothing) to `security`
    /// (sees every built-in entity type).
    pub fn with_defaults() -> Self {
        let name = EntityType::from_static("name");
        let email = EntityType::from_static("email");
        let phone = EntityType::from_static("phone");
        let ip_address = EntityType::from_static("ip_address");
        let ssn = EntityType::from_static("ssn");
        let credit_card = EntityType::from_static("credit_card");

        let mut table = Self::new();
        table.add_role(
            "public",
            RolePolicy::new([], false, "Public audience - no sensitive data visible"),
        );
        table.add_role(
            "internal",
            RolePolicy::new(
                [name.clone()],
                false,
                "Internal team - names visible but other data redacted",
            ),
        );
        table.add_role(
            "manager",
            RolePolicy::new(
                [name.clone(), email.clone()],
                true,
                "Management level - names and emails visible",
            ),
        );
        table.add_role(
            "admin",
            RolePolicy::new(
                [name.clone(), email.clone(), phone.clone(), ip_address.clone()],
                true,
                "Admin level - most entities visible except highly sensitive",
            ),
        );
        table.add_role(
            "security",
            RolePolicy::new(
                [name, email, phone, ip_address, ssn, credit_card],
                true,
                "Security team - all entities visible",
            ),
        );
        table
    }

    /// Add or replace a role. Replacement is whole-record, never field-by-field.
    pub fn add_role(&mut self, name: impl Into<String>, policy: RolePolicy) {
        self.roles.insert(name.into(), policy);
    }

    /// Overlay a set of roles onto this table.
    pub fn load_roles<I>(&mut self, roles: I)
    where
        I: IntoIterator<Item = (String, RolePolicy)>,
    {
        for (name, policy) in roles {
            self.add_role(name, policy);
        }
    }

    /// Resolve a role's policy, falling back to the strictest policy.
    pub fn get(&self, name: &str) -> RolePolicy {
        self.roles
            .get(name)
            .cloned()
            .unwrap_or_else(RolePolicy::strictest)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    pub fn allowed_entities(&self, name: &str) -> BTreeSet<EntityType> {
        self.roles
            .get(name)
            .map(|policy| policy.allowed.clone())
            .unwrap_or_default()
    }

    pub fn can_restore(&self, name: &str) -> bool {
        self.roles.get(name).is_some_and(|policy| policy.can_restore)
    }

    pub fn description(&self, name: &str) -> String {
        match self.roles.get(name) {
            Some(policy) => policy.description.clone(),
            None => format!("Unknown role: {}", name),
        }
    }

    /// Role names in sorted order.
    pub fn list_roles(&self) -> Vec<&str> {
        self.roles.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RolePolicy)> {
        self.roles.iter().map(|(name, policy)| (name.as_str(), policy))
    }

    /// Whether content prepared for `target` may be handed to `requester`.
    ///
    /// Ranks come from the built-in hierarchy; an unknown requester ranks
    /// below everything and an unknown target ranks as `public`.
    pub fn outranks(requester: &str, target: &str) -> bool {
        let requester_level = role_level(requester).unwrap_or(-1);
        let target_level = role_level(target).unwrap_or(0);
        requester_level >= target_level
    }
}

fn role_level(name: &str) -> Option<i32> {
    ROLE_LEVELS
        .iter()
        .find(|(role, _)| *role == name)
        .map(|(_, level)| *level)
}
