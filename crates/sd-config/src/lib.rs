use sd_core::{EntityType, RolePolicy, RoleTable};
use sd_detect::{PatternError, PatternRegistry};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Invalid configuration in {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// On-disk format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// `.toml` files are TOML, everything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }
}

/// Configuration overlay for patterns and roles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Extra or replacement detection rules (entity type -> regex)
    #[serde(default, deserialize_with = "deserialize_patterns")]
    pub patterns: BTreeMap<EntityType, String>,

    /// Extra or replacement roles (role name -> policy)
    #[serde(default)]
    pub roles: BTreeMap<String, RoleConfig>,
}

/// Pattern keys are case-normalized, so two spellings of one type are
/// rejected rather than letting one rule silently replace the other.
fn deserialize_patterns<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<EntityType, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    let mut spellings: BTreeMap<EntityType, String> = BTreeMap::new();
    let mut patterns = BTreeMap::new();

    for (name, pattern) in raw {
        let entity_type = EntityType::new(&name).map_err(de::Error::custom)?;
        if let Some(previous) = spellings.insert(entity_type.clone(), name.clone()) {
            return Err(de::Error::custom(format!(
                "pattern keys '{}' and '{}' both name entity type '{}'",
                previous, name, entity_type
            )));
        }
        patterns.insert(entity_type, pattern);
    }

    Ok(patterns)
}

/// Role record as written in a config file. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleConfig {
    pub allowed_entities: Vec<EntityType>,
    pub can_restore: bool,
    pub description: String,
}

impl From<RoleConfig> for RolePolicy {
    fn from(role: RoleConfig) -> Self {
        RolePolicy::new(role.allowed_entities, role.can_restore, role.description)
    }
}

/// Defaults overlaid with a config, ready to hand to the engine.
#[derive(Debug)]
pub struct Resolved {
    pub patterns: PatternRegistry,
    pub roles: RoleTable,
    /// Rules that failed to compile; their types are not detected.
    pub pattern_errors: Vec<PatternError>,
}

impl Config {
    /// Load a config file. Nothing is applied unless the whole file parses.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Err(err) => return Err(err.into()),
        };

        let config = Self::parse(&content, ConfigFormat::from_path(path)).map_err(|reason| {
            ConfigError::Invalid {
                path: path.to_path_buf(),
                reason,
            }
        })?;

        debug!(
            path = %path.display(),
            patterns = config.patterns.len(),
            roles = config.roles.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn parse(content: &str, format: ConfigFormat) -> std::result::Result<Self, String> {
        match format {
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Write the config in the format implied by `path`'s extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match ConfigFormat::from_path(path) {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
        }
        .map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Config file in the user's config directory, if one exists
    pub fn default_path() -> Option<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "safe-disclosure", "safe-disclosure")?;
        ["config.toml", "config.json"]
            .iter()
            .map(|name| dirs.config_dir().join(name))
            .find(|path| path.exists())
    }

    /// Overlay this config onto existing pattern and role tables.
    pub fn apply(self, patterns: &mut PatternRegistry, roles: &mut RoleTable) -> Vec<PatternError> {
        let errors = patterns.overlay(self.patterns);
        roles.load_roles(
            self.roles
                .into_iter()
                .map(|(name, role)| (name, RolePolicy::from(role))),
        );
        errors
    }

    /// Built-in patterns and roles with this config overlaid.
    pub fn resolve(self) -> Resolved {
        let mut patterns = PatternRegistry::with_defaults();
        let mut roles = RoleTable::with_defaults();
        let pattern_errors = self.apply(&mut patterns, &mut roles);
        Resolved {
            patterns,
            roles,
            pattern_errors,
        }
    }

    /// Example configuration written by `generate-config`
    pub fn sample() -> Self {
        let mut patterns = BTreeMap::new();
        patterns.insert(
            EntityType::from_static("custom_id"),
            r"\bID-\d{6}\b".to_string(),
        );
        patterns.insert(
            EntityType::from_static("account_number"),
            r"\bACC-\d{8}\b".to_string(),
        );

        let mut roles = BTreeMap::new();
        roles.insert(
            "contractor".to_string(),
            RoleConfig {
                allowed_entities: vec![EntityType::from_static("name")],
                can_restore: false,
                description: "External contractor - limited access".to_string(),
            },
        );
        roles.insert(
            "analyst".to_string(),
            RoleConfig {
                allowed_entities: vec![
                    EntityType::from_static("name"),
                    EntityType::from_static("email"),
                    EntityType::from_static("custom_id"),
                ],
                can_restore: true,
                description: "Data analyst - medium access".to_string(),
            },
        );

        Self { patterns, roles }
    }
}
