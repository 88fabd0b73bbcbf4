use sd_core::{EntityType, Result, TokenMap};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::{SUFFIX_LEN, TokenFormat};

/// Bidirectional value <-> token memory for one redaction session.
///
/// The two maps are only ever updated together and stay mutual inverses.
/// A minted token is never rebound to a different value until [`reset`].
/// Sharing one registry between threads requires external locking
/// (e.g. `Mutex<TokenRegistry>`); independent documents should each use
/// their own instance.
///
/// [`reset`]: TokenRegistry::reset
#[derive(Debug, Default)]
pub struct TokenRegistry {
    format: TokenFormat,
    value_tokens: HashMap<String, String>,
    token_entries: HashMap<String, (EntityType, String)>,
}

impl TokenRegistry {
    /// Registry using the default `TOKEN_` prefix
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Result<Self> {
        Ok(Self::with_format(TokenFormat::new(prefix)?))
    }

    pub fn with_format(format: TokenFormat) -> Self {
        Self {
            format,
            value_tokens: HashMap::new(),
            token_entries: HashMap::new(),
        }
    }

    pub fn format(&self) -> &TokenFormat {
        &self.format
    }

    /// Token for `value`, minting one on first sight.
    ///
    /// Reuse is keyed by the literal value alone: a value seen before under
    /// another type keeps its original token.
    pub fn mint(&mut self, entity_type: &EntityType, value: &str) -> String {
        if let Some(existing) = self.value_tokens.get(value) {
            return existing.clone();
        }

        let token = loop {
            let candidate = self.format.render(entity_type, &fresh_suffix(entity_type, value));
            if !self.token_entries.contains_key(&candidate) {
                break candidate;
            }
        };

        debug!(entity_type = %entity_type, "Minted token");

        self.value_tokens.insert(value.to_string(), token.clone());
        self.token_entries
            .insert(token.clone(), (entity_type.clone(), value.to_string()));
        token
    }

    /// Entity type behind `token`.
    ///
    /// Falls back to parsing the token string when this registry did not
    /// mint it, and to [`EntityType::unknown`] when that fails too.
    pub fn type_of(&self, token: &str) -> EntityType {
        if let Some((entity_type, _)) = self.token_entries.get(token) {
            return entity_type.clone();
        }
        self.format
            .parse(token)
            .unwrap_or_else(EntityType::unknown)
    }

    /// Original value behind `token`, or the token itself when unknown.
    pub fn value_of<'a>(&'a self, token: &'a str) -> &'a str {
        self.token_entries
            .get(token)
            .map(|(_, value)| value.as_str())
            .unwrap_or(token)
    }

    pub fn token_for(&self, value: &str) -> Option<&str> {
        self.value_tokens.get(value).map(String::as_str)
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.token_entries.contains_key(token)
    }

    /// Everything minted so far as an externalizable token map.
    pub fn export(&self) -> TokenMap {
        self.token_entries
            .iter()
            .map(|(token, (_, value))| (token.clone(), value.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.token_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_entries.is_empty()
    }

    /// Forget every token, starting a fresh session.
    pub fn reset(&mut self) {
        self.value_tokens.clear();
        self.token_entries.clear();
    }
}

/// Hash of the (type, value) pair salted with fresh randomness, so the same
/// pair gets unrelated suffixes in different registries.
fn fresh_suffix(entity_type: &EntityType, value: &str) -> String {
    let nonce = Uuid::new_v4();
    let mut hasher = blake3::Hasher::new();
    hasher.update(entity_type.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(value.as_bytes());
    hasher.update(b":");
    hasher.update(nonce.as_bytes());
    hasher.finalize().to_hex().as_str()[..SUFFIX_LEN].to_string()
}
