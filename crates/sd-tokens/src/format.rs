use sd_core::{EntityType, Error, Result};

/// Length of the hex suffix that follows the type segment.
pub const SUFFIX_LEN: usize = 12;

const DELIMITER: char = '_';

/// Textual layout of a token: `<prefix><TYPE>_<suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenFormat {
    prefix: String,
}

impl TokenFormat {
    pub const DEFAULT_PREFIX: &'static str = "TOKEN_";

    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() || prefix.chars().any(char::is_whitespace) {
            return Err(Error::InvalidTokenPrefix(prefix));
        }
        Ok(Self { prefix })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn render(&self, entity_type: &EntityType, suffix: &str) -> String {
        format!(
            "{}{}{}{}",
            self.prefix,
            entity_type.token_segment(),
            DELIMITER,
            suffix
        )
    }

    /// Recover the entity type from a token string alone.
    ///
    /// Strict: the prefix must match, the type segment must be
    /// `[A-Z][A-Z0-9_]*` and the suffix exactly [`SUFFIX_LEN`] lowercase hex
    /// digits. Type segments may themselves contain the delimiter
    /// (`CREDIT_CARD`), so the suffix is split off from the right.
    pub fn parse(&self, token: &str) -> Option<EntityType> {
        let body = token.strip_prefix(&self.prefix)?;
        let (segment, suffix) = body.rsplit_once(DELIMITER)?;

        if suffix.len() != SUFFIX_LEN
            || !suffix
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return None;
        }

        let mut chars = segment.chars();
        if !chars.next().is_some_and(|c| c.is_ascii_uppercase()) {
            return None;
        }
        if !chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == DELIMITER) {
            return None;
        }

        EntityType::new(segment).ok()
    }
}

impl Default for TokenFormat {
    fn default() -> Self {
        Self {
            prefix: Self::DEFAULT_PREFIX.to_string(),
        }
    }
}
