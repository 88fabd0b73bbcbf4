//! Reversible token minting for redacted values
//!
//! Tokens look like `TOKEN_EMAIL_3f9a0c1b7d2e`: a reserved prefix, the
//! upper-cased entity type and an unpredictable 12 hex digit suffix.

pub mod format;
pub mod registry;

pub use format::{SUFFIX_LEN, TokenFormat};
pub use registry::TokenRegistry;
