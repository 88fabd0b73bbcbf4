//! Sensitive entity detection
//!
//! A [`PatternRegistry`] holds one compiled regex per entity type; [`detect`]
//! runs it over a document together with caller-supplied literal values.

pub mod detector;
pub mod patterns;

pub use detector::detect;
pub use patterns::{PatternError, PatternRegistry};
