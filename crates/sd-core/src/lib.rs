//! Core domain models for safe-disclosure
//!
//! This crate contains:
//! - Entity types and detection results (EntityType, DetectedEntities)
//! - Role policies and the role table
//! - The externalized token map

pub mod entity;
pub mod error;
pub mod policy;

pub use entity::{CustomEntities, DetectedEntities, EntityType, TokenMap, custom_entities_from_raw};
pub use error::{Error, Result};
pub use policy::{RolePolicy, RoleTable};
