use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "Invalid entity type '{0}': expected ASCII letters, digits or '_', starting with a letter"
    )]
    InvalidEntityType(String),

    #[error("Invalid token prefix '{0}': must be non-empty and contain no whitespace")]
    InvalidTokenPrefix(String),
}

pub type Result<T> = std::result::Result<T, Error>;
