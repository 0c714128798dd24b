use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid difficulty: '{0}'. expected Easy, Medium or Hard")]
    InvalidDifficulty(String),
}
