use crate::model::error::Errors;
use thiserror::Error;

/// Coarse classification of a failure: `Format` for malformed inbound
/// documents, `Validation` for outbound preconditions violated before any
/// request is built.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    Format,
    Validation,
}

#[derive(Error, Debug)]
pub enum BurrowError {
    #[error("Malformed JSON:API document: {0}")]
    InvalidDocument(String),
    #[error("Document carries {} error object(s) instead of primary data", .0.len())]
    ErrorDocument(Errors),
    #[error("Serialization body must be a JSON object")]
    BodyNotAnObject,
    #[error("An `update` payload for type `{0}` requires an `id`, but none was found")]
    MissingUpdateId(String),
    #[error("Invalid case kind: {0}, the valid kinds: `camel`, `snake`, `kebab`, `none`")]
    InvalidCaseKind(String),
}

impl BurrowError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BurrowError::InvalidDocument(_) | BurrowError::ErrorDocument(_) => ErrorKind::Format,
            BurrowError::BodyNotAnObject
            | BurrowError::MissingUpdateId(_)
            | BurrowError::InvalidCaseKind(_) => ErrorKind::Validation,
        }
    }
}

impl From<serde_json::Error> for BurrowError {
    fn from(err: serde_json::Error) -> Self { BurrowError::InvalidDocument(err.to_string()) }
}
