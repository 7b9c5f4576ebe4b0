//! Domain error types

use super::models::{SchemaEditError, ValidationError};
use thiserror::Error;

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors returned by the property type service
#[derive(Debug, Error)]
pub enum CommitError {
    /// The session failed validation and was not sent
    #[error("{}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// The gateway rejected the request, message is user facing
    #[error("{0}")]
    Persistence(String),

    /// The gateway has no owner with this id
    #[error("Unknown owner {0}")]
    UnknownOwner(String),

    /// The gateway answered with a list the editor cannot load
    #[error("Invalid gateway response: {0}")]
    InvalidResponse(#[from] SchemaEditError),
}
