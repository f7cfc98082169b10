use std::fmt;

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// A single rejected input field, reported back to the caller verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Unknown user")]
    UnknownUser,
    #[error("Validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),
    #[error("Invalid amount {0}: a cart line holds 1 to {max} items", max = super::cart::MAX_LINE_AMOUNT)]
    InvalidAmount(i32),
    #[error("Invalid cart state: {0}")]
    InvalidCartState(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Concurrent modification, retry the request")]
    ConcurrencyConflict,
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A stored enum column holds a value no variant matches.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl From<UnknownVariant> for DomainError {
    fn from(e: UnknownVariant) -> Self {
        DomainError::Internal(e.to_string())
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
