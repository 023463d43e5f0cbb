//! Domain errors

use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Failures reported by a transport or authenticator implementation.
/// Façades pass these through untouched.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode upstream response: {0}")]
    Decode(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimiterError {
    #[error("rate limiter wait cancelled")]
    Cancelled,

    #[error("rate limiter deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid {0} id")]
    InvalidId(&'static str),

    #[error("length of {resource} returned did not equal 1 (got {count})")]
    ShapeMismatch { resource: &'static str, count: usize },

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Limiter(#[from] LimiterError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Session rejected: {0}")]
    SessionRejected(String),
}

impl LedgerError {
    /// Single-field validation failure raised outside a `Validate` derive.
    pub fn invalid_field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new(code).with_message(message.into()));
        LedgerError::Validation(errors)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }
}
