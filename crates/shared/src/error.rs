use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Field;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Why a single field's value cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Minimum {min} characters")]
    PasswordTooShort { min: usize },
}

impl FieldError {
    pub fn field(self) -> Field {
        match self {
            FieldError::EmailRequired | FieldError::InvalidEmailFormat => Field::Email,
            FieldError::PasswordRequired | FieldError::PasswordTooShort { .. } => Field::Password,
        }
    }
}

/// Failure to obtain an authentication decision at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("authentication service unavailable: {0}")]
    Unavailable(String),
    #[error("authentication attempt cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field '{0}'")]
pub struct UnknownField(pub String);
