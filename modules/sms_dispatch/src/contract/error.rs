use thiserror::Error;

/// Errors that are safe to expose to other crates
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SmsDispatchError {
    #[error("{message}")]
    Validation { code: &'static str, message: String },

    #[error("The number {recipient} is blocked.")]
    Blocked { recipient: String },

    #[error("Internal error")]
    Internal,
}

impl SmsDispatchError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }

    pub fn blocked(recipient: impl Into<String>) -> Self {
        Self::Blocked {
            recipient: recipient.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<crate::domain::error::DomainError> for SmsDispatchError {
    fn from(domain_error: crate::domain::error::DomainError) -> Self {
        use crate::domain::error::DomainError::*;
        match domain_error {
            Validation { reason } => Self::validation(reason.code(), reason.to_string()),
            Blocked { recipient } => Self::blocked(recipient),
            Store { .. } => Self::internal(),
        }
    }
}
