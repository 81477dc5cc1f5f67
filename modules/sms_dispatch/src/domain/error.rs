use thiserror::Error;

use crate::domain::ports::PublishError;
use crate::domain::validation::RejectionReason;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{reason}")]
    Validation { reason: RejectionReason },

    #[error("The number {recipient} is blocked.")]
    Blocked { recipient: String },

    #[error("Blocklist store error: {message}")]
    Store { message: String },
}

impl DomainError {
    pub fn validation(reason: RejectionReason) -> Self {
        Self::Validation { reason }
    }

    pub fn blocked(recipient: impl Into<String>) -> Self {
        Self::Blocked {
            recipient: recipient.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

impl From<RejectionReason> for DomainError {
    fn from(reason: RejectionReason) -> Self {
        Self::validation(reason)
    }
}

/// Failures on the audit path. Never surfaced to callers, only logged.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("failed to serialize audit event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
