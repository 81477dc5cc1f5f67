//! Input gate for recipients and message bodies.
//!
//! Rules run in a fixed order and the first failure wins. Nothing is
//! normalized: a value either passes as-is or is rejected.

use thiserror::Error;

/// Exact number of characters in a recipient.
pub const RECIPIENT_LEN: usize = 10;
/// Upper bound on message body length, in characters.
pub const MAX_BODY_CHARS: usize = 200;

/// Why a request was rejected before reaching the blocklist.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    #[error("Mobile number cannot be empty.")]
    EmptyRecipient,

    #[error("Mobile number must be exactly 10 digits.")]
    BadLength,

    #[error("Mobile number must contain only digits.")]
    NonDigit,

    #[error("Message content is required.")]
    EmptyBody,

    #[error("Message is too long (max 200 characters).")]
    BodyTooLong,
}

impl RejectionReason {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyRecipient => "EMPTY_RECIPIENT",
            Self::BadLength => "BAD_LENGTH",
            Self::NonDigit => "NON_DIGIT",
            Self::EmptyBody => "EMPTY_BODY",
            Self::BodyTooLong => "BODY_TOO_LONG",
        }
    }
}

/// Validate the recipient only (block/unblock path).
pub fn validate_recipient(recipient: &str) -> Result<(), RejectionReason> {
    if recipient.trim().is_empty() {
        return Err(RejectionReason::EmptyRecipient);
    }
    if recipient.chars().count() != RECIPIENT_LEN {
        return Err(RejectionReason::BadLength);
    }
    if !recipient.chars().all(|c| c.is_ascii_digit()) {
        return Err(RejectionReason::NonDigit);
    }
    Ok(())
}

/// Validate recipient, then body (send path).
pub fn validate_message(recipient: &str, body: &str) -> Result<(), RejectionReason> {
    validate_recipient(recipient)?;
    if body.trim().is_empty() {
        return Err(RejectionReason::EmptyBody);
    }
    if body.chars().count() > MAX_BODY_CHARS {
        return Err(RejectionReason::BodyTooLong);
    }
    Ok(())
}
