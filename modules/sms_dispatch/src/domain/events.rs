//! Audit events published for every terminal outcome.
//!
//! The wire shape is fixed by downstream consumers: camelCase field names,
//! `mobileNumber` first, `message` only on SMS events, `status` last.

use serde::{Deserialize, Serialize};

/// Outcome of a send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SmsStatus {
    Success,
    Blocked,
}

/// New blocklist state of a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Blocked,
    Unblocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Sms,
    UserStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsAuditRecord {
    pub mobile_number: String,
    pub message: String,
    pub status: SmsStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusRecord {
    pub mobile_number: String,
    pub status: UserStatus,
}

/// Immutable outcome record handed to the event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEvent {
    Sms(SmsAuditRecord),
    UserStatus(UserStatusRecord),
}

impl AuditEvent {
    pub fn sms(recipient: impl Into<String>, body: impl Into<String>, status: SmsStatus) -> Self {
        Self::Sms(SmsAuditRecord {
            mobile_number: recipient.into(),
            message: body.into(),
            status,
        })
    }

    pub fn user_status(recipient: impl Into<String>, status: UserStatus) -> Self {
        Self::UserStatus(UserStatusRecord {
            mobile_number: recipient.into(),
            status,
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Sms(_) => EventKind::Sms,
            Self::UserStatus(_) => EventKind::UserStatus,
        }
    }

    /// Partition key on the log.
    pub fn recipient(&self) -> &str {
        match self {
            Self::Sms(r) => &r.mobile_number,
            Self::UserStatus(r) => &r.mobile_number,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Sms(r) => serde_json::to_string(r),
            Self::UserStatus(r) => serde_json::to_string(r),
        }
    }

    /// Decode a record read back from a topic of the given kind.
    pub fn from_json(kind: EventKind, raw: &str) -> Result<Self, serde_json::Error> {
        match kind {
            EventKind::Sms => serde_json::from_str(raw).map(Self::Sms),
            EventKind::UserStatus => serde_json::from_str(raw).map(Self::UserStatus),
        }
    }
}
