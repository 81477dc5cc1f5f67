/// A request to deliver `body` to `recipient`. Built per call, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageRequest {
    pub recipient: String,
    pub body: String,
}

impl MessageRequest {
    pub fn new(recipient: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            body: body.into(),
        }
    }
}

/// A request to block or unblock `recipient`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockRequest {
    pub recipient: String,
}

impl BlockRequest {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

/// Acknowledgment for an accepted message; delivery happens later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendReceipt {
    Enqueued,
}

/// Result of a state-mutating blocklist operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    Unchanged,
}

impl Transition {
    /// Maps a store's changed-member count onto a transition.
    pub fn from_changed_count(count: u64) -> Self {
        if count > 0 {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }

    pub fn is_changed(self) -> bool {
        matches!(self, Self::Changed)
    }
}
