use std::sync::Arc;

use tracing::debug;

use crate::contract::model::Transition;
use crate::domain::error::DomainError;
use crate::domain::ports::BlocklistStore;

/// Blocklist lookups and mutations over one named set in the store.
///
/// Nothing is cached: every call goes to the store, which owns the truth.
#[derive(Clone)]
pub struct BlocklistGuard {
    store: Arc<dyn BlocklistStore>,
    key: String,
}

impl BlocklistGuard {
    pub fn new(store: Arc<dyn BlocklistStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn is_blocked(&self, recipient: &str) -> Result<bool, DomainError> {
        let blocked = self
            .store
            .is_member(&self.key, recipient)
            .await
            .map_err(|e| DomainError::store(e.to_string()))?;
        debug!(blocked, "blocklist lookup");
        Ok(blocked)
    }

    pub async fn block(&self, recipient: &str) -> Result<Transition, DomainError> {
        self.store
            .add(&self.key, recipient)
            .await
            .map(Transition::from_changed_count)
            .map_err(|e| DomainError::store(e.to_string()))
    }

    pub async fn unblock(&self, recipient: &str) -> Result<Transition, DomainError> {
        self.store
            .remove(&self.key, recipient)
            .await
            .map(Transition::from_changed_count)
            .map_err(|e| DomainError::store(e.to_string()))
    }
}
