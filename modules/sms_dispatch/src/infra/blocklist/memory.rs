use std::collections::HashSet;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::ports::BlocklistStore;

/// Process-local set store. Each named set is locked independently.
#[derive(Default)]
pub struct InMemoryBlocklist {
    sets: DashMap<String, HashSet<String>>,
}

impl InMemoryBlocklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `members` already present in set `key`.
    pub fn with_members<I, S>(key: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        store
            .sets
            .insert(key.to_string(), members.into_iter().map(Into::into).collect());
        store
    }

    pub fn len(&self, key: &str) -> usize {
        self.sets.get(key).map(|s| s.len()).unwrap_or(0)
    }
}

#[async_trait]
impl BlocklistStore for InMemoryBlocklist {
    async fn is_member(&self, key: &str, value: &str) -> anyhow::Result<bool> {
        Ok(self.sets.get(key).is_some_and(|s| s.contains(value)))
    }

    async fn add(&self, key: &str, value: &str) -> anyhow::Result<u64> {
        let inserted = self
            .sets
            .entry(key.to_string())
            .or_default()
            .insert(value.to_string());
        Ok(u64::from(inserted))
    }

    async fn remove(&self, key: &str, value: &str) -> anyhow::Result<u64> {
        let removed = self
            .sets
            .get_mut(key)
            .is_some_and(|mut s| s.remove(value));
        Ok(u64::from(removed))
    }
}
