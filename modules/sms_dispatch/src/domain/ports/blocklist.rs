use async_trait::async_trait;

/// Set-membership store backing the blocklist.
///
/// `add` and `remove` return how many members actually changed, so callers
/// can tell a transition from a no-op. Atomicity per call is the store's job.
#[async_trait]
pub trait BlocklistStore: Send + Sync {
    async fn is_member(&self, key: &str, value: &str) -> anyhow::Result<bool>;

    async fn add(&self, key: &str, value: &str) -> anyhow::Result<u64>;

    async fn remove(&self, key: &str, value: &str) -> anyhow::Result<u64>;
}
