use anyhow::Context;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands};
use tracing::info;

use crate::domain::ports::BlocklistStore;

/// Redis set backend (`SISMEMBER` / `SADD` / `SREM`).
///
/// The connection manager reconnects on its own; each call works on a cheap
/// clone of it.
#[derive(Clone)]
pub struct RedisBlocklist {
    conn: ConnectionManager,
}

impl RedisBlocklist {
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let client = redis::Client::open(url).context("invalid redis url")?;
        let conn = ConnectionManager::new(client)
            .await
            .context("failed to connect to redis")?;
        info!("Connected to redis blocklist store");
        Ok(Self { conn })
    }
}

#[async_trait]
impl BlocklistStore for RedisBlocklist {
    async fn is_member(&self, key: &str, value: &str) -> anyhow::Result<bool> {
        let mut conn = self.conn.clone();
        let found: bool = conn.sismember(key, value).await?;
        Ok(found)
    }

    async fn add(&self, key: &str, value: &str) -> anyhow::Result<u64> {
        let mut conn = self.conn.clone();
        let added: u64 = conn.sadd(key, value).await?;
        Ok(added)
    }

    async fn remove(&self, key: &str, value: &str) -> anyhow::Result<u64> {
        let mut conn = self.conn.clone();
        let removed: u64 = conn.srem(key, value).await?;
        Ok(removed)
    }
}
