use std::time::Duration;

use async_trait::async_trait;
use futures::future::BoxFuture;
use thiserror::Error;

/// Where a record landed once the log acknowledged it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub topic: String,
    pub partition: i32,
    pub offset: i64,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("event log rejected record for topic '{topic}': {message}")]
    Rejected { topic: String, message: String },

    #[error("delivery to topic '{topic}' was cancelled")]
    Cancelled { topic: String },

    #[error("event log unavailable: {0}")]
    Unavailable(String),
}

/// Completion of a publication that has already been handed to the log.
pub type PublishFuture = BoxFuture<'static, Result<Delivery, PublishError>>;

/// Durable append-only log, addressed by topic and partition key.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Hand one record to the log.
    ///
    /// The record is accepted (or refused) before this returns; the future
    /// only reports the final acknowledgment.
    fn publish(&self, topic: &str, key: &str, payload: String) -> PublishFuture;

    /// Block until queued records are delivered or `timeout` elapses.
    async fn flush(&self, _timeout: Duration) -> Result<(), PublishError> {
        Ok(())
    }

    /// Probe the given topics once so the first real publish is not slowed by
    /// metadata lookups.
    async fn warm_up(&self, _topics: &[&str]) -> Result<(), PublishError> {
        Ok(())
    }
}
