#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use futures::future::{self, FutureExt};

use sms_dispatch::domain::emitter::{AuditEmitter, Topics};
use sms_dispatch::domain::guard::BlocklistGuard;
use sms_dispatch::domain::ports::{BlocklistStore, EventLog, PublishError, PublishFuture};
use sms_dispatch::domain::service::{Service, ServiceConfig};
use sms_dispatch::domain::worker_pool::WorkerPool;
use sms_dispatch::infra::blocklist::InMemoryBlocklist;
use sms_dispatch::infra::event_log::InMemoryEventLog;

pub const BLOCKLIST_KEY: &str = "blocked_numbers";

/// In-memory store that counts calls and can be switched to fail.
#[derive(Default)]
pub struct CountingStore {
    inner: InMemoryBlocklist,
    calls: AtomicUsize,
    failing: bool,
}

impl CountingStore {
    pub fn with_blocked(members: &[&str]) -> Self {
        Self {
            inner: InMemoryBlocklist::with_members(BLOCKLIST_KEY, members.iter().copied()),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(anyhow!("connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl BlocklistStore for CountingStore {
    async fn is_member(&self, key: &str, value: &str) -> anyhow::Result<bool> {
        self.touch()?;
        self.inner.is_member(key, value).await
    }

    async fn add(&self, key: &str, value: &str) -> anyhow::Result<u64> {
        self.touch()?;
        self.inner.add(key, value).await
    }

    async fn remove(&self, key: &str, value: &str) -> anyhow::Result<u64> {
        self.touch()?;
        self.inner.remove(key, value).await
    }
}

/// Log whose broker never acknowledges anything.
#[derive(Default)]
pub struct RejectingLog {
    attempts: AtomicUsize,
}

impl RejectingLog {
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl EventLog for RejectingLog {
    fn publish(&self, topic: &str, _key: &str, _payload: String) -> PublishFuture {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        future::ready(Err(PublishError::Rejected {
            topic: topic.to_string(),
            message: "broker unavailable".to_string(),
        }))
        .boxed()
    }
}

/// Log that cannot reach its broker at start-up but accepts records afterwards.
#[derive(Default)]
pub struct ColdStartLog {
    inner: InMemoryEventLog,
}

impl ColdStartLog {
    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait]
impl EventLog for ColdStartLog {
    fn publish(&self, topic: &str, key: &str, payload: String) -> PublishFuture {
        self.inner.publish(topic, key, payload)
    }

    async fn warm_up(&self, topics: &[&str]) -> Result<(), PublishError> {
        Err(PublishError::Unavailable(format!(
            "metadata request for {} timed out",
            topics.join(",")
        )))
    }
}

pub struct Harness {
    pub service: Service,
    pub pool: WorkerPool,
    pub store: Arc<CountingStore>,
}

impl Harness {
    pub fn new(store: CountingStore, log: Arc<dyn EventLog>, delay: Duration) -> Self {
        let store = Arc::new(store);
        let pool = WorkerPool::new(8);
        let emitter = AuditEmitter::new(log, pool.clone(), Topics::default());
        let guard = BlocklistGuard::new(store.clone(), BLOCKLIST_KEY);
        let service = Service::new(
            guard,
            emitter,
            pool.clone(),
            ServiceConfig {
                processing_delay: delay,
            },
        );
        Self {
            service,
            pool,
            store,
        }
    }

    pub fn with_memory_log(store: CountingStore, delay: Duration) -> (Self, Arc<InMemoryEventLog>) {
        let log = Arc::new(InMemoryEventLog::new());
        (Self::new(store, log.clone(), delay), log)
    }

    pub async fn drain(&self) {
        assert!(self.pool.flush(Duration::from_secs(10)).await, "pool did not drain");
    }
}
