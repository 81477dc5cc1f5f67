use std::collections::{HashMap, VecDeque};

use futures::future::{self, FutureExt};
use parking_lot::Mutex;

use crate::domain::ports::{Delivery, EventLog, PublishFuture};

/// Records kept by [`InMemoryEventLog::new`] before the oldest are dropped.
pub const DEFAULT_RETAIN: usize = 1000;

/// A record as appended to the in-memory log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub topic: String,
    pub key: String,
    pub payload: String,
    pub offset: i64,
}

#[derive(Default)]
struct Inner {
    records: VecDeque<StoredRecord>,
    next_offset: HashMap<String, i64>,
}

/// Single-partition log per topic, kept in memory for inspection.
///
/// Records are appended when `publish` is called, so the acknowledgment
/// future is already resolved. Only the newest `retain` records are kept;
/// offsets keep counting across evictions.
pub struct InMemoryEventLog {
    inner: Mutex<Inner>,
    retain: usize,
}

impl Default for InMemoryEventLog {
    fn default() -> Self {
        Self::with_retention(DEFAULT_RETAIN)
    }
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `retain` records (at least one).
    pub fn with_retention(retain: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            retain: retain.max(1),
        }
    }

    pub fn records(&self) -> Vec<StoredRecord> {
        self.inner.lock().records.iter().cloned().collect()
    }

    pub fn records_for(&self, topic: &str) -> Vec<StoredRecord> {
        self.inner
            .lock()
            .records
            .iter()
            .filter(|r| r.topic == topic)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventLog for InMemoryEventLog {
    fn publish(&self, topic: &str, key: &str, payload: String) -> PublishFuture {
        let mut inner = self.inner.lock();
        let next = inner.next_offset.entry(topic.to_string()).or_insert(0);
        let offset = *next;
        *next += 1;

        if inner.records.len() >= self.retain {
            inner.records.pop_front();
        }
        inner.records.push_back(StoredRecord {
            topic: topic.to_string(),
            key: key.to_string(),
            payload,
            offset,
        });

        future::ready(Ok(Delivery {
            topic: topic.to_string(),
            partition: 0,
            offset,
        }))
        .boxed()
    }
}
