use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::domain::error::AuditError;
use crate::domain::events::{AuditEvent, EventKind};
use crate::domain::ports::{Delivery, EventLog, PublishFuture};
use crate::domain::worker_pool::WorkerPool;

/// Destination topic per event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    pub sms: String,
    pub user: String,
}

impl Default for Topics {
    fn default() -> Self {
        Self {
            sms: "sms-topic".to_string(),
            user: "user-topic".to_string(),
        }
    }
}

impl Topics {
    pub fn for_kind(&self, kind: EventKind) -> &str {
        match kind {
            EventKind::Sms => &self.sms,
            EventKind::UserStatus => &self.user,
        }
    }
}

/// Serializes audit events and hands them to the event log.
///
/// Publication is best-effort: failures are logged here and never reach the
/// caller, and nothing is retried.
#[derive(Clone)]
pub struct AuditEmitter {
    log: Arc<dyn EventLog>,
    pool: WorkerPool,
    topics: Topics,
}

impl AuditEmitter {
    pub fn new(log: Arc<dyn EventLog>, pool: WorkerPool, topics: Topics) -> Self {
        Self { log, pool, topics }
    }

    pub fn topics(&self) -> &Topics {
        &self.topics
    }

    /// Serialize `event` and hand it to the log keyed by its recipient.
    pub fn initiate(&self, event: &AuditEvent) -> Result<PublishFuture, AuditError> {
        let payload = event.to_json()?;
        let topic = self.topics.for_kind(event.kind());
        debug!(topic, recipient = event.recipient(), "publishing audit event");
        Ok(self.log.publish(topic, event.recipient(), payload))
    }

    /// Fire-and-forget. The record is handed over before this returns;
    /// its acknowledgment is observed on the worker pool.
    pub fn emit(&self, event: AuditEvent) {
        match self.initiate(&event) {
            Ok(completion) => {
                let topic = self.topics.for_kind(event.kind()).to_string();
                let recipient = event.recipient().to_string();
                self.pool.spawn(async move {
                    observe(&topic, &recipient, completion).await;
                });
            }
            Err(e) => error!(error = %e, recipient = event.recipient(), "failed to emit audit event"),
        }
    }

    /// Publish and wait for the acknowledgment. Used from tasks already running
    /// on the pool.
    pub async fn emit_and_wait(&self, event: AuditEvent) -> Option<Delivery> {
        match self.initiate(&event) {
            Ok(completion) => {
                let topic = self.topics.for_kind(event.kind());
                observe(topic, event.recipient(), completion).await
            }
            Err(e) => {
                error!(error = %e, recipient = event.recipient(), "failed to emit audit event");
                None
            }
        }
    }

    /// Drain pending background work, then flush the log.
    pub async fn shutdown(&self, timeout: Duration) {
        if !self.pool.flush(timeout).await {
            warn!("shutting down with audit work still pending");
        }
        if let Err(e) = self.log.flush(timeout).await {
            warn!(error = %e, "event log flush failed");
        }
    }
}

async fn observe(topic: &str, recipient: &str, completion: PublishFuture) -> Option<Delivery> {
    match completion.await {
        Ok(delivery) => {
            info!(
                topic = %delivery.topic,
                partition = delivery.partition,
                offset = delivery.offset,
                "audit event published"
            );
            Some(delivery)
        }
        Err(e) => {
            let e = AuditError::from(e);
            error!(error = %e, topic, recipient, "failed to publish audit event");
            None
        }
    }
}
