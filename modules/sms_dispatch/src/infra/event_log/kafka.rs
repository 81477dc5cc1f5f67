use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use futures::FutureExt;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use tracing::{debug, info};

use crate::config::EventLogBackend;
use crate::domain::ports::{Delivery, EventLog, PublishError, PublishFuture};

/// Kafka-backed event log.
///
/// `publish` enqueues into the producer's local buffer immediately; the
/// returned future resolves once the broker acknowledges the record.
#[derive(Clone)]
pub struct KafkaEventLog {
    producer: FutureProducer,
}

impl KafkaEventLog {
    /// Build a producer for `cfg`.
    ///
    /// - `acks=all` and `enable.idempotence=true` for durable, duplicate-free writes
    /// - `message.timeout.ms` bounds how long a record may wait for delivery
    pub fn new(cfg: &EventLogBackend) -> anyhow::Result<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &cfg.brokers)
            .set("client.id", &cfg.client_id)
            .set("message.timeout.ms", cfg.message_timeout_ms.to_string())
            .set("acks", "all")
            .set("enable.idempotence", "true")
            .create()
            .context("Failed to create Kafka producer")?;

        info!(brokers = %cfg.brokers, "Kafka producer initialized");
        Ok(Self { producer })
    }
}

#[async_trait]
impl EventLog for KafkaEventLog {
    fn publish(&self, topic: &str, key: &str, payload: String) -> PublishFuture {
        let record = FutureRecord::to(topic).key(key).payload(payload.as_bytes());
        let topic = topic.to_string();

        match self.producer.send_result(record) {
            Ok(delivery) => async move {
                match delivery.await {
                    Ok(Ok((partition, offset))) => Ok(Delivery {
                        topic,
                        partition,
                        offset,
                    }),
                    Ok(Err((err, _msg))) => Err(PublishError::Rejected {
                        topic,
                        message: err.to_string(),
                    }),
                    Err(_canceled) => Err(PublishError::Cancelled { topic }),
                }
            }
            .boxed(),
            Err((err, _record)) => {
                let message = err.to_string();
                async move { Err(PublishError::Rejected { topic, message }) }.boxed()
            }
        }
    }

    async fn flush(&self, timeout: Duration) -> Result<(), PublishError> {
        let producer = self.producer.clone();
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;
        info!("Kafka producer flushed");
        Ok(())
    }

    async fn warm_up(&self, topics: &[&str]) -> Result<(), PublishError> {
        for topic in topics {
            let producer = self.producer.clone();
            let name = topic.to_string();
            let partitions = tokio::task::spawn_blocking(move || {
                producer
                    .client()
                    .fetch_metadata(Some(name.as_str()), Timeout::After(Duration::from_secs(5)))
                    .map(|md| {
                        md.topics()
                            .first()
                            .map(|t| t.partitions().len())
                            .unwrap_or(0)
                    })
            })
            .await
            .map_err(|e| PublishError::Unavailable(e.to_string()))?
            .map_err(|e| PublishError::Unavailable(e.to_string()))?;

            debug!(topic, partitions, "topic metadata loaded");
        }
        Ok(())
    }
}
