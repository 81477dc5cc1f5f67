use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the sms_dispatch module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SmsDispatchConfig {
    #[serde(default = "default_processing_delay", with = "humantime_serde")]
    pub processing_delay: Duration,
    #[serde(default = "default_worker_pool_size")]
    pub worker_pool_size: usize,
    #[serde(default = "default_blocklist_key")]
    pub blocklist_key: String,
    #[serde(default = "default_sms_topic")]
    pub sms_topic: String,
    #[serde(default = "default_user_topic")]
    pub user_topic: String,
    /// Upper bound for draining background work and the log on shutdown.
    #[serde(default = "default_flush_timeout", with = "humantime_serde")]
    pub flush_timeout: Duration,
    #[serde(default)]
    pub blocklist: BlocklistBackend,
    #[serde(default)]
    pub event_log: EventLogBackend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Memory,
    Redis,
    Kafka,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlocklistBackend {
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default = "default_redis_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventLogBackend {
    #[serde(default)]
    pub kind: BackendKind,
    #[serde(default = "default_brokers")]
    pub brokers: String,
    #[serde(default = "default_client_id")]
    pub client_id: String,
    #[serde(default = "default_message_timeout_ms")]
    pub message_timeout_ms: u64,
}

impl Default for SmsDispatchConfig {
    fn default() -> Self {
        Self {
            processing_delay: default_processing_delay(),
            worker_pool_size: default_worker_pool_size(),
            blocklist_key: default_blocklist_key(),
            sms_topic: default_sms_topic(),
            user_topic: default_user_topic(),
            flush_timeout: default_flush_timeout(),
            blocklist: BlocklistBackend::default(),
            event_log: EventLogBackend::default(),
        }
    }
}

impl Default for BlocklistBackend {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            url: default_redis_url(),
        }
    }
}

impl Default for EventLogBackend {
    fn default() -> Self {
        Self {
            kind: BackendKind::Memory,
            brokers: default_brokers(),
            client_id: default_client_id(),
            message_timeout_ms: default_message_timeout_ms(),
        }
    }
}

impl SmsDispatchConfig {
    /// Switch both collaborators to their in-memory implementations.
    pub fn with_mock_backends(mut self) -> Self {
        self.blocklist.kind = BackendKind::Memory;
        self.event_log.kind = BackendKind::Memory;
        self
    }
}

fn default_processing_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_worker_pool_size() -> usize {
    64
}

fn default_blocklist_key() -> String {
    "blocked_numbers".to_string()
}

fn default_sms_topic() -> String {
    "sms-topic".to_string()
}

fn default_user_topic() -> String {
    "user-topic".to_string()
}

fn default_flush_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

fn default_brokers() -> String {
    "localhost:9092".to_string()
}

fn default_client_id() -> String {
    "sms-gateway".to_string()
}

fn default_message_timeout_ms() -> u64 {
    5000
}
