#[cfg(feature = "kafka")]
pub mod kafka;
pub mod memory;

#[cfg(feature = "kafka")]
pub use kafka::KafkaEventLog;
pub use memory::{InMemoryEventLog, StoredRecord};
