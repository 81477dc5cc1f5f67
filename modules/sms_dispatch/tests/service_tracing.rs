//! The service and emitter report audit outcomes through tracing only

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{ColdStartLog, CountingStore, Harness, RejectingLog};
use sms_dispatch::config::SmsDispatchConfig;
use sms_dispatch::contract::client::SmsDispatchApi;
use sms_dispatch::contract::model::{BlockRequest, MessageRequest, SendReceipt};
use sms_dispatch::infra::blocklist::InMemoryBlocklist;
use sms_dispatch::SmsDispatch;
use tracing_test::traced_test;

#[traced_test]
#[tokio::test]
async fn successful_publication_logs_offset() {
    // Arrange
    let (h, _log) = Harness::with_memory_log(CountingStore::default(), Duration::ZERO);

    // Act
    let result = h.service.send(MessageRequest::new("1234567890", "Hello")).await;
    h.drain().await;

    // Assert
    assert!(result.is_ok());
    assert!(logs_contain("audit event published"));
    assert!(logs_contain("offset=0"));
}

#[traced_test]
#[tokio::test]
async fn failed_send_tail_is_logged_not_raised() {
    // Arrange
    let log = Arc::new(RejectingLog::default());
    let h = Harness::new(CountingStore::default(), log.clone(), Duration::ZERO);

    // Act
    let result = h.service.send(MessageRequest::new("1234567890", "Hello")).await;
    h.drain().await;

    // Assert
    assert!(result.is_ok());
    assert_eq!(log.attempts(), 1);
    assert!(logs_contain("failed to publish audit event"));
    assert!(logs_contain("broker unavailable"));
}

#[traced_test]
#[tokio::test]
async fn failed_user_status_event_is_logged() {
    // Arrange
    let log = Arc::new(RejectingLog::default());
    let h = Harness::new(CountingStore::default(), log, Duration::ZERO);

    // Act
    let result = h.service.block_user(BlockRequest::new("1234567890")).await;
    h.drain().await;

    // Assert
    assert!(result.is_ok());
    assert!(logs_contain("failed to publish audit event"));
    assert!(logs_contain("user-topic"));
}

#[traced_test]
#[tokio::test]
async fn operations_run_inside_named_spans() {
    let (h, _log) = Harness::with_memory_log(CountingStore::default(), Duration::ZERO);

    let _ = h.service.block_user(BlockRequest::new("1234567890")).await;
    let _ = h.service.unblock_user(BlockRequest::new("1234567890")).await;

    assert!(logs_contain("sms_dispatch.service.block_user"));
    assert!(logs_contain("sms_dispatch.service.unblock_user"));
}

#[traced_test]
#[tokio::test]
async fn failed_warm_up_is_logged_and_module_keeps_serving() {
    // Arrange
    let log = Arc::new(ColdStartLog::default());
    let config = SmsDispatchConfig {
        processing_delay: Duration::ZERO,
        ..Default::default()
    };
    let module = SmsDispatch::new(config, Arc::new(InMemoryBlocklist::new()), log.clone());

    // Act
    module.warm_up().await;
    let result = module
        .client()
        .send(MessageRequest::new("1234567890", "Hello"))
        .await;
    module.shutdown().await;

    // Assert
    assert_eq!(result, Ok(SendReceipt::Enqueued));
    assert!(logs_contain("Event log warm-up failed, continuing"));
    assert!(logs_contain("sms-topic,user-topic"));
    assert!(!logs_contain("Event log warm-up complete"));
    assert_eq!(log.len(), 1);
}
