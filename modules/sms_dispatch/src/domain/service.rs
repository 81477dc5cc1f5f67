use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::contract::model::{BlockRequest, MessageRequest, SendReceipt, Transition};
use crate::domain::emitter::AuditEmitter;
use crate::domain::error::DomainError;
use crate::domain::events::{AuditEvent, SmsStatus, UserStatus};
use crate::domain::guard::BlocklistGuard;
use crate::domain::validation::{validate_message, validate_recipient};
use crate::domain::worker_pool::WorkerPool;

/// Dispatch service: validation, blocklist check, then audit.
/// Depends only on ports, never on adapter types.
#[derive(Clone)]
pub struct Service {
    guard: BlocklistGuard,
    emitter: AuditEmitter,
    pool: WorkerPool,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Simulated carrier latency before a SUCCESS event.
    pub processing_delay: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(500),
        }
    }
}

impl Service {
    pub fn new(
        guard: BlocklistGuard,
        emitter: AuditEmitter,
        pool: WorkerPool,
        config: ServiceConfig,
    ) -> Self {
        Self {
            guard,
            emitter,
            pool,
            config,
        }
    }

    #[instrument(
        name = "sms_dispatch.service.send",
        skip(self, request),
        fields(recipient = %request.recipient)
    )]
    pub async fn send(&self, request: MessageRequest) -> Result<SendReceipt, DomainError> {
        debug!("Validating message");
        validate_message(&request.recipient, &request.body)?;

        if self.guard.is_blocked(&request.recipient).await? {
            warn!("Recipient is blocked, rejecting message");
            self.emitter.emit(AuditEvent::sms(
                request.recipient.as_str(),
                request.body,
                SmsStatus::Blocked,
            ));
            return Err(DomainError::blocked(request.recipient));
        }

        let emitter = self.emitter.clone();
        let delay = self.config.processing_delay;
        let event = AuditEvent::sms(request.recipient, request.body, SmsStatus::Success);
        self.pool.spawn(async move {
            tokio::time::sleep(delay).await;
            emitter.emit_and_wait(event).await;
        });

        info!("Message enqueued for delivery");
        Ok(SendReceipt::Enqueued)
    }

    #[instrument(
        name = "sms_dispatch.service.block_user",
        skip(self, request),
        fields(recipient = %request.recipient)
    )]
    pub async fn block_user(&self, request: BlockRequest) -> Result<Transition, DomainError> {
        validate_recipient(&request.recipient)?;

        let transition = self.guard.block(&request.recipient).await?;
        if transition.is_changed() {
            info!("Recipient blocked");
            self.emitter
                .emit(AuditEvent::user_status(request.recipient, UserStatus::Blocked));
        } else {
            debug!("Recipient was already blocked");
        }
        Ok(transition)
    }

    #[instrument(
        name = "sms_dispatch.service.unblock_user",
        skip(self, request),
        fields(recipient = %request.recipient)
    )]
    pub async fn unblock_user(&self, request: BlockRequest) -> Result<Transition, DomainError> {
        validate_recipient(&request.recipient)?;

        let transition = self.guard.unblock(&request.recipient).await?;
        if transition.is_changed() {
            info!("Recipient unblocked");
            self.emitter.emit(AuditEvent::user_status(
                request.recipient,
                UserStatus::Unblocked,
            ));
        } else {
            debug!("Recipient was not blocked");
        }
        Ok(transition)
    }
}
