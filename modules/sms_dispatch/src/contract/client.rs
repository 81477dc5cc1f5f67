use async_trait::async_trait;

use crate::contract::{
    error::SmsDispatchError,
    model::{BlockRequest, MessageRequest, SendReceipt, Transition},
};

/// Public API of the sms_dispatch module for in-process consumers
#[async_trait]
pub trait SmsDispatchApi: Send + Sync {
    /// Validate, check the blocklist and enqueue a message for delivery
    async fn send(&self, request: MessageRequest) -> Result<SendReceipt, SmsDispatchError>;

    /// Add a number to the blocklist
    async fn block_user(&self, request: BlockRequest) -> Result<Transition, SmsDispatchError>;

    /// Remove a number from the blocklist
    async fn unblock_user(&self, request: BlockRequest) -> Result<Transition, SmsDispatchError>;
}
