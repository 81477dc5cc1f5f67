use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::SmsDispatchApi,
    error::SmsDispatchError,
    model::{BlockRequest, MessageRequest, SendReceipt, Transition},
};
use crate::domain::service::Service;

/// Local implementation of the SmsDispatchApi trait that delegates to the domain service
pub struct SmsDispatchLocalClient {
    service: Arc<Service>,
}

impl SmsDispatchLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl SmsDispatchApi for SmsDispatchLocalClient {
    async fn send(&self, request: MessageRequest) -> Result<SendReceipt, SmsDispatchError> {
        self.service.send(request).await.map_err(Into::into)
    }

    async fn block_user(&self, request: BlockRequest) -> Result<Transition, SmsDispatchError> {
        self.service.block_user(request).await.map_err(Into::into)
    }

    async fn unblock_user(&self, request: BlockRequest) -> Result<Transition, SmsDispatchError> {
        self.service.unblock_user(request).await.map_err(Into::into)
    }
}
