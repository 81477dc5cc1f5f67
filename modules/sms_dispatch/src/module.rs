use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::rest::routes;
use crate::config::{BackendKind, BlocklistBackend, EventLogBackend, SmsDispatchConfig};
use crate::contract::client::SmsDispatchApi;
use crate::domain::emitter::{AuditEmitter, Topics};
use crate::domain::guard::BlocklistGuard;
use crate::domain::ports::{BlocklistStore, EventLog};
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::worker_pool::WorkerPool;
use crate::gateways::local::SmsDispatchLocalClient;
use crate::infra::blocklist::InMemoryBlocklist;
use crate::infra::event_log::InMemoryEventLog;

/// The sms_dispatch module: collaborators, domain service and REST surface,
/// wired once at start-up.
#[derive(Clone)]
pub struct SmsDispatch {
    service: Arc<Service>,
    emitter: AuditEmitter,
    log: Arc<dyn EventLog>,
    config: SmsDispatchConfig,
}

impl SmsDispatch {
    /// Build the configured backends and wire the service on top of them.
    pub async fn from_config(config: SmsDispatchConfig) -> anyhow::Result<Self> {
        info!("Initializing sms_dispatch module");
        debug!(
            "Loaded sms_dispatch config: processing_delay={:?}, worker_pool_size={}, blocklist={:?}, event_log={:?}",
            config.processing_delay,
            config.worker_pool_size,
            config.blocklist.kind,
            config.event_log.kind
        );

        let store = build_blocklist(&config.blocklist).await?;
        let log = build_event_log(&config.event_log)?;
        Ok(Self::new(config, store, log))
    }

    /// Wire the module over already-built collaborators.
    pub fn new(
        config: SmsDispatchConfig,
        store: Arc<dyn BlocklistStore>,
        log: Arc<dyn EventLog>,
    ) -> Self {
        let pool = WorkerPool::new(config.worker_pool_size);
        let topics = Topics {
            sms: config.sms_topic.clone(),
            user: config.user_topic.clone(),
        };
        let emitter = AuditEmitter::new(log.clone(), pool.clone(), topics);
        let guard = BlocklistGuard::new(store, config.blocklist_key.clone());
        let service = Service::new(
            guard,
            emitter.clone(),
            pool,
            ServiceConfig {
                processing_delay: config.processing_delay,
            },
        );

        Self {
            service: Arc::new(service),
            emitter,
            log,
            config,
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other crates.
    pub fn client(&self) -> Arc<dyn SmsDispatchApi> {
        Arc::new(SmsDispatchLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering sms_dispatch REST routes");
        let router = routes::register_routes(router, self.service.clone())?;
        info!("SMS REST routes registered successfully");
        Ok(router)
    }

    /// Probe both topics so the first publish does not pay for metadata.
    /// Failure is not fatal.
    pub async fn warm_up(&self) {
        let topics = self.emitter.topics();
        match self.log.warm_up(&[topics.sms.as_str(), topics.user.as_str()]).await {
            Ok(()) => info!("Event log warm-up complete"),
            Err(e) => warn!(error = %e, "Event log warm-up failed, continuing"),
        }
    }

    /// Wait for pending send tails and publish observers, then flush the log.
    pub async fn shutdown(&self) {
        info!("Stopping sms_dispatch module");
        self.emitter.shutdown(self.config.flush_timeout).await;
        info!("sms_dispatch module stopped");
    }
}

async fn build_blocklist(cfg: &BlocklistBackend) -> anyhow::Result<Arc<dyn BlocklistStore>> {
    match cfg.kind {
        BackendKind::Memory => {
            info!("Using in-memory blocklist store");
            Ok(Arc::new(InMemoryBlocklist::new()))
        }
        #[cfg(feature = "redis")]
        BackendKind::Redis => {
            let store = crate::infra::blocklist::RedisBlocklist::connect(&cfg.url).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis"))]
        BackendKind::Redis => {
            anyhow::bail!("blocklist kind 'redis' requires the `redis` feature")
        }
        BackendKind::Kafka => anyhow::bail!("'kafka' is not a blocklist backend"),
    }
}

fn build_event_log(cfg: &EventLogBackend) -> anyhow::Result<Arc<dyn EventLog>> {
    match cfg.kind {
        BackendKind::Memory => {
            info!("Using in-memory event log");
            Ok(Arc::new(InMemoryEventLog::new()))
        }
        #[cfg(feature = "kafka")]
        BackendKind::Kafka => Ok(Arc::new(crate::infra::event_log::KafkaEventLog::new(cfg)?)),
        #[cfg(not(feature = "kafka"))]
        BackendKind::Kafka => {
            anyhow::bail!("event log kind 'kafka' requires the `kafka` feature")
        }
        BackendKind::Redis => anyhow::bail!("'redis' is not an event log backend"),
    }
}
