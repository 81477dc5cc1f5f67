use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{middleware::from_fn, response::Json, routing::get, Router};
use runtime::ServerConfig;
use serde_json::{json, Value};
use sms_dispatch::SmsDispatch;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use crate::request_id;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Health endpoint plus the module routes, wrapped in the middleware stack.
pub fn build_router(server: &ServerConfig, module: &SmsDispatch) -> Result<Router> {
    let mut router = Router::new().route("/health", get(health_check));
    router = module.register_rest(router)?;

    // Outermost to innermost:
    // PropagateRequestId -> SetRequestId -> push_req_id_to_extensions -> Trace -> Timeout -> CORS -> BodyLimit
    let x_request_id = request_id::header();

    router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));
    if server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    let timeout = match server.timeout_sec {
        0 => DEFAULT_TIMEOUT_SECS,
        secs => secs,
    };
    router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout)));
    router = router.layer(request_id::create_trace_layer());
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(SetRequestIdLayer::new(
        x_request_id.clone(),
        request_id::MakeReqId,
    ));
    router = router.layer(PropagateRequestIdLayer::new(x_request_id));

    Ok(router)
}

/// Bind and serve until `cancel` fires, then drain in-flight requests.
pub async fn serve(server: &ServerConfig, router: Router, cancel: CancellationToken) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", server.host, server.port)
        .parse()
        .with_context(|| format!("Invalid bind address '{}:{}'", server.host, server.port))?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", addr);

    let shutdown = async move {
        cancel.cancelled().await;
        tracing::info!("HTTP server shutting down gracefully");
    };

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| anyhow::anyhow!(e))
}
