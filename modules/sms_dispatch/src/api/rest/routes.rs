use std::sync::Arc;

use axum::{routing::post, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(mut router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    // POST /v1/sms/send - Validate, check the blocklist and enqueue
    router = router.route("/v1/sms/send", post(handlers::send_sms));

    // POST /v1/sms/block - Add a number to the blocklist
    router = router.route("/v1/sms/block", post(handlers::block_user));

    // POST /v1/sms/unblock - Remove a number from the blocklist
    router = router.route("/v1/sms/unblock", post(handlers::unblock_user));

    router = router.layer(Extension(service));

    Ok(router)
}
