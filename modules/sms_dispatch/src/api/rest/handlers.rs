use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json, Extension};
use tracing::{error, info, warn};

use crate::api::rest::dto::{BlockReq, BlockResponse, SendSmsReq, SmsResponse};
use crate::api::rest::error::{map_domain_error, map_json_rejection, ErrorResponse};
use crate::contract::model::{SendReceipt, Transition};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

/// Accept a message for delivery
pub async fn send_sms(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<SendSmsReq>, JsonRejection>,
) -> Result<(StatusCode, Json<SmsResponse>), ErrorResponse> {
    let Json(req) = payload.map_err(|e| {
        warn!("Rejected send request body: {}", e);
        map_json_rejection(&e)
    })?;

    match svc.send(req.into()).await {
        Ok(SendReceipt::Enqueued) => Ok((
            StatusCode::ACCEPTED,
            Json(SmsResponse::new("ENQUEUED", "Message enqueued for delivery")),
        )),
        Err(e) => {
            log_failure("send", &e);
            Err(map_domain_error(&e))
        }
    }
}

/// Add a number to the blocklist
pub async fn block_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<BlockReq>, JsonRejection>,
) -> Result<(StatusCode, Json<BlockResponse>), ErrorResponse> {
    let Json(req) = payload.map_err(|e| map_json_rejection(&e))?;
    let recipient = req.mobile_number.clone().unwrap_or_default();
    info!("Block request for {}", recipient);

    match svc.block_user(req.into()).await {
        Ok(transition) => Ok(block_response(
            recipient,
            transition,
            "BLOCKED",
            "ALREADY_BLOCKED",
        )),
        Err(e) => {
            log_failure("block", &e);
            Err(map_domain_error(&e))
        }
    }
}

/// Remove a number from the blocklist
pub async fn unblock_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<BlockReq>, JsonRejection>,
) -> Result<(StatusCode, Json<BlockResponse>), ErrorResponse> {
    let Json(req) = payload.map_err(|e| map_json_rejection(&e))?;
    let recipient = req.mobile_number.clone().unwrap_or_default();
    info!("Unblock request for {}", recipient);

    match svc.unblock_user(req.into()).await {
        Ok(transition) => Ok(block_response(
            recipient,
            transition,
            "UNBLOCKED",
            "ALREADY_NOT_BLOCKED",
        )),
        Err(e) => {
            log_failure("unblock", &e);
            Err(map_domain_error(&e))
        }
    }
}

fn block_response(
    recipient: String,
    transition: Transition,
    changed: &str,
    unchanged: &str,
) -> (StatusCode, Json<BlockResponse>) {
    let (code, status) = match transition {
        Transition::Changed => (StatusCode::OK, changed),
        Transition::Unchanged => (StatusCode::ACCEPTED, unchanged),
    };
    (
        code,
        Json(BlockResponse {
            mobile_number: recipient,
            status: status.to_string(),
        }),
    )
}

fn log_failure(op: &str, e: &DomainError) {
    match e {
        DomainError::Store { .. } => error!("Failed to {}: {}", op, e),
        _ => info!("Rejected {}: {}", op, e),
    }
}
