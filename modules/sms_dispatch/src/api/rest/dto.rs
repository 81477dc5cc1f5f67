use serde::{Deserialize, Serialize};

use crate::contract::model::{BlockRequest, MessageRequest};

/// REST DTO for a send request. Absent or null fields read as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendSmsReq {
    #[serde(default)]
    pub mobile_number: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// REST DTO for block and unblock requests
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockReq {
    #[serde(default)]
    pub mobile_number: Option<String>,
}

/// Status envelope for send outcomes and every error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub mobile_number: String,
    pub status: String,
}

impl SmsResponse {
    pub fn new(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            message: message.into(),
        }
    }
}

impl From<SendSmsReq> for MessageRequest {
    fn from(req: SendSmsReq) -> Self {
        MessageRequest::new(
            req.mobile_number.unwrap_or_default(),
            req.message.unwrap_or_default(),
        )
    }
}

impl From<BlockReq> for BlockRequest {
    fn from(req: BlockReq) -> Self {
        BlockRequest::new(req.mobile_number.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_null_fields_become_empty() {
        let req: SendSmsReq = serde_json::from_str(r#"{"mobileNumber":null}"#).unwrap();
        let model = MessageRequest::from(req);
        assert_eq!(model.recipient, "");
        assert_eq!(model.body, "");

        let req: BlockReq = serde_json::from_str("{}").unwrap();
        assert_eq!(BlockRequest::from(req).recipient, "");
    }

    #[test]
    fn block_response_uses_camel_case() {
        let body = BlockResponse {
            mobile_number: "1234567890".into(),
            status: "BLOCKED".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({ "mobileNumber": "1234567890", "status": "BLOCKED" })
        );
    }
}
