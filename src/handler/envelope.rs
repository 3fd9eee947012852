//! Transport envelopes returned to the hosting platform.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::request::ActionGroupEvent;

pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
pub const ACTION_MESSAGE_VERSION: &str = "1.0";
const INTERNAL_ERROR_BODY: &str = "Internal server error";

/// HTTP proxy-style response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status_code: u16, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), TEXT_CONTENT_TYPE.to_string());
        Self {
            status_code,
            headers,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Generic 500. Error detail stays in the logs.
    pub fn internal_error() -> Self {
        Self::new(500, INTERNAL_ERROR_BODY)
    }
}

/// Action-group response expected by the orchestrating agent platform.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupResponse {
    pub message_version: String,
    pub response: ActionResponse,
    pub session_attributes: Value,
    pub prompt_session_attributes: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    pub http_status_code: u16,
    pub response_body: ResponseBody,
}

/// Keyed by content type, as the platform expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseBody {
    #[serde(rename = "application/json")]
    pub application_json: JsonBody,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonBody {
    pub body: Value,
}

impl ActionGroupResponse {
    /// Answer `event`, echoing its routing fields and session attributes.
    pub fn for_event(event: &ActionGroupEvent, status_code: u16, body: Value) -> Self {
        Self {
            message_version: ACTION_MESSAGE_VERSION.to_string(),
            response: ActionResponse {
                action_group: event.action_group.clone(),
                api_path: event.api_path.clone(),
                http_method: event.http_method.clone(),
                http_status_code: status_code,
                response_body: ResponseBody {
                    application_json: JsonBody { body },
                },
            },
            session_attributes: event.session_attributes.clone(),
            prompt_session_attributes: event.prompt_session_attributes.clone(),
        }
    }

    pub fn status_code(&self) -> u16 {
        self.response.http_status_code
    }

    pub fn body(&self) -> &Value {
        &self.response.response_body.application_json.body
    }
}
