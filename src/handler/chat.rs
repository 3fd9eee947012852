//! Direct chat handler (HTTP proxy events).

use serde_json::Value;
use tracing::{debug, error, warn};

use super::envelope::ApiResponse;
use super::request::ChatRequest;
use crate::error::{ErrorCategory, RelayError};
use crate::service::AgentService;
use crate::types::ReducedAgentResponse;

/// Handle an HTTP proxy event whose body is `{"session_id", "prompt"}`.
///
/// 200 with the extracted answer as plain text, 400 with the itemized field
/// errors, or a generic 500.
pub async fn handle_chat(service: &AgentService, event: &Value) -> ApiResponse {
    debug!(event = %event, "chat event");

    match run_chat(service, event).await {
        Ok(reduced) => ApiResponse::ok(reduced.response),
        Err(err) => chat_error_response(&err),
    }
}

async fn run_chat(
    service: &AgentService,
    event: &Value,
) -> Result<ReducedAgentResponse, RelayError> {
    let request = ChatRequest::from_event(event)?;
    service
        .invoke_agent(request.session_key(), &request.prompt)
        .await
}

fn chat_error_response(err: &RelayError) -> ApiResponse {
    match (err.category(), err.field_errors()) {
        (ErrorCategory::Validation, Some(errors)) => {
            warn!(errors = ?errors, "chat request failed validation");
            let body = serde_json::to_string(errors).unwrap_or_else(|_| "[]".to_string());
            ApiResponse::new(err.status_code(), body)
        }
        _ => {
            error!(error = %err, "chat invocation failed");
            ApiResponse::internal_error()
        }
    }
}
