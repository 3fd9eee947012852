//! Action-group handler that runs a flow.

use serde_json::{json, Value};
use tracing::{debug, error, warn};

use super::envelope::ActionGroupResponse;
use super::request::ActionGroupEvent;
use crate::error::{ErrorCategory, FieldError, RelayError};
use crate::service::AgentService;

/// Handle an action-group event by running the flow on its `inputText`.
///
/// Backend failures still produce an envelope (status 500, body
/// `{"success": false}`); only an event without routing fields is an `Err`.
pub async fn handle_flow_action(
    service: &AgentService,
    event: &Value,
) -> Result<ActionGroupResponse, RelayError> {
    debug!(event = %event, "action group event");
    let action = ActionGroupEvent::from_value(event)?;

    let result = match action.input_text.as_deref() {
        Some(text) => service.invoke_flow(text).await,
        None => Err(RelayError::invalid_field(FieldError::missing("inputText"))),
    };

    let response = match result {
        Ok(reduced) => {
            ActionGroupResponse::for_event(&action, 200, serde_json::to_value(&reduced)?)
        }
        Err(err) => {
            let body = match (err.category(), err.field_errors()) {
                (ErrorCategory::Validation, Some(errors)) => {
                    warn!(errors = ?errors, "action group event failed validation");
                    serde_json::to_value(errors)?
                }
                _ => {
                    error!(
                        error = %err,
                        action_group = %action.action_group,
                        "flow invocation failed"
                    );
                    json!({ "success": false })
                }
            };
            ActionGroupResponse::for_event(&action, err.status_code(), body)
        }
    };
    Ok(response)
}
