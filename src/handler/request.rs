//! Inbound payload parsing and validation.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{FieldError, RelayError};

/// Backend session ids are capped to this many characters.
pub const SESSION_ID_LEN: usize = 10;

/// A validated chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub session_id: String,
    pub prompt: String,
}

impl ChatRequest {
    /// Parse a raw JSON request body.
    pub fn parse(raw_body: &str) -> Result<Self, RelayError> {
        let value: Value = serde_json::from_str(raw_body).map_err(|e| {
            RelayError::invalid_field(FieldError::new(
                "json_invalid",
                &[],
                format!("Invalid JSON: {e}"),
            ))
        })?;
        Self::from_value(&value)
    }

    /// Validate an already-decoded body, collecting every field problem.
    pub fn from_value(value: &Value) -> Result<Self, RelayError> {
        let Some(obj) = value.as_object() else {
            return Err(RelayError::invalid_field(FieldError::new(
                "model_type",
                &[],
                format!("Input should be an object, got {}", json_type_name(value)),
            )));
        };

        let mut errors = Vec::new();
        let session_id = string_field(obj, "session_id", &mut errors);
        let prompt = string_field(obj, "prompt", &mut errors);

        match (session_id, prompt) {
            (Some(session_id), Some(prompt)) => Ok(Self { session_id, prompt }),
            _ => Err(RelayError::Validation(errors)),
        }
    }

    /// Extract and validate the `body` of an HTTP proxy event.
    ///
    /// The body is normally a JSON string; an inline object is accepted too.
    pub fn from_event(event: &Value) -> Result<Self, RelayError> {
        match event.get("body") {
            Some(Value::String(raw)) => Self::parse(raw),
            Some(body @ Value::Object(_)) => Self::from_value(body),
            Some(Value::Null) | None => Err(RelayError::invalid_field(FieldError::missing("body"))),
            Some(other) => Err(RelayError::invalid_field(FieldError::new(
                "string_type",
                &["body"],
                format!("Input should be a valid string, got {}", json_type_name(other)),
            ))),
        }
    }

    /// Session id as sent to the backend: the first [`SESSION_ID_LEN`]
    /// characters.
    pub fn session_key(&self) -> &str {
        match self.session_id.char_indices().nth(SESSION_ID_LEN) {
            Some((idx, _)) => &self.session_id[..idx],
            None => &self.session_id,
        }
    }
}

fn string_field(
    obj: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match obj.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        None => {
            errors.push(FieldError::missing(name));
            None
        }
        Some(other) => {
            errors.push(FieldError::new(
                "string_type",
                &[name],
                format!("Input should be a valid string, got {}", json_type_name(other)),
            ));
            None
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// An action-group invocation from the orchestrating agent platform.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroupEvent {
    pub action_group: String,
    pub api_path: String,
    pub http_method: String,
    #[serde(default)]
    pub input_text: Option<String>,
    #[serde(default = "empty_object")]
    pub session_attributes: Value,
    #[serde(default = "empty_object")]
    pub prompt_session_attributes: Value,
}

impl ActionGroupEvent {
    /// Decode the routing fields. Without them no envelope can be built, so
    /// this is the only hard failure of the flow handler.
    pub fn from_value(event: &Value) -> Result<Self, RelayError> {
        Self::deserialize(event).map_err(|e| {
            RelayError::invalid_field(FieldError::new("invalid_event", &[], e.to_string()))
        })
    }
}
