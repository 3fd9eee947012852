//! Reduced (terminal) results of an invocation.

use serde::{Deserialize, Serialize};

use super::usage::TokenUsage;

/// Final result after consuming an agent stream.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ReducedAgentResponse {
    /// Extracted answer, never the raw transcript.
    pub response: String,
    /// Last non-empty rationale reported by a trace.
    pub thinking: Option<String>,
    pub tokens: TokenUsage,
}

/// Final result after consuming a flow stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReducedFlowResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub events_processed: usize,
}

impl ReducedFlowResponse {
    pub fn succeeded(response: String, events_processed: usize) -> Self {
        Self {
            success: true,
            response: Some(response),
            events_processed,
        }
    }

    pub fn failed(events_processed: usize) -> Self {
        Self {
            success: false,
            response: None,
            events_processed,
        }
    }
}
