//! Convenience re-exports for common use.

pub use crate::config::RelayConfig;
pub use crate::error::{FieldError, RelayError, Result};
pub use crate::extract::extract_answer;
pub use crate::handler::{handle_chat, handle_flow_action, ActionGroupResponse, ApiResponse};
pub use crate::reduce::{reduce_agent_stream, reduce_flow_stream};
pub use crate::runtime::AgentRuntime;
pub use crate::service::AgentService;
pub use crate::types::{
    AgentStreamEvent, FlowCompletionReason, FlowStreamEvent, ReducedAgentResponse,
    ReducedFlowResponse, TokenUsage, UsageFragment,
};
