//! Agent runtime trait and implementations.

#[cfg(feature = "bedrock")]
pub mod bedrock;

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::error::RelayError;
use crate::types::{AgentStreamEvent, FlowStreamEvent};

/// Events from one agent invocation, in arrival order.
pub type AgentEventStream = BoxStream<'static, Result<AgentStreamEvent, RelayError>>;

/// Events from one flow invocation, in arrival order.
pub type FlowEventStream = BoxStream<'static, Result<FlowStreamEvent, RelayError>>;

/// Streaming client for the managed agent backend.
///
/// Implementations perform the network call and translate backend events;
/// timeouts and connection reuse are theirs to manage.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Runtime name for logs (e.g., "bedrock").
    fn runtime_name(&self) -> &str;

    /// Start an agent conversation turn.
    async fn invoke_agent(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<AgentEventStream, RelayError>;

    /// Start a flow run with `prompt` as its input document.
    async fn invoke_flow(&self, prompt: &str) -> Result<FlowEventStream, RelayError>;
}

/// Create the default runtime for the given config.
#[cfg(feature = "bedrock")]
pub async fn create_runtime(
    config: &crate::config::RelayConfig,
) -> Result<Box<dyn AgentRuntime>, RelayError> {
    Ok(Box::new(bedrock::BedrockRuntime::from_config(config.clone()).await))
}
