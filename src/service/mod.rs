//! Invocation service: runtime call + stream reduction.

use std::sync::Arc;

use tracing::info;

use crate::error::RelayError;
use crate::reduce::{collect_agent_stream, collect_flow_stream};
use crate::runtime::AgentRuntime;
use crate::types::{ReducedAgentResponse, ReducedFlowResponse};

/// Invokes the managed backend and reduces each reply to a single result.
///
/// Cheap to clone; clones share the runtime (and its connection pool).
#[derive(Clone)]
pub struct AgentService {
    runtime: Arc<dyn AgentRuntime>,
}

impl std::fmt::Debug for AgentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentService")
            .field("runtime", &self.runtime.runtime_name())
            .finish()
    }
}

impl AgentService {
    pub fn new(runtime: Arc<dyn AgentRuntime>) -> Self {
        Self { runtime }
    }

    /// Build a service backed by the default runtime for `config`.
    #[cfg(feature = "bedrock")]
    pub async fn from_config(config: &crate::config::RelayConfig) -> Result<Self, RelayError> {
        let runtime = crate::runtime::create_runtime(config).await?;
        Ok(Self::new(Arc::from(runtime)))
    }

    /// One agent turn, reduced.
    pub async fn invoke_agent(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<ReducedAgentResponse, RelayError> {
        let stream = self.runtime.invoke_agent(session_id, prompt).await?;
        let reduced = collect_agent_stream(stream).await?;

        info!(
            session_id,
            response_len = reduced.response.len(),
            has_thinking = reduced.thinking.is_some(),
            input_tokens = ?reduced.tokens.input_tokens,
            output_tokens = ?reduced.tokens.output_tokens,
            "agent response reduced"
        );
        Ok(reduced)
    }

    /// One flow run, reduced. A non-success completion is reported in the
    /// result, not as an error.
    pub async fn invoke_flow(&self, prompt: &str) -> Result<ReducedFlowResponse, RelayError> {
        let stream = self.runtime.invoke_flow(prompt).await?;
        let reduced = collect_flow_stream(stream).await?;

        info!(
            success = reduced.success,
            events_processed = reduced.events_processed,
            "flow response reduced"
        );
        Ok(reduced)
    }
}
