//! Agent stream reduction.

use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::RelayError;
use crate::extract::extract_answer;
use crate::types::{AgentStreamEvent, ReducedAgentResponse, TokenUsage};

/// Single-pass accumulator for one agent invocation.
///
/// Owned by exactly one invocation; feed events with [`push`](Self::push) in
/// arrival order and call [`finish`](Self::finish) once the stream ends.
#[derive(Debug, Default)]
pub struct AgentStreamReducer {
    /// Chunk bytes as received. Decoded once in `finish` so a character
    /// split across chunks stays intact.
    raw: Vec<u8>,
    thinking: Option<String>,
    tokens: TokenUsage,
    events_seen: usize,
}

impl AgentStreamReducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: AgentStreamEvent) {
        self.events_seen += 1;
        match event {
            AgentStreamEvent::Chunk { bytes } => {
                self.raw.extend_from_slice(&bytes);
            }
            AgentStreamEvent::Trace { rationale, usage } => {
                if let Some(text) = rationale.as_deref().map(str::trim) {
                    if !text.is_empty() {
                        self.thinking = Some(text.to_string());
                    }
                }
                if let Some(fragment) = usage {
                    self.tokens.fold(&fragment);
                }
            }
        }
    }

    /// Bytes of raw transcript accumulated so far.
    pub fn raw_len(&self) -> usize {
        self.raw.len()
    }

    pub fn events_seen(&self) -> usize {
        self.events_seen
    }

    pub fn finish(self) -> ReducedAgentResponse {
        ReducedAgentResponse {
            response: extract_answer(&String::from_utf8_lossy(&self.raw)),
            thinking: self.thinking,
            tokens: self.tokens,
        }
    }
}

/// Reduce a complete agent event sequence.
pub fn reduce_agent_stream<I>(events: I) -> ReducedAgentResponse
where
    I: IntoIterator<Item = AgentStreamEvent>,
{
    let mut reducer = AgentStreamReducer::new();
    for event in events {
        reducer.push(event);
    }
    reducer.finish()
}

/// Drain a runtime stream into a reduced response.
///
/// Errors yielded by the stream itself are returned as-is; the reduction
/// never fails on its own.
pub async fn collect_agent_stream(
    mut stream: BoxStream<'static, Result<AgentStreamEvent, RelayError>>,
) -> Result<ReducedAgentResponse, RelayError> {
    let mut reducer = AgentStreamReducer::new();

    while let Some(event) = stream.next().await {
        let event = event?;
        tracing::debug!(kind = event.kind(), "agent stream event");
        reducer.push(event);
    }

    tracing::debug!(
        events = reducer.events_seen(),
        raw_len = reducer.raw_len(),
        "agent stream finished"
    );
    Ok(reducer.finish())
}
