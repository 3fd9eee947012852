//! Flow stream reduction.

use futures::stream::BoxStream;
use futures::StreamExt;

use crate::error::RelayError;
use crate::types::{FlowCompletionReason, FlowStreamEvent, ReducedFlowResponse};

/// Single-pass accumulator for one flow invocation.
///
/// Success is keyed on the last completion reason, not on whether any
/// output arrived.
#[derive(Debug)]
pub struct FlowStreamReducer {
    final_text: String,
    events_processed: usize,
    reason: FlowCompletionReason,
}

impl Default for FlowStreamReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowStreamReducer {
    pub fn new() -> Self {
        Self {
            final_text: String::new(),
            events_processed: 0,
            reason: FlowCompletionReason::Unknown,
        }
    }

    pub fn push(&mut self, event: FlowStreamEvent) {
        self.events_processed += 1;
        match event {
            FlowStreamEvent::Output {
                document: Some(document),
            } => self.final_text = document,
            FlowStreamEvent::Output { document: None } | FlowStreamEvent::Other { .. } => {}
            FlowStreamEvent::Completion { reason } => self.reason = reason,
        }
    }

    pub fn completion_reason(&self) -> FlowCompletionReason {
        self.reason
    }

    pub fn finish(self) -> ReducedFlowResponse {
        if self.reason == FlowCompletionReason::Success {
            ReducedFlowResponse::succeeded(self.final_text, self.events_processed)
        } else {
            ReducedFlowResponse::failed(self.events_processed)
        }
    }
}

/// Reduce a complete flow event sequence.
pub fn reduce_flow_stream<I>(events: I) -> ReducedFlowResponse
where
    I: IntoIterator<Item = FlowStreamEvent>,
{
    let mut reducer = FlowStreamReducer::new();
    for event in events {
        reducer.push(event);
    }
    reducer.finish()
}

/// Drain a runtime flow stream into a reduced response.
pub async fn collect_flow_stream(
    mut stream: BoxStream<'static, Result<FlowStreamEvent, RelayError>>,
) -> Result<ReducedFlowResponse, RelayError> {
    let mut reducer = FlowStreamReducer::new();

    while let Some(event) = stream.next().await {
        let event = event?;
        tracing::debug!(kind = event.kind(), "flow stream event");
        reducer.push(event);
    }

    tracing::debug!(reason = %reducer.completion_reason(), "flow stream finished");
    Ok(reducer.finish())
}
