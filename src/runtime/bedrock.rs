//! Amazon Bedrock agent runtime (InvokeAgent / InvokeFlow).

use async_trait::async_trait;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockagentruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockagentruntime::types::{
    FlowCompletionReason as SdkCompletionReason, FlowInput, FlowInputContent, FlowOutputContent,
    FlowResponseStream, ResponseStream, TracePart,
};
use aws_sdk_bedrockagentruntime::Client;
use aws_smithy_types::{Document, Number};
use tracing::{debug, info};

use super::{AgentEventStream, AgentRuntime, FlowEventStream};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::types::{AgentStreamEvent, FlowCompletionReason, FlowStreamEvent, UsageFragment};

/// Bedrock-backed runtime. Holds one SDK client for its whole lifetime.
#[derive(Debug, Clone)]
pub struct BedrockRuntime {
    client: Client,
    config: RelayConfig,
}

impl BedrockRuntime {
    pub fn new(client: Client, config: RelayConfig) -> Self {
        Self { client, config }
    }

    /// Build an SDK client from the default credential chain, applying the
    /// configured region, endpoint and timeouts.
    pub async fn from_config(config: RelayConfig) -> Self {
        let timeouts = TimeoutConfig::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build();

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).timeout_config(timeouts);
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        if let Some(url) = config.endpoint_url.as_deref() {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;

        Self::new(Client::new(&sdk_config), config)
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.config.read_timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

#[async_trait]
impl AgentRuntime for BedrockRuntime {
    fn runtime_name(&self) -> &str {
        "bedrock"
    }

    async fn invoke_agent(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<AgentEventStream, RelayError> {
        let (agent_id, agent_alias_id) = self.config.require_agent()?;
        let timeout_ms = self.timeout_ms();

        info!(agent_id, session_id, "Bedrock InvokeAgent");

        let output = self
            .client
            .invoke_agent()
            .agent_id(agent_id)
            .agent_alias_id(agent_alias_id)
            .session_id(session_id)
            .input_text(prompt)
            .enable_trace(self.config.enable_trace)
            .end_session(self.config.end_session)
            .send()
            .await
            .map_err(|e| sdk_error("InvokeAgent", timeout_ms, &e))?;

        let mut receiver = output.completion;

        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(Some(event)) => {
                        if let Some(event) = agent_event(event) {
                            yield Ok(event);
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(sdk_error("InvokeAgent stream", timeout_ms, &e));
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }

    async fn invoke_flow(&self, prompt: &str) -> Result<FlowEventStream, RelayError> {
        let (flow_id, flow_alias_id) = self.config.require_flow()?;
        let timeout_ms = self.timeout_ms();

        info!(flow_id, "Bedrock InvokeFlow");

        let input = FlowInput::builder()
            .node_name(&self.config.flow_input_node)
            .node_output_name(&self.config.flow_input_output)
            .content(FlowInputContent::Document(Document::String(
                prompt.to_string(),
            )))
            .build()
            .map_err(|e| RelayError::Configuration(format!("invalid flow input: {e}")))?;

        let output = self
            .client
            .invoke_flow()
            .flow_identifier(flow_id)
            .flow_alias_identifier(flow_alias_id)
            .enable_trace(self.config.enable_trace)
            .inputs(input)
            .send()
            .await
            .map_err(|e| sdk_error("InvokeFlow", timeout_ms, &e))?;

        let mut receiver = output.response_stream;

        let stream = async_stream::stream! {
            loop {
                match receiver.recv().await {
                    Ok(Some(event)) => yield Ok(flow_event(event)),
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(sdk_error("InvokeFlow stream", timeout_ms, &e));
                        break;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

/// SDK timeouts keep their own variant; every other SDK failure is an
/// upstream error for `operation`.
fn sdk_error<E, R>(operation: &str, timeout_ms: u64, err: &SdkError<E, R>) -> RelayError
where
    E: std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::TimeoutError(_) => RelayError::Timeout(timeout_ms),
        other => RelayError::upstream(operation, DisplayErrorContext(other).to_string()),
    }
}

/// Translate one Bedrock agent event. Events the reducer has no use for
/// (return-control, files, non-orchestration traces) are dropped.
fn agent_event(event: ResponseStream) -> Option<AgentStreamEvent> {
    match event {
        ResponseStream::Chunk(part) => Some(AgentStreamEvent::Chunk {
            bytes: part.bytes.map(|b| b.into_inner()).unwrap_or_default(),
        }),
        ResponseStream::Trace(part) => trace_event(&part),
        other => {
            debug!(event = ?other, "ignoring agent stream event");
            None
        }
    }
}

fn trace_event(part: &TracePart) -> Option<AgentStreamEvent> {
    let orchestration = part.trace()?.as_orchestration_trace().ok()?;

    let rationale = orchestration
        .as_rationale()
        .ok()
        .and_then(|r| r.text())
        .map(str::to_string);

    let usage = orchestration
        .as_model_invocation_output()
        .ok()
        .and_then(|o| o.metadata())
        .and_then(|m| m.usage())
        .map(|u| UsageFragment::new(token_count(u.input_tokens()), token_count(u.output_tokens())));

    if rationale.is_none() && usage.is_none() {
        return None;
    }
    Some(AgentStreamEvent::Trace { rationale, usage })
}

fn token_count(raw: Option<i32>) -> Option<u32> {
    raw.and_then(|n| u32::try_from(n).ok())
}

fn flow_event(event: FlowResponseStream) -> FlowStreamEvent {
    match event {
        FlowResponseStream::FlowOutputEvent(output) => {
            let content: Option<&FlowOutputContent> = output.content().into();
            FlowStreamEvent::Output {
                document: content
                    .and_then(|c| c.as_document().ok())
                    .map(document_text),
            }
        }
        FlowResponseStream::FlowCompletionEvent(completion) => {
            let reason: Option<&SdkCompletionReason> = completion.completion_reason().into();
            FlowStreamEvent::Completion {
                reason: reason
                    .map(|r| FlowCompletionReason::from_upstream(r.as_str()))
                    .unwrap_or(FlowCompletionReason::Unknown),
            }
        }
        FlowResponseStream::FlowTraceEvent(_) => FlowStreamEvent::Other {
            kind: "trace".to_string(),
        },
        _ => FlowStreamEvent::Other {
            kind: "other".to_string(),
        },
    }
}

/// Flow output documents are usually strings; anything structured is
/// rendered as JSON text.
fn document_text(document: &Document) -> String {
    match document {
        Document::String(s) => s.clone(),
        other => document_to_json(other).to_string(),
    }
}

#[allow(unreachable_patterns)]
fn document_to_json(document: &Document) -> serde_json::Value {
    use serde_json::Value;

    match document {
        Document::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
        Document::Array(items) => Value::Array(items.iter().map(document_to_json).collect()),
        Document::Number(n) => match *n {
            Number::PosInt(v) => Value::from(v),
            Number::NegInt(v) => Value::from(v),
            Number::Float(v) => serde_json::Number::from_f64(v)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            _ => Value::Null,
        },
        Document::String(s) => Value::String(s.clone()),
        Document::Bool(b) => Value::Bool(*b),
        Document::Null => Value::Null,
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_bedrockagentruntime::types::{
        FlowCompletionEvent, GuardrailTrace, Metadata, OrchestrationModelInvocationOutput,
        OrchestrationTrace, PayloadPart, Rationale, Trace, Usage,
    };
    use aws_smithy_types::Blob;
    use std::collections::HashMap;

    fn orchestration(trace: OrchestrationTrace) -> ResponseStream {
        ResponseStream::Trace(
            TracePart::builder()
                .trace(Trace::OrchestrationTrace(trace))
                .build(),
        )
    }

    fn completion(reason: SdkCompletionReason) -> FlowResponseStream {
        FlowResponseStream::FlowCompletionEvent(
            FlowCompletionEvent::builder()
                .completion_reason(reason)
                .build()
                .expect("completion reason is set"),
        )
    }

    #[test]
    fn chunk_payload_becomes_chunk_event() {
        let event = ResponseStream::Chunk(PayloadPart::builder().bytes(Blob::new("hello")).build());
        assert_eq!(agent_event(event), Some(AgentStreamEvent::chunk("hello")));
    }

    #[test]
    fn rationale_trace_becomes_trace_event() {
        let event = orchestration(OrchestrationTrace::Rationale(
            Rationale::builder().text("  look it up  ").build(),
        ));
        assert_eq!(
            agent_event(event),
            Some(AgentStreamEvent::rationale("  look it up  "))
        );
    }

    #[test]
    fn model_output_usage_becomes_trace_event() {
        let usage = Usage::builder().input_tokens(10).output_tokens(5).build();
        let output = OrchestrationModelInvocationOutput::builder()
            .metadata(Metadata::builder().usage(usage).build())
            .build();
        let event = orchestration(OrchestrationTrace::ModelInvocationOutput(output));

        assert_eq!(agent_event(event), Some(AgentStreamEvent::usage(Some(10), Some(5))));
    }

    #[test]
    fn non_orchestration_and_empty_traces_are_dropped() {
        let guardrail = ResponseStream::Trace(
            TracePart::builder()
                .trace(Trace::GuardrailTrace(GuardrailTrace::builder().build()))
                .build(),
        );
        assert_eq!(agent_event(guardrail), None);
        assert_eq!(agent_event(ResponseStream::Trace(TracePart::builder().build())), None);

        let no_usage = orchestration(OrchestrationTrace::ModelInvocationOutput(
            OrchestrationModelInvocationOutput::builder().build(),
        ));
        assert_eq!(agent_event(no_usage), None);
    }

    #[test]
    fn completion_reasons_map_to_relay_reasons() {
        assert_eq!(
            flow_event(completion(SdkCompletionReason::Success)),
            FlowStreamEvent::completion(FlowCompletionReason::Success)
        );
        assert_eq!(
            flow_event(completion(SdkCompletionReason::InputRequired)),
            FlowStreamEvent::completion(FlowCompletionReason::InputRequired)
        );
        assert_eq!(
            flow_event(completion(SdkCompletionReason::from("FAILED"))),
            FlowStreamEvent::completion(FlowCompletionReason::Unknown)
        );
    }

    #[test]
    fn sdk_timeouts_keep_their_variant() {
        let timeout: SdkError<std::io::Error, ()> = SdkError::timeout_error("read timed out");
        assert!(matches!(
            sdk_error("InvokeAgent", 120_000, &timeout),
            RelayError::Timeout(120_000)
        ));

        let failed: SdkError<std::io::Error, ()> = SdkError::construction_failure("bad request");
        assert!(matches!(
            sdk_error("InvokeAgent", 120_000, &failed),
            RelayError::Upstream { ref operation, .. } if operation == "InvokeAgent"
        ));
    }

    #[test]
    fn string_documents_pass_through() {
        assert_eq!(document_text(&Document::String("hi".into())), "hi");
    }

    #[test]
    fn structured_documents_render_as_json() {
        let mut map = HashMap::new();
        map.insert("count".to_string(), Document::Number(Number::PosInt(3)));
        let text = document_text(&Document::Object(map));
        assert_eq!(text, r#"{"count":3}"#);
    }

    #[test]
    fn negative_token_counts_are_dropped() {
        assert_eq!(token_count(Some(-1)), None);
        assert_eq!(token_count(Some(42)), Some(42));
        assert_eq!(token_count(None), None);
    }
}
