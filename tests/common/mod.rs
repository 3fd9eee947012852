//! Shared test helpers and scripted runtime.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;

use agent_relay::error::RelayError;
use agent_relay::runtime::{AgentEventStream, AgentRuntime, FlowEventStream};
use agent_relay::service::AgentService;
use agent_relay::types::{AgentStreamEvent, FlowStreamEvent};

/// A scripted step: either an event or a mid-stream failure.
pub enum Step<T> {
    Event(T),
    Fail(String),
}

/// A runtime that replays canned events and records every call.
#[derive(Default)]
pub struct ScriptedRuntime {
    agent_steps: Mutex<Vec<Step<AgentStreamEvent>>>,
    flow_steps: Mutex<Vec<Step<FlowStreamEvent>>>,
    reject_calls: Mutex<Option<String>>,
    agent_calls: Mutex<Vec<(String, String)>>,
    flow_calls: Mutex<Vec<String>>,
}

impl ScriptedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agent_events(self, events: Vec<AgentStreamEvent>) -> Self {
        *self.agent_steps.lock().unwrap() = events.into_iter().map(Step::Event).collect();
        self
    }

    pub fn with_flow_events(self, events: Vec<FlowStreamEvent>) -> Self {
        *self.flow_steps.lock().unwrap() = events.into_iter().map(Step::Event).collect();
        self
    }

    pub fn with_agent_steps(self, steps: Vec<Step<AgentStreamEvent>>) -> Self {
        *self.agent_steps.lock().unwrap() = steps;
        self
    }

    pub fn with_flow_steps(self, steps: Vec<Step<FlowStreamEvent>>) -> Self {
        *self.flow_steps.lock().unwrap() = steps;
        self
    }

    /// Fail every invocation before any stream is returned.
    pub fn rejecting(self, message: &str) -> Self {
        *self.reject_calls.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn agent_calls(&self) -> Vec<(String, String)> {
        self.agent_calls.lock().unwrap().clone()
    }

    pub fn flow_calls(&self) -> Vec<String> {
        self.flow_calls.lock().unwrap().clone()
    }

    fn check_rejection(&self, operation: &str) -> Result<(), RelayError> {
        match self.reject_calls.lock().unwrap().as_ref() {
            Some(message) => Err(RelayError::upstream(operation, message.clone())),
            None => Ok(()),
        }
    }
}

fn into_results<T>(steps: Vec<Step<T>>) -> Vec<Result<T, RelayError>> {
    steps
        .into_iter()
        .map(|step| match step {
            Step::Event(event) => Ok(event),
            Step::Fail(message) => Err(RelayError::Stream(message)),
        })
        .collect()
}

#[async_trait]
impl AgentRuntime for ScriptedRuntime {
    fn runtime_name(&self) -> &str {
        "scripted"
    }

    async fn invoke_agent(
        &self,
        session_id: &str,
        prompt: &str,
    ) -> Result<AgentEventStream, RelayError> {
        self.agent_calls
            .lock()
            .unwrap()
            .push((session_id.to_string(), prompt.to_string()));
        self.check_rejection("InvokeAgent")?;

        let steps = std::mem::take(&mut *self.agent_steps.lock().unwrap());
        Ok(futures::stream::iter(into_results(steps)).boxed())
    }

    async fn invoke_flow(&self, prompt: &str) -> Result<FlowEventStream, RelayError> {
        self.flow_calls.lock().unwrap().push(prompt.to_string());
        self.check_rejection("InvokeFlow")?;

        let steps = std::mem::take(&mut *self.flow_steps.lock().unwrap());
        Ok(futures::stream::iter(into_results(steps)).boxed())
    }
}

/// Wrap a scripted runtime in a service, keeping a handle for assertions.
pub fn service_with(runtime: ScriptedRuntime) -> (AgentService, Arc<ScriptedRuntime>) {
    let runtime = Arc::new(runtime);
    (AgentService::new(runtime.clone()), runtime)
}
