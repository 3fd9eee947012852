//! Reducers that turn a runtime event stream into one terminal result.

pub mod agent;
pub mod flow;

pub use agent::{collect_agent_stream, reduce_agent_stream, AgentStreamReducer};
pub use flow::{collect_flow_stream, reduce_flow_stream, FlowStreamReducer};
