//! Request adapters: inbound events in, transport envelopes out.

pub mod chat;
pub mod envelope;
pub mod flow;
pub mod request;

pub use chat::handle_chat;
pub use envelope::{ActionGroupResponse, ApiResponse};
pub use flow::handle_flow_action;
pub use request::{ActionGroupEvent, ChatRequest, SESSION_ID_LEN};
