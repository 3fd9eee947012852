//! Core types for agent-relay.

pub mod response;
pub mod stream;
pub mod usage;

pub use response::*;
pub use stream::*;
pub use usage::*;
