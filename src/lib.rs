//! agent-relay — relay chat prompts to a managed agent backend.
//!
//! Forwards a prompt to an agent (or flow) runtime, reduces the streamed
//! reply to a single result, and wraps it in the envelope the caller
//! expects: a plain HTTP-style response or an action-group response.
//!
//! # Quick Start
//!
//! ```no_run
//! use agent_relay::prelude::*;
//!
//! # async fn example() -> agent_relay::error::Result<()> {
//! let config = RelayConfig::from_env()?;
//! let service = AgentService::from_config(&config).await?;
//! let reply = service.invoke_agent("session-01", "Hello!").await?;
//! println!("{}", reply.response);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod prelude;
pub mod reduce;
pub mod runtime;
pub mod service;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
