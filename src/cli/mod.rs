//! CLI entry point for agent-relay.

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::RelayError;

/// Invoke the relay handlers locally.
#[derive(Parser, Debug)]
#[command(name = "agent-relay", version, about = "Relay prompts to a managed agent backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the chat handler on an HTTP proxy event
    Chat(EventArgs),
    /// Run the flow action-group handler on an action-group event
    Flow(EventArgs),
    /// Send one prompt to the agent and print the reduced response
    Ask(AskArgs),
}

/// Arguments for handler subcommands.
#[derive(Args, Debug)]
pub struct EventArgs {
    /// Event JSON file (reads stdin when omitted or "-")
    #[arg(short, long)]
    pub event: Option<PathBuf>,
}

/// Arguments for the `ask` subcommand.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Prompt text
    pub prompt: String,

    /// Session id (truncated to 10 characters like handler input)
    #[arg(short, long, default_value = "local-cli")]
    pub session: String,
}

impl EventArgs {
    /// Load the event document from the file or stdin.
    pub fn read_event(&self) -> Result<serde_json::Value, RelayError> {
        let raw = match self.event.as_deref() {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
            _ => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            }
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Install the JSON log subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .try_init();
}
