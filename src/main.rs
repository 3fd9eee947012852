//! agent-relay CLI binary entry point.

use agent_relay::cli::{AskArgs, Cli, Commands};
use agent_relay::config::RelayConfig;
use agent_relay::handler::{handle_chat, handle_flow_action, ChatRequest};
use agent_relay::service::AgentService;
use clap::Parser;

#[tokio::main]
async fn main() {
    agent_relay::cli::init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = RelayConfig::from_env()?;
    let service = AgentService::from_config(&config).await?;

    let output = match cli.command {
        Commands::Chat(args) => {
            let event = args.read_event()?;
            serde_json::to_value(handle_chat(&service, &event).await)?
        }
        Commands::Flow(args) => {
            let event = args.read_event()?;
            serde_json::to_value(handle_flow_action(&service, &event).await?)?
        }
        Commands::Ask(args) => ask(&service, args).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn ask(
    service: &AgentService,
    args: AskArgs,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let request = ChatRequest {
        session_id: args.session,
        prompt: args.prompt,
    };
    let reduced = service
        .invoke_agent(request.session_key(), &request.prompt)
        .await?;
    Ok(serde_json::to_value(reduced)?)
}
