pub mod agent;
pub mod cli;
pub mod config;
pub mod llm;
pub mod models;
pub mod server;
pub mod ui;

use agent::ChatAgent;
use cli::Args;
use config::{ prompt::resolve_prompt, AppConfig };
use log::{ info, warn };
use server::Server;
use std::error::Error;
use std::sync::Arc;

/// Builds the shared agent from already-resolved configuration.
pub fn build_agent(args: &Args) -> Result<ChatAgent, Box<dyn Error + Send + Sync>> {
    let config = Arc::new(AppConfig::from_args(args));
    let prompt = resolve_prompt(args.prompt_path.as_deref())?;
    let chat_client = llm::new_client(&config)?;
    Ok(ChatAgent::new(config, prompt, chat_client))
}

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let agent = build_agent(&args)?;
    let config = agent.config();

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Chat Model: {}", config.model);
    info!("Chat Base URL: {}", config.base_url);
    info!("API Key Configured: {}", config.has_credential());
    info!("Prompt Source: {}", agent.prompt().source());
    info!("Knowledge Base Referenced: {}", agent.prompt().references_knowledge_base());
    info!("Temperature: {}", config.temperature);
    info!("Max Completion Tokens: {}", config.max_completion_tokens);
    info!("Request Timeout: {}s", config.request_timeout.as_secs());
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    if !config.has_credential() {
        warn!("OPENAI_API_KEY is not set. Chat requests will fail until it is configured.");
    }

    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, Arc::new(agent), args);
    server.run().await?;

    Ok(())
}
