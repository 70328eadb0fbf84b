pub mod cli;
pub mod knowledge;
pub mod llm;
pub mod models;
pub mod router;
pub mod server;

use cli::Args;
use log::info;
use router::IntentRouter;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("HTTP API Port: {}", args.http_port.map_or("disabled".to_string(), |p| p.to_string()));
    info!("Chat LLM Type: {}", args.chat_llm_type);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("provider default"));
    info!("Chat Base URL: {}", args.chat_base_url.as_deref().unwrap_or("provider default"));
    info!("Chat API Key Set: {}", !args.chat_api_key.trim().is_empty());
    info!("Chat Timeout: {}s", args.chat_timeout_secs);
    info!("TLS Enabled: {}", args.enable_tls);
    info!("-------------------------");

    let router = Arc::new(IntentRouter::from_args(&args)?);
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, router, args);
    server.run().await?;

    Ok(())
}
