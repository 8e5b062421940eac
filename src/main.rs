//! Chat API probe
//!
//! Calls one read-only backend endpoint and prints the JSON response.
//! Useful for checking a backend before pointing the frontend at it.
//!
//! Usage: `chat-api-client [health | stats | sessions <user_id> | history <session_id> | summary <session_id>]`

use anyhow::{bail, Context};
use chat_api_client::{ApiClient, Config};
use serde_json::Value;
use std::env;
use tracing::info;

const USAGE: &str =
    "usage: chat-api-client [health | stats | sessions <user_id> | history <session_id> | summary <session_id>]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    let client = ApiClient::new(&config.api);
    let args: Vec<String> = env::args().skip(1).collect();

    let body = run(&client, &args).await?;
    println!(
        "{}",
        serde_json::to_string_pretty(&body).context("Failed to render response")?
    );
    Ok(())
}

async fn run(client: &ApiClient, args: &[String]) -> anyhow::Result<Value> {
    let command = args.first().map(String::as_str).unwrap_or("health");
    let target = args.get(1).map(String::as_str);

    let body = match (command, target) {
        ("health", _) => client.health_check().await,
        ("stats", _) => client.get_feedback_statistics().await,
        ("sessions", Some(user_id)) => client.get_user_sessions(user_id, None).await,
        ("history", Some(session_id)) => client.get_session_history(session_id, None).await,
        ("summary", Some(session_id)) => client.get_session_summary(session_id).await,
        _ => bail!(USAGE),
    };

    body.with_context(|| format!("'{}' request to {} failed", command, client.base_url()))
}
