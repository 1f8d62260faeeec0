//! # Keycloak Rust User Search Server
//!
//! Main entry point for the user search server.

#![forbid(unsafe_code)]
#![deny(warnings)]

use kc_server::{Server, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_level))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(address = %config.bind_address(), "Keycloak Rust user search starting...");

    let server = Server::new(config).await?;
    server.run().await
}
