//! ask-relay: a small HTTP gateway in front of a completion API
//!
//! This is the main entry point for the application.

use anyhow::Result;
use ask_relay::{
    config,
    network::HttpClient,
    secrets::SecretStore,
    web::{create_router, AppState},
};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Answer prompts with a completion API, optionally grounded in web search
#[derive(Debug, Parser)]
#[command(name = "ask-relay", version, about)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the .env file holding API keys
    #[arg(short, long, value_name = "FILE")]
    env_file: Option<PathBuf>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Starting ask-relay v{}", ask_relay::VERSION);

    // Load configuration
    let mut settings = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    if let Some(env_file) = cli.env_file {
        settings.credentials.env_file = env_file;
    }

    // Load credentials; process environment overrides the file
    let secrets = SecretStore::from_env_file(&settings.credentials.env_file)?
        .with_process_env(settings.credential_names());
    for name in settings.credential_names() {
        if !secrets.contains(name) {
            tracing::warn!("Credential {} is not set; set it via /set-credential", name);
        }
    }

    // Initialize HTTP client
    let client = HttpClient::with_settings(&settings.outgoing)?;
    info!("HTTP client initialized");

    // Create application state
    let state = AppState::new(&settings, secrets, client);

    // Create router
    let app = create_router(state);

    // Bind address
    let addr = SocketAddr::new(
        settings.server.bind_address.parse()?,
        settings.server.port,
    );

    info!("Starting server on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
