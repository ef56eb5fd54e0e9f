use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;

use crm_core::storage::{CustomerStore, InMemoryCustomerStore, InMemoryLeadStore, LeadStore};
use crm_server::config::Config;
use crm_server::http::{app_router, AppState};
use crm_server::observability::logging;

#[derive(Parser)]
#[command(name = "crm-server")]
#[command(about = "Customer import pipeline and CRM API server")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Path to the configuration file
        #[arg(long, default_value = "config.toml")]
        config: PathBuf,
        /// Override the listen port
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    logging::init_logging();

    match cli.command {
        Commands::Serve { config, port } => serve(config, port).await,
    }
}

async fn serve(config_path: PathBuf, port_override: Option<u16>) -> anyhow::Result<()> {
    let config = Config::load(&config_path)?;
    let port = port_override
        .or_else(|| std::env::var("PORT").ok().and_then(|s| s.parse().ok()))
        .unwrap_or(config.server.port);

    // The document-store adapter plugs in behind these traits; the in-memory
    // stores back local development.
    let customers: Arc<dyn CustomerStore> = Arc::new(InMemoryCustomerStore::new());
    let leads: Arc<dyn LeadStore> = Arc::new(InMemoryLeadStore::new());
    let state = AppState::new(
        customers,
        leads,
        Duration::from_secs(config.import.batch_timeout_seconds),
    );

    let app = app_router(state);
    let bind_addr = format!("{}:{}", config.server.host, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("CRM server listening on {}", bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
