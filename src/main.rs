use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use category_api::config::AppConfig;
use category_api::server::{self, AppState};

#[derive(Parser)]
#[command(name = "category-api")]
#[command(about = "Category REST API server")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Interface to bind (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides CATEGORY_API_PORT/PORT)")]
    port: Option<u16>,

    #[arg(long, help = "postgres:// or sqlite: connection string (overrides DATABASE_URL)")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, API_KEY, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("category_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = category_api::config::config().clone();
    apply_cli(&mut config, cli);
    tracing::info!("Starting Category API in {:?} mode", config.environment);

    if config.security.api_key.is_empty() {
        anyhow::bail!("API_KEY must not be empty");
    }

    let state = AppState::from_config(&config)
        .await
        .context("failed to open the category store")?;
    let store = state.categories.store().clone();
    store
        .health_check()
        .await
        .context("category store failed its health check")?;

    let app = server::app(state, &config);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Category API listening on http://{}", bind_addr);

    server::serve(listener, app, server::shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    Ok(())
}

fn apply_cli(config: &mut AppConfig, cli: Cli) {
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
}
