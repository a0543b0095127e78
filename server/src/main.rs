mod cache;
mod config;
mod content;
mod generate;
mod goget;
mod render;
mod routes;
mod services;
mod site;
mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, ConfigError, ServerConfig};
use crate::content::{ContentError, ContentStore};
use crate::generate::GenerateError;

#[derive(Debug, thiserror::Error)]
enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("load table of contents: {0}")]
    Content(#[from] ContentError),
    #[error("generate site: {0}")]
    Generate(#[from] GenerateError),
    #[error("bind port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("server failed: {0}")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "bookserver stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), ServerError> {
    let config = ServerConfig::from_cli(cli)?;
    let port = config.port;

    if let Some(out) = &config.generate_dir {
        generate::generate_site(&config, out).await?;
        return Ok(());
    }

    // The table of contents is on every page; a book without one cannot be served.
    let index = ContentStore::new(config.articles_dir()).load_index().await?;

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|source| ServerError::Bind { port, source })?;

    let local_url = format!("http://localhost:{port}");
    tracing::info!(url = %local_url, "serving fresh pages (local mode)");
    tracing::info!(url = %format!("http://127.0.0.1:{port}"), "serving cached pages");

    if config.open_browser {
        if let Err(err) = services::browser::open_browser(&local_url) {
            tracing::warn!(error = %err, "could not open browser");
        }
    }

    let _updater = config
        .update_interval
        .map(|interval| services::updater::spawn_update_task(config.root.clone(), interval));

    let app = routes::app(state::AppState::new(config, index));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "ctrl-c handler failed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
