pub mod api;
pub mod cli;
pub mod conversion;
pub mod core;
pub mod providers;
pub mod rates;

use crate::core::budget::Budget;
use crate::core::config::{AppConfig, ServerConfig};
use crate::rates::RateProvider;
use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub enum AppCommand {
    /// Run the HTTP API.
    Serve {
        host: Option<String>,
        port: Option<u16>,
    },
    /// Print rates against a base currency.
    Rates { base: String },
    /// Print a budget converted into another currency.
    Convert { budget: Budget, target: String },
    /// Print the supported countries.
    Countries,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    debug!(
        server = %config.server.address(),
        live_rates = config.providers.currency_freaks.has_api_key(),
        "Loaded config"
    );

    match command {
        AppCommand::Serve { host, port } => {
            let server = ServerConfig {
                host: host.unwrap_or(config.server.host),
                port: port.unwrap_or(config.server.port),
            };
            let provider = RateProvider::from_config(&config.providers.currency_freaks)?;
            let listener = TcpListener::bind(server.address())
                .await
                .with_context(|| format!("Failed to bind {}", server.address()))?;
            serve(listener, provider).await
        }
        AppCommand::Rates { base } => {
            let provider = RateProvider::from_config(&config.providers.currency_freaks)?;
            let base = crate::core::currency::normalize_currency(Some(base.as_str()));
            cli::rates::run(&provider, &base).await
        }
        AppCommand::Convert { budget, target } => {
            let provider = RateProvider::from_config(&config.providers.currency_freaks)?;
            cli::convert::run(&provider, budget, &target).await
        }
        AppCommand::Countries => {
            cli::countries::run();
            Ok(())
        }
    }
}

/// Serves the API on `listener` until Ctrl-C.
pub async fn serve(listener: TcpListener, provider: RateProvider) -> Result<()> {
    let app = api::create_router(api::AppState::new(provider));
    info!("GloboBudget server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
