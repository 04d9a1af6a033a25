//! # Todo CLI
//!
//! Entry point: wires configuration, the session file and the HTTP
//! transport into an [`ApiClient`] and runs one subcommand.

use std::sync::Arc;

use clap::Parser;
use todo_core::{ApiClient, Session};
use todo_infra::{FileTokenStorage, ReqwestTransport};

mod commands;
mod config;
mod navigator;
mod telemetry;

use commands::Cli;
use config::AppConfig;
use navigator::CliNavigator;
use telemetry::TelemetryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    tracing::debug!(
        api = %config.api_base_url,
        session_file = %config.session_file.display(),
        "Configuration loaded"
    );

    let transport = Arc::new(ReqwestTransport::new(&config.transport)?);
    let storage = Arc::new(FileTokenStorage::new(config.session_file.clone()));
    let session = Session::browser(storage, Arc::new(CliNavigator))
        .with_sign_in_route(config.sign_in_route.clone());
    let client = ApiClient::new(&config.api_base_url, transport, session);

    commands::run(&client, cli.command, cli.json).await
}
