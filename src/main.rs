//! Payroll Engine server.
//!
//! Usage: `payroll-engine [config.yaml]`

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::{AppConfig, ConfigLoader};
use payroll_engine::service::PayrollService;
use payroll_engine::store::JsonFileStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match env::args().nth(1) {
        Some(path) => ConfigLoader::load(&path)?.into_config(),
        None => AppConfig::default(),
    };

    info!(
        data_path = %config.data_path.display(),
        page_size = config.page_size,
        "Starting payroll engine"
    );

    let store = JsonFileStore::new(config.data_path.clone());
    let service = PayrollService::new(store, config.page_size);
    let app = create_router(AppState::new(service));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
