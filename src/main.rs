use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use erflow_api_rest::{AppState, router};
use erflow_core::config::data_dir_from_env_value;
use erflow_core::constants::DATA_DIR_ENV;
use erflow_core::{BoardStore, CoreConfig};

/// Main entry point for the ErFlow application
///
/// Starts the REST server that backs the whiteboard.
///
/// # Environment Variables
/// - `ERFLOW_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `ERFLOW_DATA_DIR`: Directory holding the board file (default: "erflow_data")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the data directory setting is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("erflow_run=info".parse()?)
                .add_directive("erflow_core=info".parse()?)
                .add_directive("erflow_api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("ERFLOW_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let data_dir = data_dir_from_env_value(std::env::var(DATA_DIR_ENV).ok());

    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    tracing::info!("++ Board file: {}", cfg.board_file().display());
    tracing::info!("++ Starting ErFlow REST on {}", rest_addr);

    let app = router(AppState::new(BoardStore::new(cfg)));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
