use anyhow::Result;
use tracing::info;

use patient_commons_api::{app, config, middleware};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging);

    info!("Starting Patient Commons API v{}", env!("CARGO_PKG_VERSION"));

    let addr = config.socket_addr()?;
    let state = app::AppState::from_config(config)?;
    let app = app::create_app(state);

    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
