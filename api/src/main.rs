use actix_web::{web, HttpServer};
use tracing::{error, info, warn};

use vg_api::{bootstrap, create_app, telemetry, AppState};
use vg_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    telemetry::init(&config.logging)?;

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Verigram API server"
    );

    if config.environment.is_production() && !config.auth.is_enabled() {
        warn!("AUTH_TOKEN is not set; code endpoints accept unauthenticated requests");
    }

    let service = bootstrap::build(&config).await?;
    let state = web::Data::new(AppState::new(service.clone()));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }
    server.bind(&bind_address)?.run().await?;

    // Background flushes may still be queued; write the final state once more
    info!("Server stopped, flushing code store");
    if let Err(e) = service.store().flush().await {
        error!(error = %e, "Final snapshot flush failed");
    }

    Ok(())
}
