use actix_web::HttpServer;
use anyhow::Context;
use tracing::{info, warn};

use gate_api::{config, Gateway};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let app_config = config::load_config();
    config::init_tracing(&app_config.logging);

    info!(environment = %app_config.environment, "Starting JWT gateway");

    if app_config.jwt.is_using_default_secret() {
        if app_config.environment.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        warn!("Using the default JWT secret; set JWT_SECRET before deploying");
    }

    let store = gate_infra::connect_session_store(&app_config.cache)
        .await
        .context("failed to connect the session store")?;
    let gateway = Gateway::new(&app_config, store)?;

    let bind_address = app_config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || gateway.create_app());
    if app_config.server.workers > 0 {
        server = server.workers(app_config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    info!("Server stopped");
    Ok(())
}
