use std::sync::Arc;

use stockroom_api::app::{self, services};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = services::RuntimeConfig::from_env()?;

    let app_services = match std::env::var("DATABASE_URL") {
        Ok(url) => services::build_postgres(&config, &url).await?,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using in-memory stores");
            services::build_in_memory(&config).await?
        }
    };

    let app = app::build_app(Arc::new(app_services));

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
