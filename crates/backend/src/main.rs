use axum::http::{header, Method};
use axum::middleware;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use backend::dashboards::d400_picking_result::service::DashboardSettings;
use backend::dashboards::d400_picking_result::SqlitePickEventSource;
use backend::routes::{configure_routes, AppState};
use backend::shared::{config, data::db, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tracing(&std::path::Path::new("target").join("logs"))?;

    let config = config::load_config()?;
    let db_path = config::get_database_path(&config)?;
    let conn = db::open_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let state = AppState {
        source: Arc::new(SqlitePickEventSource::new(conn)),
        settings: DashboardSettings::from_config(&config.dashboard)?,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = configure_routes(state)
        .layer(middleware::from_fn(logger::request_logger))
        .layer(cors);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    addr.port()
                );
            } else {
                tracing::error!("Failed to bind to {}. Error: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
