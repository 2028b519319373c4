use axum::{routing::get, Router};
use std::sync::Arc;

use crate::dashboards::d400_picking_result::service::DashboardSettings;
use crate::dashboards::d400_picking_result::PickEventSource;
use crate::handlers;

/// Shared by all dashboard handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PickEventSource>,
    pub settings: DashboardSettings,
}

/// Application routes
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D400 Picking Result Dashboard
        .route(
            "/api/dashboard/filters",
            get(handlers::d400_picking_result::get_filter_options),
        )
        .route(
            "/api/dashboard/result",
            get(handlers::d400_picking_result::get_result),
        )
        .route(
            "/api/dashboard/export",
            get(handlers::d400_picking_result::export_csv),
        )
        .with_state(state)
}
