use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use contracts::dashboards::d400_picking_result::{
    DashboardResultRequest, DashboardResultResponse, FilterOptionsResponse,
};

use crate::dashboards::d400_picking_result::service;
use crate::routes::AppState;

/// GET /api/dashboard/filters
pub async fn get_filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptionsResponse>, StatusCode> {
    match state.source.filter_options().await {
        Ok(options) => {
            tracing::info!(
                "Picking dashboard: {} stores, {} workers, {} dates",
                options.stores.len(),
                options.workers.len(),
                options.available_dates.len()
            );
            Ok(Json(options))
        }
        Err(e) => {
            tracing::error!("Picking dashboard: Failed to load filter options: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboard/result?date=2024-01-01&store=all&worker=3&unit=order&view=table
pub async fn get_result(
    State(state): State<AppState>,
    Query(request): Query<DashboardResultRequest>,
) -> Result<Json<DashboardResultResponse>, StatusCode> {
    let query = request.to_query().map_err(|e| {
        tracing::warn!("Picking dashboard: Bad result request: {}", e);
        StatusCode::BAD_REQUEST
    })?;

    tracing::info!(
        "Picking dashboard: Result for {} (store {:?}, worker {:?})",
        query.work_date,
        query.store_id,
        query.worker_id
    );

    match service::load_result(state.source.as_ref(), &request, &query, &state.settings).await {
        Ok(response) => {
            tracing::info!(
                "Picking dashboard: Returning {} {:?} view over {} events",
                response.unit.as_str(),
                response.view,
                response.total_events
            );
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("Picking dashboard: Failed to build result: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/dashboard/export?date=2024-01-01&unit=worker
pub async fn export_csv(
    State(state): State<AppState>,
    Query(request): Query<DashboardResultRequest>,
) -> Result<Response, StatusCode> {
    let query = request.to_query().map_err(|e| {
        tracing::warn!("Picking dashboard: Bad export request: {}", e);
        StatusCode::BAD_REQUEST
    })?;
    let mode = request.unit.unwrap_or_default();

    match service::load_export(state.source.as_ref(), mode, &query).await {
        Ok(document) => {
            tracing::info!(
                "Picking dashboard: Exporting {} ({} bytes)",
                document.file_name,
                document.bytes.len()
            );
            let disposition = format!(
                "attachment; filename=\"{}\"; filename*=UTF-8''{}",
                document.file_name,
                urlencoding::encode(&document.file_name)
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                document.bytes,
            )
                .into_response())
        }
        Err(e) => {
            tracing::error!("Picking dashboard: Failed to export: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
