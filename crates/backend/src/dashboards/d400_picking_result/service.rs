use chrono::FixedOffset;
use contracts::dashboards::d400_picking_result::{
    AggregationMode, DashboardQuery, DashboardResultRequest, DashboardResultResponse,
    PickEvent, QueryEcho, ViewMode,
};
use contracts::shared::table::{SortDirection, TableView};

use super::aggregator::{aggregate_by_order, aggregate_by_worker};
use super::chart::build_chart;
use super::columns::{order_columns, pick_event_columns, worker_columns};
use super::error::DashboardError;
use super::export::{export_csv, CsvDocument};
use super::repository::PickEventSource;
use super::state::DisplayState;
use crate::shared::config::DashboardConfig;
use crate::shared::table::{CellContext, Column, TablePresenter};

pub const NO_DATA_MESSAGE: &str = "No matching data";

/// Presentation settings taken from configuration
#[derive(Debug, Clone, Copy)]
pub struct DashboardSettings {
    pub page_size: usize,
    pub cell: CellContext,
}

impl DashboardSettings {
    pub fn from_config(config: &DashboardConfig) -> anyhow::Result<Self> {
        let offset = config
            .display_utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "invalid display offset: {}",
                    config.display_utc_offset_hours
                )
            })?;
        Ok(Self {
            page_size: config.page_size.max(1),
            cell: CellContext { offset },
        })
    }
}

/// Sort and page requested for the table view
#[derive(Debug, Clone, Default)]
pub struct TableRequest {
    pub page_index: usize,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

impl TableRequest {
    pub fn from_request(request: &DashboardResultRequest) -> Self {
        Self {
            page_index: request.page.unwrap_or(0),
            sort: request.sort.clone().filter(|s| !s.is_empty()),
            direction: request.dir,
        }
    }
}

fn present<R>(
    rows: Vec<R>,
    columns: Vec<Column<R>>,
    request: &TableRequest,
    settings: &DashboardSettings,
) -> TableView {
    let mut table = TablePresenter::new(rows, columns, settings.page_size);
    if let Some(column) = &request.sort {
        let direction = request.direction.unwrap_or(SortDirection::Asc);
        if !table.set_sort(column, Some(direction)) {
            tracing::warn!("Ignoring sort by unknown column: {}", column);
        }
    }
    table.set_page_index(request.page_index);
    table.view(&settings.cell)
}

/// Table of the selected aggregation
pub fn build_table(
    mode: AggregationMode,
    events: &[PickEvent],
    request: &TableRequest,
    settings: &DashboardSettings,
) -> TableView {
    match mode {
        AggregationMode::EachPick => {
            present(events.to_vec(), pick_event_columns(), request, settings)
        }
        AggregationMode::Order => {
            present(aggregate_by_order(events), order_columns(), request, settings)
        }
        AggregationMode::Worker => {
            present(aggregate_by_worker(events), worker_columns(), request, settings)
        }
    }
}

pub fn query_echo(query: &DashboardQuery) -> QueryEcho {
    let scope = |id: Option<i64>| id.map(|v| v.to_string()).unwrap_or_else(|| "all".to_string());
    QueryEcho {
        date: query.work_date.clone(),
        worker: scope(query.worker_id),
        store: scope(query.store_id),
    }
}

/// Result screen content for one display state
pub fn build_result(
    echo: QueryEcho,
    state: DisplayState,
    events: &[PickEvent],
    request: &TableRequest,
    settings: &DashboardSettings,
) -> DashboardResultResponse {
    let mut response = DashboardResultResponse {
        query: echo,
        unit: state.aggregation,
        view: state.view,
        total_events: events.len(),
        table: None,
        chart: None,
        message: None,
    };

    if events.is_empty() {
        response.message = Some(NO_DATA_MESSAGE.to_string());
        return response;
    }

    match state.view {
        ViewMode::Table => {
            response.table = Some(build_table(state.aggregation, events, request, settings));
        }
        ViewMode::Bar => match build_chart(state.aggregation, events) {
            Ok(series) => response.chart = Some(series),
            Err(e) => response.message = Some(e.to_string()),
        },
    }
    response
}

/// Fetch and render the result screen
pub async fn load_result(
    source: &dyn PickEventSource,
    request: &DashboardResultRequest,
    query: &DashboardQuery,
    settings: &DashboardSettings,
) -> Result<DashboardResultResponse, DashboardError> {
    let events = source.fetch(query).await?;
    let state = DisplayState::from_selection(request.unit, request.view);
    Ok(build_result(
        query_echo(query),
        state,
        &events,
        &TableRequest::from_request(request),
        settings,
    ))
}

/// Fetch and serialize for download
pub async fn load_export(
    source: &dyn PickEventSource,
    mode: AggregationMode,
    query: &DashboardQuery,
) -> Result<CsvDocument, DashboardError> {
    let events = source.fetch(query).await?;
    export_csv(&query.work_date, mode, &events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_picking_result::test_fixtures::{event, InMemorySource};
    use contracts::dashboards::d400_picking_result::ChartSeries;

    fn settings() -> DashboardSettings {
        DashboardSettings::from_config(&DashboardConfig::default()).unwrap()
    }

    fn query() -> DashboardQuery {
        DashboardQuery {
            work_date: "2024-01-01".to_string(),
            store_id: None,
            worker_id: Some(3),
        }
    }

    /// 45 single-pick orders with durations 1..=45 minutes, listed longest first
    fn many_orders() -> Vec<PickEvent> {
        (1..=45)
            .rev()
            .map(|m: i64| {
                let end = format!("2024-01-01T10:{:02}:00Z", m);
                event(m, "Main", "Ito", "Ito", 1, "2024-01-01T10:00:00Z", Some(end.as_str()))
            })
            .collect()
    }

    #[test]
    fn test_settings_reject_out_of_range_offset() {
        for hours in [i32::MAX, i32::MIN, 24, -24] {
            let config = DashboardConfig {
                display_utc_offset_hours: hours,
                ..DashboardConfig::default()
            };
            assert!(DashboardSettings::from_config(&config).is_err());
        }

        let config = DashboardConfig {
            page_size: 0,
            display_utc_offset_hours: -5,
        };
        let settings = DashboardSettings::from_config(&config).unwrap();
        assert_eq!(settings.page_size, 1);
        assert_eq!(settings.cell.offset.local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn test_query_echo() {
        let echo = query_echo(&query());
        assert_eq!(echo.date, "2024-01-01");
        assert_eq!(echo.worker, "3");
        assert_eq!(echo.store, "all");
    }

    #[test]
    fn test_empty_result_shows_message() {
        let response = build_result(
            query_echo(&query()),
            DisplayState::default(),
            &[],
            &TableRequest::default(),
            &settings(),
        );
        assert_eq!(response.message.as_deref(), Some(NO_DATA_MESSAGE));
        assert!(response.table.is_none());
        assert!(response.chart.is_none());
    }

    #[test]
    fn test_sorted_last_page() {
        let request = TableRequest {
            page_index: 2,
            sort: Some("duration_ms".to_string()),
            direction: Some(SortDirection::Asc),
        };
        let table = build_table(AggregationMode::Order, &many_orders(), &request, &settings());
        assert_eq!(table.pagination.page_count, 3);
        assert_eq!(table.pagination.page_index, 2);
        assert_eq!(table.rows.len(), 5);
        assert_eq!(table.rows[0][4], "41 minutes");
        assert_eq!(table.rows[4][4], "45 minutes");
        assert_eq!(table.headers[4].sort, Some(SortDirection::Asc));
    }

    #[test]
    fn test_unknown_sort_column_keeps_input_order() {
        let request = TableRequest {
            page_index: 0,
            sort: Some("nope".to_string()),
            direction: None,
        };
        let table = build_table(AggregationMode::Order, &many_orders(), &request, &settings());
        assert_eq!(table.rows[0][1], "A0000045");
        assert_eq!(table.rows.len(), 20);
    }

    #[test]
    fn test_bar_view_per_pick_shows_message() {
        let state = DisplayState::from_selection(Some(AggregationMode::EachPick), Some(ViewMode::Bar));
        let response = build_result(
            query_echo(&query()),
            state,
            &many_orders(),
            &TableRequest::default(),
            &settings(),
        );
        assert!(response.chart.is_none());
        assert!(response.table.is_none());
        assert!(response.message.is_some());
    }

    #[tokio::test]
    async fn test_load_result_worker_chart() {
        let source = InMemorySource::new(many_orders());
        let request = DashboardResultRequest {
            date: Some("2024-01-01".to_string()),
            unit: Some(AggregationMode::Worker),
            view: Some(ViewMode::Bar),
            ..Default::default()
        };
        let response = load_result(&source, &request, &query(), &settings()).await.unwrap();
        assert_eq!(response.total_events, 45);
        let Some(ChartSeries::Worker(points)) = response.chart else {
            panic!("expected worker chart");
        };
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].order_count, 45);
        assert_eq!(source.queries(), vec![query()]);
    }

    #[tokio::test]
    async fn test_load_export_uses_mode_in_file_name() {
        let source = InMemorySource::new(many_orders());
        let doc = load_export(&source, AggregationMode::EachPick, &query()).await.unwrap();
        assert_eq!(doc.file_name, "dashboard_2024-01-01_each_pick.csv");
    }
}
