use serde::{Deserialize, Serialize};

use super::dto::{AggregationMode, ChartSeries, ViewMode};
use crate::shared::table::TableView;

/// Echo of the filter the result was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryEcho {
    pub date: String,
    /// "all" or the worker id
    pub worker: String,
    /// "all" or the store id
    pub store: String,
}

/// Response of /api/dashboard/result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResultResponse {
    pub query: QueryEcho,
    pub unit: AggregationMode,
    pub view: ViewMode,
    /// Number of pick events returned by the source
    pub total_events: usize,
    pub table: Option<TableView>,
    pub chart: Option<ChartSeries>,
    /// Shown instead of table/chart (no data, chart not available)
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedOption {
    pub id: i64,
    pub name: String,
}

/// Response of /api/dashboard/filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub stores: Vec<NamedOption>,
    pub workers: Vec<NamedOption>,
    /// Newest first
    pub available_dates: Vec<String>,
}
