use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::dto::{AggregationMode, ViewMode};
use crate::shared::table::SortDirection;

/// Filter handed to the pick event source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// "YYYY-MM-DD"
    pub work_date: String,
    pub store_id: Option<i64>,
    pub worker_id: Option<i64>,
}

/// Query string of /api/dashboard/result and /api/dashboard/export
///
/// `store` and `worker` accept "all" or a numeric id, absent means "all".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardResultRequest {
    pub date: Option<String>,
    pub store: Option<String>,
    pub worker: Option<String>,
    pub unit: Option<AggregationMode>,
    pub view: Option<ViewMode>,
    /// Zero-based page index
    pub page: Option<usize>,
    /// Column id to sort by
    pub sort: Option<String>,
    pub dir: Option<SortDirection>,
}

impl DashboardResultRequest {
    /// Validate the filter part of the request
    pub fn to_query(&self) -> Result<DashboardQuery, String> {
        let date = self
            .date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| "date is required".to_string())?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| format!("invalid date: {}", date))?;

        Ok(DashboardQuery {
            work_date: date.to_string(),
            store_id: parse_scope("store", self.store.as_deref())?,
            worker_id: parse_scope("worker", self.worker.as_deref())?,
        })
    }
}

fn parse_scope(name: &str, value: Option<&str>) -> Result<Option<i64>, String> {
    match value.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("invalid {}: {}", name, raw)),
    }
}
