use contracts::dashboards::d400_picking_result::AggregationMode;
use thiserror::Error;

/// Failures of the picking result pipeline
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid timestamp in {field}: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("chart is not available for {} aggregation", .0.as_str())]
    ChartNotSupported(AggregationMode),

    #[error("CSV export failed: {0}")]
    Export(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for DashboardError {
    fn from(e: sea_orm::DbErr) -> Self {
        DashboardError::Database(e.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Export(e.to_string())
    }
}
