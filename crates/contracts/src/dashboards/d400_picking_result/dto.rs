use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One picked line of an order, joined with its order, store and workers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickEvent {
    pub store_name: String,
    /// Worker who picked this line
    pub worker_name: String,
    /// "A" + 7 digits
    pub order_number: String,
    pub sku_count: i64,
    pub order_start_time: DateTime<Utc>,
    /// None while the order is still open
    pub order_end_time: Option<DateTime<Utc>>,

    // Workflow steps
    pub move_start: Option<DateTime<Utc>>,
    pub arrive_at_shelf: Option<DateTime<Utc>>,
    pub pick_start: Option<DateTime<Utc>>,
    pub pack_start: Option<DateTime<Utc>>,
    pub pack_finished: Option<DateTime<Utc>>,
    pub customer_service_start: Option<DateTime<Utc>>,
    pub customer_service_finish: Option<DateTime<Utc>>,

    pub order_id: i64,
    /// Worker who opened the order, may differ from `worker_name`
    pub order_worker_name: String,
}

/// Rollup of all pick events sharing one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAggregate {
    pub store_name: String,
    pub order_number: String,
    /// Order-opening worker
    pub worker_name: String,
    pub total_sku: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Rollup per (store, order-opening worker)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerAggregate {
    pub store_name: String,
    pub worker_name: String,
    pub order_count: usize,
    pub total_sku: i64,
    /// Sum of order durations, each distinct order counted once
    pub total_time_ms: i64,
}

/// Rollup granularity selected on the result screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    #[default]
    Order,
    Worker,
    EachPick,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::Order => "order",
            AggregationMode::Worker => "worker",
            AggregationMode::EachPick => "each_pick",
        }
    }
}

/// Presentation of the aggregated rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Table,
    Bar,
}

/// Bar for the per-order chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderChartPoint {
    /// Order number
    pub name: String,
    pub worker_name: String,
    pub total_sku: i64,
    /// Items per hour, one decimal
    pub picking_rate: f64,
}

/// Bar for the per-worker chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerChartPoint {
    /// Worker name
    pub name: String,
    pub store_name: String,
    pub total_sku: i64,
    pub order_count: usize,
    pub picking_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "points", rename_all = "snake_case")]
pub enum ChartSeries {
    Order(Vec<OrderChartPoint>),
    Worker(Vec<WorkerChartPoint>),
}
