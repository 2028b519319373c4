use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::dashboards::d400_picking_result::{
    DashboardQuery, FilterOptionsResponse, NamedOption, PickEvent,
};
use std::sync::Mutex;

use super::error::DashboardError;
use super::repository::PickEventSource;

pub fn ts(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap()
        .with_timezone(&Utc)
}

/// Pick event of order `order_id` (number "A" + zero padded id), no step timestamps
pub fn event(
    order_id: i64,
    store: &str,
    order_worker: &str,
    picker: &str,
    sku_count: i64,
    start: &str,
    end: Option<&str>,
) -> PickEvent {
    PickEvent {
        store_name: store.to_string(),
        worker_name: picker.to_string(),
        order_number: format!("A{:07}", order_id),
        sku_count,
        order_start_time: ts(start),
        order_end_time: end.map(ts),
        move_start: None,
        arrive_at_shelf: None,
        pick_start: None,
        pack_start: None,
        pack_finished: None,
        customer_service_start: None,
        customer_service_finish: None,
        order_id,
        order_worker_name: order_worker.to_string(),
    }
}

/// Returns the same events for every query and remembers the queries
pub struct InMemorySource {
    events: Vec<PickEvent>,
    queries: Mutex<Vec<DashboardQuery>>,
}

impl InMemorySource {
    pub fn new(events: Vec<PickEvent>) -> Self {
        Self {
            events,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<DashboardQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl PickEventSource for InMemorySource {
    async fn fetch(&self, query: &DashboardQuery) -> Result<Vec<PickEvent>, DashboardError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.events.clone())
    }

    async fn filter_options(&self) -> Result<FilterOptionsResponse, DashboardError> {
        Ok(FilterOptionsResponse {
            stores: vec![NamedOption {
                id: 1,
                name: "Main".to_string(),
            }],
            workers: vec![NamedOption {
                id: 1,
                name: "Tanaka".to_string(),
            }],
            available_dates: vec!["2024-01-01".to_string()],
        })
    }
}
