use async_trait::async_trait;
use chrono::{DateTime, Utc};
use contracts::dashboards::d400_picking_result::{
    DashboardQuery, FilterOptionsResponse, NamedOption, PickEvent,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, FromQueryResult, Statement, Value};

use super::error::DashboardError;

/// Source of pick events for the result screen.
///
/// Filters apply at order level: an order is either returned with all its
/// pick events or not at all.
#[async_trait]
pub trait PickEventSource: Send + Sync {
    /// Pick events of completed orders on `query.work_date`
    async fn fetch(&self, query: &DashboardQuery) -> Result<Vec<PickEvent>, DashboardError>;

    /// Stores, workers and work dates for the selector screen
    async fn filter_options(&self) -> Result<FilterOptionsResponse, DashboardError>;
}

/// Raw joined row, timestamps still as stored
#[derive(Debug, Clone, FromQueryResult)]
struct PickEventRow {
    store_name: Option<String>,
    worker_name: Option<String>,
    order_number: String,
    sku_count: i64,
    order_start_time: String,
    order_end_time: Option<String>,
    move_start: Option<String>,
    arrive_at_shelf: Option<String>,
    pick_start: Option<String>,
    pack_start: Option<String>,
    pack_finished: Option<String>,
    customer_service_start: Option<String>,
    customer_service_finish: Option<String>,
    order_id: i64,
    order_worker_name: Option<String>,
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<Utc>, DashboardError> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|_| DashboardError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
}

/// Empty strings count as absent
fn parse_optional(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<DateTime<Utc>>, DashboardError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_timestamp(field, raw).map(Some),
    }
}

impl TryFrom<PickEventRow> for PickEvent {
    type Error = DashboardError;

    fn try_from(row: PickEventRow) -> Result<Self, Self::Error> {
        Ok(PickEvent {
            order_start_time: parse_timestamp("order_start_time", &row.order_start_time)?,
            order_end_time: parse_optional("order_end_time", row.order_end_time.as_deref())?,
            move_start: parse_optional("move_start", row.move_start.as_deref())?,
            arrive_at_shelf: parse_optional("arrive_at_shelf", row.arrive_at_shelf.as_deref())?,
            pick_start: parse_optional("pick_start", row.pick_start.as_deref())?,
            pack_start: parse_optional("pack_start", row.pack_start.as_deref())?,
            pack_finished: parse_optional("pack_finished", row.pack_finished.as_deref())?,
            customer_service_start: parse_optional(
                "customer_service_start",
                row.customer_service_start.as_deref(),
            )?,
            customer_service_finish: parse_optional(
                "customer_service_finish",
                row.customer_service_finish.as_deref(),
            )?,
            store_name: row.store_name.unwrap_or_default(),
            worker_name: row.worker_name.unwrap_or_default(),
            order_number: row.order_number,
            sku_count: row.sku_count,
            order_id: row.order_id,
            order_worker_name: row.order_worker_name.unwrap_or_default(),
        })
    }
}

#[derive(Debug, FromQueryResult)]
struct NamedRow {
    id: i64,
    name: String,
}

#[derive(Debug, FromQueryResult)]
struct WorkDateRow {
    work_date: String,
}

/// Reads the registration tables through one shared connection
#[derive(Clone)]
pub struct SqlitePickEventSource {
    db: DatabaseConnection,
}

impl SqlitePickEventSource {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PickEventSource for SqlitePickEventSource {
    async fn fetch(&self, query: &DashboardQuery) -> Result<Vec<PickEvent>, DashboardError> {
        // Picker and order-opening worker are joined separately
        let mut sql = String::from(
            r#"
            SELECT
                s.store_name AS store_name,
                pw.worker_name AS worker_name,
                o.order_number AS order_number,
                ep.sku_count AS sku_count,
                o.start_time AS order_start_time,
                o.end_time AS order_end_time,
                ep.move_start AS move_start,
                ep.arrive_at_shelf AS arrive_at_shelf,
                ep.pick_start AS pick_start,
                ep.pack_start AS pack_start,
                ep.pack_finished AS pack_finished,
                ep.customer_service_start AS customer_service_start,
                ep.customer_service_finish AS customer_service_finish,
                o.id AS order_id,
                ow.worker_name AS order_worker_name
            FROM each_picks ep
            INNER JOIN orders o ON ep.order_id = o.id
            INNER JOIN stores s ON o.store_id = s.id
            INNER JOIN workers pw ON ep.worker_id = pw.id
            LEFT JOIN workers ow ON o.worker_id = ow.id
            WHERE o.work_date = ? AND o.is_completed = 1
            "#,
        );
        let mut values: Vec<Value> = vec![query.work_date.clone().into()];

        if let Some(store_id) = query.store_id {
            sql.push_str(" AND o.store_id = ?");
            values.push(store_id.into());
        }
        if let Some(worker_id) = query.worker_id {
            sql.push_str(" AND o.worker_id = ?");
            values.push(worker_id.into());
        }
        sql.push_str(" ORDER BY o.id, ep.id");

        let stmt = Statement::from_sql_and_values(DatabaseBackend::Sqlite, &sql, values);
        let rows = PickEventRow::find_by_statement(stmt).all(&self.db).await?;

        tracing::debug!(
            "Fetched {} pick events for {} (store={:?}, worker={:?})",
            rows.len(),
            query.work_date,
            query.store_id,
            query.worker_id
        );

        rows.into_iter().map(PickEvent::try_from).collect()
    }

    async fn filter_options(&self) -> Result<FilterOptionsResponse, DashboardError> {
        let stores = NamedRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT id, store_name AS name FROM stores ORDER BY id".to_string(),
        ))
        .all(&self.db)
        .await?;

        let workers = NamedRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT id, worker_name AS name FROM workers ORDER BY id".to_string(),
        ))
        .all(&self.db)
        .await?;

        let dates = WorkDateRow::find_by_statement(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT DISTINCT work_date FROM orders ORDER BY work_date DESC".to_string(),
        ))
        .all(&self.db)
        .await?;

        let to_option = |r: NamedRow| NamedOption { id: r.id, name: r.name };
        Ok(FilterOptionsResponse {
            stores: stores.into_iter().map(to_option).collect(),
            workers: workers.into_iter().map(to_option).collect(),
            available_dates: dates.into_iter().map(|d| d.work_date).collect(),
        })
    }
}
