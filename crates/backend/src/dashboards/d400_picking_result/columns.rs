use chrono::{DateTime, Utc};
use contracts::dashboards::d400_picking_result::{OrderAggregate, PickEvent, WorkerAggregate};

use super::metrics::DerivedMetrics;
use crate::shared::format::{format_local, format_local_opt, format_rate_cell};
use crate::shared::table::{Column, SortKey};

fn time_key(ts: Option<&DateTime<Utc>>) -> SortKey {
    ts.map(|t| SortKey::Integer(t.timestamp_millis()))
        .unwrap_or(SortKey::Empty)
}

macro_rules! step_column {
    ($id:literal, $title:literal, $field:ident) => {
        Column {
            id: $id,
            title: $title,
            sortable: true,
            sort_key: |r: &PickEvent| time_key(r.$field.as_ref()),
            render: |r: &PickEvent, ctx| format_local_opt(r.$field.as_ref(), &ctx.offset),
        }
    };
}

/// Ungrouped view, one row per pick event
pub fn pick_event_columns() -> Vec<Column<PickEvent>> {
    vec![
        Column {
            id: "store_name",
            title: "store",
            sortable: true,
            sort_key: |r| SortKey::Text(r.store_name.clone()),
            render: |r, _| r.store_name.clone(),
        },
        Column {
            id: "order_number",
            title: "order number",
            sortable: true,
            sort_key: |r| SortKey::Text(r.order_number.clone()),
            render: |r, _| r.order_number.clone(),
        },
        Column {
            id: "worker_name",
            title: "worker",
            sortable: true,
            sort_key: |r| SortKey::Text(r.worker_name.clone()),
            render: |r, _| r.worker_name.clone(),
        },
        Column {
            id: "sku_count",
            title: "item count",
            sortable: true,
            sort_key: |r| SortKey::Integer(r.sku_count),
            render: |r, _| r.sku_count.to_string(),
        },
        Column {
            id: "order_start_time",
            title: "work start",
            sortable: true,
            sort_key: |r| time_key(Some(&r.order_start_time)),
            render: |r, ctx| format_local(&r.order_start_time, &ctx.offset),
        },
        step_column!("order_end_time", "work end", order_end_time),
        step_column!("move_start", "move start", move_start),
        step_column!("arrive_at_shelf", "shelf arrival", arrive_at_shelf),
        step_column!("pick_start", "pick start", pick_start),
        step_column!("pack_start", "pack start", pack_start),
        step_column!("pack_finished", "pack finished", pack_finished),
        step_column!("customer_service_start", "customer-service start", customer_service_start),
        step_column!("customer_service_finish", "customer-service end", customer_service_finish),
    ]
}

pub fn order_columns() -> Vec<Column<OrderAggregate>> {
    vec![
        Column {
            id: "store_name",
            title: "store",
            sortable: true,
            sort_key: |r| SortKey::Text(r.store_name.clone()),
            render: |r, _| r.store_name.clone(),
        },
        Column {
            id: "order_number",
            title: "order number",
            sortable: true,
            sort_key: |r| SortKey::Text(r.order_number.clone()),
            render: |r, _| r.order_number.clone(),
        },
        Column {
            id: "worker_name",
            title: "worker",
            sortable: true,
            sort_key: |r| SortKey::Text(r.worker_name.clone()),
            render: |r, _| r.worker_name.clone(),
        },
        Column {
            id: "total_sku",
            title: "total items",
            sortable: true,
            sort_key: |r| SortKey::Integer(r.total_sku),
            render: |r, _| r.total_sku.to_string(),
        },
        Column {
            id: "duration_ms",
            title: "duration",
            sortable: true,
            sort_key: |r| SortKey::Integer(DerivedMetrics::for_order(r).duration_ms),
            render: |r, _| DerivedMetrics::for_order(r).duration_text(),
        },
        Column {
            id: "picking_rate",
            title: "picking rate",
            sortable: true,
            sort_key: |r| SortKey::Number(DerivedMetrics::for_order(r).picking_rate),
            render: |r, _| format_rate_cell(DerivedMetrics::for_order(r).picking_rate),
        },
    ]
}

pub fn worker_columns() -> Vec<Column<WorkerAggregate>> {
    vec![
        Column {
            id: "store_name",
            title: "store",
            sortable: true,
            sort_key: |r| SortKey::Text(r.store_name.clone()),
            render: |r, _| r.store_name.clone(),
        },
        Column {
            id: "worker_name",
            title: "worker",
            sortable: true,
            sort_key: |r| SortKey::Text(r.worker_name.clone()),
            render: |r, _| r.worker_name.clone(),
        },
        Column {
            id: "order_count",
            title: "orders handled",
            sortable: true,
            sort_key: |r| SortKey::Integer(r.order_count as i64),
            render: |r, _| r.order_count.to_string(),
        },
        Column {
            id: "total_sku",
            title: "total items",
            sortable: true,
            sort_key: |r| SortKey::Integer(r.total_sku),
            render: |r, _| r.total_sku.to_string(),
        },
        Column {
            id: "duration_ms",
            title: "duration",
            sortable: true,
            sort_key: |r| SortKey::Integer(r.total_time_ms),
            render: |r, _| DerivedMetrics::for_worker(r).duration_text(),
        },
        Column {
            id: "picking_rate",
            title: "picking rate",
            sortable: true,
            sort_key: |r| SortKey::Number(DerivedMetrics::for_worker(r).picking_rate),
            render: |r, _| format_rate_cell(DerivedMetrics::for_worker(r).picking_rate),
        },
    ]
}
