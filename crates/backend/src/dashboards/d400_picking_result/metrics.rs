//! Duration and picking rate of orders and workers.
//!
//! All arithmetic is on UTC instants in milliseconds. Elapsed time at or below
//! zero yields a rate of 0, never a division by zero.

use chrono::{DateTime, Utc};
use contracts::dashboards::d400_picking_result::{OrderAggregate, WorkerAggregate};

use crate::shared::format::format_minutes;

pub const MS_PER_MINUTE: i64 = 60 * 1000;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;

/// Milliseconds between start and end, 0 while the end is unknown
pub fn elapsed_ms(start: &DateTime<Utc>, end: Option<&DateTime<Utc>>) -> i64 {
    end.map(|end| (*end - *start).num_milliseconds())
        .unwrap_or(0)
}

/// Items per hour between two instants
pub fn picking_rate(total_sku: i64, start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    picking_rate_from_duration(total_sku, (*end - *start).num_milliseconds())
}

/// Items per hour over a pre-summed duration
pub fn picking_rate_from_duration(total_sku: i64, total_time_ms: i64) -> f64 {
    let hours = total_time_ms as f64 / MS_PER_HOUR as f64;
    if hours <= 0.0 {
        return 0.0;
    }
    let rate = total_sku as f64 / hours;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Whole minutes, rounded half up. Negative spans clamp to 0.
pub fn duration_minutes(total_time_ms: i64) -> i64 {
    if total_time_ms <= 0 {
        return 0;
    }
    (total_time_ms as f64 / MS_PER_MINUTE as f64).round() as i64
}

pub fn format_duration(start: &DateTime<Utc>, end: &DateTime<Utc>) -> String {
    format_duration_ms((*end - *start).num_milliseconds())
}

pub fn format_duration_ms(total_time_ms: i64) -> String {
    format_minutes(duration_minutes(total_time_ms))
}

/// Numbers behind the derived table columns
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub duration_ms: i64,
    pub picking_rate: f64,
}

impl DerivedMetrics {
    pub fn for_order(order: &OrderAggregate) -> Self {
        let duration_ms = elapsed_ms(&order.start_time, order.end_time.as_ref());
        Self {
            duration_ms,
            picking_rate: picking_rate_from_duration(order.total_sku, duration_ms),
        }
    }

    pub fn for_worker(worker: &WorkerAggregate) -> Self {
        Self {
            duration_ms: worker.total_time_ms,
            picking_rate: picking_rate_from_duration(worker.total_sku, worker.total_time_ms),
        }
    }

    pub fn duration_text(&self) -> String {
        format_duration_ms(self.duration_ms)
    }
}
