//! Picking result dashboard: pick events rolled up per order or per worker,
//! shown as a paged table or bar chart and exported as CSV.

pub mod aggregator;
pub mod chart;
pub mod columns;
pub mod error;
pub mod export;
pub mod metrics;
pub mod repository;
pub mod service;
pub mod state;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::DashboardError;
pub use repository::{PickEventSource, SqlitePickEventSource};
