use contracts::dashboards::d400_picking_result::{
    AggregationMode, ChartSeries, OrderChartPoint, PickEvent, WorkerChartPoint,
};

use super::aggregator::{aggregate_by_order, aggregate_by_worker};
use super::error::DashboardError;
use super::metrics::DerivedMetrics;
use crate::shared::format::round_rate;

/// Bar chart series for `mode`. The ungrouped view has no chart.
pub fn build_chart(mode: AggregationMode, events: &[PickEvent]) -> Result<ChartSeries, DashboardError> {
    match mode {
        AggregationMode::Order => Ok(ChartSeries::Order(
            aggregate_by_order(events)
                .into_iter()
                .map(|order| {
                    let rate = DerivedMetrics::for_order(&order).picking_rate;
                    OrderChartPoint {
                        name: order.order_number,
                        worker_name: order.worker_name,
                        total_sku: order.total_sku,
                        picking_rate: round_rate(rate),
                    }
                })
                .collect(),
        )),
        AggregationMode::Worker => Ok(ChartSeries::Worker(
            aggregate_by_worker(events)
                .into_iter()
                .map(|worker| {
                    let rate = DerivedMetrics::for_worker(&worker).picking_rate;
                    WorkerChartPoint {
                        name: worker.worker_name,
                        store_name: worker.store_name,
                        total_sku: worker.total_sku,
                        order_count: worker.order_count,
                        picking_rate: round_rate(rate),
                    }
                })
                .collect(),
        )),
        AggregationMode::EachPick => Err(DashboardError::ChartNotSupported(mode)),
    }
}
