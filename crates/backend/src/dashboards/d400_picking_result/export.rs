//! CSV export of the three row shapes.
//!
//! Every field is quoted, embedded quotes are doubled, lines are joined with "\n"
//! and the document starts with a UTF-8 BOM so spreadsheet tools pick UTF-8.

use contracts::dashboards::d400_picking_result::{
    AggregationMode, OrderAggregate, PickEvent, WorkerAggregate,
};

use super::aggregator::{aggregate_by_order, aggregate_by_worker};
use super::error::DashboardError;
use super::metrics::DerivedMetrics;
use crate::shared::format::{format_iso, format_iso_opt, format_rate};

pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const PICK_EVENT_HEADERS: [&str; 13] = [
    "store",
    "worker",
    "order number",
    "item count",
    "work start",
    "work end",
    "move start",
    "shelf arrival",
    "pick start",
    "pack start",
    "pack finished",
    "customer-service start",
    "customer-service end",
];

pub const ORDER_HEADERS: [&str; 6] = [
    "store",
    "order number",
    "worker",
    "total items",
    "total duration",
    "picking rate",
];

pub const WORKER_HEADERS: [&str; 6] = [
    "store",
    "worker",
    "orders handled",
    "total items",
    "total duration",
    "picking rate",
];

/// Row type that can be written as one CSV line
pub trait CsvExportable {
    fn headers() -> &'static [&'static str];

    fn to_csv_row(&self) -> Vec<String>;
}

impl CsvExportable for PickEvent {
    fn headers() -> &'static [&'static str] {
        &PICK_EVENT_HEADERS
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.store_name.clone(),
            self.worker_name.clone(),
            self.order_number.clone(),
            self.sku_count.to_string(),
            format_iso(&self.order_start_time),
            format_iso_opt(self.order_end_time.as_ref()),
            format_iso_opt(self.move_start.as_ref()),
            format_iso_opt(self.arrive_at_shelf.as_ref()),
            format_iso_opt(self.pick_start.as_ref()),
            format_iso_opt(self.pack_start.as_ref()),
            format_iso_opt(self.pack_finished.as_ref()),
            format_iso_opt(self.customer_service_start.as_ref()),
            format_iso_opt(self.customer_service_finish.as_ref()),
        ]
    }
}

impl CsvExportable for OrderAggregate {
    fn headers() -> &'static [&'static str] {
        &ORDER_HEADERS
    }

    fn to_csv_row(&self) -> Vec<String> {
        let metrics = DerivedMetrics::for_order(self);
        vec![
            self.store_name.clone(),
            self.order_number.clone(),
            self.worker_name.clone(),
            self.total_sku.to_string(),
            metrics.duration_text(),
            format_rate(metrics.picking_rate),
        ]
    }
}

impl CsvExportable for WorkerAggregate {
    fn headers() -> &'static [&'static str] {
        &WORKER_HEADERS
    }

    fn to_csv_row(&self) -> Vec<String> {
        let metrics = DerivedMetrics::for_worker(self);
        vec![
            self.store_name.clone(),
            self.worker_name.clone(),
            self.order_count.to_string(),
            self.total_sku.to_string(),
            metrics.duration_text(),
            format_rate(metrics.picking_rate),
        ]
    }
}

/// Header line plus one line per row. An empty slice yields the header only.
pub fn to_csv<T: CsvExportable>(rows: &[T]) -> Result<Vec<u8>, DashboardError> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(T::headers())?;
    for row in rows {
        writer.write_record(row.to_csv_row())?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| DashboardError::Export(e.to_string()))?;

    let mut document = Vec::with_capacity(UTF8_BOM.len() + body.len());
    document.extend_from_slice(UTF8_BOM);
    document.extend_from_slice(&body);
    // Lines are joined, not terminated
    if document.last() == Some(&b'\n') {
        document.pop();
    }
    Ok(document)
}

/// "dashboard_{work_date}_{mode}.csv"
pub fn export_file_name(work_date: &str, mode: AggregationMode) -> String {
    format!("dashboard_{}_{}.csv", work_date, mode.as_str())
}

#[derive(Debug, Clone)]
pub struct CsvDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Aggregate the events for `mode` and serialize them
pub fn export_csv(
    work_date: &str,
    mode: AggregationMode,
    events: &[PickEvent],
) -> Result<CsvDocument, DashboardError> {
    let bytes = match mode {
        AggregationMode::EachPick => to_csv(events)?,
        AggregationMode::Order => to_csv(&aggregate_by_order(events))?,
        AggregationMode::Worker => to_csv(&aggregate_by_worker(events))?,
    };
    Ok(CsvDocument {
        file_name: export_file_name(work_date, mode),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_picking_result::test_fixtures::{event, ts};

    /// Strip the BOM and parse back into records
    fn parse(document: &[u8]) -> Vec<Vec<String>> {
        assert!(document.starts_with(UTF8_BOM));
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(&document[UTF8_BOM.len()..]);
        reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect()
    }

    fn scenario() -> Vec<PickEvent> {
        vec![
            event(7, "Main", "Tanaka", "Sato", 3, "2024-01-01T09:00:00Z", Some("2024-01-01T10:30:00Z")),
            event(7, "Main", "Tanaka", "Suzuki", 2, "2024-01-01T09:00:00Z", Some("2024-01-01T10:30:00Z")),
        ]
    }

    #[test]
    fn test_order_export() {
        let doc = export_csv("2024-01-01", AggregationMode::Order, &scenario()).unwrap();
        assert_eq!(doc.file_name, "dashboard_2024-01-01_order.csv");

        let text = String::from_utf8(doc.bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "\"store\",\"order number\",\"worker\",\"total items\",\"total duration\",\"picking rate\"\n\
             \"Main\",\"A0000007\",\"Tanaka\",\"5\",\"1 hours 30 minutes\",\"3.3\""
        );
    }

    #[test]
    fn test_worker_export() {
        let doc = export_csv("2024-01-01", AggregationMode::Worker, &scenario()).unwrap();
        assert_eq!(doc.file_name, "dashboard_2024-01-01_worker.csv");
        let records = parse(&doc.bytes);
        assert_eq!(records[0], WORKER_HEADERS.to_vec());
        assert_eq!(records[1], vec!["Main", "Tanaka", "1", "5", "1 hours 30 minutes", "3.3"]);
    }

    #[test]
    fn test_each_pick_export_round_trips() {
        let mut rows = scenario();
        rows[0].store_name = "Main \"North\", 2F".to_string();
        rows[1].pack_start = Some(ts("2024-01-01T09:40:00Z"));

        let doc = export_csv("2024-01-01", AggregationMode::EachPick, &rows).unwrap();
        assert_eq!(doc.file_name, "dashboard_2024-01-01_each_pick.csv");
        assert!(!doc.bytes.ends_with(b"\n"));

        let records = parse(&doc.bytes);
        assert_eq!(records.len(), rows.len() + 1);
        assert_eq!(records[0], PICK_EVENT_HEADERS.to_vec());
        for (record, row) in records[1..].iter().zip(&rows) {
            assert_eq!(record, &row.to_csv_row());
        }
        assert_eq!(records[1][0], "Main \"North\", 2F");
        assert_eq!(records[1][5], "2024-01-01T10:30:00.000Z");
        assert_eq!(records[1][9], "");
        assert_eq!(records[2][9], "2024-01-01T09:40:00.000Z");
    }

    #[test]
    fn test_half_rate_matches_table_and_chart() {
        use crate::dashboards::d400_picking_result::chart::build_chart;
        use crate::dashboards::d400_picking_result::columns::order_columns;
        use crate::shared::table::{CellContext, TablePresenter};
        use chrono::FixedOffset;
        use contracts::dashboards::d400_picking_result::ChartSeries;

        // 9 items in 4 hours is 2.25 per hour
        let rows = vec![event(1, "Main", "Ito", "Ito", 9, "2024-01-01T08:00:00Z", Some("2024-01-01T12:00:00Z"))];

        let doc = export_csv("2024-01-01", AggregationMode::Order, &rows).unwrap();
        let records = parse(&doc.bytes);
        assert_eq!(records[1], vec!["Main", "A0000001", "Ito", "9", "4 hours 0 minutes", "2.3"]);

        let table = TablePresenter::new(aggregate_by_order(&rows), order_columns(), 20);
        let ctx = CellContext {
            offset: FixedOffset::east_opt(0).unwrap(),
        };
        assert_eq!(table.render_visible(&ctx)[0][5], "2.3/h");

        let ChartSeries::Order(points) = build_chart(AggregationMode::Order, &rows).unwrap() else {
            panic!("expected order series");
        };
        assert_eq!(points[0].picking_rate, 2.3);
    }

    #[test]
    fn test_quotes_are_doubled() {
        let mut rows = scenario();
        rows.truncate(1);
        rows[0].worker_name = "Ken \"K\" Sato".to_string();
        let bytes = to_csv(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Ken \"\"K\"\" Sato\""));
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let doc = export_csv("2024-01-02", AggregationMode::Worker, &[]).unwrap();
        let records = parse(&doc.bytes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], WORKER_HEADERS.to_vec());
    }
}
