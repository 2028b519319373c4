use contracts::dashboards::d400_picking_result::{OrderAggregate, PickEvent, WorkerAggregate};
use std::collections::{HashMap, HashSet};

use super::metrics::elapsed_ms;

/// One row per order, in first-seen order of `order_id`.
///
/// Store, number, opening worker and times come from the first event of the order;
/// every event adds its `sku_count`.
pub fn aggregate_by_order(rows: &[PickEvent]) -> Vec<OrderAggregate> {
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut result: Vec<OrderAggregate> = Vec::new();

    for row in rows {
        match index.get(&row.order_id) {
            Some(&pos) => result[pos].total_sku += row.sku_count,
            None => {
                index.insert(row.order_id, result.len());
                result.push(OrderAggregate {
                    store_name: row.store_name.clone(),
                    order_number: row.order_number.clone(),
                    worker_name: row.order_worker_name.clone(),
                    total_sku: row.sku_count,
                    start_time: row.order_start_time,
                    end_time: row.order_end_time,
                });
            }
        }
    }

    result
}

struct WorkerGroup {
    aggregate: WorkerAggregate,
    order_ids: Vec<i64>,
    seen: HashSet<i64>,
}

/// One row per (store, order-opening worker), in first-seen order.
///
/// `total_sku` sums every event. `order_count` and `total_time_ms` count each
/// distinct order once, however many events it contributed.
pub fn aggregate_by_worker(rows: &[PickEvent]) -> Vec<WorkerAggregate> {
    // Order durations from the first event of each order
    let mut order_times: HashMap<i64, i64> = HashMap::new();
    for row in rows {
        order_times
            .entry(row.order_id)
            .or_insert_with(|| elapsed_ms(&row.order_start_time, row.order_end_time.as_ref()));
    }

    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut groups: Vec<WorkerGroup> = Vec::new();

    for row in rows {
        let key = (row.store_name.as_str(), row.order_worker_name.as_str());
        let pos = *index.entry(key).or_insert_with(|| {
            groups.push(WorkerGroup {
                aggregate: WorkerAggregate {
                    store_name: row.store_name.clone(),
                    worker_name: row.order_worker_name.clone(),
                    order_count: 0,
                    total_sku: 0,
                    total_time_ms: 0,
                },
                order_ids: Vec::new(),
                seen: HashSet::new(),
            });
            groups.len() - 1
        });

        let group = &mut groups[pos];
        group.aggregate.total_sku += row.sku_count;
        if group.seen.insert(row.order_id) {
            group.order_ids.push(row.order_id);
        }
    }

    groups
        .into_iter()
        .map(|group| {
            let mut aggregate = group.aggregate;
            aggregate.order_count = group.order_ids.len();
            aggregate.total_time_ms = group
                .order_ids
                .iter()
                .filter_map(|id| order_times.get(id))
                .sum();
            aggregate
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_picking_result::test_fixtures::{event, ts};

    fn scenario() -> Vec<PickEvent> {
        vec![
            event(7, "Main", "Tanaka", "Sato", 3, "2024-01-01T09:00:00Z", Some("2024-01-01T10:30:00Z")),
            event(7, "Main", "Tanaka", "Suzuki", 2, "2024-01-01T09:00:00Z", Some("2024-01-01T10:30:00Z")),
        ]
    }

    #[test]
    fn test_empty_input_gives_empty_rollups() {
        assert!(aggregate_by_order(&[]).is_empty());
        assert!(aggregate_by_worker(&[]).is_empty());
    }

    #[test]
    fn test_order_rollup_of_shared_order() {
        let orders = aggregate_by_order(&scenario());
        assert_eq!(orders.len(), 1);
        let order = &orders[0];
        assert_eq!(order.total_sku, 5);
        assert_eq!(order.worker_name, "Tanaka");
        assert_eq!(order.order_number, "A0000007");
        assert_eq!(order.start_time, ts("2024-01-01T09:00:00Z"));
        assert_eq!(order.end_time, Some(ts("2024-01-01T10:30:00Z")));
    }

    #[test]
    fn test_worker_rollup_counts_order_once() {
        let workers = aggregate_by_worker(&scenario());
        assert_eq!(workers.len(), 1);
        let worker = &workers[0];
        assert_eq!(worker.store_name, "Main");
        assert_eq!(worker.worker_name, "Tanaka");
        assert_eq!(worker.order_count, 1);
        assert_eq!(worker.total_sku, 5);
        assert_eq!(worker.total_time_ms, 5_400_000);
    }

    #[test]
    fn test_order_rollup_keeps_first_seen_order() {
        let rows = vec![
            event(2, "Main", "Ito", "Ito", 1, "2024-01-01T09:00:00Z", Some("2024-01-01T09:10:00Z")),
            event(1, "Main", "Ito", "Ito", 4, "2024-01-01T08:00:00Z", Some("2024-01-01T08:10:00Z")),
            event(2, "Main", "Ito", "Ito", 2, "2024-01-01T09:00:00Z", Some("2024-01-01T09:10:00Z")),
            event(3, "East", "Kato", "Kato", 1, "2024-01-01T11:00:00Z", None),
        ];
        let ids: Vec<_> = aggregate_by_order(&rows)
            .into_iter()
            .map(|o| (o.order_number, o.total_sku))
            .collect();
        assert_eq!(
            ids,
            vec![
                ("A0000002".to_string(), 3),
                ("A0000001".to_string(), 4),
                ("A0000003".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_worker_groups_split_by_store_and_opening_worker() {
        let rows = vec![
            event(1, "Main", "Ito", "Kato", 2, "2024-01-01T08:00:00Z", Some("2024-01-01T08:30:00Z")),
            event(2, "East", "Ito", "Ito", 1, "2024-01-01T09:00:00Z", Some("2024-01-01T09:15:00Z")),
            event(3, "Main", "Ito", "Ito", 3, "2024-01-01T10:00:00Z", Some("2024-01-01T10:45:00Z")),
            event(1, "Main", "Ito", "Ito", 5, "2024-01-01T08:00:00Z", Some("2024-01-01T08:30:00Z")),
            event(4, "Main", "Kato", "Kato", 1, "2024-01-01T12:00:00Z", None),
        ];
        let workers = aggregate_by_worker(&rows);
        assert_eq!(workers.len(), 3);

        assert_eq!((workers[0].store_name.as_str(), workers[0].worker_name.as_str()), ("Main", "Ito"));
        assert_eq!(workers[0].order_count, 2);
        assert_eq!(workers[0].total_sku, 10);
        assert_eq!(workers[0].total_time_ms, 75 * 60_000);

        assert_eq!((workers[1].store_name.as_str(), workers[1].worker_name.as_str()), ("East", "Ito"));
        assert_eq!(workers[1].order_count, 1);
        assert_eq!(workers[1].total_time_ms, 15 * 60_000);

        // Open order contributes no time
        assert_eq!(workers[2].worker_name, "Kato");
        assert_eq!(workers[2].total_time_ms, 0);
    }

    #[test]
    fn test_sku_count_is_conserved_by_both_rollups() {
        let rows = vec![
            event(1, "Main", "Ito", "Kato", 2, "2024-01-01T08:00:00Z", Some("2024-01-01T08:30:00Z")),
            event(1, "Main", "Ito", "Ito", 7, "2024-01-01T08:00:00Z", Some("2024-01-01T08:30:00Z")),
            event(2, "East", "Mori", "Mori", 1, "2024-01-01T09:00:00Z", Some("2024-01-01T09:15:00Z")),
            event(3, "Main", "Ito", "Ito", 3, "2024-01-01T10:00:00Z", Some("2024-01-01T10:45:00Z")),
            event(3, "Main", "Ito", "Ito", 4, "2024-01-01T10:00:00Z", Some("2024-01-01T10:45:00Z")),
        ];
        let expected: i64 = rows.iter().map(|r| r.sku_count).sum();

        let by_order: i64 = aggregate_by_order(&rows).iter().map(|o| o.total_sku).sum();
        let by_worker = aggregate_by_worker(&rows);
        assert_eq!(by_order, expected);
        assert_eq!(by_worker.iter().map(|w| w.total_sku).sum::<i64>(), expected);

        // Three orders, five events
        assert_eq!(by_worker.iter().map(|w| w.order_count).sum::<usize>(), 3);
    }
}
