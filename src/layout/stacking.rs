//! Column bucketing for vertical task stacking.
//!
//! Tasks resolving to the same column stack vertically; the stacking order
//! must be stable across renders so nodes don't jump between frames. Buckets
//! are therefore sorted by task name, and the bucket map is keyed in column
//! order.

use std::collections::BTreeMap;

use crate::timeline::{TaskRecord, TimelineGrid};

/// Bucket map from column index to the tasks resolved there, name-sorted.
pub type ColumnBuckets = BTreeMap<usize, Vec<TaskRecord>>;

/// Partition `tasks` into per-column buckets.
///
/// Tasks without any date are excluded entirely; they never receive a
/// stacking index here and take the point mapper's ordinal fallback instead.
/// Within each bucket, tasks sort by name (case-sensitive lexicographic),
/// which is what makes repeated grouping of the same set deterministic.
pub fn group_by_column(tasks: &[TaskRecord], grid: &TimelineGrid) -> ColumnBuckets {
    let mut buckets = ColumnBuckets::new();
    if grid.is_empty() {
        return buckets;
    }

    for task in tasks {
        let Some(date) = task.reference_date() else {
            continue;
        };
        buckets
            .entry(grid.resolve(date))
            .or_default()
            .push(task.clone());
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| a.name.cmp(&b.name));
    }
    buckets
}

/// A task's position within its sorted bucket, 0 when it is in none.
pub fn stack_index(buckets: &ColumnBuckets, task: &TaskRecord) -> usize {
    buckets
        .values()
        .find_map(|bucket| bucket.iter().position(|t| t.id == task.id))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::ColumnKind;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(id: &str, name: &str, due: Option<NaiveDate>) -> TaskRecord {
        TaskRecord {
            id: id.to_string(),
            name: name.to_string(),
            phase: 0,
            start_date: None,
            due_date: due,
            time_estimate_days: None,
            percent_complete: 0.0,
        }
    }

    fn day_grid() -> TimelineGrid {
        TimelineGrid::generate(d(2024, 1, 1), d(2024, 1, 12), ColumnKind::Day)
    }

    #[test]
    fn test_buckets_keyed_by_resolved_column() {
        let tasks = vec![
            task("1", "alpha", Some(d(2024, 1, 2))),
            task("2", "beta", Some(d(2024, 1, 2))),
            task("3", "gamma", Some(d(2024, 1, 9))),
        ];
        let buckets = group_by_column(&tasks, &day_grid());
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[&1].len(), 2);
        assert_eq!(buckets[&6].len(), 1);
    }

    #[test]
    fn test_dateless_tasks_excluded() {
        let tasks = vec![
            task("1", "alpha", Some(d(2024, 1, 2))),
            task("2", "no dates", None),
        ];
        let buckets = group_by_column(&tasks, &day_grid());
        let total: usize = buckets.values().map(Vec::len).sum();
        assert_eq!(total, 1);
        assert_eq!(stack_index(&buckets, &tasks[1]), 0);
    }

    #[test]
    fn test_bucket_order_is_name_sorted_and_deterministic() {
        let date = Some(d(2024, 1, 3));
        let shuffled = vec![
            task("1", "zeta", date),
            task("2", "Alpha", date),
            task("3", "beta", date),
        ];
        let reversed: Vec<TaskRecord> = shuffled.iter().rev().cloned().collect();

        let a = group_by_column(&shuffled, &day_grid());
        let b = group_by_column(&reversed, &day_grid());
        assert_eq!(a, b);

        // Case-sensitive lexicographic: uppercase sorts before lowercase
        let names: Vec<&str> = a[&2].iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "beta", "zeta"]);
    }

    #[test]
    fn test_stack_index_matches_sorted_position() {
        let date = Some(d(2024, 1, 3));
        let tasks = vec![
            task("1", "zeta", date),
            task("2", "alpha", date),
            task("3", "mid", date),
        ];
        let buckets = group_by_column(&tasks, &day_grid());
        assert_eq!(stack_index(&buckets, &tasks[1]), 0); // alpha
        assert_eq!(stack_index(&buckets, &tasks[2]), 1); // mid
        assert_eq!(stack_index(&buckets, &tasks[0]), 2); // zeta
    }

    #[test]
    fn test_empty_grid_yields_no_buckets() {
        let tasks = vec![task("1", "alpha", Some(d(2024, 1, 2)))];
        let buckets = group_by_column(&tasks, &TimelineGrid::empty());
        assert!(buckets.is_empty());
    }
}
