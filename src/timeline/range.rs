//! Project timeline range derivation.
//!
//! The range covered by the grid and its granularity are derived from the
//! task pool: the pooled min/max of all task dates picks the window, and the
//! window length picks how coarse the columns should be. `today` is threaded
//! in explicitly so the derivation stays deterministic under test.

use chrono::{Duration, NaiveDate};

use super::column::ColumnKind;
use super::record::TaskRecord;

/// Span length (days) above which the grid switches to weekly columns.
const WEEKLY_THRESHOLD_DAYS: i64 = 30;
/// Span length (days) above which the grid switches to monthly columns.
const MONTHLY_THRESHOLD_DAYS: i64 = 90;
/// Window length used when no task carries a date.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// The date window and granularity the grid is generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineRange {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window.
    pub end: NaiveDate,
    /// Column granularity for the window.
    pub granularity: ColumnKind,
}

impl TimelineRange {
    /// Explicit range with granularity auto-selected from the span length:
    /// over 90 days gets monthly columns, over 30 weekly, otherwise daily.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let duration = (end - start).num_days();
        let granularity = if duration > MONTHLY_THRESHOLD_DAYS {
            ColumnKind::Month
        } else if duration > WEEKLY_THRESHOLD_DAYS {
            ColumnKind::Week
        } else {
            ColumnKind::Day
        };
        Self {
            start,
            end,
            granularity,
        }
    }

    /// Derive the window from a task pool: pooled min/max over every task's
    /// start and due date. When no task carries a date, fall back to the
    /// 30-day window starting at `today`, at daily granularity.
    pub fn from_tasks<'a, I>(tasks: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'a TaskRecord>,
    {
        let mut window: Option<(NaiveDate, NaiveDate)> = None;
        for task in tasks {
            for date in [task.start_date, task.due_date].into_iter().flatten() {
                window = Some(match window {
                    Some((lo, hi)) => (lo.min(date), hi.max(date)),
                    None => (date, date),
                });
            }
        }

        match window {
            Some((start, end)) => Self::new(start, end),
            None => Self {
                start: today,
                end: today + Duration::days(DEFAULT_WINDOW_DAYS),
                granularity: ColumnKind::Day,
            },
        }
    }

    /// Window length in whole days.
    #[inline]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn task(start: Option<NaiveDate>, due: Option<NaiveDate>) -> TaskRecord {
        TaskRecord {
            id: "t".to_string(),
            name: "t".to_string(),
            phase: 0,
            start_date: start,
            due_date: due,
            time_estimate_days: None,
            percent_complete: 0.0,
        }
    }

    #[test]
    fn test_granularity_thresholds() {
        // 10 days -> daily
        let r = TimelineRange::new(d(2024, 1, 1), d(2024, 1, 11));
        assert_eq!(r.granularity, ColumnKind::Day);

        // Exactly 30 days stays daily
        let r = TimelineRange::new(d(2024, 1, 1), d(2024, 1, 31));
        assert_eq!(r.granularity, ColumnKind::Day);

        // 31 days -> weekly
        let r = TimelineRange::new(d(2024, 1, 1), d(2024, 2, 1));
        assert_eq!(r.granularity, ColumnKind::Week);

        // Exactly 90 days stays weekly
        let r = TimelineRange::new(d(2024, 1, 1), d(2024, 3, 31));
        assert_eq!(r.granularity, ColumnKind::Week);

        // 91 days -> monthly
        let r = TimelineRange::new(d(2024, 1, 1), d(2024, 4, 1));
        assert_eq!(r.granularity, ColumnKind::Month);
    }

    #[test]
    fn test_from_tasks_pools_all_dates() {
        let tasks = vec![
            task(Some(d(2024, 2, 10)), None),
            task(None, Some(d(2024, 1, 5))),
            task(Some(d(2024, 3, 1)), Some(d(2024, 3, 15))),
        ];
        let r = TimelineRange::from_tasks(&tasks, d(2024, 1, 1));
        assert_eq!(r.start, d(2024, 1, 5));
        assert_eq!(r.end, d(2024, 3, 15));
        // 70-day span -> weekly
        assert_eq!(r.granularity, ColumnKind::Week);
    }

    #[test]
    fn test_from_tasks_dateless_fallback() {
        let tasks = vec![task(None, None), task(None, None)];
        let today = d(2024, 6, 1);
        let r = TimelineRange::from_tasks(&tasks, today);
        assert_eq!(r.start, today);
        assert_eq!(r.end, d(2024, 7, 1));
        assert_eq!(r.granularity, ColumnKind::Day);
        assert_eq!(r.duration_days(), 30);
    }

    #[test]
    fn test_from_empty_pool() {
        let today = d(2024, 6, 1);
        let r = TimelineRange::from_tasks(&[], today);
        assert_eq!(r.start, today);
        assert_eq!(r.granularity, ColumnKind::Day);
    }
}
