//! Task and phase input records.
//!
//! These are the normalized shapes the data-fetch layer hands to the engine.
//! Field names deserialize from the camelCase JSON the host produces; dates
//! arrive as ISO `YYYY-MM-DD` strings (the adapter owns timestamp
//! conversion). Only the two dates drive positioning; everything else is
//! passed through untouched for rendering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A task to be positioned as a point on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Stable task identifier from the upstream system.
    pub id: String,
    /// Display name. Also the stacking sort key.
    pub name: String,
    /// Ordinal of the phase this task belongs to.
    #[serde(default)]
    pub phase: u32,
    /// Scheduled start, if any.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Due date, if any. Takes priority over `start_date` for positioning.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Estimated duration in days, used for duration-proportional sizing.
    #[serde(default)]
    pub time_estimate_days: Option<f32>,
    /// Completion percentage, passed through for styling.
    #[serde(default)]
    pub percent_complete: f32,
}

impl TaskRecord {
    /// The date this task is positioned by: due date first, else start date.
    #[inline]
    pub fn reference_date(&self) -> Option<NaiveDate> {
        self.due_date.or(self.start_date)
    }

    /// Whether the task carries any date at all.
    #[inline]
    pub fn has_date(&self) -> bool {
        self.due_date.is_some() || self.start_date.is_some()
    }
}

/// A phase to be positioned as a span across the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord {
    /// Zero-based phase ordinal, also the fallback-positioning key.
    pub ordinal: u32,
    /// Display name, passed through.
    pub name: String,
    /// Accent color, passed through.
    #[serde(default)]
    pub color: String,
    /// Tasks belonging to this phase, in upstream order.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl PhaseRecord {
    /// Derived date span: pooled min/max over every task's start and due
    /// date. Earlier dates of one task and later dates of another combine
    /// to form the window. `None` when no task carries any date.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut range: Option<(NaiveDate, NaiveDate)> = None;
        for task in &self.tasks {
            for date in [task.start_date, task.due_date].into_iter().flatten() {
                range = Some(match range {
                    Some((lo, hi)) => (lo.min(date), hi.max(date)),
                    None => (date, date),
                });
            }
        }
        range
    }

    /// Span length in whole days, zero for a single-day or dateless phase.
    pub fn duration_days(&self) -> i64 {
        self.span()
            .map(|(start, end)| (end - start).num_days())
            .unwrap_or(0)
    }

    /// Whether the phase covers `date` or begins within `lookahead_days`
    /// after it. Dateless phases are never active.
    pub fn is_active(&self, date: NaiveDate, lookahead_days: i64) -> bool {
        let Some((start, end)) = self.span() else {
            return false;
        };
        let horizon = date + chrono::Duration::days(lookahead_days);
        (start <= date && end >= date) || (start > date && start <= horizon)
    }
}
