//! TimelineGrid - Column generation and date resolution.
//!
//! The grid owns the ordered column sequence for one date window plus a
//! cumulative pixel-offset table, so span and point mapping never re-sum
//! column widths. It is rebuilt from scratch whenever the window changes;
//! nothing is cached across windows and nothing reads the clock.
//!
//! # Generation rules
//!
//! - **Day**: the window start is normalized back to the Monday of its week,
//!   then every weekday (Monday-Friday) up to and including the window end
//!   becomes a column. Weekends are skipped, not emitted as empty cells.
//! - **Week**: same Monday normalization, one column per Monday, covering
//!   through that week's Friday.
//! - **Month**: normalized to the 1st, one column per calendar month,
//!   covering through the last day of the month.

use chrono::{Datelike, Duration, NaiveDate};

use super::column::{Column, ColumnKind};
use super::range::TimelineRange;

/// The calendar grid for one date window.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineGrid {
    /// Columns in strictly increasing date order, densely indexed from 0.
    columns: Vec<Column>,
    /// `offsets[i]` = summed pixel width of columns `[0, i)`.
    /// Always `columns.len() + 1` entries; the last is the total width.
    offsets: Vec<f32>,
}

impl TimelineGrid {
    /// A grid with no columns. Every mapper degrades to its documented
    /// fallback when handed one of these.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            offsets: vec![0.0],
        }
    }

    /// Generate the column sequence covering `[start, end]` at the given
    /// granularity. A window with `start > end` yields an empty grid.
    pub fn generate(start: NaiveDate, end: NaiveDate, kind: ColumnKind) -> Self {
        if start > end {
            return Self::empty();
        }

        let columns = match kind {
            ColumnKind::Day => generate_days(start, end),
            ColumnKind::Week => generate_weeks(start, end),
            ColumnKind::Month => generate_months(start, end),
        };

        Self::from_columns(columns)
    }

    /// Generate from a derived [`TimelineRange`].
    pub fn from_range(range: &TimelineRange) -> Self {
        Self::generate(range.start, range.end, range.granularity)
    }

    fn from_columns(columns: Vec<Column>) -> Self {
        let mut offsets = Vec::with_capacity(columns.len() + 1);
        let mut sum = 0.0;
        offsets.push(sum);
        for col in &columns {
            sum += col.pixel_width;
            offsets.push(sum);
        }
        Self { columns, offsets }
    }

    /// The ordered column sequence.
    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the grid has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The column at `index`, if in range.
    #[inline]
    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Resolve a date to its column index.
    ///
    /// Scans in order for the first column containing the date (same day,
    /// within the week's Monday-Friday range, or same month and year). When
    /// nothing contains it, falls back to the column whose representative
    /// date is nearest by absolute day distance, ties going to the earlier
    /// column. An empty grid resolves everything to 0.
    pub fn resolve(&self, date: NaiveDate) -> usize {
        if let Some(col) = self.columns.iter().find(|c| c.contains(date)) {
            return col.index;
        }

        let mut closest = 0;
        let mut closest_dist = i64::MAX;
        for col in &self.columns {
            let dist = (date - col.date).num_days().abs();
            if dist < closest_dist {
                closest_dist = dist;
                closest = col.index;
            }
        }
        closest
    }

    /// Summed pixel width of all columns strictly before `index`.
    /// Indices past the end clamp to the total width.
    #[inline]
    pub fn x_offset(&self, index: usize) -> f32 {
        self.offsets[index.min(self.columns.len())]
    }

    /// Summed pixel width of columns `start..=end` inclusive. A reversed
    /// pair yields 0.
    pub fn span_width(&self, start: usize, end: usize) -> f32 {
        if start > end || self.columns.is_empty() {
            return 0.0;
        }
        let hi = (end + 1).min(self.columns.len());
        let lo = start.min(self.columns.len());
        self.offsets[hi] - self.offsets[lo]
    }

    /// Total pixel width of all columns.
    #[inline]
    pub fn total_width(&self) -> f32 {
        *self.offsets.last().unwrap_or(&0.0)
    }
}

/// Monday of the week `date` falls in.
fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(back)
}

/// First day of the month after the one `date` falls in.
fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

fn generate_days(start: NaiveDate, end: NaiveDate) -> Vec<Column> {
    let mut columns = Vec::new();
    let mut current = monday_of(start);
    let mut index = 0;

    while current <= end {
        if current.weekday().num_days_from_monday() < 5 {
            columns.push(Column {
                date: current,
                kind: ColumnKind::Day,
                index,
                pixel_width: ColumnKind::Day.pixel_width(),
                end_date: None,
            });
            index += 1;
        }
        current += Duration::days(1);
    }
    columns
}

fn generate_weeks(start: NaiveDate, end: NaiveDate) -> Vec<Column> {
    let mut columns = Vec::new();
    let mut monday = monday_of(start);
    let mut index = 0;

    while monday <= end {
        columns.push(Column {
            date: monday,
            kind: ColumnKind::Week,
            index,
            pixel_width: ColumnKind::Week.pixel_width(),
            end_date: Some(monday + Duration::days(4)),
        });
        index += 1;
        monday += Duration::days(7);
    }
    columns
}

fn generate_months(start: NaiveDate, end: NaiveDate) -> Vec<Column> {
    let mut columns = Vec::new();
    let Some(mut first) = start.with_day(1) else {
        return columns;
    };
    let mut index = 0;

    while first <= end {
        let Some(next) = first_of_next_month(first) else {
            break;
        };
        columns.push(Column {
            date: first,
            kind: ColumnKind::Month,
            index,
            pixel_width: ColumnKind::Month.pixel_width(),
            end_date: Some(next - Duration::days(1)),
        });
        index += 1;
        first = next;
    }
    columns
}
