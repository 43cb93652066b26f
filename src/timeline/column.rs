//! Column kinds and descriptors.
//!
//! A column is one cell of the calendar grid. Its pixel width is a fixed
//! policy value determined solely by the kind, so the grid renderer and the
//! positioning math always agree on geometry.

use chrono::NaiveDate;
use serde::Serialize;

/// Calendar bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// One business day (Monday through Friday).
    Day,
    /// One Monday-to-Friday week.
    Week,
    /// One calendar month.
    Month,
}

impl ColumnKind {
    /// Fixed pixel width for columns of this kind.
    #[inline]
    pub fn pixel_width(self) -> f32 {
        match self {
            Self::Day => 120.0,
            Self::Week => 160.0,
            Self::Month => 200.0,
        }
    }

    /// Parse the host's granularity strings (`"daily"`, `"weekly"`,
    /// `"monthly"`). Unknown strings fall back to `Day`.
    pub fn from_granularity(s: &str) -> Self {
        match s {
            "weekly" => Self::Week,
            "monthly" => Self::Month,
            _ => Self::Day,
        }
    }
}

/// One calendar-grid cell.
///
/// Columns are produced in strictly increasing date order with dense,
/// zero-based indices. `end_date` is the last calendar day the bucket covers
/// and is only present for `Week` and `Month` columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Column {
    /// Representative start of the bucket: the day itself for `Day`, the
    /// Monday for `Week`, the 1st for `Month`.
    pub date: NaiveDate,
    /// Bucket granularity.
    pub kind: ColumnKind,
    /// Zero-based position in the grid.
    pub index: usize,
    /// Fixed width in pixels (from [`ColumnKind::pixel_width`]).
    pub pixel_width: f32,
    /// Last covered day (Friday for a week, last-of-month for a month).
    pub end_date: Option<NaiveDate>,
}

impl Column {
    /// Whether `date` falls inside this bucket.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.kind {
            ColumnKind::Day => date == self.date,
            ColumnKind::Week => {
                let end = self.end_date.unwrap_or(self.date);
                date >= self.date && date <= end
            }
            ColumnKind::Month => {
                use chrono::Datelike;
                date.month() == self.date.month() && date.year() == self.date.year()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_pixel_widths() {
        assert_eq!(ColumnKind::Day.pixel_width(), 120.0);
        assert_eq!(ColumnKind::Week.pixel_width(), 160.0);
        assert_eq!(ColumnKind::Month.pixel_width(), 200.0);
    }

    #[test]
    fn test_granularity_parsing() {
        assert_eq!(ColumnKind::from_granularity("daily"), ColumnKind::Day);
        assert_eq!(ColumnKind::from_granularity("weekly"), ColumnKind::Week);
        assert_eq!(ColumnKind::from_granularity("monthly"), ColumnKind::Month);
        // Unknown strings degrade to the finest granularity
        assert_eq!(ColumnKind::from_granularity("hourly"), ColumnKind::Day);
    }

    #[test]
    fn test_day_column_contains_only_its_day() {
        let col = Column {
            date: d(2024, 1, 3),
            kind: ColumnKind::Day,
            index: 0,
            pixel_width: 120.0,
            end_date: None,
        };
        assert!(col.contains(d(2024, 1, 3)));
        assert!(!col.contains(d(2024, 1, 4)));
    }

    #[test]
    fn test_week_column_contains_inclusive_range() {
        let col = Column {
            date: d(2024, 1, 1),
            kind: ColumnKind::Week,
            index: 0,
            pixel_width: 160.0,
            end_date: Some(d(2024, 1, 5)),
        };
        assert!(col.contains(d(2024, 1, 1)));
        assert!(col.contains(d(2024, 1, 5)));
        assert!(!col.contains(d(2024, 1, 6)));
        assert!(!col.contains(d(2023, 12, 31)));
    }

    #[test]
    fn test_month_column_matches_month_and_year() {
        let col = Column {
            date: d(2024, 2, 1),
            kind: ColumnKind::Month,
            index: 0,
            pixel_width: 200.0,
            end_date: Some(d(2024, 2, 29)),
        };
        assert!(col.contains(d(2024, 2, 15)));
        assert!(!col.contains(d(2024, 3, 1)));
        assert!(!col.contains(d(2023, 2, 15)));
    }
}
