//! Duration-proportional node widths and total grid width.
//!
//! Nodes grow with the duration they represent: one column width per day,
//! week, or month of duration depending on the grid granularity, clamped so
//! labels stay readable and long outliers don't dwarf the graph.

use crate::timeline::{ColumnKind, TimelineGrid};

/// Padding added past the last column of the drawing surface.
const SURFACE_PADDING: f32 = 200.0;
/// Minimum drawing-surface width when no columns exist.
const SURFACE_MIN_WIDTH: f32 = 1600.0;

/// Width bounds for one class of node.
#[derive(Debug, Clone, Copy)]
pub struct NodeSizing {
    /// Smallest rendered width.
    pub min_width: f32,
    /// Largest rendered width.
    pub max_width: f32,
    /// Width used when no duration or grid is available.
    pub fallback_width: f32,
}

impl NodeSizing {
    /// Bounds for task markers.
    pub fn task() -> Self {
        Self {
            min_width: 60.0,
            max_width: 400.0,
            fallback_width: 140.0,
        }
    }

    /// Bounds for phase blocks.
    pub fn phase() -> Self {
        Self {
            min_width: 180.0,
            max_width: 600.0,
            fallback_width: 180.0,
        }
    }
}

/// Width of a node representing `duration_days` of work.
///
/// The duration is converted to column counts (days per column: 1 for daily
/// grids, 7 for weekly, 30 for monthly) and multiplied by the column width,
/// then clamped to the sizing bounds. Missing or non-positive durations and
/// empty grids yield the sizing fallback.
pub fn duration_width(
    duration_days: Option<f32>,
    grid: &TimelineGrid,
    sizing: &NodeSizing,
) -> f32 {
    let (Some(days), Some(first)) = (duration_days, grid.columns().first()) else {
        return sizing.fallback_width;
    };
    if days <= 0.0 {
        return sizing.fallback_width;
    }

    let days_per_column = match first.kind {
        ColumnKind::Day => 1.0,
        ColumnKind::Week => 7.0,
        ColumnKind::Month => 30.0,
    };

    let width = first.pixel_width * (days / days_per_column);
    width.clamp(sizing.min_width, sizing.max_width)
}

/// Total pixel width of the drawing surface behind the grid.
///
/// The surface always covers the full column run plus trailing padding, and
/// never shrinks below the screen. Without columns it falls back to a fixed
/// minimum so the host still has something to draw on.
pub fn grid_pixel_width(grid: &TimelineGrid, screen_width: f32) -> f32 {
    if grid.is_empty() {
        return SURFACE_MIN_WIDTH.max(screen_width);
    }
    (grid.total_width() + SURFACE_PADDING).max(screen_width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_daily_grid_one_column_per_day() {
        let grid = TimelineGrid::generate(d(2024, 1, 1), d(2024, 1, 12), ColumnKind::Day);
        assert_eq!(duration_width(Some(2.0), &grid, &NodeSizing::task()), 240.0);
    }

    #[test]
    fn test_weekly_and_monthly_divisors() {
        let weekly = TimelineGrid::generate(d(2024, 1, 1), d(2024, 2, 28), ColumnKind::Week);
        // 7 days = one 160px column
        assert_eq!(duration_width(Some(7.0), &weekly, &NodeSizing::task()), 160.0);

        let monthly = TimelineGrid::generate(d(2024, 1, 1), d(2024, 6, 30), ColumnKind::Month);
        // 15 days = half a 200px column, clamped up for tasks
        assert_eq!(duration_width(Some(15.0), &monthly, &NodeSizing::task()), 100.0);
        // Phase minimum is higher
        assert_eq!(duration_width(Some(15.0), &monthly, &NodeSizing::phase()), 180.0);
    }

    #[test]
    fn test_width_clamps() {
        let grid = TimelineGrid::generate(d(2024, 1, 1), d(2024, 1, 12), ColumnKind::Day);
        // 30 days on a daily grid would be 3600px
        assert_eq!(duration_width(Some(30.0), &grid, &NodeSizing::task()), 400.0);
        assert_eq!(duration_width(Some(30.0), &grid, &NodeSizing::phase()), 600.0);
        // A fraction of a day floors out
        assert_eq!(duration_width(Some(0.1), &grid, &NodeSizing::task()), 60.0);
    }

    #[test]
    fn test_fallbacks() {
        let grid = TimelineGrid::generate(d(2024, 1, 1), d(2024, 1, 12), ColumnKind::Day);
        assert_eq!(duration_width(None, &grid, &NodeSizing::task()), 140.0);
        assert_eq!(duration_width(Some(0.0), &grid, &NodeSizing::task()), 140.0);
        assert_eq!(
            duration_width(Some(5.0), &TimelineGrid::empty(), &NodeSizing::phase()),
            180.0
        );
    }

    #[test]
    fn test_grid_pixel_width() {
        let grid = TimelineGrid::generate(d(2024, 1, 1), d(2024, 1, 12), ColumnKind::Day);
        // 10 columns * 120 + 200 padding
        assert_eq!(grid_pixel_width(&grid, 800.0), 1400.0);
        // Screen wider than the grid wins
        assert_eq!(grid_pixel_width(&grid, 2400.0), 2400.0);
        // Empty grid floors at 1600 or the screen
        assert_eq!(grid_pixel_width(&TimelineGrid::empty(), 800.0), 1600.0);
        assert_eq!(grid_pixel_width(&TimelineGrid::empty(), 1920.0), 1920.0);
    }
}
