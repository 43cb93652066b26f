//! Span and point placement on the calendar grid.
//!
//! Phases stretch across the columns their pooled task dates cover; tasks
//! sit centered in the single column their reference date resolves to, with
//! a vertical stacking offset when several tasks share a column. Every path
//! is total: missing dates and empty grids degrade to ordinal-based
//! positions instead of erroring, so a half-populated project still renders.

use serde::Serialize;

use crate::timeline::{PhaseRecord, TaskRecord, TimelineGrid};

/// Policy constants for placement and its fallbacks.
#[derive(Debug, Clone)]
pub struct PlacementConfig {
    /// Base x for ordinal fallback positions (default: 150).
    pub fallback_base_x: f32,
    /// Horizontal step between phase fallback positions (default: 250).
    pub phase_fallback_step: f32,
    /// Horizontal step between task fallback positions (default: 200).
    pub task_fallback_step: f32,
    /// Floor for every computed x (default: 50).
    pub min_x: f32,
    /// Floor for span widths (default: 200).
    pub min_span_width: f32,
    /// Baseline row for task nodes (default: 760).
    pub task_base_y: f32,
    /// Vertical increment per stacked task (default: 80).
    pub stack_step: f32,
    /// Half the assumed task-node width, subtracted to center the node
    /// within its column (default: 70).
    pub node_center_offset: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            fallback_base_x: 150.0,
            phase_fallback_step: 250.0,
            task_fallback_step: 200.0,
            min_x: 50.0,
            min_span_width: 200.0,
            task_base_y: 760.0,
            stack_step: 80.0,
            node_center_offset: 70.0,
        }
    }
}

/// Horizontal placement of a phase block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpanPlacement {
    /// Left edge in pixels.
    pub x: f32,
    /// Block width in pixels.
    pub width: f32,
}

/// Placement of a task marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointPlacement {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels, including the stacking offset.
    pub y: f32,
}

/// Map a phase onto the grid as an `{x, width}` span.
///
/// The span runs from the column containing the phase's earliest task date
/// to the column containing its latest, inclusive. A dateless phase or an
/// empty grid yields the ordinal fallback `x = 150 + ordinal * 250`,
/// `width = 200`.
pub fn map_span(
    phase: &PhaseRecord,
    grid: &TimelineGrid,
    config: &PlacementConfig,
) -> SpanPlacement {
    let span = if grid.is_empty() { None } else { phase.span() };
    let Some((start, end)) = span else {
        return SpanPlacement {
            x: config.fallback_base_x + phase.ordinal as f32 * config.phase_fallback_step,
            width: config.min_span_width,
        };
    };

    let start_index = grid.resolve(start);
    let end_index = grid.resolve(end);

    let x = grid.x_offset(start_index);
    let width = grid.span_width(start_index, end_index);

    SpanPlacement {
        x: x.max(config.min_x),
        width: width.max(config.min_span_width),
    }
}

/// Map a task onto the grid as an `{x, y}` point.
///
/// The reference date (due first, else start) picks the column; the x is
/// centered within it. `stack_index` comes from the task's position in its
/// sorted column bucket. A dateless task or an empty grid yields the ordinal
/// fallback `x = 150 + phase * 200`. The y is always the baseline row plus
/// the stacking offset.
pub fn map_point(
    task: &TaskRecord,
    grid: &TimelineGrid,
    stack_index: usize,
    config: &PlacementConfig,
) -> PointPlacement {
    let y = config.task_base_y + stack_index as f32 * config.stack_step;

    let reference = if grid.is_empty() {
        None
    } else {
        task.reference_date()
    };
    let Some(date) = reference else {
        return PointPlacement {
            x: config.fallback_base_x + task.phase as f32 * config.task_fallback_step,
            y,
        };
    };

    let index = grid.resolve(date);
    let column_width = grid
        .column(index)
        .map(|c| c.pixel_width)
        .unwrap_or_default();
    let x = grid.x_offset(index) + column_width / 2.0 - config.node_center_offset;

    PointPlacement {
        x: x.max(config.min_x),
        y,
    }
}
