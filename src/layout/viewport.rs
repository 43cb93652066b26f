//! Initial viewport planning.
//!
//! Picks the pan and zoom the graph opens with: today's column is centered
//! horizontally, and when phases are currently active (or about to start)
//! the zoom is chosen so their combined column span fits on screen. The
//! nearest-column fallback in resolution is expected to fire routinely here,
//! since "today" rarely lands exactly on a week or month boundary.

use chrono::NaiveDate;
use serde::Serialize;

use crate::timeline::{ColumnKind, PhaseRecord, TimelineGrid};

/// Policy constants for viewport planning.
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    /// Pan x when the grid is empty (default: 10).
    pub default_x: f32,
    /// Fixed pan y (default: 250).
    pub default_y: f32,
    /// Zoom when no active phase needs framing (default: 0.75).
    pub default_zoom: f32,
    /// Lower zoom clamp (default: 0.3).
    pub min_zoom: f32,
    /// Upper zoom clamp (default: 1.2).
    pub max_zoom: f32,
    /// Fraction of the screen the active span should fill (default: 0.8).
    pub fit_fraction: f32,
    /// Days ahead of today a phase may start and still count as active
    /// (default: 30).
    pub lookahead_days: i64,
    /// Zoom multiplier applied on monthly grids (default: 0.8).
    pub month_zoom_scale: f32,
    /// Zoom floor after the monthly multiplier (default: 0.5).
    pub month_zoom_floor: f32,
    /// Per-column pan budget: pan x never drops below
    /// `-(columns * pan_floor_step)` (default: 200).
    pub pan_floor_step: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_x: 10.0,
            default_y: 250.0,
            default_zoom: 0.75,
            min_zoom: 0.3,
            max_zoom: 1.2,
            fit_fraction: 0.8,
            lookahead_days: 30,
            month_zoom_scale: 0.8,
            month_zoom_floor: 0.5,
            pan_floor_step: 200.0,
        }
    }
}

/// An initial pan/zoom triple for the graph host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    /// Horizontal pan in pixels (negative pans the content left).
    pub x: f32,
    /// Vertical pan in pixels.
    pub y: f32,
    /// Zoom factor.
    pub zoom: f32,
}

/// Plan the initial viewport for a grid and phase collection.
///
/// Today's resolved column is centered within `screen_width`. When any phase
/// is active (its span covers today, or it starts within the lookahead
/// window), the zoom is set so the union of all active phases' column spans
/// fits within `fit_fraction` of the screen, clamped to the zoom range.
/// Monthly grids get an additional damping multiplier. An empty grid yields
/// the documented default viewport.
pub fn plan_viewport(
    grid: &TimelineGrid,
    phases: &[PhaseRecord],
    today: NaiveDate,
    screen_width: f32,
    config: &ViewportConfig,
) -> Viewport {
    if grid.is_empty() {
        return Viewport {
            x: config.default_x,
            y: config.default_y,
            zoom: config.default_zoom,
        };
    }

    let today_offset = grid.x_offset(grid.resolve(today));
    let mut x = -(today_offset - screen_width / 2.0);
    let mut zoom = config.default_zoom;

    if let Some((lo, hi)) = active_column_range(grid, phases, today, config.lookahead_days) {
        let pixel_span = grid.span_width(lo, hi);
        if pixel_span > 0.0 {
            zoom = (screen_width * config.fit_fraction / pixel_span)
                .clamp(config.min_zoom, config.max_zoom);
        }
    }

    if grid.columns().first().map(|c| c.kind) == Some(ColumnKind::Month) {
        zoom = (zoom * config.month_zoom_scale).max(config.month_zoom_floor);
    }

    let pan_floor = -(grid.len() as f32 * config.pan_floor_step);
    x = x.max(pan_floor);

    Viewport {
        x,
        y: config.default_y,
        zoom,
    }
}

/// Union of the column ranges covered by all active phases.
fn active_column_range(
    grid: &TimelineGrid,
    phases: &[PhaseRecord],
    today: NaiveDate,
    lookahead_days: i64,
) -> Option<(usize, usize)> {
    let mut range: Option<(usize, usize)> = None;
    for phase in phases {
        if !phase.is_active(today, lookahead_days) {
            continue;
        }
        let Some((start, end)) = phase.span() else {
            continue;
        };
        let lo = grid.resolve(start);
        let hi = grid.resolve(end);
        range = Some(match range {
            Some((a, b)) => (a.min(lo), b.max(hi)),
            None => (lo, hi),
        });
    }
    range
}
