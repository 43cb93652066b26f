//! Phaseline - WASM Module
//!
//! This module provides the timeline positioning engine for the Phaseline
//! project-graph visualization. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen.
//!
//! # Architecture
//!
//! - `timeline`: Task/phase records, the date window, and the calendar grid
//! - `layout`: Span/point placement, stacking, sizing, viewport planning
//!
//! The host feeds already-normalized phase records and a date window in;
//! the engine hands back per-column grid descriptors, per-entity pixel
//! coordinates, and an initial viewport. All computation is pure and
//! synchronous; `today` and the screen width are always supplied by the
//! caller, never read from the environment.

use chrono::NaiveDate;
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod layout;
pub mod timeline;

use layout::{
    duration_width, grid_pixel_width, group_by_column, map_point, map_span, plan_viewport,
    stack_index, NodeSizing, PlacementConfig, PointPlacement, SpanPlacement, ViewportConfig,
};
use timeline::{ColumnKind, PhaseRecord, TimelineGrid, TimelineRange};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log a warning to the browser console on fail-soft paths.
fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Convert an epoch-millisecond timestamp to a calendar date.
fn date_from_millis(ms: f64) -> Option<NaiveDate> {
    if !ms.is_finite() {
        return None;
    }
    chrono::DateTime::from_timestamp_millis(ms as i64).map(|dt| dt.date_naive())
}

/// Main entry point for the timeline engine.
///
/// This struct wraps the grid and the loaded phase collection and provides
/// the public API exposed to JavaScript. Positions are recomputed from the
/// current inputs on every call; nothing is cached across mutations.
#[wasm_bindgen]
pub struct PhaselineWasm {
    grid: TimelineGrid,
    phases: Vec<PhaseRecord>,
    placement: PlacementConfig,
    viewport: ViewportConfig,
}

#[wasm_bindgen]
impl PhaselineWasm {
    /// Create an engine with no timeline and no phases.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            grid: TimelineGrid::empty(),
            phases: Vec::new(),
            placement: PlacementConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }

    // =========================================================================
    // Data Loading
    // =========================================================================

    /// Load the phase collection from a JS array of phase records.
    ///
    /// Malformed input degrades to an empty collection (with a console
    /// warning) rather than throwing. Returns the number of phases loaded.
    #[wasm_bindgen(js_name = loadPhases)]
    pub fn load_phases(&mut self, phases: JsValue) -> u32 {
        self.phases = match serde_wasm_bindgen::from_value(phases) {
            Ok(phases) => phases,
            Err(_) => {
                warn("phaseline: could not parse phase records, loading none");
                Vec::new()
            }
        };
        self.phases.len() as u32
    }

    /// Build the grid for an explicit window given as epoch milliseconds.
    ///
    /// `granularity` is one of `"daily"`, `"weekly"`, `"monthly"`. A missing
    /// or reversed window yields an empty grid.
    #[wasm_bindgen(js_name = setTimeline)]
    pub fn set_timeline(&mut self, start_ms: f64, end_ms: f64, granularity: &str) {
        let (Some(start), Some(end)) = (date_from_millis(start_ms), date_from_millis(end_ms))
        else {
            warn("phaseline: invalid timeline window, grid cleared");
            self.grid = TimelineGrid::empty();
            return;
        };
        self.grid = TimelineGrid::generate(start, end, ColumnKind::from_granularity(granularity));
    }

    /// Derive the window and granularity from the loaded tasks' dates and
    /// rebuild the grid. Without any dated task the grid covers the 30 days
    /// from `today` at daily granularity.
    #[wasm_bindgen(js_name = deriveTimeline)]
    pub fn derive_timeline(&mut self, today_ms: f64) {
        let today = date_from_millis(today_ms).unwrap_or_default();
        let tasks = self.phases.iter().flat_map(|p| p.tasks.iter());
        self.grid = TimelineGrid::from_range(&TimelineRange::from_tasks(tasks, today));
    }

    // =========================================================================
    // Grid Queries
    // =========================================================================

    /// Number of columns in the current grid.
    #[wasm_bindgen(js_name = columnCount)]
    pub fn column_count(&self) -> u32 {
        self.grid.len() as u32
    }

    /// The column descriptors as a JS array, for drawing the calendar grid.
    pub fn columns(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.grid.columns()).unwrap_or(JsValue::NULL)
    }

    /// Resolve an epoch-millisecond date to its column index.
    ///
    /// Invalid dates and empty grids resolve to 0.
    #[wasm_bindgen(js_name = resolveColumn)]
    pub fn resolve_column(&self, date_ms: f64) -> u32 {
        date_from_millis(date_ms)
            .map(|date| self.grid.resolve(date))
            .unwrap_or(0) as u32
    }

    /// Total pixel width of the drawing surface behind the grid.
    #[wasm_bindgen(js_name = gridWidth)]
    pub fn grid_width(&self, screen_width: f32) -> f32 {
        grid_pixel_width(&self.grid, screen_width)
    }

    // =========================================================================
    // Entity Placement
    // =========================================================================

    /// Placement `{x, width}` for the phase at `index`.
    ///
    /// An out-of-range index gets the ordinal fallback for that index, so
    /// the host can render placeholders without bounds checks.
    #[wasm_bindgen(js_name = phaseSpan)]
    pub fn phase_span(&self, index: u32) -> JsValue {
        let placement = match self.phases.get(index as usize) {
            Some(phase) => map_span(phase, &self.grid, &self.placement),
            None => SpanPlacement {
                x: self.placement.fallback_base_x
                    + index as f32 * self.placement.phase_fallback_step,
                width: self.placement.min_span_width,
            },
        };
        serde_wasm_bindgen::to_value(&placement).unwrap_or(JsValue::NULL)
    }

    /// Duration-proportional pixel width for the phase at `index`.
    #[wasm_bindgen(js_name = phaseWidth)]
    pub fn phase_width(&self, index: u32) -> f32 {
        let duration = self
            .phases
            .get(index as usize)
            .map(|p| p.duration_days() as f32);
        duration_width(duration, &self.grid, &NodeSizing::phase())
    }

    /// Placement `{x, y}` for one task, identified by phase and task index.
    ///
    /// The stacking offset is derived from the task's position within its
    /// name-sorted column bucket across all loaded phases.
    #[wasm_bindgen(js_name = taskPoint)]
    pub fn task_point(&self, phase_index: u32, task_index: u32) -> JsValue {
        let task = self
            .phases
            .get(phase_index as usize)
            .and_then(|p| p.tasks.get(task_index as usize));

        let placement = match task {
            Some(task) => {
                let all_tasks: Vec<_> = self
                    .phases
                    .iter()
                    .flat_map(|p| p.tasks.iter().cloned())
                    .collect();
                let buckets = group_by_column(&all_tasks, &self.grid);
                let stack = stack_index(&buckets, task);
                map_point(task, &self.grid, stack, &self.placement)
            }
            None => PointPlacement {
                x: self.placement.fallback_base_x,
                y: self.placement.task_base_y,
            },
        };
        serde_wasm_bindgen::to_value(&placement).unwrap_or(JsValue::NULL)
    }

    /// Duration-proportional pixel width for one task's marker.
    #[wasm_bindgen(js_name = taskWidth)]
    pub fn task_width(&self, phase_index: u32, task_index: u32) -> f32 {
        let duration = self
            .phases
            .get(phase_index as usize)
            .and_then(|p| p.tasks.get(task_index as usize))
            .and_then(|t| t.time_estimate_days);
        duration_width(duration, &self.grid, &NodeSizing::task())
    }

    /// All task placements as a flat `Float32Array` `[x0, y0, x1, y1, ...]`,
    /// one pair per task in phase order then upstream task order.
    #[wasm_bindgen(js_name = taskPositionsFlat)]
    pub fn task_positions_flat(&self) -> Float32Array {
        let all_tasks: Vec<_> = self
            .phases
            .iter()
            .flat_map(|p| p.tasks.iter().cloned())
            .collect();
        let buckets = group_by_column(&all_tasks, &self.grid);

        let mut positions = Vec::with_capacity(all_tasks.len() * 2);
        for task in &all_tasks {
            let stack = stack_index(&buckets, task);
            let placement = map_point(task, &self.grid, stack, &self.placement);
            positions.push(placement.x);
            positions.push(placement.y);
        }

        Float32Array::from(&positions[..])
    }

    // =========================================================================
    // Viewport
    // =========================================================================

    /// Initial viewport `{x, y, zoom}` centering today and framing the
    /// currently active phases.
    #[wasm_bindgen(js_name = planViewport)]
    pub fn plan_viewport(&self, today_ms: f64, screen_width: f32) -> JsValue {
        let today = date_from_millis(today_ms).unwrap_or_default();
        let viewport = plan_viewport(
            &self.grid,
            &self.phases,
            today,
            screen_width,
            &self.viewport,
        );
        serde_wasm_bindgen::to_value(&viewport).unwrap_or(JsValue::NULL)
    }
}

impl Default for PhaselineWasm {
    fn default() -> Self {
        Self::new()
    }
}
