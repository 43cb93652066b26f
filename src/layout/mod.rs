//! Positioning algorithms over the calendar grid.
//!
//! These are pure functions: they allocate fresh outputs, never mutate their
//! inputs, and are recomputed from scratch on every render pass. Each one
//! has a documented fallback instead of an error path, so malformed records
//! degrade to visually reasonable defaults.

pub mod placement;
pub mod sizing;
pub mod stacking;
pub mod viewport;

pub use placement::{map_point, map_span, PlacementConfig, PointPlacement, SpanPlacement};
pub use sizing::{duration_width, grid_pixel_width, NodeSizing};
pub use stacking::{group_by_column, stack_index, ColumnBuckets};
pub use viewport::{plan_viewport, Viewport, ViewportConfig};
