//! Colours and base sizes for drawable output, before semantic zoom.

use super::types::EntityType;

pub const BACKGROUND: &str = "#0f172a";

pub const SELECTED_FILL: &str = "#f43f5e";
pub const NEIGHBOR_FILL: &str = "#fbbf24";
pub const NODE_STROKE: &str = "#1e293b";
pub const HOVER_STROKE: &str = "#f8fafc";
pub const RING_STROKE: &str = "#fda4af";
pub const LABEL_FILL: &str = "#e2e8f0";

pub const EDGE_DIM: &str = "#64748b";
pub const EDGE_ACTIVE: &str = "#f43f5e";
pub const EDGE_DIM_OPACITY: f64 = 0.35;
pub const EDGE_ACTIVE_OPACITY: f64 = 0.9;
pub const EDGE_FADED_OPACITY: f64 = 0.05;
/// Width used for faded edges, before zoom.
pub const EDGE_FADED_WEIGHT: f64 = 1.0;

pub const NODE_STROKE_WIDTH: f64 = 2.0;
pub const HOVER_STROKE_WIDTH: f64 = 4.0;
pub const SELECTED_STROKE_WIDTH: f64 = 4.0;
/// Gap between node edge and selection ring.
pub const RING_OFFSET: f64 = 8.0;
/// Distance from node edge to label baseline.
pub const LABEL_GAP: f64 = 18.0;
pub const LABEL_FONT_SIZE: f64 = 16.0;

pub fn type_fill(kind: EntityType) -> &'static str {
	match kind {
		EntityType::Person => "#3b82f6",
		EntityType::Organization => "#8b5cf6",
		EntityType::Topic => "#10b981",
		EntityType::Location => "#f59e0b",
		EntityType::Source => "#64748b",
	}
}
