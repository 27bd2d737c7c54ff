//! Per-frame output for the renderer.
//!
//! Sizes follow semantic zoom: radii and offsets shrink with `1/sqrt(scale)`,
//! strokes and fonts with `1/scale`. The renderer applies the transform to the
//! whole drawable set, so apparent node size stays roughly constant.

use super::selection::{EdgeEmphasis, NodeEmphasis, SelectionModel};
use super::style;
use super::types::{PositionedEntity, Relation};
use super::viewport::Transform;

#[derive(Clone, Debug, PartialEq)]
pub struct DrawableNode {
	pub id: String,
	pub x: f64,
	pub y: f64,
	pub render_radius: f64,
	pub fill_color: &'static str,
	pub stroke_color: &'static str,
	pub stroke_width: f64,
	/// Selection ring radius and stroke width, only for the selected node.
	pub ring: Option<(f64, f64)>,
	pub label_text: String,
	pub label_font_size: f64,
	/// Distance from node centre to label baseline.
	pub label_offset: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DrawableEdge {
	pub source_id: String,
	pub target_id: String,
	pub stroke_color: &'static str,
	pub stroke_width: f64,
	pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
	pub nodes: Vec<DrawableNode>,
	pub edges: Vec<DrawableEdge>,
	pub transform: Transform,
	pub zoom_percent: i64,
}

/// Semantic-zoom factors for a given scale: `(radius, line)`.
pub fn zoom_factors(scale: f64) -> (f64, f64) {
	(1.0 / scale.sqrt(), 1.0 / scale)
}

pub fn build(
	entities: &[PositionedEntity],
	relations: &[Relation],
	selection: &SelectionModel,
	hovered: Option<&str>,
	transform: Transform,
) -> Frame {
	let (rf, lf) = zoom_factors(transform.scale);
	let neighbors = selection.neighbors(relations);

	let edges = relations
		.iter()
		.map(|rel| {
			let (stroke_color, weight, opacity) = match selection.edge_emphasis(rel) {
				EdgeEmphasis::Dim { weight } => (style::EDGE_DIM, weight, style::EDGE_DIM_OPACITY),
				EdgeEmphasis::Active { weight } => {
					(style::EDGE_ACTIVE, weight, style::EDGE_ACTIVE_OPACITY)
				}
				EdgeEmphasis::Faded => (
					style::EDGE_DIM,
					style::EDGE_FADED_WEIGHT,
					style::EDGE_FADED_OPACITY,
				),
			};
			DrawableEdge {
				source_id: rel.source_id.clone(),
				target_id: rel.target_id.clone(),
				stroke_color,
				stroke_width: weight * lf,
				opacity,
			}
		})
		.collect();

	let nodes = entities
		.iter()
		.map(|e| {
			let render_radius = e.radius * rf;
			let emphasis = selection.node_emphasis(e.id(), &neighbors, hovered);
			let (fill_color, stroke_color, stroke) = match emphasis {
				NodeEmphasis::Selected => (
					style::SELECTED_FILL,
					style::HOVER_STROKE,
					style::SELECTED_STROKE_WIDTH,
				),
				NodeEmphasis::Neighbor => (
					style::NEIGHBOR_FILL,
					style::NODE_STROKE,
					style::NODE_STROKE_WIDTH,
				),
				NodeEmphasis::Normal { hovered: true } => (
					style::type_fill(e.entity.kind),
					style::HOVER_STROKE,
					style::HOVER_STROKE_WIDTH,
				),
				NodeEmphasis::Normal { hovered: false } => (
					style::type_fill(e.entity.kind),
					style::NODE_STROKE,
					style::NODE_STROKE_WIDTH,
				),
			};
			let ring = (emphasis == NodeEmphasis::Selected).then(|| {
				(
					render_radius + style::RING_OFFSET * rf,
					style::NODE_STROKE_WIDTH * lf,
				)
			});
			DrawableNode {
				id: e.entity.id.clone(),
				x: e.x,
				y: e.y,
				render_radius,
				fill_color,
				stroke_color,
				stroke_width: stroke * lf,
				ring,
				label_text: e.entity.name.clone(),
				label_font_size: style::LABEL_FONT_SIZE * lf,
				label_offset: (e.radius + style::LABEL_GAP) * rf,
			}
		})
		.collect();

	Frame {
		nodes,
		edges,
		transform,
		zoom_percent: (transform.scale * 100.0).round() as i64,
	}
}
