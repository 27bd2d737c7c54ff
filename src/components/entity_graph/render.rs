use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::GraphError;
use crate::graph::style::{BACKGROUND, LABEL_FILL, RING_STROKE};
use crate::graph::Frame;

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GraphError> {
	canvas
		.get_context("2d")?
		.ok_or(GraphError::NoContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| GraphError::NoContext)
}

/// Draw one frame onto the whole canvas backing store.
pub fn draw(canvas: &HtmlCanvasElement, frame: &Frame) -> Result<(), GraphError> {
	let ctx = context_2d(canvas)?;
	render(frame, &ctx, canvas.width() as f64, canvas.height() as f64)
}

pub fn render(
	frame: &Frame,
	ctx: &CanvasRenderingContext2d,
	width: f64,
	height: f64,
) -> Result<(), GraphError> {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, width, height);
	ctx.save();
	let t = frame.transform;
	let drawn = ctx
		.translate(t.x, t.y)
		.and_then(|_| ctx.scale(t.scale, t.scale))
		.map_err(GraphError::from)
		.and_then(|_| {
			draw_edges(frame, ctx);
			draw_nodes(frame, ctx)
		});
	ctx.restore();
	drawn
}

fn draw_edges(frame: &Frame, ctx: &CanvasRenderingContext2d) {
	let positions: HashMap<&str, (f64, f64)> = frame
		.nodes
		.iter()
		.map(|n| (n.id.as_str(), (n.x, n.y)))
		.collect();

	for edge in &frame.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (
			positions.get(edge.source_id.as_str()),
			positions.get(edge.target_id.as_str()),
		) else {
			continue;
		};
		ctx.set_global_alpha(edge.opacity);
		ctx.set_stroke_style_str(edge.stroke_color);
		ctx.set_line_width(edge.stroke_width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(frame: &Frame, ctx: &CanvasRenderingContext2d) -> Result<(), GraphError> {
	ctx.set_text_align("center");
	for node in &frame.nodes {
		if let Some((ring_radius, ring_width)) = node.ring {
			ctx.begin_path();
			ctx.arc(node.x, node.y, ring_radius, 0.0, 2.0 * PI)?;
			ctx.set_stroke_style_str(RING_STROKE);
			ctx.set_line_width(ring_width);
			ctx.stroke();
		}

		ctx.begin_path();
		ctx.arc(node.x, node.y, node.render_radius, 0.0, 2.0 * PI)?;
		ctx.set_fill_style_str(node.fill_color);
		ctx.fill();
		ctx.set_stroke_style_str(node.stroke_color);
		ctx.set_line_width(node.stroke_width);
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_FILL);
		ctx.set_font(&format!("{}px sans-serif", node.label_font_size));
		ctx.fill_text(&node.label_text, node.x, node.y + node.label_offset)?;
	}
	Ok(())
}
