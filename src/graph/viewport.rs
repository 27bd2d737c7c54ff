//! Pan/zoom state and every operation allowed to change it.
//!
//! Screen coordinates here are logical canvas units as seen on the viewing
//! surface; content coordinates are the layout space. The mapping is
//! `screen = offset + content * scale`.

use log::debug;

use super::types::PositionedEntity;

/// Translate plus uniform scale from content to screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	/// Horizontal offset in screen units.
	pub x: f64,
	/// Vertical offset in screen units.
	pub y: f64,
	/// Uniform zoom factor.
	pub scale: f64,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			scale: 1.0,
		}
	}
}

impl Transform {
	/// Content point to screen point.
	pub fn to_screen(&self, cx: f64, cy: f64) -> (f64, f64) {
		(self.x + cx * self.scale, self.y + cy * self.scale)
	}

	/// Screen point to content point.
	pub fn to_content(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.scale, (sy - self.y) / self.scale)
	}
}

/// Limits and steps for [`ViewportController`].
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportConfig {
	/// Width of the logical canvas.
	pub canvas_width: f64,
	/// Height of the logical canvas.
	pub canvas_height: f64,
	/// Lower scale bound.
	pub min_scale: f64,
	/// Upper scale bound.
	pub max_scale: f64,
	/// Scale change per wheel notch or toolbar click.
	pub zoom_step: f64,
	/// Padding added around the entity bounds by zoom-to-fit.
	pub fit_padding: f64,
	/// Zoom-to-fit never goes past this scale.
	pub fit_max_scale: f64,
	/// Scale used when zooming to a single entity.
	pub focus_scale: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			canvas_width: 3000.0,
			canvas_height: 2400.0,
			min_scale: 0.25,
			max_scale: 4.0,
			zoom_step: 0.1,
			fit_padding: 100.0,
			fit_max_scale: 2.0,
			focus_scale: 2.0,
		}
	}
}

/// Wheel zoom direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	/// Increase scale.
	In,
	/// Decrease scale.
	Out,
}

impl ZoomDirection {
	/// Wheel convention: scrolling down (positive delta) zooms out.
	pub fn from_wheel_delta(delta_y: f64) -> Self {
		if delta_y > 0.0 {
			ZoomDirection::Out
		} else {
			ZoomDirection::In
		}
	}
}

/// Which pointer button an event came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
	/// Usually the left button; the only one that pans or selects.
	Primary,
	/// Usually the wheel button.
	Auxiliary,
	/// Usually the right button.
	Secondary,
	/// Anything else.
	Other,
}

impl From<i16> for PointerButton {
	/// DOM `MouseEvent.button` numbering.
	fn from(button: i16) -> Self {
		match button {
			0 => PointerButton::Primary,
			1 => PointerButton::Auxiliary,
			2 => PointerButton::Secondary,
			_ => PointerButton::Other,
		}
	}
}

/// Owns the [`Transform`]. Scale stays within `[min_scale, max_scale]` after
/// every method returns.
#[derive(Clone, Debug, Default)]
pub struct ViewportController {
	config: ViewportConfig,
	transform: Transform,
	drag_origin: Option<(f64, f64)>,
}

impl ViewportController {
	/// Controller at the identity transform.
	pub fn new(config: ViewportConfig) -> Self {
		Self {
			config,
			transform: Transform::default(),
			drag_origin: None,
		}
	}

	/// Current transform.
	pub fn transform(&self) -> Transform {
		self.transform
	}

	pub fn config(&self) -> &ViewportConfig {
		&self.config
	}

	/// Readout for the toolbar, e.g. `150` for 1.5x.
	pub fn zoom_percent(&self) -> i64 {
		(self.transform.scale * 100.0).round() as i64
	}

	pub fn is_panning(&self) -> bool {
		self.drag_origin.is_some()
	}

	fn clamp_scale(&self, scale: f64) -> f64 {
		scale.clamp(self.config.min_scale, self.config.max_scale)
	}

	/// Zoom one step around the content point under the cursor.
	pub fn wheel_zoom(&mut self, screen_x: f64, screen_y: f64, direction: ZoomDirection) {
		let (cx, cy) = self.transform.to_content(screen_x, screen_y);
		let delta = match direction {
			ZoomDirection::In => self.config.zoom_step,
			ZoomDirection::Out => -self.config.zoom_step,
		};
		self.zoom(delta, Some((cx, cy)));
	}

	/// Change scale by `delta` keeping content point `anchor` fixed on screen.
	/// Without an anchor, the content point at the canvas centre is used.
	pub fn zoom(&mut self, delta: f64, anchor: Option<(f64, f64)>) {
		let (cx, cy) = anchor.unwrap_or((
			self.config.canvas_width / 2.0,
			self.config.canvas_height / 2.0,
		));
		let current = self.transform.scale;
		let scale = self.clamp_scale(current + delta);
		let diff = scale - current;
		self.transform = Transform {
			x: self.transform.x - cx * diff,
			y: self.transform.y - cy * diff,
			scale,
		};
	}

	/// Start a drag. Only the primary button pans; returns whether it started.
	pub fn pan_start(&mut self, screen_x: f64, screen_y: f64, button: PointerButton) -> bool {
		if button != PointerButton::Primary {
			return false;
		}
		self.drag_origin = Some((screen_x - self.transform.x, screen_y - self.transform.y));
		true
	}

	pub fn pan_move(&mut self, screen_x: f64, screen_y: f64) {
		if let Some((ox, oy)) = self.drag_origin {
			self.transform.x = screen_x - ox;
			self.transform.y = screen_y - oy;
		}
	}

	pub fn pan_end(&mut self) {
		self.drag_origin = None;
	}

	/// Back to `{x: 0, y: 0, scale: 1}`.
	pub fn reset(&mut self) {
		self.transform = Transform::default();
	}

	/// Fit every entity plus padding into the canvas, never beyond
	/// `fit_max_scale`. Does nothing for an empty list.
	pub fn zoom_to_fit(&mut self, entities: &[PositionedEntity]) {
		let Some((min_x, min_y, max_x, max_y)) = bounds(entities) else {
			return;
		};
		let pad = self.config.fit_padding;
		let (min_x, min_y, max_x, max_y) = (min_x - pad, min_y - pad, max_x + pad, max_y + pad);
		let (box_w, box_h) = (max_x - min_x, max_y - min_y);
		let scale = self.clamp_scale(
			(self.config.canvas_width / box_w)
				.min(self.config.canvas_height / box_h)
				.min(self.config.fit_max_scale),
		);
		self.center_on((min_x + max_x) / 2.0, (min_y + max_y) / 2.0, scale);
		debug!("zoom to fit: {} entities at scale {:.3}", entities.len(), scale);
	}

	/// Centre `entity` at `focus_scale`.
	pub fn zoom_to_entity(&mut self, entity: &PositionedEntity) {
		let scale = self.clamp_scale(self.config.focus_scale);
		self.center_on(entity.x, entity.y, scale);
	}

	fn center_on(&mut self, cx: f64, cy: f64, scale: f64) {
		self.transform = Transform {
			x: self.config.canvas_width / 2.0 - cx * scale,
			y: self.config.canvas_height / 2.0 - cy * scale,
			scale,
		};
	}
}

fn bounds(entities: &[PositionedEntity]) -> Option<(f64, f64, f64, f64)> {
	let first = entities.first()?;
	Some(entities.iter().fold(
		(first.x, first.y, first.x, first.y),
		|(x0, y0, x1, y1), e| (x0.min(e.x), y0.min(e.y), x1.max(e.x), y1.max(e.y)),
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::types::{Entity, EntityType};

	const EPS: f64 = 1e-9;

	fn placed(id: &str, x: f64, y: f64) -> PositionedEntity {
		PositionedEntity {
			entity: Entity {
				id: id.into(),
				name: id.into(),
				kind: EntityType::Topic,
				article_ids: Vec::new(),
				mention_count: 0,
			},
			x,
			y,
			radius: 32.0,
		}
	}

	fn in_bounds(v: &ViewportController) -> bool {
		let s = v.transform().scale;
		(0.25..=4.0).contains(&s)
	}

	#[test]
	fn zoom_out_clamps_at_minimum() {
		let mut v = ViewportController::default();
		for _ in 0..40 {
			v.zoom(-0.1, None);
			assert!(in_bounds(&v));
		}
		assert_eq!(v.transform().scale, 0.25);
		assert_eq!(v.zoom_percent(), 25);
	}

	#[test]
	fn zoom_in_clamps_at_maximum() {
		let mut v = ViewportController::default();
		for _ in 0..60 {
			v.wheel_zoom(10.0, 20.0, ZoomDirection::In);
		}
		assert_eq!(v.transform().scale, 4.0);
	}

	#[test]
	fn zoom_keeps_anchor_stationary() {
		let mut v = ViewportController::default();
		v.pan_start(0.0, 0.0, PointerButton::Primary);
		v.pan_move(-230.0, 140.0);
		v.pan_end();
		for &(delta, cx, cy) in &[(0.1, 800.0, 600.0), (0.7, 10.0, 2300.0), (-0.3, 2999.0, 1.0)] {
			let before = v.transform().to_screen(cx, cy);
			v.zoom(delta, Some((cx, cy)));
			let after = v.transform().to_screen(cx, cy);
			assert!((before.0 - after.0).abs() < EPS);
			assert!((before.1 - after.1).abs() < EPS);
		}
	}

	#[test]
	fn wheel_zoom_keeps_cursor_content_point() {
		let mut v = ViewportController::default();
		v.zoom(0.5, Some((100.0, 100.0)));
		let cursor = (1234.0, 567.0);
		let content = v.transform().to_content(cursor.0, cursor.1);
		v.wheel_zoom(cursor.0, cursor.1, ZoomDirection::Out);
		let back = v.transform().to_screen(content.0, content.1);
		assert!((back.0 - cursor.0).abs() < EPS);
		assert!((back.1 - cursor.1).abs() < EPS);
	}

	#[test]
	fn toolbar_zoom_anchors_on_canvas_centre_after_pan() {
		let mut v = ViewportController::default();
		v.pan_start(0.0, 0.0, PointerButton::Primary);
		v.pan_move(-600.0, 300.0);
		v.pan_end();
		let before = v.transform();
		v.zoom(0.1, None);
		let after = v.transform();
		let diff = after.scale - before.scale;
		assert!((after.scale - 1.1).abs() < EPS);
		assert!((after.x - (before.x - 1500.0 * diff)).abs() < EPS);
		assert!((after.y - (before.y - 1200.0 * diff)).abs() < EPS);
		assert!((after.x + 750.0).abs() < EPS);
		assert!((after.y - 180.0).abs() < EPS);
	}

	#[test]
	fn pan_follows_pointer_from_drag_origin() {
		let mut v = ViewportController::default();
		assert!(v.pan_start(100.0, 100.0, PointerButton::Primary));
		v.pan_move(150.0, 80.0);
		assert_eq!(v.transform(), Transform { x: 50.0, y: -20.0, scale: 1.0 });
		v.pan_end();
		v.pan_move(900.0, 900.0);
		assert_eq!(v.transform().x, 50.0);
	}

	#[test]
	fn only_primary_button_pans() {
		let mut v = ViewportController::default();
		assert!(!v.pan_start(0.0, 0.0, PointerButton::Secondary));
		assert!(!v.is_panning());
		assert_eq!(PointerButton::from(0), PointerButton::Primary);
		assert_eq!(PointerButton::from(2), PointerButton::Secondary);
	}

	#[test]
	fn reset_restores_identity() {
		let mut v = ViewportController::default();
		v.zoom(1.0, Some((3.0, 4.0)));
		v.reset();
		assert_eq!(v.transform(), Transform::default());
	}

	#[test]
	fn fit_contains_all_entities() {
		let entities = vec![
			placed("a", 300.0, 250.0),
			placed("b", 2700.0, 400.0),
			placed("c", 1600.0, 2100.0),
		];
		let mut v = ViewportController::default();
		v.zoom_to_fit(&entities);
		assert!(in_bounds(&v));
		let t = v.transform();
		for e in &entities {
			let (sx, sy) = t.to_screen(e.x, e.y);
			let pad = 100.0 * t.scale;
			assert!(sx - pad >= -EPS && sx + pad <= 3000.0 + EPS);
			assert!(sy - pad >= -EPS && sy + pad <= 2400.0 + EPS);
		}
	}

	#[test]
	fn fit_never_exceeds_double_scale() {
		let mut v = ViewportController::default();
		v.zoom_to_fit(&[placed("a", 500.0, 500.0)]);
		assert_eq!(v.transform().scale, 2.0);
		assert_eq!(v.transform().to_screen(500.0, 500.0), (1500.0, 1200.0));
	}

	#[test]
	fn fit_on_empty_is_a_no_op() {
		let mut v = ViewportController::default();
		v.zoom(0.4, None);
		let before = v.transform();
		v.zoom_to_fit(&[]);
		assert_eq!(v.transform(), before);
	}

	#[test]
	fn zoom_to_entity_centres_it() {
		let mut v = ViewportController::default();
		v.zoom_to_entity(&placed("a", 700.0, 1900.0));
		let t = v.transform();
		assert_eq!(t.scale, 2.0);
		assert_eq!(t.to_screen(700.0, 1900.0), (1500.0, 1200.0));
	}
}
