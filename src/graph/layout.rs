//! Repulsion-only layout.
//!
//! Every pair of nodes pushes apart each iteration; there is no spring term, so
//! relation strength never pulls nodes together. Late in the run a soft margin
//! pulls stragglers back toward the canvas. Cost is `iterations * N^2` and the
//! call is synchronous, so expect it to get slow past a few hundred entities.

use std::f64::consts::TAU;

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;

use super::types::{Entity, PositionedEntity};

/// Tunables for [`LayoutEngine`]. All distances are logical canvas units.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
	/// Width of the logical canvas.
	pub canvas_width: f64,
	/// Height of the logical canvas.
	pub canvas_height: f64,
	/// Inset used for random initial placement.
	pub init_margin: f64,
	/// Radius given to every positioned entity.
	pub node_radius: f64,
	/// Number of simulation steps per layout.
	pub iterations: usize,
	/// Numerator of the `force / d^2` repulsion law.
	pub repulsion_force: f64,
	/// Pairs closer than this get the strong multiplier.
	pub spacing_threshold: f64,
	/// Multiplier below `spacing_threshold`.
	pub near_multiplier: f64,
	/// Multiplier at or beyond `spacing_threshold`.
	pub far_multiplier: f64,
	/// Fraction of iterations after which the boundary correction kicks in.
	pub boundary_phase: f64,
	/// Distance from each canvas edge the correction pulls toward.
	pub boundary_margin: f64,
	/// Share of the overshoot removed per iteration.
	pub boundary_pull: f64,
	/// Upper bound on the displacement of a single pair interaction.
	pub max_force: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			canvas_width: 3000.0,
			canvas_height: 2400.0,
			init_margin: 200.0,
			node_radius: 32.0,
			iterations: 400,
			repulsion_force: 2_000_000.0,
			spacing_threshold: 400.0,
			near_multiplier: 0.8,
			far_multiplier: 0.15,
			boundary_phase: 0.7,
			boundary_margin: 100.0,
			boundary_pull: 0.1,
			max_force: 100.0,
		}
	}
}

/// A simulated position in canvas units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal canvas coordinate.
	pub x: f64,
	/// Vertical canvas coordinate.
	pub y: f64,
}

/// Computes positions for a filtered entity list.
///
/// The random source is injected so tests can seed it; two runs with the same
/// input and an unseeded source are not expected to agree.
#[derive(Clone, Debug)]
pub struct LayoutEngine<R = StdRng> {
	config: LayoutConfig,
	rng: R,
}

impl<R: Rng> LayoutEngine<R> {
	/// Engine drawing initial positions and coincident-pair directions from `rng`.
	pub fn new(config: LayoutConfig, rng: R) -> Self {
		Self { config, rng }
	}

	/// Tunables this engine runs with.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Lay out `entities`; output order matches input order.
	pub fn layout(&mut self, entities: &[Entity]) -> Vec<PositionedEntity> {
		let mut points = self.initial_points(entities.len());
		self.simulate(&mut points);
		debug!(
			"layout: {} entities, {} iterations",
			entities.len(),
			self.config.iterations
		);

		entities
			.iter()
			.zip(points)
			.map(|(entity, p)| PositionedEntity {
				entity: entity.clone(),
				x: p.x,
				y: p.y,
				radius: self.config.node_radius,
			})
			.collect()
	}

	/// Uniform random placement inside the init margin.
	pub fn initial_points(&mut self, n: usize) -> Vec<Point> {
		let c = &self.config;
		let (x_range, y_range) = (
			span(c.init_margin, c.canvas_width - c.init_margin),
			span(c.init_margin, c.canvas_height - c.init_margin),
		);
		(0..n)
			.map(|_| Point {
				x: sample(&mut self.rng, x_range),
				y: sample(&mut self.rng, y_range),
			})
			.collect()
	}

	/// Run every iteration over `points` in place.
	pub fn simulate(&mut self, points: &mut [Point]) {
		for iteration in 0..self.config.iterations {
			self.step(points, iteration);
		}
	}

	/// One iteration: pairwise repulsion, then the boundary correction once
	/// `iteration` is inside the boundary phase.
	pub fn step(&mut self, points: &mut [Point], iteration: usize) {
		self.repel(points);
		let boundary_start = (self.config.iterations as f64 * self.config.boundary_phase) as usize;
		if iteration >= boundary_start {
			self.pull_into_bounds(points);
		}
	}

	fn repel(&mut self, points: &mut [Point]) {
		let c = &self.config;
		for i in 0..points.len() {
			for j in (i + 1)..points.len() {
				let (dx, dy) = (points[j].x - points[i].x, points[j].y - points[i].y);
				let raw = (dx * dx + dy * dy).sqrt();
				// Coincident points have no direction; pick one.
				let (ux, uy) = if raw > 0.0 {
					(dx / raw, dy / raw)
				} else {
					let angle = self.rng.gen_range(0.0..TAU);
					(angle.cos(), angle.sin())
				};
				let d = raw.max(1.0);
				let multiplier = if d < c.spacing_threshold {
					c.near_multiplier
				} else {
					c.far_multiplier
				};
				// Capped so pairs floored to d = 1 (coincident or nearly so) move at
				// most `max_force` instead of leaving the canvas in one step.
				let force = (c.repulsion_force / (d * d) * multiplier).min(c.max_force);

				points[i].x -= ux * force;
				points[i].y -= uy * force;
				points[j].x += ux * force;
				points[j].y += uy * force;
			}
		}
	}

	fn pull_into_bounds(&self, points: &mut [Point]) {
		let c = &self.config;
		for p in points.iter_mut() {
			p.x = pull_axis(p.x, c.boundary_margin, c.canvas_width - c.boundary_margin, c.boundary_pull);
			p.y = pull_axis(p.y, c.boundary_margin, c.canvas_height - c.boundary_margin, c.boundary_pull);
		}
	}
}

fn span(lo: f64, hi: f64) -> (f64, f64) {
	if hi > lo { (lo, hi) } else { ((lo + hi) / 2.0, (lo + hi) / 2.0) }
}

fn sample<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
	if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

/// Soft correction: move a fraction of the overshoot back, never clamp.
fn pull_axis(v: f64, lo: f64, hi: f64, pull: f64) -> f64 {
	if v < lo {
		v + (lo - v) * pull
	} else if v > hi {
		v - (v - hi) * pull
	} else {
		v
	}
}
