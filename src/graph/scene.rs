//! The whole pipeline behind one owner: raw input, filter, layout, viewport,
//! selection and pointer state. Every mutator recomputes what it invalidated
//! before returning, so readers always see consistent derived data.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::filter::FilterModel;
use super::frame::{self, Frame};
use super::layout::{LayoutConfig, LayoutEngine};
use super::selection::SelectionModel;
use super::types::{Entity, EntityType, GraphInput, PositionedEntity, Relation};
use super::viewport::{PointerButton, ViewportConfig, ViewportController};

/// Pointer travel, in screen units, below which a press still counts as a click.
pub const CLICK_SLOP: f64 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stale {
	Relations,
	Layout,
}

#[derive(Clone, Debug)]
struct Press {
	origin: (f64, f64),
	target: Option<String>,
	moved: bool,
}

/// What the detail panel shows for the current selection.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityDetails<'a> {
	pub entity: &'a PositionedEntity,
	pub neighbors: Vec<&'a Entity>,
}

#[derive(Clone, Debug)]
pub struct GraphScene<R = StdRng> {
	entities: Vec<Entity>,
	relations: Vec<Relation>,
	filter: FilterModel,
	layout: LayoutEngine<R>,
	positioned: Vec<PositionedEntity>,
	visible_relations: Vec<Relation>,
	viewport: ViewportController,
	selection: SelectionModel,
	hovered: Option<String>,
	press: Option<Press>,
}

impl GraphScene<StdRng> {
	/// Default configuration with a seeded random source.
	pub fn seeded(seed: u64) -> Self {
		Self::new(
			LayoutConfig::default(),
			ViewportConfig::default(),
			StdRng::seed_from_u64(seed),
		)
	}
}

impl<R: Rng> GraphScene<R> {
	pub fn new(layout: LayoutConfig, viewport: ViewportConfig, rng: R) -> Self {
		Self {
			entities: Vec::new(),
			relations: Vec::new(),
			filter: FilterModel::default(),
			layout: LayoutEngine::new(layout, rng),
			positioned: Vec::new(),
			visible_relations: Vec::new(),
			viewport: ViewportController::new(viewport),
			selection: SelectionModel::default(),
			hovered: None,
			press: None,
		}
	}

	pub fn set_graph(&mut self, input: GraphInput) {
		self.entities = input.entities;
		self.relations = input.relations;
		self.recompute(Stale::Layout);
	}

	pub fn set_entities(&mut self, entities: Vec<Entity>) {
		self.entities = entities;
		self.recompute(Stale::Layout);
	}

	/// Relations do not feed the layout, so positions are kept.
	pub fn set_relations(&mut self, relations: Vec<Relation>) {
		self.relations = relations;
		self.recompute(Stale::Relations);
	}

	/// Show or hide a type; returns whether it is now shown.
	pub fn toggle_filter(&mut self, kind: EntityType) -> bool {
		let shown = self.filter.toggle(kind);
		debug!("filter: {} {}", kind.label(), if shown { "shown" } else { "hidden" });
		self.recompute(Stale::Layout);
		shown
	}

	/// Run the layout again from fresh random positions.
	pub fn rebuild_layout(&mut self) {
		self.recompute(Stale::Layout);
	}

	fn recompute(&mut self, stale: Stale) {
		if stale == Stale::Layout {
			let filtered = self.filter.filter_entities(&self.entities);
			self.positioned = self.layout.layout(&filtered);
		}
		self.visible_relations = FilterModel::visible_relations(
			self.positioned.iter().map(PositionedEntity::id),
			&self.relations,
		);

		let known: HashSet<&str> = self.entities.iter().map(|e| e.id.as_str()).collect();
		let dangling = self
			.relations
			.iter()
			.filter(|r| !known.contains(r.source_id.as_str()) || !known.contains(r.target_id.as_str()))
			.count();
		if dangling > 0 {
			warn!("{dangling} relations reference unknown entities and were dropped");
		}

		// A selection or hover that was filtered away is cleared.
		if let Some(id) = self.selection.selected() {
			if self.position_of(id).is_none() {
				debug!("selection {id} no longer visible, clearing");
				self.selection.clear();
			}
		}
		if self.hovered.as_deref().is_some_and(|id| self.position_of(id).is_none()) {
			self.hovered = None;
		}
	}

	pub fn entities(&self) -> &[Entity] {
		&self.entities
	}

	pub fn relations(&self) -> &[Relation] {
		&self.relations
	}

	pub fn filter(&self) -> &FilterModel {
		&self.filter
	}

	pub fn positioned(&self) -> &[PositionedEntity] {
		&self.positioned
	}

	pub fn visible_relations(&self) -> &[Relation] {
		&self.visible_relations
	}

	pub fn position_of(&self, id: &str) -> Option<&PositionedEntity> {
		self.positioned.iter().find(|p| p.id() == id)
	}

	/// Per-type counts over the unfiltered input, in [`EntityType::ALL`] order.
	pub fn type_counts(&self) -> Vec<(EntityType, usize)> {
		let mut counts: HashMap<EntityType, usize> = HashMap::new();
		for e in &self.entities {
			*counts.entry(e.kind).or_default() += 1;
		}
		EntityType::ALL
			.into_iter()
			.map(|k| (k, counts.get(&k).copied().unwrap_or(0)))
			.collect()
	}

	pub fn viewport(&self) -> &ViewportController {
		&self.viewport
	}

	pub fn viewport_mut(&mut self) -> &mut ViewportController {
		&mut self.viewport
	}

	pub fn zoom_to_fit(&mut self) {
		self.viewport.zoom_to_fit(&self.positioned);
	}

	/// Centre the view on `id`. Returns false if it is not visible.
	pub fn zoom_to_entity(&mut self, id: &str) -> bool {
		match self.positioned.iter().find(|p| p.id() == id) {
			Some(entity) => {
				self.viewport.zoom_to_entity(entity);
				true
			}
			None => false,
		}
	}

	pub fn selection(&self) -> &SelectionModel {
		&self.selection
	}

	/// Toggle-select `id`. Returns the new selection.
	pub fn select(&mut self, id: &str) -> Option<String> {
		self.selection.select(id).map(str::to_owned)
	}

	pub fn clear_selection(&mut self) {
		self.selection.clear();
	}

	/// Select `id` (never toggling off) and zoom to it.
	pub fn focus_entity(&mut self, id: &str) -> bool {
		if !self.zoom_to_entity(id) {
			return false;
		}
		self.selection.focus(id);
		true
	}

	pub fn neighbors(&self) -> HashSet<&str> {
		self.selection.neighbors(&self.visible_relations)
	}

	/// `None` when nothing is selected or the selection has no position.
	pub fn selected_details(&self) -> Option<EntityDetails<'_>> {
		let entity = self.position_of(self.selection.selected()?)?;
		let neighbors = self.neighbors();
		Some(EntityDetails {
			entity,
			neighbors: self
				.positioned
				.iter()
				.filter(|p| neighbors.contains(p.id()))
				.map(|p| &p.entity)
				.collect(),
		})
	}

	pub fn hovered(&self) -> Option<&str> {
		self.hovered.as_deref()
	}

	/// Returns whether the hover changed.
	pub fn set_hover(&mut self, id: Option<&str>) -> bool {
		if self.hovered.as_deref() == id {
			return false;
		}
		self.hovered = id.map(str::to_owned);
		true
	}

	/// Topmost visible entity under a screen point, using the rendered radius.
	pub fn hit_test(&self, screen_x: f64, screen_y: f64) -> Option<&str> {
		let transform = self.viewport.transform();
		let (cx, cy) = transform.to_content(screen_x, screen_y);
		let (rf, _) = frame::zoom_factors(transform.scale);
		self.positioned
			.iter()
			.rev()
			.find(|p| {
				let (dx, dy) = (p.x - cx, p.y - cy);
				(dx * dx + dy * dy).sqrt() <= p.radius * rf
			})
			.map(PositionedEntity::id)
	}

	/// A primary press on a node arms a click; on empty space it starts a pan.
	pub fn pointer_down(&mut self, screen_x: f64, screen_y: f64, button: PointerButton) {
		if button != PointerButton::Primary {
			return;
		}
		let target = self.hit_test(screen_x, screen_y).map(str::to_owned);
		if target.is_none() {
			self.viewport.pan_start(screen_x, screen_y, button);
		}
		self.press = Some(Press {
			origin: (screen_x, screen_y),
			target,
			moved: false,
		});
	}

	/// Pans while dragging, otherwise tracks hover. Returns whether anything
	/// visible changed.
	pub fn pointer_move(&mut self, screen_x: f64, screen_y: f64) -> bool {
		if let Some(press) = self.press.as_mut() {
			let (dx, dy) = (screen_x - press.origin.0, screen_y - press.origin.1);
			if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
				press.moved = true;
			}
			if self.viewport.is_panning() {
				self.viewport.pan_move(screen_x, screen_y);
				return true;
			}
			return false;
		}
		let hit = self.hit_test(screen_x, screen_y).map(str::to_owned);
		self.set_hover(hit.as_deref())
	}

	/// Finish a press. A click on a node toggles its selection and returns the
	/// new selection; a click on empty space clears it.
	pub fn pointer_up(&mut self) -> Option<String> {
		let press = self.press.take()?;
		self.viewport.pan_end();
		if press.moved {
			return None;
		}
		match press.target {
			Some(id) => self.select(&id),
			None => {
				self.selection.clear();
				None
			}
		}
	}

	pub fn pointer_leave(&mut self) {
		self.press = None;
		self.viewport.pan_end();
		self.hovered = None;
	}

	pub fn frame(&self) -> Frame {
		frame::build(
			&self.positioned,
			&self.visible_relations,
			&self.selection,
			self.hovered.as_deref(),
			self.viewport.transform(),
		)
	}
}
