//! Entity-type visibility and the relation pruning that follows from it.

use std::collections::{BTreeSet, HashSet};

use super::types::{Entity, EntityType, Relation};

/// The set of entity types currently shown. Starts with every type active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterModel {
	active: BTreeSet<EntityType>,
}

impl Default for FilterModel {
	fn default() -> Self {
		Self {
			active: EntityType::ALL.into_iter().collect(),
		}
	}
}

impl FilterModel {
	/// Flip `kind` in or out of the active set. Returns whether it is now active.
	pub fn toggle(&mut self, kind: EntityType) -> bool {
		if self.active.remove(&kind) {
			false
		} else {
			self.active.insert(kind);
			true
		}
	}

	/// Whether entities of `kind` are shown.
	pub fn is_active(&self, kind: EntityType) -> bool {
		self.active.contains(&kind)
	}

	/// Entities whose type is active, in source order.
	pub fn filter_entities(&self, entities: &[Entity]) -> Vec<Entity> {
		entities
			.iter()
			.filter(|e| self.is_active(e.kind))
			.cloned()
			.collect()
	}

	/// Relations with both endpoints among `visible_ids`. Anything else is
	/// dangling and dropped without complaint.
	pub fn visible_relations<'a, I>(visible_ids: I, relations: &[Relation]) -> Vec<Relation>
	where
		I: IntoIterator<Item = &'a str>,
	{
		let ids: HashSet<&str> = visible_ids.into_iter().collect();
		relations
			.iter()
			.filter(|r| ids.contains(r.source_id.as_str()) && ids.contains(r.target_id.as_str()))
			.cloned()
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entity(id: &str, kind: EntityType) -> Entity {
		Entity {
			id: id.into(),
			name: id.to_uppercase(),
			kind,
			article_ids: Vec::new(),
			mention_count: 1,
		}
	}

	fn relation(source: &str, target: &str) -> Relation {
		Relation {
			source_id: source.into(),
			target_id: target.into(),
			strength: 1.0,
		}
	}

	fn ids_of(entities: &[Entity]) -> impl Iterator<Item = &str> {
		entities.iter().map(|e| e.id.as_str())
	}

	#[test]
	fn default_shows_every_type() {
		let filter = FilterModel::default();
		assert!(EntityType::ALL.into_iter().all(|k| filter.is_active(k)));
	}

	#[test]
	fn toggle_round_trips() {
		let mut filter = FilterModel::default();
		assert!(!filter.toggle(EntityType::Topic));
		assert!(!filter.is_active(EntityType::Topic));
		assert!(filter.toggle(EntityType::Topic));
		assert_eq!(filter, FilterModel::default());
	}

	#[test]
	fn hiding_a_type_prunes_its_edges() {
		let entities = vec![
			entity("a", EntityType::Person),
			entity("b", EntityType::Topic),
			entity("c", EntityType::Organization),
		];
		let relations = vec![relation("a", "b"), relation("b", "c"), relation("a", "zzz")];

		let mut filter = FilterModel::default();
		let visible = filter.filter_entities(&entities);
		let edges = FilterModel::visible_relations(ids_of(&visible), &relations);
		assert_eq!(edges, vec![relation("a", "b"), relation("b", "c")]);

		filter.toggle(EntityType::Organization);
		let visible = filter.filter_entities(&entities);
		assert_eq!(visible.len(), 2);
		let edges = FilterModel::visible_relations(ids_of(&visible), &relations);
		assert_eq!(edges, vec![relation("a", "b")]);
	}

	#[test]
	fn no_dangling_edges_for_any_filter_state() {
		let entities: Vec<Entity> = EntityType::ALL
			.iter()
			.enumerate()
			.map(|(i, &k)| entity(&format!("n{i}"), k))
			.collect();
		let mut relations = Vec::new();
		for a in &entities {
			for b in &entities {
				relations.push(relation(&a.id, &b.id));
			}
		}

		for mask in 0u32..32 {
			let mut filter = FilterModel::default();
			for (bit, kind) in EntityType::ALL.into_iter().enumerate() {
				if mask & (1 << bit) != 0 {
					filter.toggle(kind);
				}
			}
			let visible = filter.filter_entities(&entities);
			let ids: HashSet<&str> = visible.iter().map(|e| e.id.as_str()).collect();
			for edge in FilterModel::visible_relations(ids_of(&visible), &relations) {
				assert!(ids.contains(edge.source_id.as_str()));
				assert!(ids.contains(edge.target_id.as_str()));
			}
		}
	}
}
