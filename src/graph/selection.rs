//! Selection state and the highlight policy derived from it.

use std::collections::HashSet;

use super::types::Relation;

/// Single-entity selection with toggle semantics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionModel {
	selected: Option<String>,
}

/// How an edge should be emphasised given the current selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EdgeEmphasis {
	/// Nothing selected; `weight` is `min(strength, 3)`.
	Dim { weight: f64 },
	/// Touches the selection; `weight` is `min(strength + 1, 4)`.
	Active { weight: f64 },
	/// Something else is selected.
	Faded,
}

/// How a node should be coloured given selection and hover.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeEmphasis {
	/// The selected node.
	Selected,
	/// One relation away from the selection.
	Neighbor,
	/// Per-type colouring, optionally under the pointer.
	Normal { hovered: bool },
}

impl SelectionModel {
	/// Currently selected id.
	pub fn selected(&self) -> Option<&str> {
		self.selected.as_deref()
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected.as_deref() == Some(id)
	}

	/// Select `id`, or clear if it is already selected. Returns the new selection.
	pub fn select(&mut self, id: &str) -> Option<&str> {
		if self.is_selected(id) {
			self.selected = None;
		} else {
			self.selected = Some(id.to_owned());
		}
		self.selected()
	}

	/// Select `id` without toggling off.
	pub fn focus(&mut self, id: &str) {
		self.selected = Some(id.to_owned());
	}

	/// Drop the selection.
	pub fn clear(&mut self) {
		self.selected = None;
	}

	/// Ids one relation away from the selection, excluding the selection itself.
	pub fn neighbors<'a>(&self, relations: &'a [Relation]) -> HashSet<&'a str> {
		let Some(id) = self.selected() else {
			return HashSet::new();
		};
		relations
			.iter()
			.filter_map(|r| r.other_end(id))
			.filter(|&other| other != id)
			.collect()
	}

	/// Relations touching the selection.
	pub fn neighbor_relations<'a>(&self, relations: &'a [Relation]) -> Vec<&'a Relation> {
		match self.selected() {
			Some(id) => relations.iter().filter(|r| r.touches(id)).collect(),
			None => Vec::new(),
		}
	}

	/// Emphasis for one visible edge.
	pub fn edge_emphasis(&self, relation: &Relation) -> EdgeEmphasis {
		match self.selected() {
			None => EdgeEmphasis::Dim {
				weight: relation.strength.min(3.0),
			},
			Some(id) if relation.touches(id) => EdgeEmphasis::Active {
				weight: (relation.strength + 1.0).min(4.0),
			},
			Some(_) => EdgeEmphasis::Faded,
		}
	}

	/// Emphasis for one node; selection outranks neighbourhood outranks hover.
	pub fn node_emphasis(&self, id: &str, neighbors: &HashSet<&str>, hovered: Option<&str>) -> NodeEmphasis {
		if self.is_selected(id) {
			NodeEmphasis::Selected
		} else if neighbors.contains(id) {
			NodeEmphasis::Neighbor
		} else {
			NodeEmphasis::Normal {
				hovered: hovered == Some(id),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn rel(s: &str, t: &str, strength: f64) -> Relation {
		Relation {
			source_id: s.into(),
			target_id: t.into(),
			strength,
		}
	}

	#[test]
	fn selecting_twice_clears() {
		let mut sel = SelectionModel::default();
		assert_eq!(sel.select("a"), Some("a"));
		assert_eq!(sel.select("a"), None);
		assert_eq!(sel.selected(), None);
	}

	#[test]
	fn selecting_another_replaces() {
		let mut sel = SelectionModel::default();
		sel.select("a");
		assert_eq!(sel.select("b"), Some("b"));
		sel.clear();
		assert_eq!(sel.selected(), None);
	}

	#[test]
	fn neighbors_cover_both_directions() {
		let relations = vec![rel("a", "b", 1.0), rel("c", "a", 1.0), rel("b", "c", 1.0), rel("a", "a", 1.0)];
		let mut sel = SelectionModel::default();
		assert!(sel.neighbors(&relations).is_empty());
		sel.select("a");
		let expected: HashSet<&str> = ["b", "c"].into_iter().collect();
		assert_eq!(sel.neighbors(&relations), expected);
		assert_eq!(sel.neighbor_relations(&relations).len(), 3);
	}

	#[test]
	fn edge_emphasis_follows_selection() {
		let strong = rel("a", "b", 7.0);
		let weak = rel("b", "c", 0.5);
		let mut sel = SelectionModel::default();
		assert_eq!(sel.edge_emphasis(&strong), EdgeEmphasis::Dim { weight: 3.0 });
		assert_eq!(sel.edge_emphasis(&weak), EdgeEmphasis::Dim { weight: 0.5 });

		sel.select("a");
		assert_eq!(sel.edge_emphasis(&strong), EdgeEmphasis::Active { weight: 4.0 });
		assert_eq!(sel.edge_emphasis(&weak), EdgeEmphasis::Faded);

		sel.select("c");
		assert_eq!(sel.edge_emphasis(&weak), EdgeEmphasis::Active { weight: 1.5 });
	}

	#[test]
	fn node_emphasis_ranks_selection_over_hover() {
		let relations = vec![rel("a", "b", 1.0)];
		let mut sel = SelectionModel::default();
		sel.select("a");
		let neighbors = sel.neighbors(&relations);
		assert_eq!(sel.node_emphasis("a", &neighbors, Some("a")), NodeEmphasis::Selected);
		assert_eq!(sel.node_emphasis("b", &neighbors, Some("b")), NodeEmphasis::Neighbor);
		assert_eq!(
			sel.node_emphasis("c", &neighbors, Some("c")),
			NodeEmphasis::Normal { hovered: true }
		);
		assert_eq!(
			sel.node_emphasis("c", &neighbors, None),
			NodeEmphasis::Normal { hovered: false }
		);
	}
}
