use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Category of an extracted entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
	/// A named individual.
	Person,
	/// A company, institution or group.
	Organization,
	/// A subject or theme.
	Topic,
	/// A place.
	Location,
	/// A publication or other origin of information.
	Source,
}

impl EntityType {
	/// Every type, in chip display order.
	pub const ALL: [EntityType; 5] = [
		EntityType::Person,
		EntityType::Organization,
		EntityType::Topic,
		EntityType::Location,
		EntityType::Source,
	];

	/// Human-readable label.
	pub fn label(self) -> &'static str {
		match self {
			EntityType::Person => "Person",
			EntityType::Organization => "Organization",
			EntityType::Topic => "Topic",
			EntityType::Location => "Location",
			EntityType::Source => "Source",
		}
	}
}

/// An entity as produced by the extraction pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
	pub id: String,
	pub name: String,
	#[serde(rename = "type")]
	pub kind: EntityType,
	#[serde(default)]
	pub article_ids: Vec<String>,
	#[serde(default)]
	pub mention_count: u32,
}

/// Weighted, undirected link between two entity ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
	pub source_id: String,
	pub target_id: String,
	#[serde(default)]
	pub strength: f64,
}

impl Relation {
	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source_id == id || self.target_id == id
	}

	/// The endpoint opposite `id`, if `id` is an endpoint.
	pub fn other_end(&self, id: &str) -> Option<&str> {
		if self.source_id == id {
			Some(self.target_id.as_str())
		} else if self.target_id == id {
			Some(self.source_id.as_str())
		} else {
			None
		}
	}
}

/// An entity with layout output attached.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedEntity {
	pub entity: Entity,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

impl PositionedEntity {
	pub fn id(&self) -> &str {
		&self.entity.id
	}
}

/// Entities and relations handed over by the extraction pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphInput {
	#[serde(default)]
	pub entities: Vec<Entity>,
	#[serde(default)]
	pub relations: Vec<Relation>,
}

impl GraphInput {
	/// Decode the pipeline's JSON payload.
	pub fn from_json(raw: &str) -> Result<Self, GraphError> {
		Ok(serde_json::from_str(raw)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn decodes_pipeline_json() {
		let raw = r#"{
			"entities": [
				{"id": "a", "name": "Ada", "type": "person", "articleIds": ["x1"], "mentionCount": 3},
				{"id": "b", "name": "Rust", "type": "topic"}
			],
			"relations": [{"sourceId": "a", "targetId": "b", "strength": 2}]
		}"#;
		let input = GraphInput::from_json(raw).unwrap();
		assert_eq!(input.entities.len(), 2);
		assert_eq!(input.entities[0].kind, EntityType::Person);
		assert_eq!(input.entities[0].article_ids, vec!["x1".to_string()]);
		assert_eq!(input.entities[1].mention_count, 0);
		assert_eq!(input.relations[0].strength, 2.0);
	}

	#[test]
	fn rejects_unknown_entity_type() {
		let raw = r#"{"entities": [{"id": "a", "name": "A", "type": "planet"}]}"#;
		assert!(matches!(GraphInput::from_json(raw), Err(GraphError::Json(_))));
	}

	#[test]
	fn other_end_resolves_both_directions() {
		let rel = Relation {
			source_id: "a".into(),
			target_id: "b".into(),
			strength: 1.0,
		};
		assert_eq!(rel.other_end("a"), Some("b"));
		assert_eq!(rel.other_end("b"), Some("a"));
		assert_eq!(rel.other_end("c"), None);
	}
}
