pub mod entity_graph;
