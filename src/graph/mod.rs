//! Entity-relationship graph engine: filtering, layout, pan/zoom, selection
//! and the per-frame drawable output. Pure data; drawing happens elsewhere.

pub mod filter;
pub mod frame;
pub mod layout;
pub mod scene;
pub mod selection;
pub mod style;
pub mod types;
pub mod viewport;

pub use filter::FilterModel;
pub use frame::{DrawableEdge, DrawableNode, Frame};
pub use layout::{LayoutConfig, LayoutEngine, Point};
pub use scene::{EntityDetails, GraphScene};
pub use selection::SelectionModel;
pub use types::{Entity, EntityType, GraphInput, PositionedEntity, Relation};
pub use viewport::{PointerButton, Transform, ViewportConfig, ViewportController, ZoomDirection};
