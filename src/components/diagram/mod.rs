//! Read-only node/edge diagrams drawn on a pannable, zoomable canvas.

mod component;
pub mod node;
mod paint;
pub mod readiness;
pub mod registry;
pub mod scene;
mod state;
pub mod text;
pub mod theme;
pub mod types;
mod validate;
pub mod viewport;

pub use component::{ClientOnly, DiagramCanvas};
pub use registry::{NodeRegistry, NodeRenderer};
pub use scene::Scene;
pub use theme::{CanvasOptions, DiagramTheme, EdgeOptions};
pub use types::{
	DiagramEdge, DiagramNode, Graph, HandleFlags, MarkerEnd, NodeData, NodeLabel, SchemaField,
};
pub use validate::GraphError;
