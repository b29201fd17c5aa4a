use std::collections::HashMap;

use super::node::{NodeVisual, render_box, render_schema};
use super::text::TextMeasure;
use super::theme::DiagramTheme;
use super::types::{KIND_BOX, KIND_SCHEMA, NodeData};

pub type NodeRenderer = fn(&NodeData, &DiagramTheme, &dyn TextMeasure) -> NodeVisual;

/// Lookup table from a node's kind tag to the function that draws it.
/// Always resolves: unknown kinds fall back to the box renderer.
#[derive(Clone)]
pub struct NodeRegistry {
	renderers: HashMap<String, NodeRenderer>,
	fallback: NodeRenderer,
}

impl NodeRegistry {
	pub fn empty() -> Self {
		Self {
			renderers: HashMap::new(),
			fallback: render_box,
		}
	}

	pub fn with_defaults() -> Self {
		Self::empty()
			.register(KIND_BOX, render_box)
			.register(KIND_SCHEMA, render_schema)
	}

	pub fn register(mut self, kind: &str, renderer: NodeRenderer) -> Self {
		self.renderers.insert(kind.into(), renderer);
		self
	}

	/// The renderer for `kind`, and whether it was registered.
	pub fn resolve(&self, kind: &str) -> (NodeRenderer, bool) {
		match self.renderers.get(kind) {
			Some(&renderer) => (renderer, true),
			None => (self.fallback, false),
		}
	}
}

impl Default for NodeRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

impl std::fmt::Debug for NodeRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut kinds: Vec<_> = self.renderers.keys().collect();
		kinds.sort();
		f.debug_struct("NodeRegistry").field("kinds", &kinds).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::diagram::node::BorderStyle;
	use crate::components::diagram::text::Estimate;
	use crate::components::diagram::types::{SchemaField, SchemaNodeData};

	fn schema_data() -> NodeData {
		NodeData::Schema(SchemaNodeData {
			label: "Users".into(),
			schema: vec![SchemaField::new("id", "uuid")],
		})
	}

	#[test]
	fn defaults_dispatch_on_kind() {
		let registry = NodeRegistry::with_defaults();
		let (renderer, found) = registry.resolve(KIND_SCHEMA);
		assert!(found);
		let visual = renderer(&schema_data(), &DiagramTheme::default(), &Estimate);
		assert_eq!(visual.border, BorderStyle::Schema);
	}

	#[test]
	fn unknown_kind_falls_back_to_box() {
		let registry = NodeRegistry::with_defaults();
		let (renderer, found) = registry.resolve("cloudNode");
		assert!(!found);
		let visual = renderer(&schema_data(), &DiagramTheme::default(), &Estimate);
		assert_eq!(visual.border, BorderStyle::Default);
		assert_eq!(visual.texts[0].text, "Users");
	}

	#[test]
	fn empty_registry_still_resolves() {
		let (_, found) = NodeRegistry::empty().resolve(KIND_BOX);
		assert!(!found);
	}

	#[test]
	fn register_overrides_existing_kind() {
		let registry = NodeRegistry::with_defaults().register(KIND_BOX, render_schema);
		let (renderer, _) = registry.resolve(KIND_BOX);
		let visual = renderer(&schema_data(), &DiagramTheme::default(), &Estimate);
		assert_eq!(visual.border, BorderStyle::Schema);
	}
}
