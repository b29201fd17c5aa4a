use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::node::NodeVisual;
use super::registry::NodeRegistry;
use super::text::Estimate;
use super::theme::DiagramTheme;
use super::types::{DiagramEdge, Graph};

/// Authoring defects in a diagram definition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GraphError {
	#[error("duplicate node id `{0}`")]
	DuplicateNodeId(String),
	#[error("duplicate edge id `{0}`")]
	DuplicateEdgeId(String),
	#[error("edge `{edge}` starts at unknown node `{node}`")]
	UnknownSource { edge: String, node: String },
	#[error("edge `{edge}` ends at unknown node `{node}`")]
	UnknownTarget { edge: String, node: String },
	#[error("edge `{edge}` uses handle `{handle}` which node `{node}` does not declare")]
	InactiveHandle {
		edge: String,
		node: String,
		handle: String,
	},
}

impl Graph {
	/// Checks id uniqueness, that every edge endpoint exists and that every
	/// named handle is drawn by the default renderers.
	pub fn validate(&self) -> Result<(), GraphError> {
		self.validate_with(&NodeRegistry::with_defaults(), &DiagramTheme::default())
	}

	pub fn validate_with(&self, registry: &NodeRegistry, theme: &DiagramTheme) -> Result<(), GraphError> {
		match self.issues_with(registry, theme).into_iter().next() {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}

	/// Every defect in declaration order.
	pub fn issues(&self) -> Vec<GraphError> {
		self.issues_with(&NodeRegistry::with_defaults(), &DiagramTheme::default())
	}

	/// Handles are checked against the markers each node's registered
	/// renderer draws, the same lookup the scene uses.
	pub fn issues_with(&self, registry: &NodeRegistry, theme: &DiagramTheme) -> Vec<GraphError> {
		let mut issues = Vec::new();

		let mut visuals: HashMap<&str, NodeVisual> = HashMap::new();
		for node in &self.nodes {
			if visuals.contains_key(node.id.as_str()) {
				issues.push(GraphError::DuplicateNodeId(node.id.clone()));
				continue;
			}
			let (renderer, _) = registry.resolve(&node.kind);
			visuals.insert(node.id.as_str(), renderer(&node.data, theme, &Estimate));
		}

		let mut seen = HashSet::new();
		for edge in &self.edges {
			if !seen.insert(edge.id.as_str()) {
				issues.push(GraphError::DuplicateEdgeId(edge.id.clone()));
			}
			issues.extend(edge_issues(edge, &visuals));
		}
		issues
	}
}

fn edge_issues(edge: &DiagramEdge, visuals: &HashMap<&str, NodeVisual>) -> Vec<GraphError> {
	let mut issues = Vec::new();
	let ends = [
		(&edge.source, &edge.source_handle, true),
		(&edge.target, &edge.target_handle, false),
	];
	for (node_id, handle, is_source) in ends {
		let Some(visual) = visuals.get(node_id.as_str()) else {
			let (edge, node) = (edge.id.clone(), node_id.clone());
			issues.push(if is_source {
				GraphError::UnknownSource { edge, node }
			} else {
				GraphError::UnknownTarget { edge, node }
			});
			continue;
		};
		if let Some(handle) = handle {
			if !visual.handles.iter().any(|h| &h.id == handle) {
				issues.push(GraphError::InactiveHandle {
					edge: edge.id.clone(),
					node: node_id.clone(),
					handle: handle.clone(),
				});
			}
		}
	}
	issues
}
