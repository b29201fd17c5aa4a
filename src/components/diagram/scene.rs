//! Resolves a [`Graph`] into a positioned display list. Nodes keep their
//! declared coordinates; nothing here moves them.

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::node::{BorderStyle, HandleMarker, NodeVisual};
use super::registry::NodeRegistry;
use super::text::{Estimate, FontClass, TextMeasure};
use super::theme::{DiagramTheme, EdgeOptions};
use super::types::{DiagramEdge, Graph, HandleRole, HandleSide, MarkerEnd};

pub const LABEL_FONT_SIZE: f64 = 12.0;
const LABEL_PADDING_X: f64 = 6.0;
const LABEL_PADDING_Y: f64 = 3.0;
const CURVATURE: f64 = 0.25;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self { x, y, width, height }
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn center(&self) -> (f64, f64) {
		(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect::new(
			x,
			y,
			self.right().max(other.right()) - x,
			self.bottom().max(other.bottom()) - y,
		)
	}

	fn side_midpoint(&self, side: HandleSide) -> (f64, f64) {
		let (cx, cy) = self.center();
		match side {
			HandleSide::Top => (cx, self.y),
			HandleSide::Left => (self.x, cy),
			HandleSide::Right => (self.right(), cy),
			HandleSide::Bottom => (cx, self.bottom()),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedNode {
	pub id: String,
	pub rect: Rect,
	pub visual: NodeVisual,
	pub placeholder: bool,
}

impl PlacedNode {
	fn anchor(&self, marker: &HandleMarker) -> (f64, f64) {
		(self.rect.x + marker.x, self.rect.y + marker.y)
	}

	/// Diagram-space anchor for one end of an edge. `None` when an
	/// explicit handle names nothing on this node.
	fn resolve_end(
		&self,
		handle: Option<&str>,
		role: HandleRole,
		toward: (f64, f64),
	) -> Option<((f64, f64), HandleSide)> {
		let marker = match handle {
			Some(id) => Some(self.visual.handle(id, role)?),
			None => self.visual.default_handle(role),
		};
		Some(match marker {
			Some(m) => (self.anchor(m), m.side),
			None => {
				let side = facing_side(self.rect.center(), toward);
				(self.rect.side_midpoint(side), side)
			}
		})
	}
}

fn facing_side(from: (f64, f64), toward: (f64, f64)) -> HandleSide {
	let (dx, dy) = (toward.0 - from.0, toward.1 - from.1);
	if dx.abs() > dy.abs() {
		if dx > 0.0 { HandleSide::Right } else { HandleSide::Left }
	} else if dy > 0.0 {
		HandleSide::Bottom
	} else {
		HandleSide::Top
	}
}

/// Cubic Bézier from source anchor to target anchor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bezier {
	pub from: (f64, f64),
	pub c1: (f64, f64),
	pub c2: (f64, f64),
	pub to: (f64, f64),
}

impl Bezier {
	fn between(from: (f64, f64), from_side: HandleSide, to: (f64, f64), to_side: HandleSide) -> Self {
		Self {
			from,
			c1: control_point(from, from_side, to),
			c2: control_point(to, to_side, from),
			to,
		}
	}

	pub fn point_at(&self, t: f64) -> (f64, f64) {
		let u = 1.0 - t;
		let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
		(
			a * self.from.0 + b * self.c1.0 + c * self.c2.0 + d * self.to.0,
			a * self.from.1 + b * self.c1.1 + c * self.c2.1 + d * self.to.1,
		)
	}

	/// Unit direction of travel at the target end.
	pub fn end_direction(&self) -> (f64, f64) {
		let candidates = [
			(self.to.0 - self.c2.0, self.to.1 - self.c2.1),
			(self.to.0 - self.c1.0, self.to.1 - self.c1.1),
			(self.to.0 - self.from.0, self.to.1 - self.from.1),
		];
		candidates
			.into_iter()
			.find_map(|(dx, dy)| {
				let len = (dx * dx + dy * dy).sqrt();
				(len > 1e-6).then(|| (dx / len, dy / len))
			})
			.unwrap_or((0.0, 1.0))
	}
}

fn control_point(anchor: (f64, f64), side: HandleSide, other: (f64, f64)) -> (f64, f64) {
	let (nx, ny) = side.normal();
	let along = (other.0 - anchor.0) * nx + (other.1 - anchor.1) * ny;
	let offset = if along >= 0.0 {
		0.5 * along
	} else {
		CURVATURE * 25.0 * (-along).sqrt()
	};
	(anchor.0 + nx * offset, anchor.1 + ny * offset)
}

#[derive(Clone, Debug, PartialEq)]
pub struct EdgeLabel {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlacedEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub from_side: HandleSide,
	pub to_side: HandleSide,
	pub path: Bezier,
	pub label: Option<EdgeLabel>,
	pub marker_end: MarkerEnd,
	pub animated: bool,
	pub stroke: String,
	pub stroke_width: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<PlacedNode>,
	pub edges: Vec<PlacedEdge>,
}

impl Scene {
	/// Lays out `graph` with estimated text widths.
	pub fn build(
		graph: &Graph,
		registry: &NodeRegistry,
		theme: &DiagramTheme,
		edge_options: &EdgeOptions,
	) -> Self {
		Self::build_with(graph, registry, theme, edge_options, &Estimate)
	}

	pub fn build_with(
		graph: &Graph,
		registry: &NodeRegistry,
		theme: &DiagramTheme,
		edge_options: &EdgeOptions,
		measure: &dyn TextMeasure,
	) -> Self {
		let mut nodes: Vec<PlacedNode> = Vec::with_capacity(graph.nodes.len());
		let mut seen = HashSet::new();
		let mut unknown_kinds = HashSet::new();

		for node in &graph.nodes {
			if !seen.insert(node.id.as_str()) {
				warn!("skipping duplicate node `{}`", node.id);
				continue;
			}
			let (renderer, found) = registry.resolve(&node.kind);
			let mut visual = renderer(&node.data, theme, measure);
			if !found {
				if unknown_kinds.insert(node.kind.as_str()) {
					warn!("no renderer for node kind `{}`, drawing placeholder", node.kind);
				}
				visual.border = BorderStyle::Placeholder;
			}
			nodes.push(PlacedNode {
				id: node.id.clone(),
				rect: Rect::new(node.position.x, node.position.y, visual.width, visual.height),
				visual,
				placeholder: !found,
			});
		}

		let index: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.id.as_str(), i))
			.collect();
		let edges = graph
			.edges
			.iter()
			.filter_map(|edge| {
				let placed = place_edge(edge, &nodes, &index, edge_options, measure);
				if placed.is_none() {
					warn!(
						"omitting edge `{}` ({} -> {}): unresolved endpoint",
						edge.id, edge.source, edge.target
					);
				}
				placed
			})
			.collect::<Vec<_>>();

		debug!("scene built: {} nodes, {} edges", nodes.len(), edges.len());
		Self { nodes, edges }
	}

	pub fn node(&self, id: &str) -> Option<&PlacedNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	pub fn edge(&self, id: &str) -> Option<&PlacedEdge> {
		self.edges.iter().find(|e| e.id == id)
	}

	/// Box covering every node, `None` for an empty scene.
	pub fn bounds(&self) -> Option<Rect> {
		self.nodes
			.iter()
			.map(|n| n.rect)
			.reduce(|acc, rect| acc.union(&rect))
	}

	pub fn has_animated_edges(&self) -> bool {
		self.edges.iter().any(|e| e.animated)
	}
}

fn place_edge(
	edge: &DiagramEdge,
	nodes: &[PlacedNode],
	index: &HashMap<&str, usize>,
	options: &EdgeOptions,
	measure: &dyn TextMeasure,
) -> Option<PlacedEdge> {
	let source = &nodes[*index.get(edge.source.as_str())?];
	let target = &nodes[*index.get(edge.target.as_str())?];

	let (from, from_side) = source.resolve_end(
		edge.source_handle.as_deref(),
		HandleRole::Source,
		target.rect.center(),
	)?;
	let (to, to_side) = target.resolve_end(
		edge.target_handle.as_deref(),
		HandleRole::Target,
		source.rect.center(),
	)?;
	let path = Bezier::between(from, from_side, to, to_side);

	let label = edge.label.as_ref().map(|text| {
		let (x, y) = path.point_at(0.5);
		EdgeLabel {
			text: text.clone(),
			x,
			y,
			width: measure.width(text, LABEL_FONT_SIZE, FontClass::Sans, false) + 2.0 * LABEL_PADDING_X,
			height: LABEL_FONT_SIZE * 1.4 + 2.0 * LABEL_PADDING_Y,
		}
	});

	Some(PlacedEdge {
		id: edge.id.clone(),
		source: edge.source.clone(),
		target: edge.target.clone(),
		from_side,
		to_side,
		path,
		label,
		marker_end: edge.marker_end,
		animated: edge.animated.unwrap_or(options.animated),
		stroke: options.stroke.clone(),
		stroke_width: options.stroke_width,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::diagram::types::{DiagramNode, HandleFlags, SchemaField};

	fn build(graph: &Graph) -> Scene {
		Scene::build(
			graph,
			&NodeRegistry::with_defaults(),
			&DiagramTheme::default(),
			&EdgeOptions::default(),
		)
	}

	fn two_boxes() -> Vec<DiagramNode> {
		vec![
			DiagramNode::boxed("a", 0.0, 0.0, "A", HandleFlags::none().right().bottom()),
			DiagramNode::boxed("b", 300.0, 0.0, "B", HandleFlags::none().left().top()),
		]
	}

	#[test]
	fn nodes_sit_at_declared_positions() {
		let scene = build(&Graph::new(two_boxes(), vec![]));
		let b = scene.node("b").map(|n| (n.rect.x, n.rect.y));
		assert_eq!(b, Some((300.0, 0.0)));
	}

	#[test]
	fn explicit_handles_anchor_edge_ends() {
		let graph = Graph::new(two_boxes(), vec![DiagramEdge::new("ab", "a", "b").handles("right", "left")]);
		let scene = build(&graph);
		let edge = &scene.edges[0];
		let (a, b) = (&scene.nodes[0].rect, &scene.nodes[1].rect);
		assert_eq!(edge.path.from, (a.right(), a.center().1));
		assert_eq!(edge.path.to, (b.x, b.center().1));
		assert_eq!((edge.from_side, edge.to_side), (HandleSide::Right, HandleSide::Left));
	}

	#[test]
	fn omitted_handles_pick_first_matching_role() {
		let graph = Graph::new(two_boxes(), vec![DiagramEdge::new("ab", "a", "b")]);
		let edge = &build(&graph).edges[0];
		assert_eq!(edge.from_side, HandleSide::Right);
		assert_eq!(edge.to_side, HandleSide::Top);
	}

	#[test]
	fn handle_direction_is_advisory() {
		// "left" is drawn as a target handle but may start an edge.
		let graph = Graph::new(two_boxes(), vec![DiagramEdge::new("ba", "b", "a").handles("left", "right")]);
		let edge = &build(&graph).edges[0];
		assert_eq!((edge.from_side, edge.to_side), (HandleSide::Left, HandleSide::Right));
	}

	#[test]
	fn handleless_nodes_use_facing_side() {
		let nodes = vec![
			DiagramNode::boxed("a", 0.0, 0.0, "A", HandleFlags::none()),
			DiagramNode::boxed("b", 0.0, 300.0, "B", HandleFlags::none()),
		];
		let edge = &build(&Graph::new(nodes, vec![DiagramEdge::new("ab", "a", "b")])).edges[0];
		assert_eq!((edge.from_side, edge.to_side), (HandleSide::Bottom, HandleSide::Top));
	}

	#[test]
	fn broken_edges_are_omitted_without_disturbing_others() {
		let edges = vec![
			DiagramEdge::new("ghost", "a", "nowhere"),
			DiagramEdge::new("inactive", "a", "b").handles("top", "left"),
			DiagramEdge::new("ok", "a", "b").handles("right", "left"),
		];
		let scene = build(&Graph::new(two_boxes(), edges));
		let ids: Vec<_> = scene.edges.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["ok"]);
		assert_eq!(scene.nodes.len(), 2);
	}

	#[test]
	fn unknown_kind_renders_placeholder() {
		let nodes = vec![DiagramNode::boxed("x", 0.0, 0.0, "Mystery", HandleFlags::none()).with_kind("cloud")];
		let scene = build(&Graph::new(nodes, vec![]));
		let node = &scene.nodes[0];
		assert!(node.placeholder);
		assert_eq!(node.visual.border, BorderStyle::Placeholder);
		assert_eq!(node.visual.texts[0].text, "Mystery");
	}

	#[test]
	fn duplicate_nodes_keep_first_declaration() {
		let mut nodes = two_boxes();
		nodes.push(DiagramNode::boxed("a", 900.0, 900.0, "Again", HandleFlags::none()));
		let scene = build(&Graph::new(nodes, vec![]));
		assert_eq!(scene.nodes.len(), 2);
		assert_eq!(scene.node("a").map(|n| n.rect.x), Some(0.0));
	}

	#[test]
	fn label_sits_on_curve_midpoint() {
		let graph = Graph::new(
			two_boxes(),
			vec![DiagramEdge::new("ab", "a", "b").handles("bottom", "top").label("Fanout")],
		);
		let edge = &build(&graph).edges[0];
		let label = edge.label.as_ref().map(|l| (l.x, l.y));
		assert_eq!(label, Some(edge.path.point_at(0.5)));
	}

	#[test]
	fn schema_edges_attach_to_field_rows() {
		let nodes = vec![
			DiagramNode::schema("users", 0.0, 0.0, "Users", vec![SchemaField::new("id", "uuid")]),
			DiagramNode::schema(
				"posts",
				400.0,
				0.0,
				"Posts",
				vec![SchemaField::new("_id", "ObjectId"), SchemaField::new("user_id", "uuid")],
			),
		];
		let graph = Graph::new(nodes, vec![DiagramEdge::new("fk", "users", "posts").handles("id", "user_id")]);
		let scene = build(&graph);
		let posts = scene.node("posts").map(|n| n.visual.clone());
		let edge = &scene.edges[0];
		let row_y = posts
			.as_ref()
			.and_then(|v| v.handle("user_id", HandleRole::Target))
			.map(|h| h.y);
		assert_eq!(Some(edge.path.to.1), row_y);
		assert_eq!(edge.to_side, HandleSide::Left);
		assert_eq!(edge.from_side, HandleSide::Right);
	}

	#[test]
	fn edge_animation_overrides_defaults() {
		let edges = vec![
			DiagramEdge::new("plain", "a", "b"),
			DiagramEdge::new("moving", "a", "b").animated(true),
		];
		let scene = build(&Graph::new(two_boxes(), edges));
		assert!(!scene.edges[0].animated);
		assert!(scene.edges[1].animated);
		assert!(scene.has_animated_edges());
	}

	#[test]
	fn bounds_cover_all_nodes() {
		let scene = build(&Graph::new(two_boxes(), vec![]));
		let bounds = scene.bounds().unwrap();
		assert_eq!((bounds.x, bounds.y), (0.0, 0.0));
		assert_eq!(bounds.right(), scene.nodes[1].rect.right());
		assert!(Scene::default().bounds().is_none());
	}

	#[test]
	fn end_direction_points_into_target() {
		let path = Bezier::between((0.0, 0.0), HandleSide::Bottom, (0.0, 100.0), HandleSide::Top);
		assert_eq!(path.end_direction(), (0.0, 1.0));
	}

	#[test]
	fn measured_text_sizes_nodes_and_labels() {
		struct Wide;
		impl TextMeasure for Wide {
			fn width(&self, text: &str, size: f64, _: FontClass, _: bool) -> f64 {
				text.chars().count() as f64 * size
			}
		}
		let graph = Graph::new(
			two_boxes(),
			vec![DiagramEdge::new("ab", "a", "b").handles("right", "left").label("Pull")],
		);
		let scene = Scene::build_with(
			&graph,
			&NodeRegistry::with_defaults(),
			&DiagramTheme::default(),
			&EdgeOptions::default(),
			&Wide,
		);
		let label = scene.edges[0].label.as_ref().map(|l| l.width);
		assert_eq!(label, Some(4.0 * LABEL_FONT_SIZE + 2.0 * LABEL_PADDING_X));
		assert_ne!(scene, build(&graph));
	}
}
