//! Newsfeed service architecture: publishing path on the left, fanout
//! into timeline caches on the right.

use leptos::prelude::*;

use crate::components::diagram::{
	CanvasOptions, DiagramCanvas, DiagramEdge, DiagramNode, EdgeOptions, Graph, HandleFlags,
	MarkerEnd, NodeLabel,
};

pub fn arch_graph() -> Graph {
	let h = HandleFlags::none;
	let nodes = vec![
		DiagramNode::boxed("client", 20.0, 200.0, "Client", h().right().bottom()),
		DiagramNode::boxed("gateway", 150.0, 200.0, "API Gateway", h().left().right()),
		DiagramNode::boxed(
			"mediastorage",
			4.0,
			300.0,
			"Media Storage",
			h().top().left().right().bottom(),
		),
		DiagramNode::boxed("tokenServer", 350.0, 100.0, "Token Server", h().left()),
		DiagramNode::boxed("webServer", 350.0, 200.0, "Web Server", h().left().right()),
		DiagramNode::boxed("queue", 520.0, 200.0, "Queue", h().left().right()),
		DiagramNode::boxed("workserver", 670.0, 100.0, "Work Server", h().left().right().bottom()),
		DiagramNode::boxed(
			"userrelationship",
			840.0,
			86.0,
			NodeLabel::Lines(vec!["User Relationship".into(), "(Database)".into()]),
			h().left().right(),
		),
		DiagramNode::boxed("timeline", 660.0, 300.0, "Timeline Cache", h().top().left().right()),
		DiagramNode::boxed("database", 870.0, 300.0, "Database", h().top().left().right()),
	];

	let arrow = |id: &str, source: &str, target: &str| {
		DiagramEdge::new(id, source, target).marker(MarkerEnd::Arrow)
	};
	let edges = vec![
		arrow("client-gateway", "client", "gateway").handles("right", "left"),
		arrow("client-mediastorage", "client", "mediastorage").handles("bottom", "top"),
		arrow("gateway-token", "gateway", "tokenServer"),
		arrow("gateway-web", "gateway", "webServer"),
		arrow("web-queue", "webServer", "queue"),
		arrow("queue-work", "queue", "workserver").handles("right", "left"),
		arrow("work-relationship", "workserver", "userrelationship").handles("right", "left"),
		arrow("work-timeline", "workserver", "timeline")
			.handles("bottom", "top")
			.label("Fanout"),
		arrow("work-database", "workserver", "database")
			.handles("bottom", "top")
			.label("Pull"),
	];

	Graph::new(nodes, edges)
}

pub fn arch_options() -> CanvasOptions {
	CanvasOptions {
		min_zoom: 1.1,
		height_px: 800.0,
		edge: EdgeOptions {
			animated: false,
			stroke: "#000".into(),
			..Default::default()
		},
		..Default::default()
	}
}

#[component]
pub fn ArchDiagram() -> impl IntoView {
	view! { <DiagramCanvas graph=arch_graph() options=arch_options() /> }
}
