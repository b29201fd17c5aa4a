use system_design_cheatsheet::components::diagram::node::{BorderStyle, TextRun};
use system_design_cheatsheet::components::diagram::types::HandleRole;
use system_design_cheatsheet::components::diagram::{
	DiagramTheme, Graph, NodeData, NodeRegistry, Scene,
};
use system_design_cheatsheet::components::newsfeed::{
	arch_graph, arch_options, database_graph, database_options,
};

fn scene_for(graph: &Graph, edge: &system_design_cheatsheet::components::diagram::EdgeOptions) -> Scene {
	Scene::build(graph, &NodeRegistry::with_defaults(), &DiagramTheme::default(), edge)
}

#[test]
fn newsfeed_architecture_is_well_formed() {
	let graph = arch_graph();
	assert_eq!(graph.validate(), Ok(()));
	assert_eq!(graph.nodes.len(), 10);
	assert_eq!(graph.edges.len(), 9);
}

#[test]
fn newsfeed_architecture_draws_every_box_and_line() {
	let scene = scene_for(&arch_graph(), &arch_options().edge);
	assert_eq!(scene.nodes.len(), 10);
	assert_eq!(scene.edges.len(), 9);
	assert!(scene.nodes.iter().all(|n| !n.placeholder));
	assert!(scene.edges.iter().all(|e| e.stroke == "#000" && !e.animated));
}

#[test]
fn fanout_label_sits_on_the_work_server_to_timeline_line() {
	let scene = scene_for(&arch_graph(), &arch_options().edge);
	let edge = scene.edge("work-timeline").expect("fanout edge placed");
	let label = edge.label.as_ref().expect("fanout label");
	assert_eq!(label.text, "Fanout");
	assert_eq!((label.x, label.y), edge.path.point_at(0.5));

	let work = scene.node("workserver").expect("work server");
	let timeline = scene.node("timeline").expect("timeline");
	assert_eq!(edge.path.from, (work.rect.center().0, work.rect.bottom()));
	assert_eq!(edge.path.to, (timeline.rect.center().0, timeline.rect.y));
	assert!(label.y > work.rect.bottom() && label.y < timeline.rect.y);
	let (lo, hi) = (edge.path.from.0.min(edge.path.to.0), edge.path.from.0.max(edge.path.to.0));
	assert!(label.x >= lo && label.x <= hi);
}

#[test]
fn multi_line_label_renders_both_lines() {
	let scene = scene_for(&arch_graph(), &arch_options().edge);
	let node = scene.node("userrelationship").expect("relationship node");
	let lines: Vec<_> = node.visual.texts.iter().map(|t| t.text.as_str()).collect();
	assert_eq!(lines, vec!["User Relationship", "(Database)"]);
}

#[test]
fn rendering_twice_is_identical() {
	let options = arch_options();
	assert_eq!(
		scene_for(&arch_graph(), &options.edge),
		scene_for(&arch_graph(), &options.edge)
	);
}

fn row_texts(runs: &[TextRun]) -> Vec<String> {
	runs.iter()
		.skip(1)
		.map(|r| {
			if r.style.italic {
				format!("<i>{}</i>", r.text)
			} else {
				r.text.clone()
			}
		})
		.collect()
}

#[test]
fn database_schema_lists_fields_in_order_with_types_and_notes() {
	let graph = database_graph();
	assert_eq!(graph.validate(), Ok(()));
	let scene = scene_for(&graph, &database_options().edge);
	assert_eq!(scene.nodes.len(), 4);
	assert!(scene.edges.is_empty());

	let titles: Vec<_> = scene.nodes.iter().map(|n| n.visual.texts[0].text.as_str()).collect();
	assert_eq!(
		titles,
		vec![
			"Users (SQL)",
			"Posts Collection (NoSQL)",
			"Relationships (SQL)",
			"Timeline Collection (NoSQL)",
		]
	);

	let timeline = scene.node("4").expect("timeline collection");
	assert_eq!(timeline.visual.border, BorderStyle::Schema);
	assert_eq!(
		row_texts(&timeline.visual.texts),
		vec![
			"_id",
			"(ObjectId)",
			"<i>document ID</i>",
			"user_id",
			"(uuid)",
			"<i>ref: Users.id</i>",
			"feed_items",
			"(object[])",
			"<i>array of post references</i>",
			"last_updated",
			"(timestamp)",
		]
	);
}

#[test]
fn every_schema_field_gets_one_handle_pair() {
	let graph = database_graph();
	let scene = scene_for(&graph, &database_options().edge);
	for (node, placed) in graph.nodes.iter().zip(&scene.nodes) {
		let NodeData::Schema(data) = &node.data else {
			panic!("database diagram holds only schema nodes");
		};
		let fields: Vec<_> = data.schema.iter().map(|f| f.title.as_str()).collect();
		for role in [HandleRole::Source, HandleRole::Target] {
			let ids: Vec<_> = placed.visual.handles_with_role(role).map(|h| h.id.as_str()).collect();
			assert_eq!(ids, fields);
		}
	}
}

#[test]
fn database_diagram_keeps_min_zoom_without_controls() {
	let options = database_options();
	assert_eq!(options.zoom_bounds().0, 1.1);
	assert!(!options.show_controls);
	assert!(options.show_background);
}
