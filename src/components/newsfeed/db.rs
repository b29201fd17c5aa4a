//! Storage layout behind the newsfeed: relational users and follow
//! graph, document stores for posts and precomputed timelines.

use leptos::prelude::*;

use crate::components::diagram::{CanvasOptions, ClientOnly, DiagramCanvas, DiagramNode, Graph, SchemaField};

fn field(title: &str, field_type: &str) -> SchemaField {
	SchemaField::new(title, field_type)
}

pub fn database_graph() -> Graph {
	let nodes = vec![
		DiagramNode::schema(
			"1",
			0.0,
			0.0,
			"Users (SQL)",
			vec![
				field("id", "uuid").with_note("primary key"),
				field("username", "varchar").with_note("unique"),
				field("email", "varchar").with_note("unique"),
				field("password_hash", "varchar"),
				field("profile_image_url", "varchar"),
				field("bio", "text"),
				field("is_verified", "boolean"),
				field("created_at", "timestamp"),
				field("updated_at", "timestamp"),
			],
		),
		DiagramNode::schema(
			"2",
			0.0,
			300.0,
			"Posts Collection (NoSQL)",
			vec![
				field("_id", "ObjectId").with_note("document ID"),
				field("user_id", "uuid").with_note("ref: Users.id"),
				field("content", "string"),
				field("media_urls", "string[]").with_note("array of media URLs"),
				field("likes", "uuid[]").with_note("array of User IDs"),
				field("comments", "object[]").with_note("embedded comments"),
				field("created_at", "timestamp"),
				field("updated_at", "timestamp"),
			],
		),
		DiagramNode::schema(
			"3",
			400.0,
			0.0,
			"Relationships (SQL)",
			vec![
				field("id", "uuid").with_note("primary key"),
				field("follower_id", "uuid").with_note("foreign key (Users.id)"),
				field("following_id", "uuid").with_note("foreign key (Users.id)"),
				field("created_at", "timestamp"),
				field("updated_at", "timestamp"),
				field("status", "varchar").with_note("active/blocked/muted"),
			],
		),
		DiagramNode::schema(
			"4",
			400.0,
			300.0,
			"Timeline Collection (NoSQL)",
			vec![
				field("_id", "ObjectId").with_note("document ID"),
				field("user_id", "uuid").with_note("ref: Users.id"),
				field("feed_items", "object[]").with_note("array of post references"),
				field("last_updated", "timestamp"),
			],
		),
	];
	Graph::new(nodes, Vec::new())
}

pub fn database_options() -> CanvasOptions {
	CanvasOptions {
		min_zoom: 1.1,
		show_controls: false,
		..Default::default()
	}
}

/// Deferred until the client can measure the viewport.
#[component]
pub fn DatabaseDiagram() -> impl IntoView {
	view! {
		<ClientOnly>
			<DiagramCanvas graph=database_graph() options=database_options() />
		</ClientOnly>
	}
}
