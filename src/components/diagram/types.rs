//! Declarative graph model for read-only architecture diagrams.

/// Kind tag drawn by the generic box renderer.
pub const KIND_BOX: &str = "customNode";
/// Kind tag drawn by the database-schema renderer.
pub const KIND_SCHEMA: &str = "databaseSchema";

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	pub x: f64,
	pub y: f64,
}

impl Position {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleSide {
	Top,
	Left,
	Right,
	Bottom,
}

impl HandleSide {
	pub const ALL: [HandleSide; 4] = [Self::Top, Self::Left, Self::Right, Self::Bottom];

	pub fn id(self) -> &'static str {
		match self {
			Self::Top => "top",
			Self::Left => "left",
			Self::Right => "right",
			Self::Bottom => "bottom",
		}
	}

	/// Unit vector pointing away from the node through this side.
	pub fn normal(self) -> (f64, f64) {
		match self {
			Self::Top => (0.0, -1.0),
			Self::Left => (-1.0, 0.0),
			Self::Right => (1.0, 0.0),
			Self::Bottom => (0.0, 1.0),
		}
	}
}

/// Which end of an edge a handle is drawn for. Only affects the marker
/// style; edges may attach to either role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleRole {
	Source,
	Target,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandleFlags {
	pub top: bool,
	pub left: bool,
	pub right: bool,
	pub bottom: bool,
}

impl HandleFlags {
	pub fn none() -> Self {
		Self::default()
	}

	pub fn top(mut self) -> Self {
		self.top = true;
		self
	}

	pub fn left(mut self) -> Self {
		self.left = true;
		self
	}

	pub fn right(mut self) -> Self {
		self.right = true;
		self
	}

	pub fn bottom(mut self) -> Self {
		self.bottom = true;
		self
	}

	pub fn is_set(&self, side: HandleSide) -> bool {
		match side {
			HandleSide::Top => self.top,
			HandleSide::Left => self.left,
			HandleSide::Right => self.right,
			HandleSide::Bottom => self.bottom,
		}
	}
}

/// Label content: a single line, or several centred lines.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeLabel {
	Text(String),
	Lines(Vec<String>),
}

impl NodeLabel {
	pub fn lines(&self) -> Vec<&str> {
		match self {
			Self::Text(text) => vec![text.as_str()],
			Self::Lines(lines) => lines.iter().map(String::as_str).collect(),
		}
	}
}

impl From<&str> for NodeLabel {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for NodeLabel {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaField {
	pub title: String,
	pub field_type: String,
	pub note: Option<String>,
}

impl SchemaField {
	pub fn new(title: &str, field_type: &str) -> Self {
		Self {
			title: title.into(),
			field_type: field_type.into(),
			note: None,
		}
	}

	pub fn with_note(mut self, note: &str) -> Self {
		self.note = Some(note.into());
		self
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoxNodeData {
	pub label: NodeLabel,
	pub handles: HandleFlags,
	pub class_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SchemaNodeData {
	pub label: String,
	pub schema: Vec<SchemaField>,
}

/// Renderer payload carried by a node.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeData {
	Box(BoxNodeData),
	Schema(SchemaNodeData),
}

impl NodeData {
	pub fn label(&self) -> NodeLabel {
		match self {
			Self::Box(data) => data.label.clone(),
			Self::Schema(data) => NodeLabel::Text(data.label.clone()),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramNode {
	pub id: String,
	pub position: Position,
	pub kind: String,
	pub data: NodeData,
}

impl DiagramNode {
	/// A generic box node.
	pub fn boxed(id: &str, x: f64, y: f64, label: impl Into<NodeLabel>, handles: HandleFlags) -> Self {
		Self {
			id: id.into(),
			position: Position::new(x, y),
			kind: KIND_BOX.into(),
			data: NodeData::Box(BoxNodeData {
				label: label.into(),
				handles,
				class_name: None,
			}),
		}
	}

	/// A database-schema node listing `schema` in order.
	pub fn schema(id: &str, x: f64, y: f64, label: &str, schema: Vec<SchemaField>) -> Self {
		Self {
			id: id.into(),
			position: Position::new(x, y),
			kind: KIND_SCHEMA.into(),
			data: NodeData::Schema(SchemaNodeData {
				label: label.into(),
				schema,
			}),
		}
	}

	pub fn with_kind(mut self, kind: &str) -> Self {
		self.kind = kind.into();
		self
	}

	pub fn with_class(mut self, class_name: &str) -> Self {
		if let NodeData::Box(data) = &mut self.data {
			data.class_name = Some(class_name.into());
		}
		self
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MarkerEnd {
	#[default]
	None,
	/// Open chevron.
	Arrow,
	/// Filled triangle.
	ArrowClosed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiagramEdge {
	pub id: String,
	pub source: String,
	pub target: String,
	pub source_handle: Option<String>,
	pub target_handle: Option<String>,
	pub label: Option<String>,
	pub marker_end: MarkerEnd,
	/// Overrides the canvas-wide default when set.
	pub animated: Option<bool>,
}

impl DiagramEdge {
	pub fn new(id: &str, source: &str, target: &str) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			source_handle: None,
			target_handle: None,
			label: None,
			marker_end: MarkerEnd::None,
			animated: None,
		}
	}

	pub fn handles(mut self, source_handle: &str, target_handle: &str) -> Self {
		self.source_handle = Some(source_handle.into());
		self.target_handle = Some(target_handle.into());
		self
	}

	pub fn label(mut self, label: &str) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn marker(mut self, marker_end: MarkerEnd) -> Self {
		self.marker_end = marker_end;
		self
	}

	pub fn animated(mut self, animated: bool) -> Self {
		self.animated = Some(animated);
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
	pub nodes: Vec<DiagramNode>,
	pub edges: Vec<DiagramEdge>,
}

impl Graph {
	pub fn new(nodes: Vec<DiagramNode>, edges: Vec<DiagramEdge>) -> Self {
		Self { nodes, edges }
	}
}
