//! Pure node renderers. Every coordinate in a [`NodeVisual`] is local to
//! the node's top-left corner.

use super::text::{FontClass, TextMeasure};
use super::theme::DiagramTheme;
use super::types::{HandleRole, HandleSide, NodeData};

const EXPLANATION_CLASS: &str = "explanation-node";
const EXPLANATION_PADDING: f64 = 16.0;
const TITLE_MARGIN: f64 = 8.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BorderStyle {
	Default,
	Explanation,
	Schema,
	/// Dashed outline for nodes whose kind has no renderer.
	Placeholder,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
	Left,
	#[default]
	Center,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextStyle {
	pub size: f64,
	pub bold: bool,
	pub italic: bool,
	pub mono: bool,
	pub muted: bool,
	pub align: TextAlign,
}

/// One run of text; `y` is the vertical middle of the line.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
	pub text: String,
	pub x: f64,
	pub y: f64,
	pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HandleMarker {
	pub id: String,
	pub side: HandleSide,
	pub role: HandleRole,
	pub x: f64,
	pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
	pub width: f64,
	pub height: f64,
	pub border: BorderStyle,
	pub texts: Vec<TextRun>,
	pub handles: Vec<HandleMarker>,
}

impl NodeVisual {
	/// Marker named `id`, preferring `role` when both roles share the id.
	pub fn handle(&self, id: &str, role: HandleRole) -> Option<&HandleMarker> {
		self.handles
			.iter()
			.find(|h| h.id == id && h.role == role)
			.or_else(|| self.handles.iter().find(|h| h.id == id))
	}

	/// Marker used when an edge names no handle.
	pub fn default_handle(&self, role: HandleRole) -> Option<&HandleMarker> {
		self.handles
			.iter()
			.find(|h| h.role == role)
			.or_else(|| self.handles.first())
	}

	pub fn handles_with_role(&self, role: HandleRole) -> impl Iterator<Item = &HandleMarker> {
		self.handles.iter().filter(move |h| h.role == role)
	}
}

/// Bordered box with a centred label and up to four side handles.
pub fn render_box(data: &NodeData, theme: &DiagramTheme, measure: &dyn TextMeasure) -> NodeVisual {
	let (handles, border) = match data {
		NodeData::Box(d) if d.class_name.as_deref() == Some(EXPLANATION_CLASS) => {
			(Some(d.handles), BorderStyle::Explanation)
		}
		NodeData::Box(d) => (Some(d.handles), BorderStyle::Default),
		NodeData::Schema(_) => (None, BorderStyle::Default),
	};
	let padding = if border == BorderStyle::Explanation {
		EXPLANATION_PADDING
	} else {
		theme.box_padding
	};

	let label = data.label();
	let lines = label.lines();
	let line_h = theme.font_size * theme.line_height;
	let content_w = lines
		.iter()
		.map(|l| measure.width(l, theme.font_size, FontClass::Sans, false))
		.fold(0.0, f64::max);
	let width = (content_w + 2.0 * padding).max(theme.box_min_width);
	let height = lines.len() as f64 * line_h + 2.0 * padding;

	let texts = lines
		.iter()
		.enumerate()
		.map(|(i, line)| TextRun {
			text: line.to_string(),
			x: width / 2.0,
			y: padding + line_h * (i as f64 + 0.5),
			style: TextStyle {
				size: theme.font_size,
				..Default::default()
			},
		})
		.collect();

	let handles = handles
		.map(|flags| {
			HandleSide::ALL
				.into_iter()
				.filter(|&side| flags.is_set(side))
				.map(|side| {
					let (x, y, role) = match side {
						HandleSide::Top => (width / 2.0, 0.0, HandleRole::Target),
						HandleSide::Left => (0.0, height / 2.0, HandleRole::Target),
						HandleSide::Right => (width, height / 2.0, HandleRole::Source),
						HandleSide::Bottom => (width / 2.0, height, HandleRole::Source),
					};
					HandleMarker {
						id: side.id().into(),
						side,
						role,
						x,
						y,
					}
				})
				.collect()
		})
		.unwrap_or_default();

	NodeVisual {
		width,
		height,
		border,
		texts,
		handles,
	}
}

/// Titled table with one row, and one handle pair, per schema field.
pub fn render_schema(data: &NodeData, theme: &DiagramTheme, measure: &dyn TextMeasure) -> NodeVisual {
	let fields = match data {
		NodeData::Schema(d) => d.schema.as_slice(),
		NodeData::Box(_) => &[],
	};
	let (px, py, gap) = (theme.schema_padding_x, theme.schema_padding_y, theme.schema_column_gap);
	let title_h = theme.schema_title_size * theme.line_height;
	let row_h = theme.schema_row_size * theme.line_height;
	let row_size = theme.schema_row_size;

	let title = data.label().lines().join(" ");
	let mut content_w = measure.width(&title, theme.schema_title_size, FontClass::Sans, true);
	let mut texts = vec![TextRun {
		text: title,
		x: px,
		y: py + title_h / 2.0,
		style: TextStyle {
			size: theme.schema_title_size,
			bold: true,
			align: TextAlign::Left,
			..Default::default()
		},
	}];

	let mut cursor = py + title_h + TITLE_MARGIN;
	let mut centres = Vec::with_capacity(fields.len());
	for (i, field) in fields.iter().enumerate() {
		if i > 0 {
			cursor += theme.schema_row_gap;
		}
		let y = cursor + row_h / 2.0;
		let mut x = px;
		let mut push = |text: String, style: TextStyle, class: FontClass| {
			let w = measure.width(&text, row_size, class, false);
			texts.push(TextRun { text, x, y, style });
			x += w + gap;
		};
		let base = TextStyle {
			size: row_size,
			align: TextAlign::Left,
			..Default::default()
		};
		push(field.title.clone(), TextStyle { mono: true, ..base }, FontClass::Mono);
		push(format!("({})", field.field_type), TextStyle { muted: true, ..base }, FontClass::Sans);
		if let Some(note) = &field.note {
			push(
				note.clone(),
				TextStyle {
					muted: true,
					italic: true,
					..base
				},
				FontClass::Sans,
			);
		}
		content_w = content_w.max(x - gap - px);
		centres.push(y);
		cursor += row_h;
	}

	let width = content_w + 2.0 * px;
	let height = cursor + py;

	let handles = fields
		.iter()
		.zip(centres)
		.flat_map(|(field, y)| {
			[
				HandleMarker {
					id: field.title.clone(),
					side: HandleSide::Right,
					role: HandleRole::Source,
					x: width,
					y,
				},
				HandleMarker {
					id: field.title.clone(),
					side: HandleSide::Left,
					role: HandleRole::Target,
					x: 0.0,
					y,
				},
			]
		})
		.collect();

	NodeVisual {
		width,
		height,
		border: BorderStyle::Schema,
		texts,
		handles,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::diagram::text::{Estimate, estimate_width};
	use crate::components::diagram::types::{
		BoxNodeData, DiagramNode, HandleFlags, NodeLabel, SchemaField, SchemaNodeData,
	};

	/// Every glyph as wide as the font is tall.
	struct Square;

	impl TextMeasure for Square {
		fn width(&self, text: &str, size: f64, _: FontClass, _: bool) -> f64 {
			text.chars().count() as f64 * size
		}
	}

	fn boxed(label: NodeLabel, handles: HandleFlags) -> NodeData {
		NodeData::Box(BoxNodeData {
			label,
			handles,
			class_name: None,
		})
	}

	#[test]
	fn right_flag_without_bottom_flag() {
		let data = boxed("Client".into(), HandleFlags::none().right());
		let visual = render_box(&data, &DiagramTheme::default(), &Estimate);
		let sides: Vec<_> = visual.handles.iter().map(|h| h.side).collect();
		assert_eq!(sides, vec![HandleSide::Right]);
		let right = &visual.handles[0];
		assert_eq!((right.x, right.y), (visual.width, visual.height / 2.0));
		assert_eq!(right.role, HandleRole::Source);
	}

	#[test]
	fn top_and_left_handles_are_targets() {
		let data = boxed("Queue".into(), HandleFlags::none().top().left().right().bottom());
		let visual = render_box(&data, &DiagramTheme::default(), &Estimate);
		let roles: Vec<_> = visual.handles.iter().map(|h| (h.side, h.role)).collect();
		assert_eq!(
			roles,
			vec![
				(HandleSide::Top, HandleRole::Target),
				(HandleSide::Left, HandleRole::Target),
				(HandleSide::Right, HandleRole::Source),
				(HandleSide::Bottom, HandleRole::Source),
			]
		);
	}

	#[test]
	fn box_respects_min_width_and_centres_lines() {
		let theme = DiagramTheme::default();
		let data = boxed(
			NodeLabel::Lines(vec!["A".into(), "B".into()]),
			HandleFlags::none(),
		);
		let visual = render_box(&data, &theme, &Estimate);
		assert_eq!(visual.width, theme.box_min_width);
		assert_eq!(visual.texts.len(), 2);
		assert!(visual.texts.iter().all(|t| t.x == visual.width / 2.0));
		assert!(visual.texts[0].y < visual.texts[1].y);
	}

	#[test]
	fn explanation_class_changes_border() {
		let data = DiagramNode::boxed("s1", 0.0, 0.0, "Step 1", HandleFlags::none())
			.with_class("explanation-node")
			.data;
		let visual = render_box(&data, &DiagramTheme::default(), &Estimate);
		assert_eq!(visual.border, BorderStyle::Explanation);
	}

	#[test]
	fn schema_exposes_one_handle_pair_per_field_in_order() {
		let data = NodeData::Schema(SchemaNodeData {
			label: "Users".into(),
			schema: vec![
				SchemaField::new("id", "uuid").with_note("primary key"),
				SchemaField::new("email", "varchar"),
				SchemaField::new("bio", "text"),
			],
		});
		let visual = render_schema(&data, &DiagramTheme::default(), &Estimate);
		let sources: Vec<_> = visual.handles_with_role(HandleRole::Source).map(|h| h.id.as_str()).collect();
		let targets: Vec<_> = visual.handles_with_role(HandleRole::Target).map(|h| h.id.as_str()).collect();
		assert_eq!(sources, vec!["id", "email", "bio"]);
		assert_eq!(targets, vec!["id", "email", "bio"]);
		let ys: Vec<_> = visual.handles_with_role(HandleRole::Source).map(|h| h.y).collect();
		assert!(ys.windows(2).all(|w| w[0] < w[1]));
	}

	#[test]
	fn schema_rows_carry_type_and_italic_note() {
		let data = NodeData::Schema(SchemaNodeData {
			label: "Users".into(),
			schema: vec![
				SchemaField::new("id", "uuid").with_note("primary key"),
				SchemaField::new("bio", "text"),
			],
		});
		let visual = render_schema(&data, &DiagramTheme::default(), &Estimate);
		let texts: Vec<_> = visual.texts.iter().map(|t| t.text.as_str()).collect();
		assert_eq!(texts, vec!["Users", "id", "(uuid)", "primary key", "bio", "(text)"]);
		assert!(visual.texts[0].style.bold);
		assert!(visual.texts[1].style.mono);
		assert!(visual.texts[3].style.italic);
		assert!(!visual.texts[5].style.italic);
	}

	#[test]
	fn schema_handle_lookup_prefers_requested_role() {
		let data = NodeData::Schema(SchemaNodeData {
			label: "T".into(),
			schema: vec![SchemaField::new("user_id", "uuid")],
		});
		let visual = render_schema(&data, &DiagramTheme::default(), &Estimate);
		let source = visual.handle("user_id", HandleRole::Source).map(|h| h.side);
		let target = visual.handle("user_id", HandleRole::Target).map(|h| h.side);
		assert_eq!(source, Some(HandleSide::Right));
		assert_eq!(target, Some(HandleSide::Left));
	}

	#[test]
	fn renderers_are_pure() {
		let theme = DiagramTheme::default();
		let data = boxed("Work Server".into(), HandleFlags::none().left().bottom());
		assert_eq!(render_box(&data, &theme, &Estimate), render_box(&data, &theme, &Estimate));
	}

	#[test]
	fn box_width_follows_the_measurer() {
		let theme = DiagramTheme::default();
		let data = boxed("Notification Service".into(), HandleFlags::none());
		let estimated = render_box(&data, &theme, &Estimate);
		let measured = render_box(&data, &theme, &Square);
		assert_eq!(measured.width, 20.0 * theme.font_size + 2.0 * theme.box_padding);
		assert!(measured.width > estimated.width);
	}

	#[test]
	fn schema_runs_are_spaced_by_measured_width() {
		let theme = DiagramTheme::default();
		let data = NodeData::Schema(SchemaNodeData {
			label: "Posts".into(),
			schema: vec![SchemaField::new("user_id", "uuid").with_note("author")],
		});
		let visual = render_schema(&data, &theme, &Square);
		let (name, ty, note) = (&visual.texts[1], &visual.texts[2], &visual.texts[3]);
		let size = theme.schema_row_size;
		assert_eq!(ty.x, name.x + 7.0 * size + theme.schema_column_gap);
		assert_eq!(note.x, ty.x + 6.0 * size + theme.schema_column_gap);
		assert!(ty.x - name.x > estimate_width("user_id", size, FontClass::Mono, false));
		assert!(visual.width >= note.x + 6.0 * size);
	}
}
