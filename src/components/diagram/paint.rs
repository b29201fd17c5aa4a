use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::node::{BorderStyle, TextAlign, TextRun};
use super::scene::{LABEL_FONT_SIZE, PlacedEdge, PlacedNode, Rect};
use super::state::DiagramState;
use super::text::{FontClass, TextMeasure, estimate_width};
use super::theme::DiagramTheme;
use super::types::MarkerEnd;

const GRID_GAP: f64 = 20.0;
const ARROW_SIZE: f64 = 10.0;
const DASH: f64 = 5.0;

/// Measures with the fonts the painter draws in.
pub struct CanvasMeasure<'a> {
	pub ctx: &'a CanvasRenderingContext2d,
	pub theme: &'a DiagramTheme,
}

impl TextMeasure for CanvasMeasure<'_> {
	fn width(&self, text: &str, size: f64, class: FontClass, bold: bool) -> f64 {
		let family = match class {
			FontClass::Sans => &self.theme.font_family,
			FontClass::Mono => &self.theme.mono_font_family,
		};
		self.ctx.set_font(&css_font(false, bold, size, family));
		match self.ctx.measure_text(text) {
			Ok(metrics) => metrics.width(),
			Err(_) => estimate_width(text, size, class, bold),
		}
	}
}

fn css_font(italic: bool, bold: bool, size: f64, family: &str) -> String {
	format!(
		"{}{}{}px {}",
		if italic { "italic " } else { "" },
		if bold { "bold " } else { "" },
		size,
		family
	)
}

pub fn render(state: &DiagramState, theme: &DiagramTheme, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.viewport.width, state.viewport.height);
	ctx.set_fill_style_str(&theme.background);
	ctx.fill_rect(0.0, 0.0, w, h);
	if state.show_background {
		draw_grid(state, theme, ctx);
	}

	let t = state.viewport.transform;
	ctx.save();
	let _ = ctx.translate(t.x, t.y);
	let _ = ctx.scale(t.k, t.k);
	for edge in &state.scene.edges {
		draw_edge(edge, state.flow_time, ctx);
	}
	for edge in &state.scene.edges {
		draw_edge_label(edge, theme, ctx);
	}
	for node in &state.scene.nodes {
		draw_node(node, theme, ctx);
	}
	ctx.restore();
}

/// Dot grid in screen space so dots stay one pixel at any zoom.
fn draw_grid(state: &DiagramState, theme: &DiagramTheme, ctx: &CanvasRenderingContext2d) {
	let t = state.viewport.transform;
	let gap = GRID_GAP * t.k;
	if gap < 4.0 {
		return;
	}
	let (w, h) = (state.viewport.width, state.viewport.height);
	ctx.set_fill_style_str(&theme.grid_color);
	let mut x = t.x.rem_euclid(gap);
	while x < w {
		let mut y = t.y.rem_euclid(gap);
		while y < h {
			ctx.fill_rect(x - 0.5, y - 0.5, 1.0, 1.0);
			y += gap;
		}
		x += gap;
	}
}

fn set_dash(ctx: &CanvasRenderingContext2d, dash: Option<(f64, f64)>) {
	let pattern = match dash {
		Some((on, off)) => js_sys::Array::of2(&JsValue::from_f64(on), &JsValue::from_f64(off)),
		None => js_sys::Array::new(),
	};
	let _ = ctx.set_line_dash(&pattern);
}

fn draw_edge(edge: &PlacedEdge, flow_time: f64, ctx: &CanvasRenderingContext2d) {
	let p = edge.path;
	let (ux, uy) = p.end_direction();
	// a filled head covers the last stretch of the line
	let end = match edge.marker_end {
		MarkerEnd::ArrowClosed => (p.to.0 - ux * ARROW_SIZE, p.to.1 - uy * ARROW_SIZE),
		_ => p.to,
	};

	ctx.set_stroke_style_str(&edge.stroke);
	ctx.set_line_width(edge.stroke_width);
	if edge.animated {
		set_dash(ctx, Some((DASH, DASH)));
		ctx.set_line_dash_offset(-(flow_time * 30.0) % (2.0 * DASH));
	}
	ctx.begin_path();
	ctx.move_to(p.from.0, p.from.1);
	ctx.bezier_curve_to(p.c1.0, p.c1.1, p.c2.0, p.c2.1, end.0, end.1);
	ctx.stroke();
	set_dash(ctx, None);

	let (back_x, back_y) = (p.to.0 - ux * ARROW_SIZE, p.to.1 - uy * ARROW_SIZE);
	let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
	match edge.marker_end {
		MarkerEnd::None => {}
		MarkerEnd::Arrow => {
			ctx.begin_path();
			ctx.move_to(back_x + px, back_y + py);
			ctx.line_to(p.to.0, p.to.1);
			ctx.line_to(back_x - px, back_y - py);
			ctx.stroke();
		}
		MarkerEnd::ArrowClosed => {
			ctx.set_fill_style_str(&edge.stroke);
			ctx.begin_path();
			ctx.move_to(p.to.0, p.to.1);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
}

fn draw_edge_label(edge: &PlacedEdge, theme: &DiagramTheme, ctx: &CanvasRenderingContext2d) {
	let Some(label) = &edge.label else {
		return;
	};
	let rect = Rect::new(
		label.x - label.width / 2.0,
		label.y - label.height / 2.0,
		label.width,
		label.height,
	);
	rounded_rect(ctx, &rect, 2.0);
	ctx.set_fill_style_str(&theme.label_background);
	ctx.fill();

	ctx.set_fill_style_str(&theme.text_color);
	ctx.set_font(&css_font(false, false, LABEL_FONT_SIZE, &theme.font_family));
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&label.text, label.x, label.y);
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, rect: &Rect, radius: f64) {
	let r = radius.min(rect.width / 2.0).min(rect.height / 2.0);
	let (x, y, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(right, y, right, bottom, r);
	let _ = ctx.arc_to(right, bottom, x, bottom, r);
	let _ = ctx.arc_to(x, bottom, x, y, r);
	let _ = ctx.arc_to(x, y, right, y, r);
	ctx.close_path();
}

fn draw_node(node: &PlacedNode, theme: &DiagramTheme, ctx: &CanvasRenderingContext2d) {
	let (fill, border, border_width, radius) = match node.visual.border {
		BorderStyle::Default | BorderStyle::Placeholder => (&theme.node_fill, &theme.node_border, 1.0, 5.0),
		BorderStyle::Explanation => (&theme.explanation_fill, &theme.explanation_border, 2.0, 8.0),
		BorderStyle::Schema => (&theme.node_fill, &theme.schema_border, 2.0, 6.0),
	};

	rounded_rect(ctx, &node.rect, radius);
	if node.visual.border == BorderStyle::Schema {
		ctx.set_shadow_color("rgba(0, 0, 0, 0.1)");
		ctx.set_shadow_blur(6.0);
		ctx.set_shadow_offset_y(2.0);
	}
	ctx.set_fill_style_str(fill);
	ctx.fill();
	ctx.set_shadow_color("transparent");
	ctx.set_shadow_blur(0.0);
	ctx.set_shadow_offset_y(0.0);

	if node.visual.border == BorderStyle::Placeholder {
		set_dash(ctx, Some((4.0, 3.0)));
	}
	ctx.set_stroke_style_str(border);
	ctx.set_line_width(border_width);
	ctx.stroke();
	set_dash(ctx, None);

	for run in &node.visual.texts {
		draw_text(node.rect.x, node.rect.y, run, theme, ctx);
	}

	for handle in &node.visual.handles {
		let (x, y) = (node.rect.x + handle.x, node.rect.y + handle.y);
		ctx.begin_path();
		let _ = ctx.arc(x, y, theme.handle_radius, 0.0, std::f64::consts::TAU);
		ctx.set_fill_style_str(&theme.handle_fill);
		ctx.fill();
		ctx.set_stroke_style_str("#ffffff");
		ctx.set_line_width(1.0);
		ctx.stroke();
	}
}

fn draw_text(ox: f64, oy: f64, run: &TextRun, theme: &DiagramTheme, ctx: &CanvasRenderingContext2d) {
	let style = run.style;
	let family = if style.mono {
		&theme.mono_font_family
	} else {
		&theme.font_family
	};
	ctx.set_font(&css_font(style.italic, style.bold, style.size, family));
	ctx.set_fill_style_str(if style.muted {
		&theme.muted_text_color
	} else {
		&theme.text_color
	});
	ctx.set_text_align(match style.align {
		TextAlign::Left => "left",
		TextAlign::Center => "center",
	});
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&run.text, ox + run.x, oy + run.y);
}
