/// Fonts, colours and spacing shared by the node renderers and painter.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramTheme {
	pub font_family: String,
	pub mono_font_family: String,
	pub font_size: f64,
	pub schema_title_size: f64,
	pub schema_row_size: f64,
	pub line_height: f64,
	pub background: String,
	pub grid_color: String,
	pub node_fill: String,
	pub node_border: String,
	pub explanation_fill: String,
	pub explanation_border: String,
	pub schema_border: String,
	pub text_color: String,
	pub muted_text_color: String,
	pub handle_fill: String,
	pub label_background: String,
	pub box_padding: f64,
	pub box_min_width: f64,
	pub schema_padding_x: f64,
	pub schema_padding_y: f64,
	pub schema_row_gap: f64,
	pub schema_column_gap: f64,
	pub handle_radius: f64,
}

impl Default for DiagramTheme {
	fn default() -> Self {
		Self {
			font_family: "system-ui, -apple-system, Segoe UI, sans-serif".into(),
			mono_font_family: "ui-monospace, SFMono-Regular, Menlo, monospace".into(),
			font_size: 14.0,
			schema_title_size: 18.0,
			schema_row_size: 14.0,
			line_height: 1.4,
			background: "#ffffff".into(),
			grid_color: "#91919a".into(),
			node_fill: "#ffffff".into(),
			node_border: "#cccccc".into(),
			explanation_fill: "#f8fafc".into(),
			explanation_border: "#e2e8f0".into(),
			schema_border: "#a8a29e".into(),
			text_color: "#1e293b".into(),
			muted_text_color: "#6b7280".into(),
			handle_fill: "#1a192b".into(),
			label_background: "#ffffff".into(),
			box_padding: 10.0,
			box_min_width: 100.0,
			schema_padding_x: 16.0,
			schema_padding_y: 8.0,
			schema_row_gap: 4.0,
			schema_column_gap: 8.0,
			handle_radius: 4.0,
		}
	}
}

/// Defaults applied to every edge of a diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeOptions {
	pub animated: bool,
	pub stroke: String,
	pub stroke_width: f64,
}

impl Default for EdgeOptions {
	fn default() -> Self {
		Self {
			animated: false,
			stroke: "#b1b1b7".into(),
			stroke_width: 1.0,
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct CanvasOptions {
	/// Fit every node into the viewport on first paint.
	pub fit_view: bool,
	/// Fraction of the viewport left empty around the fitted bounds.
	pub fit_padding: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	pub show_background: bool,
	pub show_controls: bool,
	pub height_px: f64,
	pub edge: EdgeOptions,
}

impl Default for CanvasOptions {
	fn default() -> Self {
		Self {
			fit_view: true,
			fit_padding: 0.1,
			min_zoom: 0.5,
			max_zoom: 2.0,
			show_background: true,
			show_controls: true,
			height_px: 600.0,
			edge: EdgeOptions::default(),
		}
	}
}

impl CanvasOptions {
	/// Zoom bounds with `max` raised to `min` when configured below it.
	pub fn zoom_bounds(&self) -> (f64, f64) {
		let min = self.min_zoom.max(0.01);
		(min, self.max_zoom.max(min))
	}
}
