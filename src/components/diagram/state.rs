use super::scene::Scene;
use super::theme::CanvasOptions;
use super::viewport::{Viewport, ZoomLimits};

const WHEEL_ZOOM_IN: f64 = 1.1;
const WHEEL_ZOOM_OUT: f64 = 0.9;

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Everything one mounted diagram needs between frames.
pub struct DiagramState {
	pub scene: Scene,
	pub viewport: Viewport,
	pub pan: PanState,
	/// Cleared by the controls' lock toggle.
	pub interactive: bool,
	pub flow_time: f64,
	pub show_background: bool,
	fit_padding: f64,
	dirty: bool,
}

impl DiagramState {
	pub fn new(scene: Scene, width: f64, height: f64, options: &CanvasOptions) -> Self {
		let (min, max) = options.zoom_bounds();
		let mut state = Self {
			scene,
			viewport: Viewport::new(width, height, ZoomLimits::new(min, max)),
			pan: PanState::default(),
			interactive: true,
			flow_time: 0.0,
			show_background: options.show_background,
			fit_padding: options.fit_padding,
			dirty: true,
		};
		if options.fit_view {
			state.fit_view();
		}
		state
	}

	pub fn fit_view(&mut self) {
		if let Some(bounds) = self.scene.bounds() {
			self.viewport.fit(bounds, self.fit_padding);
			self.dirty = true;
		}
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		if !self.interactive {
			return;
		}
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.viewport.transform.x,
			transform_start_y: self.viewport.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if !self.pan.active {
			return;
		}
		self.viewport.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
		self.viewport.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		self.dirty = true;
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) {
		if !self.interactive {
			return;
		}
		let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
		self.viewport.zoom_at(factor, x, y);
		self.dirty = true;
	}

	pub fn zoom_in(&mut self) {
		self.viewport.zoom_in();
		self.dirty = true;
	}

	pub fn zoom_out(&mut self) {
		self.viewport.zoom_out();
		self.dirty = true;
	}

	pub fn set_interactive(&mut self, interactive: bool) {
		self.interactive = interactive;
		if !interactive {
			self.end_pan();
		}
	}

	pub fn tick(&mut self, dt: f64) {
		if self.scene.has_animated_edges() {
			self.flow_time += dt;
			self.dirty = true;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.viewport.resize(width, height);
		self.dirty = true;
	}

	/// Whether a repaint is due; clears the flag.
	pub fn take_dirty(&mut self) -> bool {
		std::mem::take(&mut self.dirty)
	}
}
