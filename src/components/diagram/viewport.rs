use super::scene::Rect;

pub const ZOOM_STEP: f64 = 1.2;

/// screen = graph * k + (x, y)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomLimits {
	pub min: f64,
	pub max: f64,
}

impl ZoomLimits {
	pub fn new(min: f64, max: f64) -> Self {
		Self {
			min,
			max: max.max(min),
		}
	}

	pub fn clamp(&self, k: f64) -> f64 {
		k.clamp(self.min, self.max)
	}
}

/// Per-diagram pan/zoom state. Never written back into the graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
	pub transform: ViewTransform,
	pub width: f64,
	pub height: f64,
	pub limits: ZoomLimits,
}

impl Viewport {
	pub fn new(width: f64, height: f64, limits: ZoomLimits) -> Self {
		Self {
			transform: ViewTransform {
				k: limits.clamp(1.0),
				..Default::default()
			},
			width,
			height,
			limits,
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn graph_to_screen(&self, gx: f64, gy: f64) -> (f64, f64) {
		(
			gx * self.transform.k + self.transform.x,
			gy * self.transform.k + self.transform.y,
		)
	}

	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		self.transform.x += dx;
		self.transform.y += dy;
	}

	/// Scales by `factor` keeping the graph point under `(sx, sy)` fixed.
	pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64) {
		if factor <= 0.0 {
			return;
		}
		let new_k = self.limits.clamp(self.transform.k * factor);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn zoom_in(&mut self) {
		self.zoom_at(ZOOM_STEP, self.width / 2.0, self.height / 2.0);
	}

	pub fn zoom_out(&mut self) {
		self.zoom_at(1.0 / ZOOM_STEP, self.width / 2.0, self.height / 2.0);
	}

	/// Centres `bounds` and scales it to fill the viewport, leaving
	/// `padding` (a fraction of each viewport dimension) empty.
	pub fn fit(&mut self, bounds: Rect, padding: f64) {
		if self.width <= 0.0 || self.height <= 0.0 {
			return;
		}
		let avail_w = self.width * (1.0 - 2.0 * padding).max(0.05);
		let avail_h = self.height * (1.0 - 2.0 * padding).max(0.05);
		let k = if bounds.width <= 0.0 || bounds.height <= 0.0 {
			self.limits.clamp(1.0)
		} else {
			self.limits.clamp((avail_w / bounds.width).min(avail_h / bounds.height))
		};
		let (cx, cy) = bounds.center();
		self.transform = ViewTransform {
			x: self.width / 2.0 - cx * k,
			y: self.height / 2.0 - cy * k,
			k,
		};
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}
