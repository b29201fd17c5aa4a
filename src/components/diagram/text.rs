//! Text measurement for node layout. Renderers size boxes through a
//! [`TextMeasure`]; the browser measures with the canvas, everything else
//! (and the canvas when it refuses) falls back to glyph-width estimates.

const SANS_CHAR_WIDTH: f64 = 0.55;
const MONO_CHAR_WIDTH: f64 = 0.6;
const BOLD_FACTOR: f64 = 1.08;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontClass {
	#[default]
	Sans,
	Mono,
}

/// Width in pixels of one run of text set in a given font.
pub trait TextMeasure {
	fn width(&self, text: &str, size: f64, class: FontClass, bold: bool) -> f64;
}

/// Character-count estimate; needs no font data.
#[derive(Clone, Copy, Debug, Default)]
pub struct Estimate;

impl TextMeasure for Estimate {
	fn width(&self, text: &str, size: f64, class: FontClass, bold: bool) -> f64 {
		estimate_width(text, size, class, bold)
	}
}

pub fn estimate_width(text: &str, size: f64, class: FontClass, bold: bool) -> f64 {
	if text.is_empty() || size <= 0.0 {
		return 0.0;
	}
	let per_char = match class {
		FontClass::Sans => SANS_CHAR_WIDTH,
		FontClass::Mono => MONO_CHAR_WIDTH,
	};
	let width = text.chars().count() as f64 * per_char * size;
	if bold { width * BOLD_FACTOR } else { width }
}
