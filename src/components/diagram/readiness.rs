/// One-shot gate for content that needs a live, measurable viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Readiness {
	#[default]
	Pending,
	Ready,
}

impl Readiness {
	pub fn is_ready(self) -> bool {
		self == Self::Ready
	}

	/// Returns `true` only for the transition out of `Pending`.
	pub fn mark_ready(&mut self) -> bool {
		let changed = *self == Self::Pending;
		*self = Self::Ready;
		changed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starts_pending() {
		assert!(!Readiness::default().is_ready());
	}

	#[test]
	fn marking_ready_happens_once() {
		let mut gate = Readiness::default();
		assert!(gate.mark_ready());
		assert!(gate.is_ready());
		assert!(!gate.mark_ready());
		assert!(gate.is_ready());
	}
}
