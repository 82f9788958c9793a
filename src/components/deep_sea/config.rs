//! Field configuration, deserialized from the page or taken from defaults.

use serde::Deserialize;

/// How many creatures of each species a field holds.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FieldCounts {
	pub plankton: usize,
	pub jellyfish: usize,
	pub bubbles: usize,
}

impl FieldCounts {
	pub const fn new(plankton: usize, jellyfish: usize, bubbles: usize) -> Self {
		Self {
			plankton,
			jellyfish,
			bubbles,
		}
	}

	pub fn total(&self) -> usize {
		self.plankton + self.jellyfish + self.bubbles
	}
}

/// Coarse viewport size class, re-evaluated on every resize.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewportClass {
	#[default]
	Normal,
	/// Phone-sized viewports: fewer plankton, no jellyfish.
	Narrow,
}

impl ViewportClass {
	/// `Narrow` at or below `breakpoint` CSS pixels of width.
	pub fn classify(width: f64, breakpoint: f64) -> Self {
		if width <= breakpoint {
			ViewportClass::Narrow
		} else {
			ViewportClass::Normal
		}
	}
}

/// Tunables for the deep sea field.
///
/// Every field is optional in the JSON form:
///
/// ```json
/// { "counts": { "plankton": 120 }, "resize_debounce_ms": 200, "seed": 7 }
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Counts on normal viewports.
	pub counts: FieldCounts,
	/// Counts on narrow viewports. The jellyfish count is ignored.
	pub narrow_counts: FieldCounts,
	/// Widths at or below this are [`ViewportClass::Narrow`].
	pub narrow_breakpoint: f64,
	/// Quiet period before a burst of resizes rebuilds the field.
	pub resize_debounce_ms: f64,
	/// Canvas height as a multiple of the viewport height, so the field
	/// spans the scrolled page.
	pub depth_multiplier: f64,
	/// Fixed RNG seed; random per page load when absent.
	pub seed: Option<u64>,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			counts: FieldCounts::new(80, 5, 25),
			narrow_counts: FieldCounts::new(40, 0, 25),
			narrow_breakpoint: 768.0,
			resize_debounce_ms: 300.0,
			depth_multiplier: 5.0,
			seed: None,
		}
	}
}

impl FieldConfig {
	/// Creature counts for a viewport class.
	pub fn counts_for(&self, viewport: ViewportClass) -> FieldCounts {
		match viewport {
			ViewportClass::Normal => self.counts,
			ViewportClass::Narrow => FieldCounts {
				jellyfish: 0,
				..self.narrow_counts
			},
		}
	}

	pub fn viewport_class(&self, width: f64) -> ViewportClass {
		ViewportClass::classify(width, self.narrow_breakpoint)
	}
}
