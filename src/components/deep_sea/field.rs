//! Deep sea field state: a fixed population of creatures over a surface.
//!
//! The field is built once per surface size and then advanced one tick per
//! animation frame. Creatures that float off the top are recycled in place
//! with a fresh sample, so the population only changes when the whole field
//! is rebuilt on resize.

use log::debug;
use rand::rngs::SmallRng;

use super::config::{FieldCounts, ViewportClass};
use super::species::{Bounds, Creature, Placement, Species, Step};
use super::theme::Palette;

/// Pointer position in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	pub x: f64,
	pub y: f64,
}

impl Pointer {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Read-only snapshot handed to every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameContext {
	/// Current pointer, or the viewport center when there is none.
	pub pointer: Pointer,
}

/// Page-level preferences read when the field is mounted or resized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Environment {
	/// `prefers-reduced-motion: reduce`; no field is mounted at all.
	pub reduced_motion: bool,
	pub viewport: ViewportClass,
}

/// Ordered creature population plus the surface it lives on.
///
/// Order is draw order: plankton first, bubbles over them, jellyfish on top.
pub struct Field {
	creatures: Vec<Creature>,
	bounds: Bounds,
	counts: FieldCounts,
	palette: Palette,
	rng: SmallRng,
}

impl Field {
	/// Populates a field. A surface without area yields an inert field.
	pub fn create(width: f64, height: f64, counts: FieldCounts, rng: SmallRng) -> Self {
		Self::create_with_palette(width, height, counts, Palette::default(), rng)
	}

	pub fn create_with_palette(
		width: f64,
		height: f64,
		counts: FieldCounts,
		palette: Palette,
		rng: SmallRng,
	) -> Self {
		let mut field = Self {
			creatures: Vec::new(),
			bounds: Bounds::new(width, height),
			counts,
			palette,
			rng,
		};
		field.populate();
		field
	}

	fn populate(&mut self) {
		self.creatures.clear();
		if self.bounds.is_empty() {
			return;
		}
		self.creatures.reserve(self.counts.total());

		let layers = [
			(Species::Plankton, self.counts.plankton),
			(Species::Bubble, self.counts.bubbles),
			(Species::Jellyfish, self.counts.jellyfish),
		];
		for (species, count) in layers {
			for _ in 0..count {
				self.creatures.push(Creature::spawn(
					species,
					&mut self.rng,
					self.bounds,
					&self.palette,
					Placement::Scattered,
				));
			}
		}
	}

	/// Advances every creature by one tick, recycling those that exited.
	///
	/// Creatures never read each other, so each one moves from exactly its
	/// previous-frame state.
	pub fn update(&mut self, ctx: &FrameContext) {
		let bounds = self.bounds;
		for creature in &mut self.creatures {
			if creature.update(bounds, ctx.pointer) == Step::Exited {
				*creature = Creature::spawn(
					creature.species(),
					&mut self.rng,
					bounds,
					&self.palette,
					Placement::Below,
				);
			}
		}
	}

	/// Discards every creature and repopulates at the new size.
	pub fn resize(&mut self, width: f64, height: f64, counts: FieldCounts) {
		self.bounds = Bounds::new(width, height);
		self.counts = counts;
		self.populate();
		debug!(
			"deep-sea: field rebuilt at {}x{} with {} creatures",
			width,
			height,
			self.creatures.len()
		);
	}

	/// Nothing to update or draw.
	pub fn is_inert(&self) -> bool {
		self.creatures.is_empty()
	}

	pub fn creatures(&self) -> &[Creature] {
		&self.creatures
	}

	/// Mutable access for placing creatures by hand.
	pub fn creatures_mut(&mut self) -> &mut [Creature] {
		&mut self.creatures
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn counts(&self) -> FieldCounts {
		self.counts
	}

	/// Live creatures of one species.
	pub fn count(&self, species: Species) -> usize {
		self.creatures
			.iter()
			.filter(|c| c.species() == species)
			.count()
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::super::species::Bubble;
	use super::*;

	fn field(width: f64, height: f64, counts: FieldCounts) -> Field {
		Field::create(width, height, counts, SmallRng::seed_from_u64(11))
	}

	#[test]
	fn creatures_are_layered_by_species() {
		let f = field(800.0, 600.0, FieldCounts::new(3, 2, 4));
		let order: Vec<Species> = f.creatures().iter().map(Creature::species).collect();
		assert_eq!(
			order,
			[
				Species::Plankton,
				Species::Plankton,
				Species::Plankton,
				Species::Bubble,
				Species::Bubble,
				Species::Bubble,
				Species::Bubble,
				Species::Jellyfish,
				Species::Jellyfish,
			]
		);
	}

	#[test]
	fn zero_sized_surface_is_inert() {
		let f = field(0.0, 0.0, FieldCounts::new(80, 5, 25));
		assert!(f.is_inert());
		let f = field(800.0, 0.0, FieldCounts::new(80, 5, 25));
		assert!(f.is_inert());
	}

	#[test]
	fn inert_field_update_is_a_no_op() {
		let mut f = field(0.0, 0.0, FieldCounts::new(1, 1, 1));
		f.update(&FrameContext::default());
		assert!(f.is_inert());
	}

	#[test]
	fn resize_regenerates_with_new_counts() {
		let mut f = field(800.0, 600.0, FieldCounts::new(10, 5, 5));
		f.resize(400.0, 900.0, FieldCounts::new(4, 0, 2));
		assert_eq!(f.creatures().len(), 6);
		assert_eq!(f.count(Species::Jellyfish), 0);
		assert_eq!(f.bounds(), Bounds::new(400.0, 900.0));
		for c in f.creatures() {
			let (x, y) = c.position();
			assert!((0.0..400.0).contains(&x));
			assert!((0.0..900.0).contains(&y));
		}
	}

	#[test]
	fn resize_to_nothing_then_back() {
		let mut f = field(800.0, 600.0, FieldCounts::new(2, 0, 2));
		f.resize(0.0, 0.0, FieldCounts::new(2, 0, 2));
		assert!(f.is_inert());
		f.resize(320.0, 480.0, FieldCounts::new(2, 0, 2));
		assert_eq!(f.creatures().len(), 4);
	}

	#[test]
	fn exited_creature_recycles_at_the_bottom() {
		let mut f = field(800.0, 600.0, FieldCounts::new(0, 0, 1));
		if let Creature::Bubble(b) = &mut f.creatures_mut()[0] {
			b.y = -Bubble::MARGIN;
		}
		f.update(&FrameContext::default());
		let (_, y) = f.creatures()[0].position();
		assert_eq!(y, 600.0 + Bubble::MARGIN);
		assert_eq!(f.count(Species::Bubble), 1);
	}
}
