//! The three creature species drifting through the deep sea field.
//!
//! Each species samples its motion parameters uniformly from fixed ranges when
//! it spawns. All motion is expressed per tick (one animation frame), so the
//! field looks the same at any frame rate the host happens to deliver.
//!
//! `update` only advances a creature and reports whether it left the top of
//! the surface; replacing it with a fresh sample is the field's job.

use std::f64::consts::TAU;
use std::ops::Range;

use rand::Rng;

use super::field::Pointer;
use super::theme::{Color, Palette};

/// Size of the surface creatures move across, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// A surface with no area holds no creatures.
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}
}

/// Where a newly sampled creature is placed vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
	/// Anywhere on the surface (field creation).
	Scattered,
	/// Just below the bottom edge, by the creature's margin (recycling).
	Below,
}

/// Outcome of a single tick for one creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
	Alive,
	/// Crossed the top edge by more than its margin.
	Exited,
}

fn sample_x<R: Rng>(rng: &mut R, bounds: Bounds) -> f64 {
	rng.gen_range(0.0..1.0) * bounds.width
}

fn sample_y<R: Rng>(rng: &mut R, bounds: Bounds, placement: Placement, margin: f64) -> f64 {
	match placement {
		Placement::Scattered => rng.gen_range(0.0..1.0) * bounds.height,
		Placement::Below => bounds.height + margin,
	}
}

/// Wraps `x` into `[0, width)`.
fn wrap(x: f64, width: f64) -> f64 {
	if width <= 0.0 {
		return x;
	}
	let wrapped = x.rem_euclid(width);
	// rem_euclid can round up to `width` for tiny negative inputs
	if wrapped >= width { 0.0 } else { wrapped }
}

/// Pointer pull radius, in pixels.
pub const ATTRACT_RADIUS: f64 = 150.0;
/// Largest distance the pointer can pull a plankton in one tick.
pub const ATTRACT_STEP: f64 = 0.5;

/// Displacement a plankton at `(x, y)` receives toward the pointer this tick.
///
/// Falls off linearly from [`ATTRACT_STEP`] at the pointer to zero at
/// [`ATTRACT_RADIUS`]. The pull is not capped at a plankton's own speed, so
/// one rising slower than [`ATTRACT_STEP`] that gets close enough to a still
/// pointer stays gathered around it until the pointer moves.
pub fn attraction(x: f64, y: f64, pointer: Pointer) -> (f64, f64) {
	let (dx, dy) = (pointer.x - x, pointer.y - y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist <= 0.0 || dist >= ATTRACT_RADIUS {
		return (0.0, 0.0);
	}
	let strength = ATTRACT_STEP * (1.0 - dist / ATTRACT_RADIUS);
	(dx / dist * strength, dy / dist * strength)
}

/// Tiny glowing dot drifting upward, drawn toward the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Plankton {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub speed: f64,
	/// Constant horizontal drift per tick
	pub drift: f64,
	/// Glow phase; also drives the sideways shimmer
	pub pulse: f64,
	pub pulse_speed: f64,
	pub color: Color,
}

impl Plankton {
	pub const RADIUS: Range<f64> = 1.0..3.0;
	pub const SPEED: Range<f64> = 0.3..1.0;
	pub const DRIFT: Range<f64> = -0.5..0.5;
	pub const PULSE_SPEED: Range<f64> = 0.02..0.06;
	pub const MARGIN: f64 = 50.0;
	const SHIMMER: f64 = 0.3;

	pub fn spawn<R: Rng>(rng: &mut R, bounds: Bounds, palette: &Palette, placement: Placement) -> Self {
		Self {
			x: sample_x(rng, bounds),
			y: sample_y(rng, bounds, placement, Self::MARGIN),
			radius: rng.gen_range(Self::RADIUS),
			speed: rng.gen_range(Self::SPEED),
			drift: rng.gen_range(Self::DRIFT),
			pulse: rng.gen_range(0.0..TAU),
			pulse_speed: rng.gen_range(Self::PULSE_SPEED),
			color: palette.plankton(rng.gen_range(0..palette.plankton.len().max(1))),
		}
	}

	pub fn update(&mut self, bounds: Bounds, pointer: Pointer) -> Step {
		self.y -= self.speed;
		self.x += self.drift + self.pulse.sin() * Self::SHIMMER;
		self.pulse += self.pulse_speed;

		let (ax, ay) = attraction(self.x, self.y, pointer);
		self.x += ax;
		self.y += ay;

		self.x = wrap(self.x, bounds.width);
		if self.y < -Self::MARGIN {
			Step::Exited
		} else {
			Step::Alive
		}
	}

	/// Current glow opacity, in `[0.1, 0.7]`.
	pub fn opacity(&self) -> f64 {
		0.4 + self.pulse.sin() * 0.3
	}
}

/// Slow jellyfish with a pulsing bell and trailing tentacles.
#[derive(Clone, Debug, PartialEq)]
pub struct Jellyfish {
	pub x: f64,
	pub y: f64,
	/// Bell width scale in pixels
	pub size: f64,
	pub speed: f64,
	pub wobble: f64,
	pub wobble_speed: f64,
	/// Only consumed when drawing tentacles
	pub tentacle_phase: f64,
	/// Drives the bell's breathing scale
	pub pulse_phase: f64,
	pub color: Color,
}

impl Jellyfish {
	pub const SIZE: Range<f64> = 35.0..65.0;
	pub const SPEED: Range<f64> = 0.3..0.7;
	pub const WOBBLE_SPEED: Range<f64> = 0.015..0.035;
	const SWAY: f64 = 0.8;
	const TENTACLE_STEP: f64 = 0.05;
	const PULSE_STEP: f64 = 0.03;
	/// Margin per pixel of size; covers glow and tentacles.
	const MARGIN_PER_SIZE: f64 = 3.0;

	pub fn spawn<R: Rng>(rng: &mut R, bounds: Bounds, palette: &Palette, placement: Placement) -> Self {
		let size = rng.gen_range(Self::SIZE);
		Self {
			x: sample_x(rng, bounds),
			y: sample_y(rng, bounds, placement, size * Self::MARGIN_PER_SIZE),
			size,
			speed: rng.gen_range(Self::SPEED),
			wobble: rng.gen_range(0.0..TAU),
			wobble_speed: rng.gen_range(Self::WOBBLE_SPEED),
			tentacle_phase: rng.gen_range(0.0..TAU),
			pulse_phase: rng.gen_range(0.0..TAU),
			color: palette.jellyfish(rng.gen_range(0..palette.jellyfish.len().max(1))),
		}
	}

	pub fn margin(&self) -> f64 {
		self.size * Self::MARGIN_PER_SIZE
	}

	pub fn update(&mut self) -> Step {
		self.y -= self.speed;
		self.wobble += self.wobble_speed;
		self.x += self.wobble.sin() * Self::SWAY;
		self.tentacle_phase += Self::TENTACLE_STEP;
		self.pulse_phase += Self::PULSE_STEP;

		if self.y < -self.margin() {
			Step::Exited
		} else {
			Step::Alive
		}
	}

	/// Bell scale factor, in `[0.9, 1.1]`.
	pub fn pulse_scale(&self) -> f64 {
		1.0 + self.pulse_phase.sin() * 0.1
	}
}

/// Air bubble that swells slightly as it rises.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
	pub x: f64,
	pub y: f64,
	/// Radius sampled at spawn
	pub base_radius: f64,
	/// Current radius, `base_radius` plus accumulated growth
	pub radius: f64,
	pub speed: f64,
	pub wobble: f64,
	pub wobble_speed: f64,
	pub opacity: f64,
}

impl Bubble {
	pub const RADIUS: Range<f64> = 4.0..14.0;
	pub const SPEED: Range<f64> = 1.0..3.0;
	pub const WOBBLE_SPEED: Range<f64> = 0.03..0.08;
	pub const OPACITY: Range<f64> = 0.3..0.7;
	pub const GROWTH: f64 = 0.002;
	pub const MARGIN: f64 = 30.0;
	const SWAY: f64 = 0.5;

	pub fn spawn<R: Rng>(rng: &mut R, bounds: Bounds, placement: Placement) -> Self {
		let radius = rng.gen_range(Self::RADIUS);
		Self {
			x: sample_x(rng, bounds),
			y: sample_y(rng, bounds, placement, Self::MARGIN),
			base_radius: radius,
			radius,
			speed: rng.gen_range(Self::SPEED),
			wobble: rng.gen_range(0.0..TAU),
			wobble_speed: rng.gen_range(Self::WOBBLE_SPEED),
			opacity: rng.gen_range(Self::OPACITY),
		}
	}

	pub fn update(&mut self) -> Step {
		self.y -= self.speed;
		self.wobble += self.wobble_speed;
		self.x += self.wobble.sin() * Self::SWAY;
		self.radius += Self::GROWTH;

		if self.y < -Self::MARGIN {
			Step::Exited
		} else {
			Step::Alive
		}
	}

	/// Upper bound on any bubble's radius on a surface `height` pixels tall:
	/// the largest sample plus growth over the slowest full traversal.
	pub fn max_radius(height: f64) -> f64 {
		let travel = height.max(0.0) + 2.0 * Self::MARGIN;
		let ticks = (travel / Self::SPEED.start).ceil() + 1.0;
		Self::RADIUS.end + ticks * Self::GROWTH
	}
}

/// Creature kind, for counting and spawning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Species {
	Plankton,
	Jellyfish,
	Bubble,
}

/// One animated entity in the field.
#[derive(Clone, Debug, PartialEq)]
pub enum Creature {
	Plankton(Plankton),
	Jellyfish(Jellyfish),
	Bubble(Bubble),
}

impl Creature {
	pub fn spawn<R: Rng>(
		species: Species,
		rng: &mut R,
		bounds: Bounds,
		palette: &Palette,
		placement: Placement,
	) -> Self {
		match species {
			Species::Plankton => Creature::Plankton(Plankton::spawn(rng, bounds, palette, placement)),
			Species::Jellyfish => {
				Creature::Jellyfish(Jellyfish::spawn(rng, bounds, palette, placement))
			}
			Species::Bubble => Creature::Bubble(Bubble::spawn(rng, bounds, placement)),
		}
	}

	pub fn species(&self) -> Species {
		match self {
			Creature::Plankton(_) => Species::Plankton,
			Creature::Jellyfish(_) => Species::Jellyfish,
			Creature::Bubble(_) => Species::Bubble,
		}
	}

	pub fn position(&self) -> (f64, f64) {
		match self {
			Creature::Plankton(p) => (p.x, p.y),
			Creature::Jellyfish(j) => (j.x, j.y),
			Creature::Bubble(b) => (b.x, b.y),
		}
	}

	/// Distance past the top edge at which this creature recycles.
	pub fn margin(&self) -> f64 {
		match self {
			Creature::Plankton(_) => Plankton::MARGIN,
			Creature::Jellyfish(j) => j.margin(),
			Creature::Bubble(_) => Bubble::MARGIN,
		}
	}

	pub fn update(&mut self, bounds: Bounds, pointer: Pointer) -> Step {
		match self {
			Creature::Plankton(p) => p.update(bounds, pointer),
			Creature::Jellyfish(j) => j.update(),
			Creature::Bubble(b) => b.update(),
		}
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;

	const BOUNDS: Bounds = Bounds::new(800.0, 600.0);

	fn far_pointer() -> Pointer {
		Pointer::new(-10_000.0, -10_000.0)
	}

	#[test]
	fn attraction_is_zero_at_and_beyond_radius() {
		let pointer = Pointer::new(0.0, 0.0);
		assert_eq!(attraction(150.0, 0.0, pointer), (0.0, 0.0));
		assert_eq!(attraction(0.0, 400.0, pointer), (0.0, 0.0));
	}

	#[test]
	fn attraction_is_zero_on_top_of_pointer() {
		let pointer = Pointer::new(10.0, 10.0);
		assert_eq!(attraction(10.0, 10.0, pointer), (0.0, 0.0));
	}

	#[test]
	fn attraction_grows_as_distance_shrinks() {
		let pointer = Pointer::new(0.0, 0.0);
		let (near, _) = attraction(-20.0, 0.0, pointer);
		let (far, _) = attraction(-120.0, 0.0, pointer);
		assert!(near > far && far > 0.0);
		assert!(near <= ATTRACT_STEP);
	}

	#[test]
	fn wrap_stays_in_half_open_range() {
		assert_eq!(wrap(800.0, 800.0), 0.0);
		assert_eq!(wrap(-1.0, 800.0), 799.0);
		assert!(wrap(-1e-18, 800.0) < 800.0);
		assert_eq!(wrap(5.0, 0.0), 5.0);
	}

	#[test]
	fn plankton_spawn_respects_ranges() {
		let mut rng = SmallRng::seed_from_u64(1);
		let palette = Palette::default();
		for _ in 0..200 {
			let p = Plankton::spawn(&mut rng, BOUNDS, &palette, Placement::Scattered);
			assert!((0.0..800.0).contains(&p.x));
			assert!((0.0..600.0).contains(&p.y));
			assert!(Plankton::RADIUS.contains(&p.radius));
			assert!(Plankton::SPEED.contains(&p.speed));
			assert!(Plankton::DRIFT.contains(&p.drift));
			assert!(Plankton::PULSE_SPEED.contains(&p.pulse_speed));
			assert!(palette.plankton.contains(&p.color));
		}
	}

	#[test]
	fn recycled_creatures_start_below_the_surface() {
		let mut rng = SmallRng::seed_from_u64(2);
		let palette = Palette::default();
		for species in [Species::Plankton, Species::Jellyfish, Species::Bubble] {
			let c = Creature::spawn(species, &mut rng, BOUNDS, &palette, Placement::Below);
			let (_, y) = c.position();
			assert_eq!(y, BOUNDS.height + c.margin());
		}
	}

	#[test]
	fn bigger_jellyfish_recycle_later() {
		let mut rng = SmallRng::seed_from_u64(3);
		let palette = Palette::default();
		let mut small = Jellyfish::spawn(&mut rng, BOUNDS, &palette, Placement::Scattered);
		let mut large = small.clone();
		small.size = 35.0;
		large.size = 65.0;
		small.y = -110.0;
		large.y = -110.0;
		assert_eq!(small.update(), Step::Exited);
		assert_eq!(large.update(), Step::Alive);
	}

	#[test]
	fn jellyfish_phases_advance_every_tick() {
		let mut rng = SmallRng::seed_from_u64(4);
		let mut j = Jellyfish::spawn(&mut rng, BOUNDS, &Palette::default(), Placement::Scattered);
		let (tentacle, pulse) = (j.tentacle_phase, j.pulse_phase);
		j.update();
		assert!((j.tentacle_phase - tentacle - 0.05).abs() < 1e-12);
		assert!((j.pulse_phase - pulse - 0.03).abs() < 1e-12);
		assert!((0.9..=1.1).contains(&j.pulse_scale()));
	}

	#[test]
	fn plankton_exits_past_top_margin() {
		let mut rng = SmallRng::seed_from_u64(5);
		let mut p = Plankton::spawn(&mut rng, BOUNDS, &Palette::default(), Placement::Scattered);
		p.y = -Plankton::MARGIN + p.speed * 0.5;
		assert_eq!(p.update(BOUNDS, far_pointer()), Step::Exited);
	}

	fn still_plankton(x: f64, y: f64, speed: f64) -> Plankton {
		Plankton {
			x,
			y,
			radius: 2.0,
			speed,
			drift: 0.0,
			pulse: 0.0,
			pulse_speed: 0.0,
			color: Palette::default().plankton(0),
		}
	}

	#[test]
	fn slow_plankton_gathers_under_a_still_pointer() {
		let pointer = Pointer::new(400.0, 400.0);
		let mut p = still_plankton(400.0, 350.0, 0.3);
		for _ in 0..5000 {
			assert_eq!(p.update(BOUNDS, pointer), Step::Alive);
		}
		assert!((p.y - pointer.y).abs() < 1.0, "y = {}", p.y);
		assert_eq!(p.x, 400.0);
	}

	#[test]
	fn slow_plankton_escapes_when_far_enough_above() {
		let pointer = Pointer::new(400.0, 400.0);
		let mut p = still_plankton(400.0, 320.0, 0.3);
		for _ in 0..200 {
			p.update(BOUNDS, pointer);
		}
		assert!(p.y < 320.0, "y = {}", p.y);
	}

	#[test]
	fn bubble_swells_while_rising() {
		let mut rng = SmallRng::seed_from_u64(6);
		let mut b = Bubble::spawn(&mut rng, BOUNDS, Placement::Scattered);
		let start = b.radius;
		for _ in 0..10 {
			b.update();
		}
		assert!((b.radius - start - 10.0 * Bubble::GROWTH).abs() < 1e-12);
		assert_eq!(b.base_radius, start);
	}
}
