//! Drawing for the deep sea field.
//!
//! Creatures are drawn in field order so later ones land on top. Each one is
//! a soft radial glow under a solid core or body:
//! 1. Plankton: glow, then core dot
//! 2. Bubbles: shaded body, then two specular highlights
//! 3. Jellyfish: glow, bell, inner glow, then tentacles
//!
//! Rendering reads the field and never mutates it.

use std::f64::consts::PI;

use super::field::Field;
use super::species::{Bubble, Creature, Jellyfish, Plankton};
use super::surface::{ColorStop, LinearGradient, Paint, RadialGradient, Surface};
use super::theme::{Color, Theme};

/// Renders one frame of `field`. An inert field draws nothing at all.
pub fn render<S: Surface>(field: &Field, surface: &mut S, theme: &Theme) {
	if field.is_inert() {
		return;
	}

	surface.clear();
	for creature in field.creatures() {
		match creature {
			Creature::Plankton(p) => draw_plankton(surface, p),
			Creature::Bubble(b) => draw_bubble(surface, theme, b),
			Creature::Jellyfish(j) => draw_jellyfish(surface, theme, j),
		}
	}
}

fn draw_plankton<S: Surface>(surface: &mut S, p: &Plankton) {
	let opacity = p.opacity();
	let glow_radius = p.radius * (2.0 + p.pulse.sin()) * 4.0;

	surface.begin_path();
	surface.arc(p.x, p.y, glow_radius, 0.0, PI * 2.0);
	surface.fill(&Paint::glow(p.x, p.y, glow_radius, p.color.with_alpha(opacity)));

	surface.begin_path();
	surface.arc(p.x, p.y, p.radius, 0.0, PI * 2.0);
	surface.fill(&Paint::Solid(p.color.with_alpha(opacity + 0.4)));
}

fn draw_bubble<S: Surface>(surface: &mut S, theme: &Theme, b: &Bubble) {
	let style = &theme.bubble;
	let (x, y, r) = (b.x, b.y, b.radius);

	surface.begin_path();
	surface.arc(x, y, r, 0.0, PI * 2.0);
	surface.fill(&Paint::Radial(RadialGradient {
		inner: (x - r * 0.3, y - r * 0.3, 0.0),
		outer: (x, y, r),
		stops: vec![
			ColorStop::new(0.0, style.core.with_alpha(b.opacity)),
			ColorStop::new(0.4, style.tint.with_alpha(b.opacity * 0.5)),
			ColorStop::new(1.0, style.rim.with_alpha(b.opacity * 0.1)),
		],
	}));

	// Specular highlights
	surface.begin_path();
	surface.arc(x - r * 0.35, y - r * 0.35, r * 0.25, 0.0, PI * 2.0);
	surface.fill(&Paint::Solid(style.specular.with_alpha(b.opacity + 0.2)));

	surface.begin_path();
	surface.arc(x + r * 0.2, y + r * 0.2, r * 0.1, 0.0, PI * 2.0);
	surface.fill(&Paint::Solid(style.specular.with_alpha(b.opacity * 0.5)));
}

fn draw_jellyfish<S: Surface>(surface: &mut S, theme: &Theme, j: &Jellyfish) {
	let style = &theme.jellyfish;
	let size = j.size;
	let pulse = j.pulse_scale();

	surface.save();
	surface.translate(j.x, j.y);

	let glow_radius = size * 2.5;
	surface.begin_path();
	surface.arc(0.0, 0.0, glow_radius, 0.0, PI * 2.0);
	surface.fill(&Paint::glow(0.0, 0.0, glow_radius, j.color.with_alpha(style.glow_alpha)));

	draw_bell(surface, j, pulse);

	let inner_y = -size * 0.1;
	let inner_radius = size * 0.3;
	surface.begin_path();
	surface.arc(0.0, inner_y, inner_radius, 0.0, PI * 2.0);
	surface.fill(&Paint::glow(0.0, inner_y, inner_radius, style.inner_glow));

	draw_tentacles(surface, theme, j);

	surface.restore();
}

/// Half-ellipse dome closed underneath by two quadratic curves.
fn draw_bell<S: Surface>(surface: &mut S, j: &Jellyfish, pulse: f64) {
	let size = j.size;
	let half_width = size * 0.7 * pulse;

	surface.begin_path();
	surface.ellipse(0.0, 0.0, half_width, size * 0.5 * pulse, PI, 0.0);
	surface.quadratic_curve_to(half_width, size * 0.2, 0.0, size * 0.35);
	surface.quadratic_curve_to(-half_width, size * 0.2, -half_width, 0.0);
	surface.fill(&Paint::Linear(LinearGradient {
		from: (0.0, -size * 0.5),
		to: (0.0, size * 0.4),
		stops: vec![
			ColorStop::new(0.0, j.color.with_alpha(0.7)),
			ColorStop::new(0.5, j.color.with_alpha(0.4)),
			ColorStop::new(1.0, j.color.with_alpha(0.1)),
		],
	}));
}

fn draw_tentacles<S: Surface>(surface: &mut S, theme: &Theme, j: &Jellyfish) {
	let style = &theme.jellyfish;
	let size = j.size;
	let count = style.tentacles;
	let top = size * 0.25;

	for i in 0..count {
		let start_x = (i as f64 - (count as f64 - 1.0) / 2.0) * size * 0.15;
		let phase = j.tentacle_phase + i as f64 * 0.4;

		surface.begin_path();
		surface.move_to(start_x, top);
		for seg in 1..=style.tentacle_segments {
			let seg = seg as f64;
			let seg_x = start_x + (phase + seg * 0.5).sin() * size * 0.12;
			surface.line_to(seg_x, top + seg * size * 0.35);
		}
		surface.stroke(tentacle_color(j.color, i), style.tentacle_width);
	}
}

/// Tentacle color; each successive tentacle is fainter.
fn tentacle_color(color: Color, index: usize) -> Color {
	color.with_alpha(0.5 - index as f64 * 0.05)
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::deep_sea::config::FieldCounts;
	use crate::components::deep_sea::surface::RecordingSurface;

	fn field(counts: FieldCounts) -> Field {
		Field::create(800.0, 600.0, counts, SmallRng::seed_from_u64(21))
	}

	#[test]
	fn inert_field_draws_nothing() {
		let f = Field::create(0.0, 0.0, FieldCounts::new(5, 5, 5), SmallRng::seed_from_u64(1));
		let mut surface = RecordingSurface::new(0.0, 0.0);
		render(&f, &mut surface, &Theme::default());
		assert_eq!(surface.clears, 0);
		assert_eq!(surface.draws(), 0);
	}

	#[test]
	fn each_species_draws_its_layers() {
		let theme = Theme::default();

		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&field(FieldCounts::new(1, 0, 0)), &mut surface, &theme);
		assert_eq!((surface.fills, surface.strokes), (2, 0));

		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&field(FieldCounts::new(0, 0, 1)), &mut surface, &theme);
		assert_eq!((surface.fills, surface.strokes), (3, 0));

		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&field(FieldCounts::new(0, 1, 0)), &mut surface, &theme);
		assert_eq!((surface.fills, surface.strokes), (3, 7));
		assert_eq!(surface.depth, 0);
	}

	#[test]
	fn render_clears_once_per_frame() {
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&field(FieldCounts::new(4, 1, 4)), &mut surface, &Theme::default());
		assert_eq!(surface.clears, 1);
	}

	#[test]
	fn render_leaves_field_untouched() {
		let f = field(FieldCounts::new(10, 3, 10));
		let before = f.creatures().to_vec();
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&f, &mut surface, &Theme::default());
		render(&f, &mut surface, &Theme::default());
		assert_eq!(f.creatures(), before.as_slice());
	}

	#[test]
	fn outer_tentacles_are_fainter() {
		let color = Color::rgb(0, 255, 247);
		let alphas: Vec<f64> = (0..7).map(|i| tentacle_color(color, i).a).collect();
		assert!(alphas.windows(2).all(|w| w[1] < w[0]));
		assert!((alphas[0] - 0.5).abs() < 1e-12);
	}

	#[test]
	fn glows_fade_to_transparent() {
		let mut surface = RecordingSurface::new(800.0, 600.0);
		render(&field(FieldCounts::new(1, 0, 0)), &mut surface, &Theme::default());
		let Paint::Radial(glow) = &surface.paints[0] else {
			panic!("plankton glow should be radial");
		};
		assert_eq!(glow.stops.last().map(|s| s.color), Some(Color::TRANSPARENT));
		assert_eq!(glow.inner.2, 0.0);
	}
}
