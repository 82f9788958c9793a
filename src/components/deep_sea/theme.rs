//! Bioluminescent color theming for the deep sea field.
//!
//! Provides the RGBA color type used by every drawing call and the palettes
//! creatures sample their color from when they spawn.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	/// Fully transparent black, used as the outer stop of every glow.
	pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with a new alpha, clamped to `[0, 1]`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Colors creatures pick from when they spawn or recycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	pub plankton: Vec<Color>,
	pub jellyfish: Vec<Color>,
}

impl Palette {
	/// Neon cyan, blue, green, magenta and violet glow (default)
	pub fn bioluminescent() -> Self {
		Self {
			plankton: vec![
				Color::rgb(0, 255, 247),   // Cyan
				Color::rgb(0, 128, 255),   // Electric blue
				Color::rgb(57, 255, 20),   // Neon green
				Color::rgb(255, 0, 255),   // Magenta
				Color::rgb(157, 78, 221),  // Violet
			],
			jellyfish: vec![
				Color::rgb(0, 255, 247),   // Cyan
				Color::rgb(255, 0, 255),   // Magenta
				Color::rgb(157, 78, 221),  // Violet
				Color::rgb(0, 200, 255),   // Sky
			],
		}
	}

	/// Index into the plankton colors, wrapping.
	pub fn plankton(&self, index: usize) -> Color {
		pick(&self.plankton, index)
	}

	/// Index into the jellyfish colors, wrapping.
	pub fn jellyfish(&self, index: usize) -> Color {
		pick(&self.jellyfish, index)
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::bioluminescent()
	}
}

fn pick(colors: &[Color], index: usize) -> Color {
	if colors.is_empty() {
		Color::rgb(255, 255, 255)
	} else {
		colors[index % colors.len()]
	}
}

/// Bubble shading. Bubbles are colorless, so their look is fixed by the theme
/// rather than sampled per creature.
#[derive(Clone, Debug)]
pub struct BubbleStyle {
	/// Gradient center (top-left highlight side)
	pub core: Color,
	/// Mid-gradient tint
	pub tint: Color,
	/// Rim tint
	pub rim: Color,
	/// Specular highlight color
	pub specular: Color,
}

/// Jellyfish shading shared by every bell.
#[derive(Clone, Debug)]
pub struct JellyfishStyle {
	/// Glow alpha around the whole creature
	pub glow_alpha: f64,
	/// Bright spot inside the bell
	pub inner_glow: Color,
	/// Tentacles per creature
	pub tentacles: usize,
	/// Line segments per tentacle
	pub tentacle_segments: usize,
	/// Tentacle stroke width in pixels
	pub tentacle_width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub name: &'static str,
	pub bubble: BubbleStyle,
	pub jellyfish: JellyfishStyle,
}

impl Theme {
	/// Deep ocean bioluminescence (default)
	pub fn abyss() -> Self {
		Self {
			name: "abyss",
			bubble: BubbleStyle {
				core: Color::rgb(255, 255, 255),
				tint: Color::rgb(200, 240, 255),
				rim: Color::rgb(150, 220, 255),
				specular: Color::rgb(255, 255, 255),
			},
			jellyfish: JellyfishStyle {
				glow_alpha: 0.25,
				inner_glow: Color::rgba(255, 255, 255, 0.4),
				tentacles: 7,
				tentacle_segments: 5,
				tentacle_width: 2.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::abyss()
	}
}
