//! Drawing surface abstraction.
//!
//! The renderer only needs a small immediate-mode subset of the 2D canvas API,
//! so it draws through [`Surface`] instead of talking to
//! `CanvasRenderingContext2d` directly. [`CanvasSurface`] is the browser
//! implementation; [`RecordingSurface`] only tallies calls, for driving the
//! field without a browser.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::theme::Color;

/// One color stop of a gradient, `offset` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
	pub offset: f64,
	pub color: Color,
}

impl ColorStop {
	pub const fn new(offset: f64, color: Color) -> Self {
		Self { offset, color }
	}
}

/// Gradient between two circles, as in `createRadialGradient`.
#[derive(Clone, Debug, PartialEq)]
pub struct RadialGradient {
	pub inner: (f64, f64, f64),
	pub outer: (f64, f64, f64),
	pub stops: Vec<ColorStop>,
}

/// Gradient along a line, as in `createLinearGradient`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub stops: Vec<ColorStop>,
}

/// Fill style for the current path.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	Solid(Color),
	Radial(RadialGradient),
	Linear(LinearGradient),
}

impl Paint {
	/// Soft glow centered on `(x, y)`, fading from `color` to nothing at `radius`.
	pub fn glow(x: f64, y: f64, radius: f64, color: Color) -> Self {
		Paint::Radial(RadialGradient {
			inner: (x, y, 0.0),
			outer: (x, y, radius),
			stops: vec![
				ColorStop::new(0.0, color),
				ColorStop::new(1.0, Color::TRANSPARENT),
			],
		})
	}
}

/// Immediate-mode 2D drawing in surface pixels.
///
/// Mirrors the canvas path model: build a path with `begin_path` and the
/// segment calls, then `fill` or `stroke` it.
pub trait Surface {
	/// Current `(width, height)` in pixels.
	fn size(&self) -> (f64, f64);
	fn set_size(&mut self, width: f64, height: f64);
	/// Erases the whole surface.
	fn clear(&mut self);

	fn save(&mut self);
	fn restore(&mut self);
	fn translate(&mut self, x: f64, y: f64);

	fn begin_path(&mut self);
	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, start: f64, end: f64);
	fn move_to(&mut self, x: f64, y: f64);
	fn line_to(&mut self, x: f64, y: f64);
	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);

	fn fill(&mut self, paint: &Paint);
	/// Strokes the current path with round caps.
	fn stroke(&mut self, color: Color, width: f64);
}

/// A canvas element and its 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquires the 2D context; `None` when the browser refuses one.
	pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()?
			.dyn_into()
			.ok()?;
		Some(Self { canvas, ctx })
	}

	fn set_paint(&self, paint: &Paint) {
		match paint {
			Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
			Paint::Radial(g) => {
				let (x0, y0, r0) = g.inner;
				let (x1, y1, r1) = g.outer;
				let Ok(gradient) = self.ctx.create_radial_gradient(x0, y0, r0, x1, y1, r1) else {
					return;
				};
				for stop in &g.stops {
					let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
				}
				#[allow(deprecated)]
				self.ctx.set_fill_style(&gradient);
			}
			Paint::Linear(g) => {
				let gradient = self
					.ctx
					.create_linear_gradient(g.from.0, g.from.1, g.to.0, g.to.1);
				for stop in &g.stops {
					let _ = gradient.add_color_stop(stop.offset as f32, &stop.color.to_css());
				}
				#[allow(deprecated)]
				self.ctx.set_fill_style(&gradient);
			}
		}
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> (f64, f64) {
		(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn set_size(&mut self, width: f64, height: f64) {
		self.canvas.set_width(width.max(0.0) as u32);
		self.canvas.set_height(height.max(0.0) as u32);
	}

	fn clear(&mut self) {
		let (w, h) = self.size();
		self.ctx.clear_rect(0.0, 0.0, w, h);
	}

	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = self.ctx.translate(x, y);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let _ = self.ctx.arc(x, y, radius.max(0.0), start, end);
	}

	fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64, start: f64, end: f64) {
		let _ = self.ctx.ellipse(x, y, rx.max(0.0), ry.max(0.0), 0.0, start, end);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
		self.ctx.quadratic_curve_to(cx, cy, x, y);
	}

	fn fill(&mut self, paint: &Paint) {
		self.set_paint(paint);
		self.ctx.fill();
	}

	fn stroke(&mut self, color: Color, width: f64) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.set_line_cap("round");
		self.ctx.stroke();
	}
}

/// Surface that draws nothing and counts what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
	pub width: f64,
	pub height: f64,
	pub clears: usize,
	pub fills: usize,
	pub strokes: usize,
	/// `save` calls minus `restore` calls
	pub depth: i32,
	pub paints: Vec<Paint>,
}

impl RecordingSurface {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	/// Fill and stroke calls so far.
	pub fn draws(&self) -> usize {
		self.fills + self.strokes
	}
}

impl Surface for RecordingSurface {
	fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	fn set_size(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn clear(&mut self) {
		self.clears += 1;
	}

	fn save(&mut self) {
		self.depth += 1;
	}

	fn restore(&mut self) {
		self.depth -= 1;
	}

	fn translate(&mut self, _x: f64, _y: f64) {}

	fn begin_path(&mut self) {}

	fn arc(&mut self, _x: f64, _y: f64, _radius: f64, _start: f64, _end: f64) {}

	fn ellipse(&mut self, _x: f64, _y: f64, _rx: f64, _ry: f64, _start: f64, _end: f64) {}

	fn move_to(&mut self, _x: f64, _y: f64) {}

	fn line_to(&mut self, _x: f64, _y: f64) {}

	fn quadratic_curve_to(&mut self, _cx: f64, _cy: f64, _x: f64, _y: f64) {}

	fn fill(&mut self, paint: &Paint) {
		self.fills += 1;
		self.paints.push(paint.clone());
	}

	fn stroke(&mut self, color: Color, _width: f64) {
		self.strokes += 1;
		self.paints.push(Paint::Solid(color));
	}
}
