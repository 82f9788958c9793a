//! Frame scheduling for the deep sea field.
//!
//! [`AnimationController`] owns the field and drives it one frame at a time
//! through a [`FrameHost`]. It holds at most one outstanding frame request;
//! stopping cancels that request, and a frame delivered without one (a stale
//! callback after teardown) does nothing. Resizes are only recorded when they
//! arrive and get applied at the start of a later frame, once the burst has
//! gone quiet.

use std::cell::{Cell, RefCell};

use log::{debug, info, warn};
use rand::rngs::SmallRng;

use super::config::{FieldConfig, ViewportClass};
use super::field::{Environment, Field, FrameContext};
use super::render;
use super::surface::Surface;
use super::theme::Theme;

/// Identifies one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Something that calls back once per display frame.
pub trait FrameHost {
	/// Asks for one callback on the next frame. `None` if the host refused.
	fn request_frame(&self) -> Option<FrameHandle>;
	/// Withdraws a request made with [`request_frame`](Self::request_frame).
	fn cancel_frame(&self, handle: FrameHandle);
}

/// Coalesces a burst of notifications into one action after a quiet period.
///
/// Time is passed in explicitly (milliseconds on any monotonic clock).
#[derive(Clone, Debug)]
pub struct Debouncer {
	wait_ms: f64,
	deadline: Option<f64>,
}

impl Debouncer {
	pub fn new(wait_ms: f64) -> Self {
		Self {
			wait_ms: wait_ms.max(0.0),
			deadline: None,
		}
	}

	/// Restarts the quiet period from `now`.
	pub fn notify(&mut self, now: f64) {
		self.deadline = Some(now + self.wait_ms);
	}

	/// `true` exactly once per burst, at the first poll after the quiet period.
	pub fn poll(&mut self, now: f64) -> bool {
		match self.deadline {
			Some(deadline) if now >= deadline => {
				self.deadline = None;
				true
			}
			_ => false,
		}
	}

	pub fn is_pending(&self) -> bool {
		self.deadline.is_some()
	}
}

#[derive(Clone, Copy, Debug)]
struct PendingResize {
	width: f64,
	height: f64,
	viewport: ViewportClass,
}

/// Owns the field and runs update-then-draw once per delivered frame.
pub struct AnimationController {
	field: Field,
	theme: Theme,
	config: FieldConfig,
	environment: Environment,
	pending: Option<FrameHandle>,
	resize: Debouncer,
	pending_size: Option<PendingResize>,
	rebuilds: usize,
	frames: u64,
}

impl AnimationController {
	/// Sizes the surface to `width` x `height`, builds the field on it and
	/// requests the first frame.
	///
	/// Returns `None` without touching the surface or requesting anything when
	/// there is no surface or the page asked for reduced motion.
	pub fn mount<S: Surface, H: FrameHost>(
		surface: Option<&mut S>,
		(width, height): (f64, f64),
		environment: Environment,
		config: FieldConfig,
		host: &H,
		rng: SmallRng,
	) -> Option<Self> {
		let Some(surface) = surface else {
			warn!("deep-sea: no drawing surface, staying static");
			return None;
		};
		if environment.reduced_motion {
			info!("deep-sea: reduced motion requested, staying static");
			return None;
		}

		surface.set_size(width, height);
		let (width, height) = surface.size();
		let field = Field::create(width, height, config.counts_for(environment.viewport), rng);
		info!(
			"deep-sea: mounted {}x{} with {} creatures",
			width,
			height,
			field.creatures().len()
		);

		let mut controller = Self {
			field,
			theme: Theme::default(),
			resize: Debouncer::new(config.resize_debounce_ms),
			config,
			environment,
			pending: None,
			pending_size: None,
			rebuilds: 0,
			frames: 0,
		};
		controller.start(host);
		Some(controller)
	}

	/// Resumes the loop. Does nothing if a frame is already requested.
	pub fn start<H: FrameHost>(&mut self, host: &H) {
		if self.pending.is_none() {
			self.pending = host.request_frame();
			if self.pending.is_none() {
				warn!("deep-sea: frame request refused, animation stopped");
			}
		}
	}

	/// Cancels the outstanding frame. No update or draw happens until
	/// [`start`](Self::start) is called again.
	pub fn stop<H: FrameHost>(&mut self, host: &H) {
		if let Some(handle) = self.pending.take() {
			host.cancel_frame(handle);
		}
	}

	/// Stops for good, consuming the controller. Any frame the host still
	/// delivers afterwards has nothing to run.
	pub fn teardown<H: FrameHost>(mut self, host: &H) {
		self.stop(host);
		info!("deep-sea: torn down after {} frames", self.frames);
	}

	pub fn is_running(&self) -> bool {
		self.pending.is_some()
	}

	/// Records new surface dimensions. The field is rebuilt at the first frame
	/// after `resize_debounce_ms` without further notifications.
	pub fn notify_resize(&mut self, width: f64, height: f64, viewport: ViewportClass, now: f64) {
		self.pending_size = Some(PendingResize {
			width,
			height,
			viewport,
		});
		self.resize.notify(now);
	}

	/// Runs one frame: due resize, update pass, draw pass, next request.
	///
	/// Returns `false` and touches nothing when no frame was outstanding.
	pub fn on_frame<S: Surface, H: FrameHost>(
		&mut self,
		surface: &mut S,
		ctx: &FrameContext,
		host: &H,
		now: f64,
	) -> bool {
		if self.pending.take().is_none() {
			return false;
		}

		self.apply_resize(surface, now);
		self.field.update(ctx);
		render::render(&self.field, surface, &self.theme);
		self.frames += 1;

		self.start(host);
		true
	}

	fn apply_resize<S: Surface>(&mut self, surface: &mut S, now: f64) {
		if !self.resize.poll(now) {
			return;
		}
		let Some(size) = self.pending_size.take() else {
			return;
		};

		if size.viewport != self.environment.viewport {
			debug!("deep-sea: viewport is now {:?}", size.viewport);
		}
		self.environment.viewport = size.viewport;
		surface.set_size(size.width, size.height);
		let (width, height) = surface.size();
		self.field
			.resize(width, height, self.config.counts_for(size.viewport));
		self.rebuilds += 1;
	}

	pub fn field(&self) -> &Field {
		&self.field
	}

	/// Mutable access for placing creatures by hand.
	pub fn field_mut(&mut self) -> &mut Field {
		&mut self.field
	}

	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Field rebuilds caused by resizes since mount.
	pub fn rebuilds(&self) -> usize {
		self.rebuilds
	}

	/// Frames run since mount.
	pub fn frames(&self) -> u64 {
		self.frames
	}
}

/// Frame host advanced by hand.
///
/// Every request is queued until [`advance`](Self::advance) delivers it.
#[derive(Debug, Default)]
pub struct ManualFrames {
	next_id: Cell<i32>,
	queued: RefCell<Vec<FrameHandle>>,
	requested: Cell<usize>,
	cancelled: Cell<usize>,
}

impl ManualFrames {
	pub fn new() -> Self {
		Self::default()
	}

	/// Delivers the oldest queued request, if any.
	pub fn advance(&self) -> Option<FrameHandle> {
		let mut queued = self.queued.borrow_mut();
		if queued.is_empty() {
			None
		} else {
			Some(queued.remove(0))
		}
	}

	/// Requests not yet delivered or cancelled.
	pub fn queued(&self) -> usize {
		self.queued.borrow().len()
	}

	/// Total requests ever made.
	pub fn requested(&self) -> usize {
		self.requested.get()
	}

	pub fn cancelled(&self) -> usize {
		self.cancelled.get()
	}
}

impl FrameHost for ManualFrames {
	fn request_frame(&self) -> Option<FrameHandle> {
		let id = self.next_id.get() + 1;
		self.next_id.set(id);
		self.requested.set(self.requested.get() + 1);
		self.queued.borrow_mut().push(FrameHandle(id));
		Some(FrameHandle(id))
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let mut queued = self.queued.borrow_mut();
		let before = queued.len();
		queued.retain(|h| *h != handle);
		if queued.len() != before {
			self.cancelled.set(self.cancelled.get() + 1);
		}
	}
}
