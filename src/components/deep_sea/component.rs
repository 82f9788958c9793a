//! Leptos component wrapping the deep sea canvas.
//!
//! The component creates a page-tall canvas behind the content, mounts an
//! [`AnimationController`] on it, and feeds it from the browser: frames come
//! from `requestAnimationFrame`, the pointer from `mousemove`, new sizes from
//! `resize`, and pause/resume from `visibilitychange`.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;
use send_wrapper::SendWrapper;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use super::config::FieldConfig;
use super::field::{Environment, FrameContext, Pointer};
use super::schedule::{AnimationController, FrameHandle, FrameHost};
use super::surface::CanvasSurface;

type FrameCallback = Closure<dyn FnMut(f64)>;
type Listener = Closure<dyn FnMut(Event)>;
type Attached = (EventTarget, &'static str, Listener);

/// Adds `listener` to `target` and keeps it so it can be removed later.
fn attach(attached: &mut Vec<Attached>, target: EventTarget, event: &'static str, listener: Listener) {
	if target
		.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref())
		.is_err()
	{
		warn!("deep-sea: could not listen for {}", event);
		return;
	}
	attached.push((target, event, listener));
}

/// `requestAnimationFrame` host that always schedules the same callback.
struct WindowFrames {
	window: Window,
	callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameHost for WindowFrames {
	fn request_frame(&self) -> Option<FrameHandle> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}
}

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Canvas size: full viewport width, and tall enough to span the scrolled
/// page or `depth_multiplier` viewports, whichever is more.
fn surface_size(window: &Window, config: &FieldConfig) -> (f64, f64) {
	let (vw, vh) = viewport_size(window).unwrap_or((0.0, 0.0));
	let scroll_height = window
		.document()
		.and_then(|d| d.document_element())
		.map(|e| e.scroll_height() as f64)
		.unwrap_or(0.0);
	(vw, scroll_height.max(vh * config.depth_multiplier))
}

fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|mql| mql.matches())
}

fn now(window: &Window) -> f64 {
	window.performance().map(|p| p.now()).unwrap_or(0.0)
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Renders the animated deep sea background on a canvas element.
///
/// The canvas is absolutely positioned at the top of the page and ignores
/// pointer events, so content stays interactive. Nothing is animated when the
/// user prefers reduced motion.
#[component]
pub fn DeepSeaCanvas(#[prop(into)] config: Signal<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller: Rc<RefCell<Option<AnimationController>>> = Rc::new(RefCell::new(None));
	let listeners: Rc<RefCell<Vec<Attached>>> = Rc::new(RefCell::new(Vec::new()));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if controller.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("deep-sea: no window, staying static");
			return;
		};
		let config = config.get();

		let (vw, vh) = viewport_size(&window).unwrap_or((0.0, 0.0));
		let environment = Environment {
			reduced_motion: prefers_reduced_motion(&window),
			viewport: config.viewport_class(vw),
		};

		let Some(surface) = CanvasSurface::new(canvas) else {
			warn!("deep-sea: canvas has no 2d context, staying static");
			return;
		};
		let surface = Rc::new(RefCell::new(surface));

		let host = Rc::new(WindowFrames {
			window: window.clone(),
			callback: Rc::new(RefCell::new(None)),
		});
		let pointer = Rc::new(Cell::new(Pointer::new(vw / 2.0, vh / 2.0)));

		// Frame loop
		let (controller_anim, surface_anim, host_anim, pointer_anim, window_anim) = (
			controller.clone(),
			surface.clone(),
			host.clone(),
			pointer.clone(),
			window.clone(),
		);
		*host.callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let client = pointer_anim.get();
			let scroll_y = window_anim.scroll_y().unwrap_or(0.0);
			let ctx = FrameContext {
				pointer: Pointer::new(client.x, client.y + scroll_y),
			};
			if let Some(ref mut c) = *controller_anim.borrow_mut() {
				c.on_frame(&mut *surface_anim.borrow_mut(), &ctx, &*host_anim, timestamp);
			}
		}));

		let rng = SmallRng::seed_from_u64(config.seed.unwrap_or_else(random_seed));
		let mounted = AnimationController::mount(
			Some(&mut *surface.borrow_mut()),
			surface_size(&window, &config),
			environment,
			config.clone(),
			&*host,
			rng,
		);
		let Some(mounted) = mounted else {
			// Break the callback <-> host cycle; nothing will ever be scheduled.
			host.callback.borrow_mut().take();
			return;
		};
		*controller.borrow_mut() = Some(mounted);

		let pointer_move = pointer.clone();
		let on_mousemove: Listener = Closure::new(move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				pointer_move.set(Pointer::new(ev.client_x() as f64, ev.client_y() as f64));
			}
		});

		let (controller_resize, window_resize, config_resize) =
			(controller.clone(), window.clone(), config.clone());
		let on_resize: Listener = Closure::new(move |_: Event| {
			let (vw, _) = viewport_size(&window_resize).unwrap_or((0.0, 0.0));
			let (w, h) = surface_size(&window_resize, &config_resize);
			let viewport = config_resize.viewport_class(vw);
			if let Some(ref mut c) = *controller_resize.borrow_mut() {
				c.notify_resize(w, h, viewport, now(&window_resize));
			}
		});

		let (controller_vis, host_vis) = (controller.clone(), host.clone());
		let on_visibility: Listener = Closure::new(move |_: Event| {
			let hidden = host_vis.window.document().is_some_and(|d| d.hidden());
			if let Some(ref mut c) = *controller_vis.borrow_mut() {
				if hidden {
					info!("deep-sea: page hidden, resting");
					c.stop(&*host_vis);
				} else {
					info!("deep-sea: page visible, resuming");
					c.start(&*host_vis);
				}
			}
		});

		let mut attached = listeners.borrow_mut();
		attach(&mut attached, window.clone().into(), "mousemove", on_mousemove);
		attach(&mut attached, window.clone().into(), "resize", on_resize);
		if let Some(document) = window.document() {
			attach(&mut attached, document.into(), "visibilitychange", on_visibility);
		}
		drop(attached);

		// Unmount (or a re-run of this effect): stop the loop, detach every
		// listener and drop the frame callback.
		let (controller_cleanup, host_cleanup, listeners_cleanup) =
			(controller.clone(), host.clone(), listeners.clone());
		let cleanup = SendWrapper::new(move || {
			if let Some(c) = controller_cleanup.borrow_mut().take() {
				c.teardown(&*host_cleanup);
			}
			for (target, event, listener) in listeners_cleanup.borrow_mut().drain(..) {
				let _ = target
					.remove_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
			}
			host_cleanup.callback.borrow_mut().take();
		});
		on_cleanup(move || (cleanup.take())());
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="deep-sea-canvas"
			aria-hidden="true"
			style="position: absolute; top: 0; left: 0; pointer-events: none; z-index: 0; display: block;"
		/>
	}
}
