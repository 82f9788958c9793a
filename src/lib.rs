//! deep-sea-canvas: bioluminescent particle background for a portfolio page.
//!
//! This crate provides a WASM-based canvas component that fills the page
//! background with drifting plankton, pulsing jellyfish and rising bubbles.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::deep_sea::{DeepSeaCanvas, FieldConfig, FieldCounts};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("deep-sea: logging initialized");
}

/// Load field configuration from a script element with id="field-config".
/// Expected format: JSON matching [`FieldConfig`]; missing keys keep defaults.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<FieldConfig>(&json_text) {
		Ok(config) => {
			info!(
				"deep-sea: loaded config ({} creatures on normal viewports)",
				config.counts.total()
			);
			Some(config)
		}
		Err(e) => {
			warn!("deep-sea: failed to parse field config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads field configuration from the DOM and mounts the background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Deep Sea Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<DeepSeaCanvas config=config_signal />
	}
}
