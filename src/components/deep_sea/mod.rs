//! Deep sea particle background.
//!
//! Animates a fixed population of decorative creatures on a page-tall canvas:
//! - Glowing plankton drifting upward, pulled gently toward the pointer
//! - Jellyfish with a breathing bell and swaying tentacles
//! - Bubbles that swell as they rise
//!
//! Creatures leaving the top are recycled at the bottom, so the population
//! stays constant until a resize rebuilds the field. The simulation and
//! drawing are independent of the browser: [`Field`] and [`render()`] work
//! against any [`Surface`], and [`AnimationController`] against any
//! [`FrameHost`].
//!
//! # Example
//!
//! ```ignore
//! use deep_sea_canvas::{DeepSeaCanvas, FieldConfig};
//!
//! let config = Signal::derive(FieldConfig::default);
//! view! { <DeepSeaCanvas config=config /> }
//! ```

mod component;
pub mod config;
pub mod field;
pub mod render;
pub mod schedule;
pub mod species;
pub mod surface;
pub mod theme;

pub use component::DeepSeaCanvas;
pub use config::{FieldConfig, FieldCounts, ViewportClass};
pub use field::{Environment, Field, FrameContext, Pointer};
pub use render::render;
pub use schedule::{AnimationController, Debouncer, FrameHandle, FrameHost, ManualFrames};
pub use species::{Bounds, Bubble, Creature, Jellyfish, Plankton, Species};
pub use surface::{CanvasSurface, Paint, RecordingSurface, Surface};
pub use theme::{Color, Palette, Theme};
