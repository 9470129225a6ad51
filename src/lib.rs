//! # Glasstext
//!
//! Text rendered as a single vector outline, ready to be used as the clip
//! shape of a glass material.
//!
//! ## Overview
//!
//! The core of the library is the [`GlyphOutlineBuilder`]. It shapes each
//! line of the text with a resolved font, collects every glyph outline into
//! one closed path, aligns the lines and reports the natural size of the
//! text. [`FontSystem`] coordinates font loading and resolution, and
//! [`GlassTextView`] wraps both into a view that produces a
//! [`VisualNode`] for the host renderer.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use glasstext::{
//!     FontSystem, GlassMaterial, GlassTextEnvironment, GlassTextView,
//!     font::{FontDescription, FontWeight},
//!     text::RenderPoint,
//! };
//!
//! // 1. Create a FontSystem
//! let font_system = FontSystem::new();
//! font_system.load_system_fonts();
//!
//! // 2. Describe the view
//! let view = GlassTextView::new("Hello\nGlass").with_material(GlassMaterial::regular());
//! let env = GlassTextEnvironment::default()
//!     .with_font(FontDescription::large_title().weight(FontWeight::BOLD));
//!
//! // 3. Render
//! let (node, measurement) = view.render(&env, &font_system, RenderPoint::origin());
//! println!("{}x{} {:?}", measurement.width, measurement.height, node.frame());
//! ```
//!
//! ## Features
//!
//! *   **Font fallback**: Glyphs missing from the primary face come from fallback faces.
//! *   **Shaping**: Ligatures and complex scripts are shaped with `rustybuzz`.
//! *   **Typed coordinates**: Glyph space and render space are distinct `euclid` units.
//! *   **Thread Safety**: The font system uses internal locking for safe concurrent use.

pub mod error;
pub mod font;
pub mod font_storage;
pub mod font_system;
pub mod text;
pub mod view;

#[cfg(test)]
mod testing;

// common re-exports
pub use error::GlassTextError;
pub use font::{FontDescription, ResolvedFont};
pub use font_storage::FontStorage;
pub use font_system::FontSystem;
pub use text::{Alignment, GlyphOutlineBuilder, Measurement, OutlinePath, build_outline};
pub use view::{GlassMaterial, GlassTextEnvironment, GlassTextView, VisualNode};

// re-export dependencies
pub use euclid;
pub use fontdb;
pub use parking_lot;
pub use rustybuzz;
