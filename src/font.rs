/// Font requests and the context they are resolved in.
pub mod description;
/// Loaded face data shared between resolved fonts.
pub mod face;
/// Resolved fonts: fallback runs, `rustybuzz` shaping and glyph outlines.
pub mod resolved;

pub use description::{
    FontDescription, FontDesign, FontFamily, FontStyle, FontWeight, ResolutionContext,
};
pub use face::LoadedFace;
pub use resolved::ResolvedFont;
