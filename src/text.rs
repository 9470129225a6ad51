/// Newline splitting of the input text.
pub mod block;
/// The outline builder: alignment, stacking and normalization.
pub mod layout;
/// Vector paths and the two coordinate spaces they live in.
pub mod outline;
/// The font interface the builder consumes.
pub mod shaping;

pub use block::TextBlock;
pub use layout::{
    Alignment, GlyphOutlineBuilder, LineOutline, Measurement, TextOutline, build_outline,
};
pub use outline::{
    OutlinePath, OutlineSpace, PathSegment, RenderBox, RenderPoint, RenderRect, RenderSize,
    RenderSpace, RenderVector, TextBox, TextPoint, TextSpace, TextVector,
};
pub use shaping::{FontMetrics, GlyphRun, MIN_LEADING_RATIO, ShapedGlyph, ShapingFont};
