use super::outline::{OutlinePath, TextPoint};

/// Share of the point size used as leading when a font reports less.
///
/// Many fonts report a line gap of zero, which would make stacked lines touch.
pub const MIN_LEADING_RATIO: f32 = 0.2;

/// Vertical metrics of a font at a fixed point size, in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the top of the em box.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the em box (positive).
    pub descent: f32,
    /// Line gap reported by the font.
    pub leading: f32,
    pub point_size: f32,
}

impl FontMetrics {
    /// Baseline-to-baseline distance between stacked lines.
    pub fn line_height(&self) -> f32 {
        self.ascent + self.descent + self.leading.max(self.point_size * MIN_LEADING_RATIO)
    }
}

/// A glyph placed by the shaper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapedGlyph {
    /// Glyph index in the run font (not a character code).
    pub glyph_id: u16,
    /// Pen position relative to the start of the line.
    pub position: TextPoint,
    /// Horizontal advance of the glyph.
    pub advance: f32,
}

/// Glyphs sharing one font, in visual order.
///
/// Font fallback and script changes start new runs, so a single line may be
/// made of several runs with different fonts.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun<F> {
    pub font: F,
    pub glyphs: Vec<ShapedGlyph>,
}

impl<F> GlyphRun<F> {
    pub fn new(font: F) -> Self {
        Self {
            font,
            glyphs: Vec::new(),
        }
    }

    pub fn push(&mut self, glyph: ShapedGlyph) {
        self.glyphs.push(glyph);
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Sum of the advances of every glyph in the run.
    pub fn advance(&self) -> f32 {
        self.glyphs.iter().map(|g| g.advance).sum()
    }
}

/// Everything the outline builder needs from a font.
///
/// Implemented by [`crate::font::ResolvedFont`] on top of `rustybuzz`, and by
/// any host that brings its own shaping stack.
pub trait ShapingFont {
    /// Font attached to each run. May differ from `self` after fallback.
    type RunFont;

    /// Metrics of the requested font. Line spacing never follows fallback
    /// fonts.
    fn metrics(&self) -> FontMetrics;

    /// Shapes a single line (no newlines) into runs.
    fn shape(&self, line: &str) -> Vec<GlyphRun<Self::RunFont>>;

    /// Filled outline of one glyph of `font`, in points with the origin on
    /// the glyph's pen position. `None` when the glyph has no contours or
    /// can't be read.
    fn glyph_outline(&self, font: &Self::RunFont, glyph_id: u16) -> Option<OutlinePath>;

    /// Outlines of every glyph of `run`, in glyph order.
    ///
    /// The default asks [`Self::glyph_outline`] glyph by glyph. Fonts that
    /// parse tables per call override it to parse once per run.
    fn run_outlines(&self, run: &GlyphRun<Self::RunFont>) -> Vec<Option<OutlinePath>> {
        run.glyphs
            .iter()
            .map(|glyph| self.glyph_outline(&run.font, glyph.glyph_id))
            .collect()
    }

    /// Typographic width of a shaped line.
    ///
    /// The default sums run advances; override when the shaping stack can
    /// report a line-level bound.
    fn typographic_width(&self, runs: &[GlyphRun<Self::RunFont>]) -> f32 {
        runs.iter().map(GlyphRun::advance).sum()
    }
}

impl<T: ShapingFont + ?Sized> ShapingFont for &T {
    type RunFont = T::RunFont;

    fn metrics(&self) -> FontMetrics {
        (**self).metrics()
    }

    fn shape(&self, line: &str) -> Vec<GlyphRun<Self::RunFont>> {
        (**self).shape(line)
    }

    fn glyph_outline(&self, font: &Self::RunFont, glyph_id: u16) -> Option<OutlinePath> {
        (**self).glyph_outline(font, glyph_id)
    }

    fn run_outlines(&self, run: &GlyphRun<Self::RunFont>) -> Vec<Option<OutlinePath>> {
        (**self).run_outlines(run)
    }

    fn typographic_width(&self, runs: &[GlyphRun<Self::RunFont>]) -> f32 {
        (**self).typographic_width(runs)
    }
}
