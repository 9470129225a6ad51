use euclid::Transform2D;

use super::{
    block::TextBlock,
    outline::{
        OutlinePath, OutlineSpace, RenderRect, RenderSize, RenderSpace, RenderVector, TextBox,
        TextPoint, segment_bounds,
    },
    shaping::{GlyphRun, ShapingFont},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// Horizontal alignment of each line relative to the widest line of the block.
pub enum Alignment {
    Leading,
    #[default]
    Center,
    Trailing,
}

impl Alignment {
    /// Horizontal start offset of a line of `line_width` in a block whose
    /// widest line is `max_width`.
    pub fn offset(self, max_width: f32, line_width: f32) -> f32 {
        match self {
            Alignment::Leading => 0.0,
            Alignment::Center => (max_width - line_width) / 2.0,
            Alignment::Trailing => max_width - line_width,
        }
    }
}

/// Size of the box that holds every line of a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Typographic width of the widest line.
    pub width: f32,
    /// `line_count * line_height`.
    pub height: f32,
}

impl Measurement {
    pub fn size(&self) -> RenderSize {
        RenderSize::new(self.width, self.height)
    }
}

/// Placement record for one line of the block.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOutline {
    pub index: usize,
    /// Pen origin of the line in text space (`x` = alignment offset,
    /// `y` = `-index * line_height`).
    pub origin: TextPoint,
    /// Typographic width of the line.
    pub width: f32,
    /// Glyphs whose contours were appended.
    pub glyph_count: usize,
    /// Glyphs that produced no outline (whitespace, missing or unreadable).
    pub skipped_glyphs: usize,
    /// Bounds of the line's contours, `None` when it drew nothing.
    pub bounds: Option<TextBox>,
}

/// Output of [`GlyphOutlineBuilder::layout`], before normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOutline {
    /// Union of every glyph contour, in text space.
    pub path: OutlinePath,
    pub lines: Vec<LineOutline>,
    pub line_height: f32,
    pub measurement: Measurement,
}

impl TextOutline {
    /// Moves the outline into `destination`. See [`GlyphOutlineBuilder::normalize`].
    pub fn normalized(&self, destination: &RenderRect) -> OutlinePath<RenderSpace> {
        GlyphOutlineBuilder::normalize(&self.path, destination)
    }
}

/// Converts a text block into a single filled outline.
///
/// The work is split in two stages:
/// 1. [`Self::layout`] shapes every line, aligns it against the widest one
///    and stacks the glyph contours in text space.
/// 2. [`Self::normalize`] moves the result into the destination rectangle,
///    flipping the y-axis on the way.
///
/// [`Self::build`] runs both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphOutlineBuilder {
    pub alignment: Alignment,
}

impl GlyphOutlineBuilder {
    pub fn new(alignment: Alignment) -> Self {
        Self { alignment }
    }

    /// Builds the outline of `text` centered in `destination`, and the size
    /// of the text block.
    ///
    /// Whitespace-only or empty text yields an empty path with a valid
    /// measurement.
    pub fn build<F: ShapingFont + ?Sized>(
        &self,
        text: &str,
        font: &F,
        destination: &RenderRect,
    ) -> (OutlinePath<RenderSpace>, Measurement) {
        let outline = self.layout(text, font);
        (outline.normalized(destination), outline.measurement)
    }

    /// Shapes, aligns and stacks every line of `text` in text space.
    pub fn layout<F: ShapingFont + ?Sized>(&self, text: &str, font: &F) -> TextOutline {
        let block = TextBlock::new(text);
        let line_height = font.metrics().line_height();

        // Stage 1: shape everything first, alignment needs the widest line.
        let shaped: Vec<(Vec<GlyphRun<F::RunFont>>, f32)> = block
            .lines()
            .map(|line| {
                let runs = font.shape(line);
                let width = font.typographic_width(&runs);
                (runs, width)
            })
            .collect();
        let max_width = shaped.iter().map(|(_, w)| *w).fold(0.0, f32::max);

        // Stage 2: translate every glyph outline to its place in the block.
        let mut path = OutlinePath::new();
        let mut lines = Vec::with_capacity(shaped.len());

        for (index, (runs, width)) in shaped.iter().enumerate() {
            let origin = TextPoint::new(
                self.alignment.offset(max_width, *width),
                -(index as f32) * line_height,
            );
            let first_segment = path.len();
            let mut glyph_count = 0;
            let mut skipped_glyphs = 0;

            for run in runs {
                let outlines = font.run_outlines(run);
                for (glyph, outline) in run.glyphs.iter().zip(outlines) {
                    match outline {
                        Some(outline) if !outline.is_empty() => {
                            path.append_translated(
                                &outline,
                                origin.to_vector() + glyph.position.to_vector(),
                            );
                            glyph_count += 1;
                        }
                        _ => {
                            log::trace!("glyph {} has no outline, skipped", glyph.glyph_id);
                            skipped_glyphs += 1;
                        }
                    }
                }
            }

            lines.push(LineOutline {
                index,
                origin,
                width: *width,
                glyph_count,
                skipped_glyphs,
                bounds: segment_bounds(&path.segments()[first_segment..]),
            });
        }

        let measurement = Measurement {
            width: max_width,
            height: shaped.len() as f32 * line_height,
        };

        log::debug!(
            "laid out {} line(s), {} segment(s), {}x{}",
            lines.len(),
            path.len(),
            measurement.width,
            measurement.height
        );

        TextOutline {
            path,
            lines,
            line_height,
            measurement,
        }
    }

    /// Size of `text` without building any outline.
    pub fn measure<F: ShapingFont + ?Sized>(text: &str, font: &F) -> Measurement {
        let block = TextBlock::new(text);
        let line_height = font.metrics().line_height();

        let mut line_count = 0usize;
        let mut max_width: f32 = 0.0;
        for line in block.lines() {
            line_count += 1;
            max_width = max_width.max(font.typographic_width(&font.shape(line)));
        }

        Measurement {
            width: max_width,
            height: line_count as f32 * line_height,
        }
    }

    /// Moves a path into `destination`.
    ///
    /// The bounding box's minimum corner is moved to the origin, paths still
    /// in y-up text space are flipped into y-down render space, and the
    /// result is translated so its bounding box is centered in
    /// `destination`. A path already in render space is not flipped again,
    /// which makes normalization idempotent for a fixed destination.
    pub fn normalize<U: OutlineSpace>(
        path: &OutlinePath<U>,
        destination: &RenderRect,
    ) -> OutlinePath<RenderSpace> {
        let Some(bounds) = path.bounds() else {
            return OutlinePath::new();
        };

        let to_origin = Transform2D::<f32, U, U>::translation(-bounds.min.x, -bounds.min.y);
        let y_scale = if U::Y_UP { -1.0 } else { 1.0 };
        let to_render = to_origin.then(&Transform2D::<f32, U, RenderSpace>::scale(1.0, y_scale));
        let mut normalized = path.transformed(&to_render);

        if let Some(flipped) = normalized.bounds() {
            let target = destination.center();
            let current = flipped.center();
            normalized.translate(RenderVector::new(target.x - current.x, target.y - current.y));
        }

        normalized
    }
}

/// Builds the outline of `text` in `font`, aligned and centered in
/// `destination`. Shorthand for [`GlyphOutlineBuilder::build`].
pub fn build_outline<F: ShapingFont + ?Sized>(
    text: &str,
    font: &F,
    alignment: Alignment,
    destination: &RenderRect,
) -> (OutlinePath<RenderSpace>, Measurement) {
    GlyphOutlineBuilder::new(alignment).build(text, font, destination)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::BTreeSet};

    use super::*;
    use crate::testing::{
        ADVANCE, FALLBACK_HEIGHT, PRIMARY_HEIGHT, SyntheticFace, SyntheticFont, assert_close,
    };
    use crate::text::outline::{PathSegment, RenderPoint};
    use crate::text::shaping::FontMetrics;

    const LINE_HEIGHT: f32 = 12.0;

    fn destination() -> RenderRect {
        RenderRect::new(RenderPoint::new(100.0, 50.0), RenderSize::new(80.0, 40.0))
    }

    #[test]
    fn single_line_height_ignores_alignment() {
        let font = SyntheticFont::default();
        for alignment in [Alignment::Leading, Alignment::Center, Alignment::Trailing] {
            let (_, measurement) = build_outline("Hello", &font, alignment, &destination());
            assert_close(measurement.height, LINE_HEIGHT);
            assert_close(measurement.width, 5.0 * ADVANCE);
        }
    }

    #[test]
    fn reported_leading_wins_over_floor() {
        let font = SyntheticFont {
            leading: 4.0,
            ..SyntheticFont::default()
        };
        let measurement = GlyphOutlineBuilder::measure("a\nb", &font);
        assert_close(measurement.height, 2.0 * 14.0);
    }

    #[test]
    fn empty_lines_keep_their_row() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::new(Alignment::Leading).layout("A\n\nB\n", &font);

        assert_eq!(outline.lines.len(), 4);
        assert_close(outline.measurement.height, 4.0 * LINE_HEIGHT);

        let rows: BTreeSet<i64> = outline
            .lines
            .iter()
            .map(|line| (line.origin.y * 1000.0).round() as i64)
            .collect();
        assert_eq!(rows.len(), 4);

        assert_eq!(outline.lines[1].glyph_count, 0);
        assert_eq!(outline.lines[1].bounds, None);
        let third = outline.lines[2].bounds.expect("B draws a box");
        assert_close(third.min.y, -2.0 * LINE_HEIGHT);
    }

    #[test]
    fn crlf_stacks_an_empty_row() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::new(Alignment::Leading).layout("a\r\nb", &font);

        assert_eq!(outline.lines.len(), 3);
        assert_eq!(outline.lines[1].glyph_count, 0);
        assert_close(outline.measurement.height, 3.0 * LINE_HEIGHT);
        assert_close(outline.lines[2].origin.y, -2.0 * LINE_HEIGHT);
    }

    #[test]
    fn measure_matches_layout() {
        let font = SyntheticFont::default();
        let text = "one\nthree\n\nfive5";
        let outline = GlyphOutlineBuilder::default().layout(text, &font);
        assert_eq!(GlyphOutlineBuilder::measure(text, &font), outline.measurement);
    }

    #[test]
    fn center_alignment_shares_midpoint() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::new(Alignment::Center).layout("Hi\nWorld", &font);
        let max_width = outline.measurement.width;
        assert_close(max_width, 5.0 * ADVANCE);

        for line in &outline.lines {
            let bounds = line.bounds.expect("line draws glyphs");
            assert_close((bounds.min.x + bounds.max.x) / 2.0, max_width / 2.0);
        }
    }

    #[test]
    fn leading_alignment_starts_at_zero() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::new(Alignment::Leading).layout("Hi\nWorld", &font);
        for line in &outline.lines {
            assert_close(line.bounds.expect("line draws glyphs").min.x, 0.0);
        }
    }

    #[test]
    fn trailing_alignment_ends_at_max_width() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::new(Alignment::Trailing).layout("Hi\nWorld", &font);
        let max_width = outline.measurement.width;
        for line in &outline.lines {
            assert_close(line.bounds.expect("line draws glyphs").max.x, max_width);
        }
    }

    #[test]
    fn whitespace_only_text_is_empty_but_measured() {
        let font = SyntheticFont::default();
        let (path, measurement) =
            build_outline(" \t\n  ", &font, Alignment::Center, &destination());

        assert!(path.is_empty());
        assert_close(measurement.width, 2.0 * ADVANCE);
        assert_close(measurement.height, 2.0 * LINE_HEIGHT);
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let font = SyntheticFont::default();
        let (path, measurement) = build_outline("", &font, Alignment::Center, &destination());

        assert!(path.is_empty());
        assert_close(measurement.width, 0.0);
        assert_close(measurement.height, LINE_HEIGHT);
    }

    #[test]
    fn missing_glyph_outline_is_skipped() {
        let font = SyntheticFont::failing_on('o');
        let outline = GlyphOutlineBuilder::default().layout("Hello", &font);

        assert_eq!(outline.path.contour_count(), 4);
        assert_eq!(outline.lines[0].glyph_count, 4);
        assert_eq!(outline.lines[0].skipped_glyphs, 1);
        // the skipped glyph still takes its place in the line
        assert_close(outline.measurement.width, 5.0 * ADVANCE);
    }

    /// Only hands out outlines a whole run at a time.
    struct RunOutlineFont {
        inner: SyntheticFont,
        run_calls: Cell<usize>,
    }

    impl ShapingFont for RunOutlineFont {
        type RunFont = SyntheticFace;

        fn metrics(&self) -> FontMetrics {
            self.inner.metrics()
        }

        fn shape(&self, line: &str) -> Vec<GlyphRun<SyntheticFace>> {
            self.inner.shape(line)
        }

        fn glyph_outline(&self, _font: &SyntheticFace, _glyph_id: u16) -> Option<OutlinePath> {
            panic!("outlines must be requested per run");
        }

        fn run_outlines(&self, run: &GlyphRun<SyntheticFace>) -> Vec<Option<OutlinePath>> {
            self.run_calls.set(self.run_calls.get() + 1);
            self.inner.run_outlines(run)
        }
    }

    #[test]
    fn outlines_are_fetched_once_per_run() {
        let font = RunOutlineFont {
            inner: SyntheticFont::default(),
            run_calls: Cell::new(0),
        };
        // runs: "a", "é", " b"
        let outline = GlyphOutlineBuilder::default().layout("aé b", &font);

        assert_eq!(font.run_calls.get(), 3);
        assert_eq!(outline.path.contour_count(), 3);
        assert_eq!(outline.lines[0].skipped_glyphs, 1);
    }

    #[test]
    fn ligatures_come_from_shaping_runs() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::default().layout("fi", &font);

        assert_eq!(outline.path.contour_count(), 1);
        assert_close(outline.measurement.width, ADVANCE);
    }

    #[test]
    fn fallback_runs_use_their_own_font() {
        let font = SyntheticFont::default();
        let outline = GlyphOutlineBuilder::new(Alignment::Leading).layout("aé", &font);

        assert_eq!(outline.path.contour_count(), 2);
        let heights: Vec<f32> = outline
            .path
            .segments()
            .chunks(5)
            .filter_map(segment_bounds)
            .map(|b| b.height())
            .collect();
        assert_eq!(heights.len(), 2);
        assert_close(heights[0], PRIMARY_HEIGHT);
        assert_close(heights[1], FALLBACK_HEIGHT);
        // line spacing follows the requested font only
        assert_close(outline.measurement.height, LINE_HEIGHT);
    }

    #[test]
    fn normalized_outline_is_centered_and_flipped() {
        let font = SyntheticFont::default();
        let rect = destination();
        let (path, _) = build_outline("Hi\nWorld", &font, Alignment::Center, &rect);

        let bounds = path.bounds().expect("outline is not empty");
        assert_close(bounds.center().x, rect.center().x);
        assert_close(bounds.center().y, rect.center().y);

        // in y-down space the first line sits above the second
        let first_move = path
            .segments()
            .iter()
            .find_map(|s| match s {
                PathSegment::MoveTo(p) => Some(*p),
                _ => None,
            })
            .expect("outline has contours");
        assert!(first_move.y < bounds.center().y);
    }

    #[test]
    fn hi_world_scenario() {
        let font = SyntheticFont::default();
        let rect = destination();
        let outline = GlyphOutlineBuilder::new(Alignment::Center).layout("Hi\nWorld", &font);
        let path = outline.normalized(&rect);

        assert_eq!(outline.lines.len(), 2);
        let hi = outline.lines[0].bounds.expect("Hi draws glyphs");
        let world = outline.lines[1].bounds.expect("World draws glyphs");
        assert!(hi.width() < world.width());
        assert!(hi.min.x > world.min.x && hi.max.x < world.max.x);
        assert!(hi.min.y > world.max.y);

        let bounds = path.bounds().expect("outline is not empty");
        assert_close(bounds.center().x, rect.center().x);
        assert_close(bounds.center().y, rect.center().y);
        assert_close(bounds.width(), world.width());
    }

    #[test]
    fn normalization_is_idempotent() {
        let font = SyntheticFont::default();
        let rect = destination();
        let (once, _) = build_outline("Hi\nWorld", &font, Alignment::Trailing, &rect);
        let twice = GlyphOutlineBuilder::normalize(&once, &rect);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.segments().iter().zip(twice.segments()) {
            match (a, b) {
                (PathSegment::MoveTo(a), PathSegment::MoveTo(b))
                | (PathSegment::LineTo(a), PathSegment::LineTo(b)) => {
                    assert_close(a.x, b.x);
                    assert_close(a.y, b.y);
                }
                (PathSegment::Close, PathSegment::Close) => {}
                other => panic!("segment kinds differ: {other:?}"),
            }
        }
    }

    #[test]
    fn empty_path_normalizes_to_empty() {
        let empty: OutlinePath = OutlinePath::new();
        assert!(GlyphOutlineBuilder::normalize(&empty, &destination()).is_empty());
    }

    #[test]
    fn long_lines_grow_the_measurement() {
        let font = SyntheticFont::default();
        let text = "x".repeat(200);
        let measurement = GlyphOutlineBuilder::measure(&text, &font);
        assert_close(measurement.width, 200.0 * ADVANCE);
        assert_close(measurement.height, LINE_HEIGHT);
    }
}
