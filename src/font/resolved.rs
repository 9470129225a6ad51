use std::{ops::Range, sync::Arc};

use rustybuzz::ttf_parser;
use unicode_bidi::{BidiInfo, Level};
use unicode_script::{Script, UnicodeScript};

use crate::{
    error::GlassTextError,
    text::{
        FontMetrics, GlyphRun, OutlinePath, ShapedGlyph, ShapingFont, TextPoint,
        outline::ScaledOutlineSink,
    },
};

use super::face::LoadedFace;

/// A concrete face at a fixed point size, with its fallback chain.
///
/// Produced by [`crate::FontStorage::resolve`]. Cheap to clone; the face
/// data is shared.
#[derive(Clone, Debug)]
pub struct ResolvedFont {
    primary: Arc<LoadedFace>,
    fallbacks: Vec<Arc<LoadedFace>>,
    point_size: f32,
    metrics: FontMetrics,
}

impl ResolvedFont {
    /// Builds a resolved font from already loaded faces.
    pub fn new(
        primary: Arc<LoadedFace>,
        fallbacks: Vec<Arc<LoadedFace>>,
        point_size: f32,
    ) -> Result<Self, GlassTextError> {
        if !(point_size.is_finite() && point_size > 0.0) {
            return Err(GlassTextError::InvalidFontSize(point_size));
        }
        let metrics = primary.metrics(point_size);
        Ok(Self {
            primary,
            fallbacks,
            point_size,
            metrics,
        })
    }

    pub fn point_size(&self) -> f32 {
        self.point_size
    }

    pub fn primary(&self) -> &Arc<LoadedFace> {
        &self.primary
    }

    pub fn fallbacks(&self) -> &[Arc<LoadedFace>] {
        &self.fallbacks
    }

    /// Face slot 0 is the primary face, `n + 1` the n-th fallback.
    fn face(&self, slot: usize) -> &Arc<LoadedFace> {
        match slot {
            0 => &self.primary,
            n => &self.fallbacks[n - 1],
        }
    }

    /// First face, in priority order, that covers `ch`. Primary when none does.
    fn slot_for(&self, ch: char) -> usize {
        if self.primary.covers(ch) {
            return 0;
        }
        self.fallbacks
            .iter()
            .position(|face| face.covers(ch))
            .map_or(0, |i| i + 1)
    }

    /// Shapes one item. The pen advances across calls so glyph positions
    /// stay relative to the start of the line.
    fn shape_item(&self, item: &Item, text: &str, pen_x: &mut f32) -> GlyphRun<Arc<LoadedFace>> {
        let face = self.face(item.slot);
        let mut run = GlyphRun::new(Arc::clone(face));

        let Some(shaping_face) = face.shaping_face() else {
            log::warn!("font face {:?} can't be shaped, run dropped", face.id());
            return run;
        };

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(if item.rtl {
            rustybuzz::Direction::RightToLeft
        } else {
            rustybuzz::Direction::LeftToRight
        });
        if let Some(script) = shaping_script(item.script) {
            buffer.set_script(script);
        }
        // fills in the language only, script and direction are already set
        buffer.guess_segment_properties();
        let shaped = rustybuzz::shape(&shaping_face, &[], buffer);

        let scale = self.point_size / face.units_per_em();
        for (info, pos) in shaped.glyph_infos().iter().zip(shaped.glyph_positions()) {
            let advance = pos.x_advance as f32 * scale;
            run.push(ShapedGlyph {
                glyph_id: info.glyph_id as u16,
                position: TextPoint::new(
                    *pen_x + pos.x_offset as f32 * scale,
                    pos.y_offset as f32 * scale,
                ),
                advance,
            });
            *pen_x += advance;
        }

        run
    }

    fn outline_scale(&self, face: &LoadedFace) -> f32 {
        self.point_size / face.units_per_em()
    }
}

impl ShapingFont for ResolvedFont {
    type RunFont = Arc<LoadedFace>;

    fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    fn shape(&self, line: &str) -> Vec<GlyphRun<Arc<LoadedFace>>> {
        let mut pen_x = 0.0;
        itemize(line, |ch| self.slot_for(ch))
            .into_iter()
            .map(|item| self.shape_item(&item, &line[item.range.clone()], &mut pen_x))
            .filter(|run| !run.is_empty())
            .collect()
    }

    fn glyph_outline(&self, font: &Arc<LoadedFace>, glyph_id: u16) -> Option<OutlinePath> {
        let face = font.outline_face()?;
        outline_glyph(&face, glyph_id, self.outline_scale(font))
    }

    fn run_outlines(&self, run: &GlyphRun<Arc<LoadedFace>>) -> Vec<Option<OutlinePath>> {
        let Some(face) = run.font.outline_face() else {
            log::warn!("font face {:?} has unreadable outlines", run.font.id());
            return vec![None; run.glyphs.len()];
        };
        let scale = self.outline_scale(&run.font);
        run.glyphs
            .iter()
            .map(|glyph| outline_glyph(&face, glyph.glyph_id, scale))
            .collect()
    }
}

fn outline_glyph(face: &ttf_parser::Face<'_>, glyph_id: u16, scale: f32) -> Option<OutlinePath> {
    let mut sink = ScaledOutlineSink::new(scale);
    face.outline_glyph(ttf_parser::GlyphId(glyph_id), &mut sink)?;
    Some(sink.finish())
}

/// Stretch of a line shaped in one call: one face, one script, one direction.
#[derive(Clone, Debug, PartialEq)]
struct Item {
    slot: usize,
    script: Script,
    rtl: bool,
    range: Range<usize>,
}

/// Splits a line into shaping items, in visual order.
///
/// Items break where the bidi level, the script or the covering face
/// changes. Within a right-to-left level run the items are reversed, so
/// laying them out one after another left to right gives the visual order.
fn itemize(line: &str, slot_for: impl Fn(char) -> usize) -> Vec<Item> {
    if line.is_empty() {
        return Vec::new();
    }

    let chars = resolve_scripts(line);
    let bidi = BidiInfo::new(line, Some(Level::ltr()));
    let Some(paragraph) = bidi.paragraphs.first() else {
        return Vec::new();
    };
    let (levels, level_runs) = bidi.visual_runs(paragraph, 0..line.len());

    let mut items = Vec::new();
    for level_run in level_runs {
        let rtl = levels.get(level_run.start).is_some_and(|level| level.is_rtl());
        let first = chars.partition_point(|&(at, _, _)| at < level_run.start);

        let mut run_items: Vec<Item> = Vec::new();
        for &(at, ch, script) in chars[first..].iter().take_while(|c| c.0 < level_run.end) {
            let end = at + ch.len_utf8();
            let slot = match run_items.last() {
                Some(item) if inherits_face(ch) => item.slot,
                _ => slot_for(ch),
            };

            match run_items.last_mut() {
                Some(item) if item.slot == slot && item.script == script => item.range.end = end,
                _ => run_items.push(Item {
                    slot,
                    script,
                    rtl,
                    range: at..end,
                }),
            }
        }

        if rtl {
            run_items.reverse();
        }
        items.extend(run_items);
    }

    items
}

/// Script of every character, with Common and Inherited characters taking
/// the script before them (or the first real script of the line when they
/// lead it).
fn resolve_scripts(line: &str) -> Vec<(usize, char, Script)> {
    let mut chars: Vec<(usize, char, Script)> = line
        .char_indices()
        .map(|(at, ch)| (at, ch, ch.script()))
        .collect();

    let mut current = None;
    for c in chars.iter_mut() {
        if is_neutral(c.2) {
            if let Some(script) = current {
                c.2 = script;
            }
        } else {
            current = Some(c.2);
        }
    }

    if let Some(first) = chars.iter().map(|c| c.2).find(|&script| !is_neutral(script)) {
        for c in chars.iter_mut().take_while(|c| is_neutral(c.2)) {
            c.2 = first;
        }
    }

    chars
}

fn is_neutral(script: Script) -> bool {
    matches!(script, Script::Common | Script::Inherited | Script::Unknown)
}

/// The `rustybuzz` script for an ISO 15924 script. `None` lets the shaper
/// guess.
fn shaping_script(script: Script) -> Option<rustybuzz::Script> {
    if is_neutral(script) {
        return None;
    }
    let tag = ttf_parser::Tag::from_bytes_lossy(script.short_name().as_bytes());
    rustybuzz::Script::from_iso15924_tag(tag)
}

/// Characters that stay in the current run instead of picking their own face:
/// whitespace, controls, combining marks, joiners and variation selectors.
fn inherits_face(ch: char) -> bool {
    ch.is_whitespace()
        || ch.is_control()
        || matches!(
            ch,
            '\u{0300}'..='\u{036F}'
                | '\u{1AB0}'..='\u{1AFF}'
                | '\u{1DC0}'..='\u{1DFF}'
                | '\u{200C}'..='\u{200D}'
                | '\u{20D0}'..='\u{20FF}'
                | '\u{FE00}'..='\u{FE0F}'
                | '\u{FE20}'..='\u{FE2F}'
                | '\u{E0100}'..='\u{E01EF}'
        )
}
