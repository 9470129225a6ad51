//! Deterministic in-memory font used by unit tests.

use crate::text::{FontMetrics, GlyphRun, OutlinePath, ShapedGlyph, ShapingFont, TextPoint};

pub(crate) const ADVANCE: f32 = 6.0;
pub(crate) const PRIMARY_HEIGHT: f32 = 7.0;
pub(crate) const FALLBACK_HEIGHT: f32 = 5.0;
pub(crate) const FI_LIGATURE: u16 = 0xFB01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SyntheticFace {
    Primary,
    Fallback,
}

/// Monospaced box font.
///
/// Every glyph is a filled box starting at its pen position, `ADVANCE` wide.
/// ASCII goes to the primary face; anything else lands in a fallback run with
/// shorter boxes. `"fi"` shapes to a single ligature glyph.
#[derive(Clone, Debug, Default)]
pub(crate) struct SyntheticFont {
    pub(crate) fail_on: Option<char>,
    pub(crate) leading: f32,
}

impl SyntheticFont {
    pub(crate) fn failing_on(ch: char) -> Self {
        Self {
            fail_on: Some(ch),
            ..Self::default()
        }
    }
}

impl ShapingFont for SyntheticFont {
    type RunFont = SyntheticFace;

    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            ascent: 8.0,
            descent: 2.0,
            leading: self.leading,
            point_size: 10.0,
        }
    }

    fn shape(&self, line: &str) -> Vec<GlyphRun<SyntheticFace>> {
        let mut runs: Vec<GlyphRun<SyntheticFace>> = Vec::new();
        let mut pen_x = 0.0;
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            let face = if ch.is_ascii() {
                SyntheticFace::Primary
            } else {
                SyntheticFace::Fallback
            };
            let glyph_id = if ch == 'f' && chars.peek() == Some(&'i') {
                chars.next();
                FI_LIGATURE
            } else {
                ch as u16
            };

            if runs.last().is_none_or(|run| run.font != face) {
                runs.push(GlyphRun::new(face));
            }
            if let Some(run) = runs.last_mut() {
                run.push(ShapedGlyph {
                    glyph_id,
                    position: TextPoint::new(pen_x, 0.0),
                    advance: ADVANCE,
                });
            }
            pen_x += ADVANCE;
        }

        runs
    }

    fn glyph_outline(&self, font: &SyntheticFace, glyph_id: u16) -> Option<OutlinePath> {
        if glyph_id == ' ' as u16 || glyph_id == '\t' as u16 {
            return None;
        }
        if self.fail_on.is_some_and(|ch| ch as u16 == glyph_id) {
            return None;
        }

        let height = match font {
            SyntheticFace::Primary => PRIMARY_HEIGHT,
            SyntheticFace::Fallback => FALLBACK_HEIGHT,
        };
        let mut path = OutlinePath::new();
        path.move_to(TextPoint::new(0.0, 0.0));
        path.line_to(TextPoint::new(ADVANCE, 0.0));
        path.line_to(TextPoint::new(ADVANCE, height));
        path.line_to(TextPoint::new(0.0, height));
        path.close();
        Some(path)
    }
}

/// Asserts two floats are equal within a small tolerance.
#[track_caller]
pub(crate) fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}
