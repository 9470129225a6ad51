use std::fmt;

use rustybuzz::ttf_parser;

use crate::{error::GlassTextError, text::FontMetrics};

/// A parsed font face kept alive for shaping and outline extraction.
///
/// The raw bytes are owned so transient `rustybuzz`/`ttf_parser` faces can
/// borrow them per call. `fontdue` is used for quick cmap coverage checks
/// and line metrics. Shared between resolved fonts through `Arc`.
pub struct LoadedFace {
    id: fontdb::ID,
    data: Vec<u8>,
    index: u32,
    units_per_em: f32,
    coverage: fontdue::Font,
}

impl LoadedFace {
    /// Parses `data` (face `index` of a collection) and keeps a copy of it.
    pub(crate) fn from_data(
        id: fontdb::ID,
        data: &[u8],
        index: u32,
    ) -> Result<Self, GlassTextError> {
        let units_per_em = ttf_parser::Face::parse(data, index)
            .map_err(|e| GlassTextError::FontLoad {
                id,
                reason: e.to_string(),
            })?
            .units_per_em();

        let coverage = fontdue::Font::from_bytes(
            data,
            fontdue::FontSettings {
                collection_index: index,
                scale: 40.0,
                load_substitutions: false,
            },
        )
        .map_err(|e| GlassTextError::FontLoad {
            id,
            reason: e.to_string(),
        })?;

        Ok(Self {
            id,
            data: data.to_vec(),
            index,
            units_per_em: f32::from(units_per_em),
            coverage,
        })
    }

    pub fn id(&self) -> fontdb::ID {
        self.id
    }

    /// Index of the face inside its collection file.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn units_per_em(&self) -> f32 {
        self.units_per_em
    }

    /// Whether the face's cmap maps `ch` to a real glyph.
    pub fn covers(&self, ch: char) -> bool {
        self.coverage.lookup_glyph_index(ch) != 0
    }

    /// Vertical metrics at `point_size`.
    ///
    /// Uses the horizontal line metrics reported by `fontdue` and falls back
    /// to the raw `hhea` values when those are missing.
    pub fn metrics(&self, point_size: f32) -> FontMetrics {
        if let Some(lm) = self.coverage.horizontal_line_metrics(point_size) {
            return FontMetrics {
                ascent: lm.ascent,
                descent: -lm.descent,
                leading: lm.line_gap,
                point_size,
            };
        }

        let scale = point_size / self.units_per_em;
        match self.outline_face() {
            Some(face) => FontMetrics {
                ascent: f32::from(face.ascender()) * scale,
                descent: -f32::from(face.descender()) * scale,
                leading: f32::from(face.line_gap()) * scale,
                point_size,
            },
            None => FontMetrics {
                ascent: point_size,
                descent: 0.0,
                leading: 0.0,
                point_size,
            },
        }
    }

    pub(crate) fn shaping_face(&self) -> Option<rustybuzz::Face<'_>> {
        rustybuzz::Face::from_slice(&self.data, self.index)
    }

    pub(crate) fn outline_face(&self) -> Option<ttf_parser::Face<'_>> {
        ttf_parser::Face::parse(&self.data, self.index).ok()
    }
}

impl fmt::Debug for LoadedFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFace")
            .field("id", &self.id)
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .field("len", &self.data.len())
            .finish()
    }
}
