use std::path::PathBuf;

use parking_lot::Mutex;

use crate::{
    error::GlassTextError,
    font::{FontDescription, ResolutionContext, ResolvedFont},
    font_storage::FontStorage,
    text::{Alignment, GlyphOutlineBuilder, Measurement, OutlinePath, RenderRect, RenderSpace},
};

/// High-level entry point for font loading, resolution and outline building.
///
/// Use `Mutex` to allow shared mutable access, which is common in UI frameworks.
/// The lock is only held while fonts are loaded or resolved; layout runs on the
/// resolved font without touching the storage.
///
/// The field is public to allow direct access to the underlying storage when
/// necessary.
pub struct FontSystem {
    /// The underlying font storage.
    pub font_storage: Mutex<FontStorage>,
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FontSystem {
    /// Creates a new font system with empty storage.
    pub fn new() -> Self {
        Self {
            font_storage: Mutex::new(FontStorage::new()),
        }
    }
}

/// font storage initialization
impl FontSystem {
    /// Loads the system fonts into the storage.
    pub fn load_system_fonts(&self) {
        self.font_storage.lock().load_system_fonts();
    }

    /// Loads a font from binary data.
    pub fn load_font_binary(&self, data: impl Into<Vec<u8>>) {
        self.font_storage.lock().load_font_binary(data);
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&self, path: PathBuf) -> Result<(), GlassTextError> {
        self.font_storage.lock().load_font_file(path)
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&self, dir: PathBuf) {
        self.font_storage.lock().load_fonts_dir(dir)
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_storage.lock().is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_storage.lock().len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_serif_family(family);
    }

    /// Sets the family name for the "sans-serif" generic family.
    pub fn set_sans_serif_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_sans_serif_family(family);
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&self, family: impl Into<String>) {
        self.font_storage.lock().set_monospace_family(family);
    }

    /// Returns a vec over all available faces.
    ///
    /// # Performance
    /// This method clones all face info to avoid holding a lock on the storage.
    /// If you need to iterate without allocation, lock `font_storage` directly.
    pub fn faces(&self) -> Vec<fontdb::FaceInfo> {
        self.font_storage.lock().faces().cloned().collect()
    }
}

/// font resolution
impl FontSystem {
    /// Resolves a font description against the loaded fonts.
    pub fn resolve(
        &self,
        description: &FontDescription,
        context: &ResolutionContext,
    ) -> Result<ResolvedFont, GlassTextError> {
        self.font_storage.lock().resolve(description, context)
    }
}

/// outline building
impl FontSystem {
    /// Resolves the font and builds the outline of `text` centered in
    /// `destination`.
    pub fn build_outline(
        &self,
        text: &str,
        description: &FontDescription,
        context: &ResolutionContext,
        alignment: Alignment,
        destination: &RenderRect,
    ) -> Result<(OutlinePath<RenderSpace>, Measurement), GlassTextError> {
        let font = self.resolve(description, context)?;
        Ok(GlyphOutlineBuilder::new(alignment).build(text, &font, destination))
    }

    /// Resolves the font and measures `text`.
    pub fn measure(
        &self,
        text: &str,
        description: &FontDescription,
        context: &ResolutionContext,
    ) -> Result<Measurement, GlassTextError> {
        let font = self.resolve(description, context)?;
        Ok(GlyphOutlineBuilder::measure(text, &font))
    }
}
