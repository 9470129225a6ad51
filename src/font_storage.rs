use std::{collections::HashMap, path::PathBuf, sync::Arc};

use crate::{
    error::GlassTextError,
    font::{FontDescription, LoadedFace, ResolutionContext, ResolvedFont},
};

/// Manages font loading and retrieval using `fontdb`.
///
/// This struct combines a database of available fonts (`fontdb`) with a cache
/// of parsed faces. It allows querying for fonts by family and properties,
/// and lazily loads the actual face data when requested.
pub struct FontStorage {
    /// This is the font set that has been loaded by fontdb.
    font_db: fontdb::Database,
    /// Faces that have been parsed for shaping.
    /// Not all fonts in fontdb are necessarily loaded here.
    loaded_faces: HashMap<fontdb::ID, Arc<LoadedFace>, fxhash::FxBuildHasher>,
}

impl Default for FontStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl FontStorage {
    /// Creates a new empty font storage.
    pub fn new() -> Self {
        Self {
            font_db: fontdb::Database::new(),
            loaded_faces: HashMap::with_hasher(fxhash::FxBuildHasher::default()),
        }
    }
}

/// Loading fonts into fontdb and setting up fontdb.
impl FontStorage {
    /// Loads a font from binary data.
    pub fn load_font_binary(&mut self, data: impl Into<Vec<u8>>) {
        self.font_db.load_font_data(data.into());
    }

    /// Loads a font from a file path.
    pub fn load_font_file(&mut self, path: PathBuf) -> Result<(), GlassTextError> {
        self.font_db.load_font_file(path)?;
        Ok(())
    }

    /// Loads all fonts from a directory.
    pub fn load_fonts_dir(&mut self, dir: PathBuf) {
        self.font_db.load_fonts_dir(dir)
    }

    /// Loads the system fonts.
    pub fn load_system_fonts(&mut self) {
        self.font_db.load_system_fonts();
    }

    /// Removes a face by ID.
    pub fn remove_face(&mut self, id: fontdb::ID) {
        self.font_db.remove_face(id);
        self.loaded_faces.remove(&id);
    }

    /// Checks if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.font_db.is_empty()
    }

    /// Returns the number of loaded faces.
    pub fn len(&self) -> usize {
        self.font_db.len()
    }

    /// Sets the family name for the "serif" generic family.
    pub fn set_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_serif_family(family);
    }

    /// Sets the family name for the "sans-serif" generic family.
    ///
    /// This is also the family behind [`crate::font::FontFamily::System`].
    pub fn set_sans_serif_family(&mut self, family: impl Into<String>) {
        self.font_db.set_sans_serif_family(family);
    }

    /// Sets the family name for the "monospace" generic family.
    pub fn set_monospace_family(&mut self, family: impl Into<String>) {
        self.font_db.set_monospace_family(family);
    }

    /// Sets the family name for the "cursive" generic family.
    pub fn set_cursive_family(&mut self, family: impl Into<String>) {
        self.font_db.set_cursive_family(family);
    }

    /// Sets the family name for the "fantasy" generic family.
    pub fn set_fantasy_family(&mut self, family: impl Into<String>) {
        self.font_db.set_fantasy_family(family);
    }
}

/// Get `LoadedFace`
impl FontStorage {
    /// Queries for a font matching the description.
    ///
    /// Returns the ID and the loaded face if found.
    pub fn query(&mut self, query: &fontdb::Query) -> Option<(fontdb::ID, Arc<LoadedFace>)> {
        let id = self.font_db.query(query)?;
        self.face(id).map(|face| (id, face))
    }

    /// Retrieves a loaded face by ID, loading it if necessary.
    pub fn face(&mut self, id: fontdb::ID) -> Option<Arc<LoadedFace>> {
        match self.load_face(id) {
            Ok(face) => Some(face),
            Err(e) => {
                log::error!("Failed to load font (id: {:?}): {}", id, e);
                None
            }
        }
    }

    /// Like [`Self::face`], but reports why the face is unavailable.
    pub fn load_face(&mut self, id: fontdb::ID) -> Result<Arc<LoadedFace>, GlassTextError> {
        use std::collections::hash_map::Entry;

        match self.loaded_faces.entry(id) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                let face = self
                    .font_db
                    .with_face_data(id, |data, index| LoadedFace::from_data(id, data, index))
                    .ok_or_else(|| GlassTextError::FontLoad {
                        id,
                        reason: "face is not in the database".to_string(),
                    })??;

                Ok(Arc::clone(entry.insert(Arc::new(face))))
            }
        }
    }

    /// Returns an iterator over all available faces.
    pub fn faces(&self) -> impl Iterator<Item = &fontdb::FaceInfo> {
        self.font_db.faces()
    }

    /// Returns face info for an ID.
    pub fn face_info(&self, id: fontdb::ID) -> Option<&fontdb::FaceInfo> {
        self.font_db.face(id)
    }
}

/// Resolve `ResolvedFont`
impl FontStorage {
    /// Resolves `description` into a concrete face and its fallback chain.
    ///
    /// Generic families that are not installed under their configured name
    /// fall back to the first face in the database. Named families never do.
    pub fn resolve(
        &mut self,
        description: &FontDescription,
        context: &ResolutionContext,
    ) -> Result<ResolvedFont, GlassTextError> {
        let point_size = description.point_size(context);
        if !(point_size.is_finite() && point_size > 0.0) {
            return Err(GlassTextError::InvalidFontSize(point_size));
        }

        let weight = description.weight.into();
        let style = description.style.into();
        let families = description.query_families(context);
        let query = fontdb::Query {
            families: &families,
            weight,
            stretch: fontdb::Stretch::Normal,
            style,
        };

        let not_found = || GlassTextError::FontNotFound {
            family: description.family.to_string(),
        };
        let primary_id = match self.font_db.query(&query) {
            Some(id) => id,
            None if description.family.is_generic() => {
                let id = self.font_db.faces().next().map(|face| face.id).ok_or_else(not_found)?;
                log::debug!(
                    "no face for generic family `{}`, using {:?}",
                    description.family,
                    id
                );
                id
            }
            None => return Err(not_found()),
        };
        let primary = self.load_face(primary_id)?;

        let mut fallbacks: Vec<Arc<LoadedFace>> = Vec::new();
        for family in &context.fallback_families {
            let families = [family.to_fontdb()];
            let query = fontdb::Query {
                families: &families,
                weight,
                stretch: fontdb::Stretch::Normal,
                style,
            };
            let Some(id) = self.font_db.query(&query) else {
                continue;
            };
            if id == primary_id || fallbacks.iter().any(|face| face.id() == id) {
                continue;
            }
            match self.load_face(id) {
                Ok(face) => fallbacks.push(face),
                Err(e) => log::warn!("Skipping fallback font `{}`: {}", family, e),
            }
        }

        log::debug!(
            "resolved {} {}pt to {:?} with {} fallback(s)",
            description.family,
            point_size,
            primary_id,
            fallbacks.len()
        );

        ResolvedFont::new(primary, fallbacks, point_size)
    }
}
