/// Errors raised while loading or resolving fonts.
///
/// Layout itself never fails: glyphs without outlines are skipped and empty
/// text produces an empty path.
#[derive(Debug, thiserror::Error)]
pub enum GlassTextError {
    /// No face in the database matches the requested family.
    #[error("no font face matches family `{family}`")]
    FontNotFound { family: String },

    /// The face exists but its data could not be parsed.
    #[error("failed to load font face {id:?}: {reason}")]
    FontLoad { id: fontdb::ID, reason: String },

    /// The resolved point size is not a positive finite number.
    #[error("invalid font size {0}")]
    InvalidFontSize(f32),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
