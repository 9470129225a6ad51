use std::fmt;

/// Family requested by a [`FontDescription`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontFamily {
    /// The platform UI font; the concrete generic family follows [`FontDesign`].
    #[default]
    System,
    Named(String),
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

impl FontFamily {
    pub fn named(name: impl Into<String>) -> Self {
        FontFamily::Named(name.into())
    }

    /// `true` for every family that maps onto a generic family.
    ///
    /// Generic families may fall back to any face in the database when the
    /// configured generic family name is not installed.
    pub fn is_generic(&self) -> bool {
        !matches!(self, FontFamily::Named(_))
    }

    pub(crate) fn to_fontdb(&self) -> fontdb::Family<'_> {
        match self {
            FontFamily::System | FontFamily::SansSerif => fontdb::Family::SansSerif,
            FontFamily::Named(name) => fontdb::Family::Name(name),
            FontFamily::Serif => fontdb::Family::Serif,
            FontFamily::Monospace => fontdb::Family::Monospace,
            FontFamily::Cursive => fontdb::Family::Cursive,
            FontFamily::Fantasy => fontdb::Family::Fantasy,
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontFamily::System => f.write_str("system"),
            FontFamily::Named(name) => f.write_str(name),
            FontFamily::Serif => f.write_str("serif"),
            FontFamily::SansSerif => f.write_str("sans-serif"),
            FontFamily::Monospace => f.write_str("monospace"),
            FontFamily::Cursive => f.write_str("cursive"),
            FontFamily::Fantasy => f.write_str("fantasy"),
        }
    }
}

/// OpenType weight class (100..=900).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const ULTRA_LIGHT: Self = Self(100);
    pub const THIN: Self = Self(200);
    pub const LIGHT: Self = Self(300);
    pub const REGULAR: Self = Self(400);
    pub const MEDIUM: Self = Self(500);
    pub const SEMIBOLD: Self = Self(600);
    pub const BOLD: Self = Self(700);
    pub const HEAVY: Self = Self(800);
    pub const BLACK: Self = Self(900);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl From<FontWeight> for fontdb::Weight {
    fn from(weight: FontWeight) -> Self {
        fontdb::Weight(weight.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl From<FontStyle> for fontdb::Style {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
        }
    }
}

/// Design variant of the system font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontDesign {
    #[default]
    Default,
    Serif,
    Monospaced,
    Rounded,
}

/// Font request, before resolution against the font database.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontDescription {
    pub family: FontFamily,
    pub weight: FontWeight,
    pub style: FontStyle,
    pub design: FontDesign,
    /// Size in points, before [`ResolutionContext::size_scale`].
    pub size: f32,
}

impl Default for FontDescription {
    fn default() -> Self {
        Self::body()
    }
}

impl FontDescription {
    pub const BODY_SIZE: f32 = 17.0;

    /// The system font at `size`, regular weight.
    pub fn system(size: f32) -> Self {
        Self {
            family: FontFamily::System,
            weight: FontWeight::REGULAR,
            style: FontStyle::Normal,
            design: FontDesign::Default,
            size,
        }
    }

    pub fn named(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: FontFamily::named(family),
            ..Self::system(size)
        }
    }

    /// Default text style used when the environment carries no font.
    pub fn body() -> Self {
        Self::system(Self::BODY_SIZE)
    }

    pub fn headline() -> Self {
        Self::system(Self::BODY_SIZE).weight(FontWeight::SEMIBOLD)
    }

    pub fn title() -> Self {
        Self::system(28.0)
    }

    pub fn large_title() -> Self {
        Self::system(34.0)
    }

    pub fn caption() -> Self {
        Self::system(12.0)
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn design(mut self, design: FontDesign) -> Self {
        self.design = design;
        self
    }

    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Final point size under `context`.
    pub fn point_size(&self, context: &ResolutionContext) -> f32 {
        self.size * context.size_scale
    }

    /// Families to query, in priority order.
    pub(crate) fn query_families<'a>(
        &'a self,
        context: &'a ResolutionContext,
    ) -> Vec<fontdb::Family<'a>> {
        match (&self.family, self.design) {
            (FontFamily::System, FontDesign::Default) => vec![fontdb::Family::SansSerif],
            (FontFamily::System, FontDesign::Serif) => vec![fontdb::Family::Serif],
            (FontFamily::System, FontDesign::Monospaced) => vec![fontdb::Family::Monospace],
            (FontFamily::System, FontDesign::Rounded) => match &context.rounded_family {
                Some(name) => vec![fontdb::Family::Name(name), fontdb::Family::SansSerif],
                None => vec![fontdb::Family::SansSerif],
            },
            (family, _) => vec![family.to_fontdb()],
        }
    }
}

/// Environment-dependent inputs of font resolution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionContext {
    /// Multiplier applied to every requested size (accessibility text size).
    pub size_scale: f32,
    /// Family used for [`FontDesign::Rounded`]. Sans-serif when `None`.
    pub rounded_family: Option<String>,
    /// Families searched, in order, for characters the primary face lacks.
    pub fallback_families: Vec<FontFamily>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self {
            size_scale: 1.0,
            rounded_family: None,
            fallback_families: vec![
                FontFamily::SansSerif,
                FontFamily::Serif,
                FontFamily::Monospace,
            ],
        }
    }
}
