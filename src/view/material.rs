/// Base look of the glass material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GlassVariant {
    /// Frosted glass with a visible blur.
    Regular,
    /// Highly transparent glass.
    #[default]
    Clear,
    /// No glass effect at all.
    Identity,
}

/// Straight-alpha RGBA color, components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Tint {
    /// Creates a tint, clamping every component into range.
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: r.clamp(0.0, 1.0),
            g: g.clamp(0.0, 1.0),
            b: b.clamp(0.0, 1.0),
            a: a.clamp(0.0, 1.0),
        }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }
}

impl From<Tint> for [f32; 4] {
    fn from(tint: Tint) -> Self {
        [tint.r, tint.g, tint.b, tint.a]
    }
}

/// Description of the glass fill handed to the rendering primitive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlassMaterial {
    pub variant: GlassVariant,
    pub tint: Option<Tint>,
    /// Whether the glass reacts to pointer interaction.
    pub interactive: bool,
}

impl GlassMaterial {
    pub fn regular() -> Self {
        Self::with_variant(GlassVariant::Regular)
    }

    pub fn clear() -> Self {
        Self::with_variant(GlassVariant::Clear)
    }

    pub fn identity() -> Self {
        Self::with_variant(GlassVariant::Identity)
    }

    fn with_variant(variant: GlassVariant) -> Self {
        Self {
            variant,
            tint: None,
            interactive: false,
        }
    }

    pub fn tint(mut self, tint: Tint) -> Self {
        self.tint = Some(tint);
        self
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// `false` for [`GlassVariant::Identity`], which draws nothing.
    pub fn is_visible(&self) -> bool {
        self.variant != GlassVariant::Identity
    }
}
