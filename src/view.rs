//! The glass text view: font resolution, outline building and the visual
//! node handed to the host renderer.

/// Translation lookup for localizable view text.
pub mod localize;
/// Glass material description.
pub mod material;
/// Render output and the host primitive that consumes it.
pub mod node;

pub use localize::{LocalizedText, Localizer, NoLocalization};
pub use material::{GlassMaterial, GlassVariant, Tint};
pub use node::{GlassPrimitive, VisualNode};

use crate::{
    font::{FontDescription, ResolutionContext},
    font_system::FontSystem,
    text::{
        Alignment, GlyphOutlineBuilder, Measurement, RenderPoint, RenderRect, ShapingFont,
        TextBlock,
    },
};

/// Rough advance per character, as a share of the point size, used to size
/// the placeholder when no font is available to measure with.
const PLACEHOLDER_ADVANCE_RATIO: f32 = 0.6;
const PLACEHOLDER_LINE_RATIO: f32 = 1.2;

/// Inputs the hosting framework supplies at render time.
///
/// Passed explicitly down the render call; nothing is looked up implicitly.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GlassTextEnvironment {
    /// Font of the surrounding context. [`FontDescription::body`] when `None`.
    pub font: Option<FontDescription>,
    pub resolution: ResolutionContext,
    /// Multiline text alignment.
    pub alignment: Alignment,
}

impl GlassTextEnvironment {
    pub fn with_font(mut self, font: FontDescription) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_resolution(mut self, resolution: ResolutionContext) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Text drawn as a glass-filled outline.
#[derive(Clone, Debug, PartialEq)]
pub struct GlassTextView {
    text: String,
    material: GlassMaterial,
}

impl GlassTextView {
    /// A view for literal text, with the clear glass material.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            material: GlassMaterial::default(),
        }
    }

    /// A view for localizable text, resolved to a literal string right away.
    pub fn localized<L: Localizer + ?Sized>(resource: &LocalizedText, localizer: &L) -> Self {
        Self::new(resource.resolve(localizer))
    }

    pub fn with_material(mut self, material: GlassMaterial) -> Self {
        self.material = material;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn material(&self) -> GlassMaterial {
        self.material
    }

    /// Renders the view with its top-left corner at `origin`.
    ///
    /// A font that can't be resolved yields a [`VisualNode::Placeholder`]
    /// with an estimated size instead of an error.
    pub fn render(
        &self,
        env: &GlassTextEnvironment,
        fonts: &FontSystem,
        origin: RenderPoint,
    ) -> (VisualNode, Measurement) {
        let body = FontDescription::body();
        let description = env.font.as_ref().unwrap_or(&body);

        match fonts.resolve(description, &env.resolution) {
            Ok(font) => self.render_with(env.alignment, &font, origin),
            Err(e) => {
                log::warn!("Failed to resolve font for glass text: {}", e);
                self.placeholder(description, &env.resolution, origin, e.to_string())
            }
        }
    }

    /// Renders the view with an already resolved font.
    pub fn render_with<F: ShapingFont + ?Sized>(
        &self,
        alignment: Alignment,
        font: &F,
        origin: RenderPoint,
    ) -> (VisualNode, Measurement) {
        let outline = GlyphOutlineBuilder::new(alignment).layout(&self.text, font);
        let frame = RenderRect::new(origin, outline.measurement.size());
        let clip = outline.normalized(&frame);

        let node = VisualNode::Glass {
            frame,
            material: self.material,
            clip,
        };
        (node, outline.measurement)
    }

    fn placeholder(
        &self,
        description: &FontDescription,
        context: &ResolutionContext,
        origin: RenderPoint,
        reason: String,
    ) -> (VisualNode, Measurement) {
        let size = match description.point_size(context) {
            size if size.is_finite() && size > 0.0 => size,
            _ => FontDescription::BODY_SIZE,
        };

        let block = TextBlock::new(&self.text);
        let longest = block.lines().map(|line| line.chars().count()).max().unwrap_or(0);
        let measurement = Measurement {
            width: longest as f32 * size * PLACEHOLDER_ADVANCE_RATIO,
            height: block.line_count() as f32 * size * PLACEHOLDER_LINE_RATIO,
        };

        let node = VisualNode::Placeholder {
            frame: RenderRect::new(origin, measurement.size()),
            text: self.text.clone(),
            reason,
        };
        (node, measurement)
    }
}
