use crate::text::{OutlinePath, RenderRect, RenderSpace};

use super::material::GlassMaterial;

/// Result of rendering a [`super::GlassTextView`].
#[derive(Clone, Debug, PartialEq)]
pub enum VisualNode {
    /// Glass fill clipped to the text outline.
    Glass {
        frame: RenderRect,
        material: GlassMaterial,
        clip: OutlinePath<RenderSpace>,
    },
    /// Shown instead of the glass when the font could not be resolved.
    Placeholder {
        frame: RenderRect,
        text: String,
        reason: String,
    },
}

impl VisualNode {
    pub fn frame(&self) -> RenderRect {
        match self {
            VisualNode::Glass { frame, .. } | VisualNode::Placeholder { frame, .. } => *frame,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, VisualNode::Placeholder { .. })
    }

    /// Hands the node to the host's rendering primitive.
    pub fn realize<P: GlassPrimitive + ?Sized>(&self, primitive: &mut P) -> P::Region {
        match self {
            VisualNode::Glass {
                frame,
                material,
                clip,
            } => primitive.glass(material, clip, frame),
            VisualNode::Placeholder {
                frame,
                text,
                reason,
            } => primitive.placeholder(text, reason, frame),
        }
    }
}

/// Host rendering primitive for glass text.
pub trait GlassPrimitive {
    type Region;

    /// Fills the region enclosed by `clip` with `material`.
    fn glass(
        &mut self,
        material: &GlassMaterial,
        clip: &OutlinePath<RenderSpace>,
        frame: &RenderRect,
    ) -> Self::Region;

    /// Draws the error-styled fallback for `text`.
    fn placeholder(&mut self, text: &str, reason: &str, frame: &RenderRect) -> Self::Region;
}
