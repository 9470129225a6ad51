//! Layout against the fonts installed on the machine.
//!
//! Every test returns early when no system fonts can be found, so the suite
//! stays green on minimal CI images.

use glasstext::{
    FontSystem, GlassTextView, GlyphOutlineBuilder, VisualNode,
    font::{FontDescription, FontDesign, ResolutionContext},
    text::{Alignment, GlyphRun, MIN_LEADING_RATIO, RenderPoint, RenderRect, ShapingFont},
    view::GlassTextEnvironment,
};

const EPSILON: f32 = 1e-2;

/// Loads the system fonts and points every generic family at a face that
/// covers basic Latin, so results don't depend on the platform defaults.
fn system_fonts() -> Option<FontSystem> {
    let fonts = FontSystem::new();
    fonts.load_system_fonts();

    let latin_family = {
        let mut storage = fonts.font_storage.lock();
        let ids: Vec<_> = storage.faces().map(|face| face.id).collect();
        ids.into_iter().find_map(|id| {
            let face = storage.load_face(id).ok()?;
            if !"HiWorld".chars().all(|ch| face.covers(ch)) {
                return None;
            }
            let info = storage.face_info(id)?;
            info.families.first().map(|(name, _)| name.clone())
        })
    };
    let Some(family) = latin_family else {
        eprintln!("no system font with latin coverage found, skipping");
        return None;
    };

    fonts.set_sans_serif_family(family.clone());
    fonts.set_serif_family(family.clone());
    fonts.set_monospace_family(family);
    Some(fonts)
}

/// Family of an installed face that covers both Latin and Arabic letters.
fn latin_arabic_family(fonts: &FontSystem) -> Option<String> {
    let mut storage = fonts.font_storage.lock();
    let ids: Vec<_> = storage.faces().map(|face| face.id).collect();
    ids.into_iter().find_map(|id| {
        let face = storage.load_face(id).ok()?;
        if !"abب".chars().all(|ch| face.covers(ch)) {
            return None;
        }
        let info = storage.face_info(id)?;
        info.families.first().map(|(name, _)| name.clone())
    })
}

fn glyph_ids<F>(run: &GlyphRun<F>) -> Vec<u16> {
    run.glyphs.iter().map(|glyph| glyph.glyph_id).collect()
}

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

#[test]
fn body_font_resolves_with_sane_metrics() {
    let Some(fonts) = system_fonts() else { return };

    let font = fonts
        .resolve(&FontDescription::body(), &ResolutionContext::default())
        .expect("generic families fall back to any installed face");
    let metrics = font.metrics();

    assert_eq!(font.point_size(), FontDescription::BODY_SIZE);
    assert!(metrics.ascent > 0.0);
    assert!(metrics.descent >= 0.0);
    let min_leading = FontDescription::BODY_SIZE * MIN_LEADING_RATIO;
    assert!(metrics.line_height() >= metrics.ascent + metrics.descent + min_leading - EPSILON);
}

#[test]
fn size_scale_applies() {
    let Some(fonts) = system_fonts() else { return };

    let context = ResolutionContext {
        size_scale: 2.0,
        ..ResolutionContext::default()
    };
    let font = fonts
        .resolve(&FontDescription::system(10.0), &context)
        .expect("resolves");
    assert_eq!(font.point_size(), 20.0);
}

#[test]
fn two_line_outline_is_centered_in_destination() {
    let Some(fonts) = system_fonts() else { return };

    let description = FontDescription::system(32.0);
    let context = ResolutionContext::default();
    let font = fonts.resolve(&description, &context).expect("resolves");
    let line_height = font.metrics().line_height();

    let destination = RenderRect::new(RenderPoint::new(10.0, 40.0), euclid::size2(300.0, 200.0));
    let (path, measurement) = fonts
        .build_outline("Hi\nWorld", &description, &context, Alignment::Center, &destination)
        .expect("resolves");

    assert!(close(measurement.height, 2.0 * line_height));
    assert!(measurement.width > 0.0);

    let bounds = path.bounds().expect("latin glyphs have outlines");
    let center = destination.center();
    assert!(close(bounds.center().x, center.x));
    assert!(close(bounds.center().y, center.y));
    assert!(path.contour_count() >= 7);
}

#[test]
fn whitespace_has_no_outline_but_has_size() {
    let Some(fonts) = system_fonts() else { return };

    let font = fonts
        .resolve(&FontDescription::body(), &ResolutionContext::default())
        .expect("resolves");
    let outline = GlyphOutlineBuilder::new(Alignment::Leading).layout(" \t \n ", &font);

    assert!(outline.path.is_empty());
    assert_eq!(outline.lines.len(), 2);
    assert!(close(outline.measurement.height, 2.0 * font.metrics().line_height()));
    assert!(close(outline.measurement.width, font.typographic_width(&font.shape(" \t "))));
}

#[test]
fn measure_matches_layout() {
    let Some(fonts) = system_fonts() else { return };

    let description = FontDescription::title().design(FontDesign::Serif);
    let context = ResolutionContext::default();
    let text = "office\n\nligatures";

    let measured = fonts.measure(text, &description, &context).expect("resolves");
    let font = fonts.resolve(&description, &context).expect("resolves");
    let laid_out = GlyphOutlineBuilder::default().layout(text, &font);

    assert_eq!(measured, laid_out.measurement);
    assert_eq!(laid_out.lines.len(), 3);
    assert_eq!(laid_out.lines[1].glyph_count, 0);
}

#[test]
fn mixed_scripts_never_fail() {
    let Some(fonts) = system_fonts() else { return };

    let font = fonts
        .resolve(&FontDescription::body(), &ResolutionContext::default())
        .expect("resolves");
    let outline = GlyphOutlineBuilder::default().layout("Glass 玻璃 زجاج 🪟", &font);

    assert_eq!(outline.lines.len(), 1);
    assert!(outline.measurement.width > 0.0);
}

#[test]
fn arabic_after_latin_keeps_joining_forms() {
    let Some(fonts) = system_fonts() else { return };
    let Some(family) = latin_arabic_family(&fonts) else {
        eprintln!("no font covering latin and arabic found, skipping");
        return;
    };

    let font = fonts
        .resolve(&FontDescription::named(family, 20.0), &ResolutionContext::default())
        .expect("installed family resolves");
    if !"abب".chars().all(|ch| font.primary().covers(ch)) {
        eprintln!("resolved style of the family lacks arabic, skipping");
        return;
    }

    let alone: Vec<u16> = font.shape("بب").iter().flat_map(glyph_ids).collect();
    let mixed = font.shape("ab بب");

    assert!(mixed.len() >= 2, "latin and arabic are shaped separately");
    let arabic = mixed.last().expect("line has runs");
    assert_eq!(glyph_ids(arabic), alone);
    assert!(arabic.glyphs[0].position.x > 0.0);
}

#[test]
fn view_renders_glass_node() {
    let Some(fonts) = system_fonts() else { return };

    let env = GlassTextEnvironment::default().with_font(FontDescription::large_title());
    let origin = RenderPoint::new(5.0, 5.0);
    let (node, measurement) = GlassTextView::new("Glass").render(&env, &fonts, origin);

    let VisualNode::Glass { frame, clip, .. } = node else {
        panic!("body font resolves on a machine with fonts");
    };
    assert_eq!(frame.origin, origin);
    assert_eq!(frame.size, measurement.size());
    assert!(!clip.is_empty());
}
