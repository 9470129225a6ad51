use std::fmt::Write as _;

use glasstext::{
    FontSystem, GlassMaterial, GlassTextEnvironment, GlassTextView,
    font::{FontDescription, FontDesign, FontWeight},
    text::{Alignment, OutlinePath, RenderPoint, RenderRect, RenderSpace},
    view::{GlassPrimitive, GlassVariant, Tint},
};

const WIDTH: f32 = 900.0;
const ROW_GAP: f32 = 24.0;
const MARGIN: f32 = 32.0;

/// Collects realized nodes as SVG elements.
#[derive(Default)]
struct SvgCanvas {
    body: String,
}

impl SvgCanvas {
    fn finish(self, height: f32) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{height}\" \
             viewBox=\"0 0 {WIDTH} {height}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"#1d2333\"/>\n{}</svg>\n",
            self.body
        )
    }
}

impl GlassPrimitive for SvgCanvas {
    type Region = ();

    fn glass(
        &mut self,
        material: &GlassMaterial,
        clip: &OutlinePath<RenderSpace>,
        frame: &RenderRect,
    ) {
        if !material.is_visible() {
            return;
        }
        let [r, g, b, a] = material
            .tint
            .map(<[f32; 4]>::from)
            .unwrap_or([1.0, 1.0, 1.0, 1.0]);
        let opacity = match material.variant {
            GlassVariant::Regular => 0.75,
            _ => 0.45,
        } * a;

        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
             fill=\"none\" stroke=\"#ffffff22\"/>",
            frame.origin.x, frame.origin.y, frame.size.width, frame.size.height
        );
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"rgb({},{},{})\" fill-opacity=\"{opacity}\" \
             stroke=\"#ffffff\" stroke-opacity=\"0.6\"/>",
            clip.to_svg_path_data(),
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
        );
    }

    fn placeholder(&mut self, text: &str, reason: &str, frame: &RenderRect) {
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" fill=\"#ff5050\">{} ({})</text>",
            frame.origin.x,
            frame.max_y(),
            text.replace('<', "&lt;"),
            reason.replace('<', "&lt;"),
        );
    }
}

fn main() {
    let font_system = FontSystem::new();
    font_system.load_system_fonts();
    if font_system.is_empty() {
        eprintln!("no system fonts available; the gallery will only contain placeholders");
    }

    let rows: Vec<(String, FontDescription, GlassMaterial, Alignment)> = vec![
        (
            "Default design".into(),
            FontDescription::large_title(),
            GlassMaterial::clear(),
            Alignment::Leading,
        ),
        (
            "Serif\nsecond line".into(),
            FontDescription::title().design(FontDesign::Serif),
            GlassMaterial::regular(),
            Alignment::Center,
        ),
        (
            "Monospaced".into(),
            FontDescription::title().design(FontDesign::Monospaced),
            GlassMaterial::clear().tint(Tint::rgb(0.4, 0.8, 1.0)),
            Alignment::Trailing,
        ),
        (
            "Rounded office fi".into(),
            FontDescription::title().design(FontDesign::Rounded),
            GlassMaterial::regular().tint(Tint::rgb(1.0, 0.7, 0.3)),
            Alignment::Leading,
        ),
        (
            "Missing family".into(),
            FontDescription::named("No Such Family", 28.0),
            GlassMaterial::regular(),
            Alignment::Leading,
        ),
    ];

    let weights = [
        ("Ultra light", FontWeight::ULTRA_LIGHT),
        ("Regular", FontWeight::REGULAR),
        ("Semibold", FontWeight::SEMIBOLD),
        ("Black", FontWeight::BLACK),
    ];
    let weight_rows = weights.into_iter().map(|(label, weight)| {
        (
            label.to_string(),
            FontDescription::system(40.0).weight(weight),
            GlassMaterial::clear(),
            Alignment::Leading,
        )
    });

    let mut canvas = SvgCanvas::default();
    let mut y = MARGIN;
    for (text, font, material, alignment) in rows.into_iter().chain(weight_rows) {
        let env = GlassTextEnvironment::default()
            .with_font(font)
            .with_alignment(alignment);
        let view = GlassTextView::new(text).with_material(material);

        let (node, measurement) = view.render(&env, &font_system, RenderPoint::new(MARGIN, y));
        node.realize(&mut canvas);
        y += measurement.height + ROW_GAP;
    }

    let svg = canvas.finish(y + MARGIN);
    match std::env::args().nth(1) {
        Some(path) => {
            std::fs::write(&path, svg).expect("failed to write gallery");
            println!("Saved gallery to {path}");
        }
        None => print!("{svg}"),
    }
}
