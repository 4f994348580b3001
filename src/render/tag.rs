//! Price-tag rasterizer backed by a TrueType font.

use std::fs;
use std::path::Path;

use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Transform};
use ttf_parser::{Face, GlyphId};

use super::glyph::{build_glyph_path, glyph_transform};
use super::{font_size, PriceRenderer, TEXT_COLOR};
use crate::error::{Result, TagError};

/// Renders prices with a single font face.
///
/// The font file is read once; the face is re-parsed per render, which only
/// walks the table directory.
#[derive(Clone)]
pub struct TtfRenderer {
    font: Vec<u8>,
}

impl std::fmt::Debug for TtfRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtfRenderer")
            .field("font_bytes", &self.font.len())
            .finish()
    }
}

impl TtfRenderer {
    /// Loads the font at `path`.
    pub fn from_file(path: &Path) -> Result<Self> {
        let font = fs::read(path).map_err(|e| {
            TagError::RenderError(format!("cannot read font {}: {e}", path.display()))
        })?;
        Self::from_bytes(font)
    }

    /// Wraps raw font bytes, checking that they parse.
    pub fn from_bytes(font: Vec<u8>) -> Result<Self> {
        Face::parse(&font, 0).map_err(|e| TagError::RenderError(format!("invalid font: {e}")))?;
        Ok(Self { font })
    }

    fn face(&self) -> Result<Face<'_>> {
        Face::parse(&self.font, 0).map_err(|e| TagError::RenderError(format!("invalid font: {e}")))
    }
}

/// Horizontal kerning between two glyphs, in design units.
fn kerning(face: &Face<'_>, left: GlyphId, right: GlyphId) -> i16 {
    let Some(kern) = face.tables().kern else {
        return 0;
    };
    kern.subtables
        .into_iter()
        .filter(|st| st.horizontal && !st.variable)
        .find_map(|st| st.glyphs_kerning(left, right))
        .unwrap_or(0)
}

/// Lays `text` out on a single line with its baseline start at the origin,
/// in pixel space. Returns `None` when no glyph has an outline.
fn layout_line(face: &Face<'_>, text: &str, size: f32) -> Option<tiny_skia::Path> {
    let scale = size / f32::from(face.units_per_em());
    let mut line = PathBuilder::new();
    let mut pen_x = 0.0_f32;
    let mut previous: Option<GlyphId> = None;

    for ch in text.chars() {
        // Characters the font lacks fall back to .notdef
        let glyph = face.glyph_index(ch).unwrap_or(GlyphId(0));
        if let Some(prev) = previous {
            pen_x += f32::from(kerning(face, prev, glyph)) * scale;
        }
        if let Some(outline) = build_glyph_path(face, glyph) {
            if let Some(placed) = outline.transform(glyph_transform(scale, pen_x, 0.0)) {
                line.push_path(&placed);
            }
        }
        pen_x += f32::from(face.glyph_hor_advance(glyph).unwrap_or(0)) * scale;
        previous = Some(glyph);
    }

    line.finish()
}

impl PriceRenderer for TtfRenderer {
    fn render(&self, price: &str, width: u32, height: u32) -> Result<Vec<u8>> {
        let size = font_size(width, price)?;
        let face = self.face()?;

        // Pixmaps start fully transparent
        let mut canvas = Pixmap::new(width, height).ok_or_else(|| {
            TagError::RenderError(format!("cannot allocate {width}x{height} canvas"))
        })?;

        if let Some(text) = layout_line(&face, price, size) {
            // Center the ink box, whatever the font's bearings and baseline
            let bbox = text.bounds();
            let x = (width as f32 - bbox.width()) / 2.0 - bbox.left();
            let y = (height as f32 - bbox.height()) / 2.0 - bbox.top();

            let mut paint = Paint::default();
            let [r, g, b] = TEXT_COLOR;
            paint.set_color_rgba8(r, g, b, 255);
            paint.anti_alias = true;

            canvas.fill_path(
                &text,
                &paint,
                FillRule::Winding,
                Transform::from_translate(x, y),
                None,
            );
        }

        canvas
            .encode_png()
            .map_err(|e| TagError::RenderError(format!("png encoding failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_FONT: &[u8] = include_bytes!("../../tests/fixtures/DejaVuSansMono.ttf");

    fn renderer() -> TtfRenderer {
        TtfRenderer::from_bytes(TEST_FONT.to_vec()).unwrap()
    }

    fn decode(png: &[u8]) -> Pixmap {
        Pixmap::decode_png(png).unwrap()
    }

    #[test]
    fn test_rejects_garbage_font() {
        assert!(matches!(
            TtfRenderer::from_bytes(b"definitely not a font".to_vec()),
            Err(TagError::RenderError(_))
        ));
    }

    #[test]
    fn test_loads_font_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/DejaVuSansMono.ttf");
        let renderer = TtfRenderer::from_file(&path).unwrap();
        assert!(renderer.render("$1", 40, 20).is_ok());
    }

    #[test]
    fn test_missing_font_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            TtfRenderer::from_file(&dir.path().join("none.ttf")),
            Err(TagError::RenderError(_))
        ));
    }

    #[test]
    fn test_empty_price_is_render_error() {
        let renderer = renderer();
        assert!(matches!(
            renderer.render("", 100, 100),
            Err(TagError::RenderError(_))
        ));
    }

    #[test]
    fn test_canvas_size_and_transparency() {
        let renderer = renderer();
        let png = renderer.render("$19.99", 300, 120).unwrap();
        let pixmap = decode(&png);

        assert_eq!((pixmap.width(), pixmap.height()), (300, 120));
        // Corners stay transparent
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(299, 119).unwrap().alpha(), 0);
        // Some ink was drawn
        assert!(pixmap.pixels().iter().any(|p| p.alpha() == 255));
    }

    #[test]
    fn test_text_is_centered_and_colored() {
        let renderer = renderer();
        let (w, h) = (400u32, 300u32);
        let pixmap = decode(&renderer.render("88", w, h).unwrap());

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (w, 0, h, 0);
        for y in 0..h {
            for x in 0..w {
                let px = pixmap.pixel(x, y).unwrap();
                if px.alpha() == 255 {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                    min_y = min_y.min(y);
                    max_y = max_y.max(y);
                    let c = px.demultiply();
                    for (got, want) in [(c.red(), 0xf0), (c.green(), 0xf0), (c.blue(), 0xe9)] {
                        assert!(got.abs_diff(want) <= 1, "channel {got:#x} vs {want:#x}");
                    }
                }
            }
        }

        let left = min_x as i64;
        let right = (w - 1 - max_x) as i64;
        let top = min_y as i64;
        let bottom = (h - 1 - max_y) as i64;
        assert!((left - right).abs() <= 3, "horizontal margins {left} vs {right}");
        assert!((top - bottom).abs() <= 3, "vertical margins {top} vs {bottom}");
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = renderer();
        assert_eq!(
            renderer.render("$5", 64, 64).unwrap(),
            renderer.render("$5", 64, 64).unwrap()
        );
    }

    #[test]
    fn test_whitespace_price_renders_blank_canvas() {
        let renderer = renderer();
        let pixmap = decode(&renderer.render("   ", 50, 20).unwrap());
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }
}
