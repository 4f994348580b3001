//! Glyph outline utilities.
//!
//! Outlines come out of ttf-parser in font design units (y-up); callers map
//! them to pixels with [`glyph_transform`].

use tiny_skia::{Path, PathBuilder, Transform};

/// Converts ttf-parser glyph outlines to tiny-skia paths.
pub struct GlyphOutlineBuilder {
    builder: PathBuilder,
}

impl GlyphOutlineBuilder {
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    /// Consumes the builder and returns the completed path, if any segment
    /// was recorded.
    pub fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl Default for GlyphOutlineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ttf_parser::OutlineBuilder for GlyphOutlineBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Outline of one glyph in design units, `None` for blank glyphs.
pub fn build_glyph_path(face: &ttf_parser::Face<'_>, glyph: ttf_parser::GlyphId) -> Option<Path> {
    let mut builder = GlyphOutlineBuilder::new();
    face.outline_glyph(glyph, &mut builder)?;
    builder.finish()
}

/// Maps design units to pixels: scales, flips Y to tiny-skia's Y-down
/// space, then places the origin (baseline start) at `(x, y)`.
#[inline]
pub fn glyph_transform(scale: f32, x: f32, y: f32) -> Transform {
    Transform::from_row(scale, 0.0, 0.0, -scale, x, y)
}
