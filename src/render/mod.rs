//! Image Synthesis
//!
//! Turns a price string into a transparent PNG with the price centered on
//! the canvas.

mod glyph;
mod tag;

pub use glyph::{glyph_transform, GlyphOutlineBuilder};
pub use tag::TtfRenderer;

use crate::error::{Result, TagError};

/// Fill color of the price label (`#f0f0e9`)
pub const TEXT_COLOR: [u8; 3] = [0xf0, 0xf0, 0xe9];

/// Renders a price onto a `width` x `height` canvas and returns encoded bytes.
///
/// Implementations must be pure with respect to their inputs: the same
/// price and size always produce the same bytes.
pub trait PriceRenderer: Send + Sync {
    fn render(&self, price: &str, width: u32, height: u32) -> Result<Vec<u8>>;
}

/// Font size in pixels per em: the canvas width divided by the number of
/// characters of the price.
///
/// An empty price has no defined size and is rejected.
pub fn font_size(width: u32, price: &str) -> Result<f32> {
    let len = price.chars().count();
    if len == 0 {
        return Err(TagError::RenderError("empty price string".to_string()));
    }
    Ok(width as f32 / len as f32)
}
