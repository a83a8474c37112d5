use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};
use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::paint::Color;

/// A parsed TrueType / OpenType font.
///
/// Text is not drawn glyph-by-glyph at render time; instead a string is
/// rasterized once into an RGBA image which then behaves like any other
/// drawable (see [`Drawables::insert_text`](crate::drawable::Drawables::insert_text)).
pub struct Font {
    inner: fontdue::Font,
}

impl Font {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| Error::Font(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Rasterizes one line of `text` at `size` pixels in `color`.
    ///
    /// The result is tightly sized to the laid-out glyphs and never smaller
    /// than 1x1, so blank strings still yield a valid (transparent) image.
    pub fn rasterize(&self, text: &str, size: f32, color: Color) -> RgbaImage {
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.inner], &TextStyle::new(text, size, 0));

        let width = layout
            .glyphs()
            .iter()
            .map(|g| g.x + g.width as f32)
            .fold(0.0f32, f32::max)
            .ceil() as u32;
        let height = layout.height().ceil() as u32;

        let [r, g, b, a] = color.to_srgb_u8();
        let mut image = RgbaImage::new(width.max(1), height.max(1));

        for glyph in layout.glyphs() {
            if !glyph.char_data.rasterize() || glyph.width == 0 || glyph.height == 0 {
                continue;
            }
            let (metrics, coverage) = self.inner.rasterize_config(glyph.key);

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let px = glyph.x.round() as i64 + col as i64;
                    let py = glyph.y.round() as i64 + row as i64;
                    let inside = (0..image.width() as i64).contains(&px)
                        && (0..image.height() as i64).contains(&py);
                    if !inside {
                        continue;
                    }
                    let cov = coverage[row * metrics.width + col] as u32;
                    let alpha = (cov * a as u32 / 255) as u8;
                    image.put_pixel(px as u32, py as u32, Rgba([r, g, b, alpha]));
                }
            }
        }

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_font_bytes_are_rejected() {
        let err = Font::from_bytes(b"not a font").err().unwrap();
        assert!(matches!(err, Error::Font(_)));
    }
}
