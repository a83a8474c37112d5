use std::path::Path;

use image::RgbaImage;
use winit::window::{CustomCursor, CustomCursorSource};

use crate::drawable::Drawables;
use crate::error::{Error, Result};

/// Custom mouse cursor: an RGBA image and the pixel in it that sits on the
/// pointer position.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorImage {
    image: RgbaImage,
    hotspot: (u16, u16),
}

impl CursorImage {
    /// Fails for an empty image, a side longer than `u16::MAX`, or a hotspot
    /// outside the image.
    pub fn new(image: RgbaImage, hotspot_x: u32, hotspot_y: u32) -> Result<Self> {
        let (w, h) = image.dimensions();
        let max = u32::from(u16::MAX);
        if w == 0 || h == 0 || w > max || h > max {
            return Err(Error::invalid("cursor size", format!("{w}x{h}")));
        }
        if hotspot_x >= w || hotspot_y >= h {
            return Err(Error::invalid(
                "cursor hotspot",
                format!("({hotspot_x}, {hotspot_y}) outside {w}x{h}"),
            ));
        }
        Ok(Self { image, hotspot: (hotspot_x as u16, hotspot_y as u16) })
    }

    /// Decodes an image file into a cursor.
    pub fn load(path: impl AsRef<Path>, hotspot_x: u32, hotspot_y: u32) -> Result<Self> {
        Self::new(Drawables::decode_path(path)?, hotspot_x, hotspot_y)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    #[inline]
    pub fn hotspot(&self) -> (u32, u32) {
        (u32::from(self.hotspot.0), u32::from(self.hotspot.1))
    }

    /// Platform cursor data; the runtime turns it into a window cursor.
    pub(crate) fn source(&self) -> Result<CustomCursorSource> {
        let (w, h) = self.image.dimensions();
        let (x, y) = self.hotspot;
        CustomCursor::from_rgba(self.image.as_raw().clone(), w as u16, h as u16, x, y)
            .map_err(|e| Error::invalid("cursor image", e))
    }
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgba};

    use super::*;

    #[test]
    fn hotspot_must_lie_inside() {
        let image = RgbaImage::new(16, 8);
        assert_eq!(CursorImage::new(image.clone(), 15, 7).unwrap().hotspot(), (15, 7));
        assert!(matches!(
            CursorImage::new(image.clone(), 16, 0),
            Err(Error::InvalidArgument { what: "cursor hotspot", .. })
        ));
        assert!(CursorImage::new(image, 0, 8).is_err());
    }

    #[test]
    fn empty_image_is_rejected() {
        assert!(matches!(
            CursorImage::new(RgbaImage::new(0, 4), 0, 0),
            Err(Error::InvalidArgument { what: "cursor size", .. })
        ));
    }

    #[test]
    fn load_keeps_pixels_and_hotspot() {
        let path = std::env::temp_dir().join(format!("sprig-cursor-{}.png", std::process::id()));
        let image = RgbaImage::from_pixel(3, 5, Rgba([255, 0, 0, 255]));
        image.save_with_format(&path, ImageFormat::Png).unwrap();

        let cursor = CursorImage::load(&path, 2, 0).unwrap();
        assert_eq!((cursor.width(), cursor.height()), (3, 5));
        assert_eq!(cursor.hotspot(), (2, 0));
        assert_eq!(cursor, CursorImage::new(image, 2, 0).unwrap());
        assert!(cursor.source().is_ok());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = CursorImage::load("/nonexistent/sprig-cursor.png", 0, 0).unwrap_err();
        assert!(matches!(err, Error::Load { .. }));
    }
}
