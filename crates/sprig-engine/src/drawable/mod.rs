//! CPU-side store of decoded images ("drawables").
//!
//! A drawable is an immutable RGBA8 image addressed by a [`DrawableId`].
//! Decoding happens here, once; the GPU copy is created lazily by
//! [`SpriteRenderer`](crate::render::shapes::sprite::SpriteRenderer) the first
//! time a drawable is referenced by a draw command.
//!
//! The store is append-only, so an id handed out stays valid for the
//! lifetime of the store.

use std::path::Path;

use image::RgbaImage;

use crate::coords::PixelVector;
use crate::error::{Error, Result};
use crate::paint::Color;
use crate::text::Font;

/// Opaque index of a drawable inside a [`Drawables`] store.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct DrawableId(u32);

impl DrawableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a loaded drawable together with its pixel size.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Drawable {
    pub id: DrawableId,
    pub width: u32,
    pub height: u32,
}

impl Drawable {
    #[inline]
    pub fn size(self) -> PixelVector {
        PixelVector::new(self.width as i32, self.height as i32)
    }
}

/// Append-only collection of decoded RGBA8 images.
#[derive(Default)]
pub struct Drawables {
    images: Vec<RgbaImage>,
}

impl Drawables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of an already decoded image.
    pub fn insert(&mut self, image: RgbaImage) -> Drawable {
        let id = DrawableId(self.images.len() as u32);
        let drawable = Drawable { id, width: image.width(), height: image.height() };
        self.images.push(image);
        log::debug!("drawable {:?} registered ({}x{})", id, drawable.width, drawable.height);
        drawable
    }

    /// Decodes an encoded image (PNG, JPEG, ...) from memory.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<Drawable> {
        let image = image::load_from_memory(bytes).map_err(|e| Error::Load {
            origin: format!("<{} bytes>", bytes.len()),
            message: e.to_string(),
        })?;
        Ok(self.insert(image.to_rgba8()))
    }

    /// Reads and decodes an image file.
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<Drawable> {
        Ok(self.insert(Self::decode_path(path)?))
    }

    /// Decodes an image file without registering it.
    pub fn decode_path(path: impl AsRef<Path>) -> Result<RgbaImage> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| Error::Load {
            origin: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(image.to_rgba8())
    }

    /// Rasterizes a single line of text into a new drawable.
    pub fn insert_text(&mut self, font: &Font, text: &str, size: f32, color: Color) -> Drawable {
        self.insert(font.rasterize(text, size, color))
    }

    pub fn get(&self, id: DrawableId) -> Option<Drawable> {
        self.images.get(id.index()).map(|image| Drawable {
            id,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Raw RGBA8 pixels, row-major, straight alpha.
    pub fn pixels(&self, id: DrawableId) -> Option<&RgbaImage> {
        self.images.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
