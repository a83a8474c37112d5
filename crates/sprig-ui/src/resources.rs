//! Drawable and sprite cache.
//!
//! Sprites are handed out as `Rc<Sprite>`; nothing is ever evicted, so a
//! sprite outlives every animation that plays it. Files are decoded at most
//! once and only registered after they proved usable.
//!
//! Also holds the cursor change the game asked for until the window applies it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use sprig_engine::drawable::{Drawable, Drawables};
use sprig_engine::paint::Color;
use sprig_engine::text::Font;
use sprig_engine::window::CursorImage;

use crate::error::Result;
use crate::sprite::{Sprite, SpriteLayout};

#[derive(Default)]
pub struct Resources {
    drawables: Drawables,
    files: HashMap<PathBuf, Drawable>,
    sprites: HashMap<String, Rc<Sprite>>,
    cursor: Option<CursorImage>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn drawables(&self) -> &Drawables {
        &self.drawables
    }

    // ── drawables ─────────────────────────────────────────────────────────

    /// Loads an image file; a path already loaded returns the same drawable.
    pub fn load_drawable(&mut self, path: impl AsRef<Path>) -> Result<Drawable> {
        self.load_file(path.as_ref(), |_, _| Ok(()))
    }

    /// Decodes `path` unless cached; a new image is registered only once
    /// `accept` has approved its size.
    fn load_file(
        &mut self,
        path: &Path,
        accept: impl FnOnce(u32, u32) -> Result<()>,
    ) -> Result<Drawable> {
        if let Some(&drawable) = self.files.get(path) {
            accept(drawable.width, drawable.height)?;
            return Ok(drawable);
        }
        let image = Drawables::decode_path(path)?;
        accept(image.width(), image.height())?;
        let drawable = self.drawables.insert(image);
        self.files.insert(path.to_path_buf(), drawable);
        Ok(drawable)
    }

    pub fn load_drawable_bytes(&mut self, bytes: &[u8]) -> Result<Drawable> {
        Ok(self.drawables.load_bytes(bytes)?)
    }

    pub fn insert_drawable(&mut self, image: RgbaImage) -> Drawable {
        self.drawables.insert(image)
    }

    /// Rasterizes one line of text into a drawable.
    pub fn insert_text(&mut self, font: &Font, text: &str, size: f32, color: Color) -> Drawable {
        self.drawables.insert_text(font, text, size, color)
    }

    // ── sprites ───────────────────────────────────────────────────────────

    /// Loads and splits a sprite sheet. Repeated calls with the same
    /// arguments return the cached sprite without touching the file.
    pub fn load_sprite(
        &mut self,
        path: impl AsRef<Path>,
        fps: f32,
        layout: SpriteLayout,
    ) -> Result<Rc<Sprite>> {
        let path = path.as_ref();
        let key = format!("{}#{fps}#{layout}", path.display());
        if let Some(sprite) = self.sprites.get(&key) {
            log::trace!("sprite cache hit: {key}");
            return Ok(sprite.clone());
        }
        let drawable = self.load_file(path, |w, h| Sprite::check_layout(layout, fps, w, h))?;
        let sprite = Rc::new(Sprite::with_layout(drawable, layout, fps)?);
        self.sprites.insert(key, sprite.clone());
        Ok(sprite)
    }

    /// Registers `sprite` under `name`, replacing any previous one.
    pub fn insert_sprite(&mut self, name: impl Into<String>, sprite: Sprite) -> Rc<Sprite> {
        let sprite = Rc::new(sprite);
        self.sprites.insert(name.into(), sprite.clone());
        sprite
    }

    pub fn sprite(&self, name: &str) -> Option<Rc<Sprite>> {
        self.sprites.get(name).cloned()
    }

    // ── cursor ────────────────────────────────────────────────────────────

    /// Loads a cursor image; `(hotspot_x, hotspot_y)` is the pixel that
    /// tracks the pointer.
    pub fn load_cursor(
        &self,
        path: impl AsRef<Path>,
        hotspot_x: u32,
        hotspot_y: u32,
    ) -> Result<CursorImage> {
        Ok(CursorImage::load(path, hotspot_x, hotspot_y)?)
    }

    /// Shows `cursor` over the window from the next frame on. A later call
    /// before then wins.
    pub fn set_cursor(&mut self, cursor: CursorImage) {
        self.cursor = Some(cursor);
    }

    /// The cursor set since the window last picked one up.
    pub fn pending_cursor(&self) -> Option<&CursorImage> {
        self.cursor.as_ref()
    }

    pub(crate) fn take_cursor(&mut self) -> Option<CursorImage> {
        self.cursor.take()
    }
}
