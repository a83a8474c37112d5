//! Sprites used by the demo.
//!
//! Sheets are read from an `assets/` directory next to the executable when
//! present; anything missing is painted procedurally so the demo always runs.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use image::{Rgba, RgbaImage};
use sprig_engine::coords::PixelRect;
use sprig_engine::paint::Color;
use sprig_engine::text::Font;
use sprig_engine::window::CursorImage;
use sprig_ui::resources::Resources;
use sprig_ui::sprite::{Sprite, SpriteLayout};

const TILE: u32 = 16;
const BUTTON_ZOOM: f32 = 3.0;
const LABEL_SIZE: f32 = 18.0;
/// Arrow tip of `cursor.png`.
const CURSOR_HOTSPOT: (u32, u32) = (2, 0);
const CROSSHAIR: u32 = 15;

const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct Sprites {
    pub tree: Rc<Sprite>,
    pub stone: Rc<Sprite>,
    pub hero: Rc<Sprite>,
    pub bullet: Rc<Sprite>,
    pub button_normal: Rc<Sprite>,
    pub button_pressed: Rc<Sprite>,
    /// `None` when no usable font was found.
    pub quit_label: Option<Rc<Sprite>>,
    pub cursor: CursorImage,
}

impl Sprites {
    pub fn load(resources: &mut Resources) -> anyhow::Result<Self> {
        let dir = asset_dir();
        log::debug!("asset directory: {}", dir.display());

        let tree = sheet(resources, &dir, "tree", 2, 3.0, || tree_sheet(2))?;
        let stone = sheet(resources, &dir, "stone", 1, 1.0, stone_sheet)?;
        let hero = sheet(resources, &dir, "hero", 1, 1.0, hero_sheet)?;
        let bullet = sheet(resources, &dir, "bullet", 1, 1.0, bullet_sheet)?;

        let button = match load_png(&dir, "button") {
            Some(path) => resources.load_drawable(&path).context("loading button sheet")?,
            None => resources.insert_drawable(button_sheet()),
        };
        let half = |y| PixelRect::new(0, y, 64, 16);
        let button_normal =
            resources.insert_sprite("button", Sprite::one_frame(button, half(0), BUTTON_ZOOM));
        let button_pressed = resources
            .insert_sprite("button-pressed", Sprite::one_frame(button, half(16), BUTTON_ZOOM));

        let quit_label = match find_font(&dir) {
            Some(font) => {
                let drawable = resources.insert_text(&font, "Quit", LABEL_SIZE, Color::BLACK);
                Some(resources.insert_sprite("quit-label", Sprite::simple(drawable, 1, 1.0)?))
            }
            None => {
                log::warn!("no font found, the quit button has no label");
                None
            }
        };

        let cursor = match load_png(&dir, "cursor") {
            Some(path) => {
                let (x, y) = CURSOR_HOTSPOT;
                resources.load_cursor(&path, x, y).context("loading cursor")?
            }
            None => {
                let center = CROSSHAIR / 2;
                CursorImage::new(crosshair(), center, center)?
            }
        };

        Ok(Self { tree, stone, hero, bullet, button_normal, button_pressed, quit_label, cursor })
    }
}

fn asset_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("assets")))
        .unwrap_or_else(|| PathBuf::from("assets"))
}

fn load_png(dir: &Path, name: &str) -> Option<PathBuf> {
    let path = dir.join(format!("{name}.png"));
    path.is_file().then_some(path)
}

/// A horizontal sheet of `frames` tiles, from disk or from `paint`.
fn sheet(
    resources: &mut Resources,
    dir: &Path,
    name: &str,
    frames: u32,
    fps: f32,
    paint: impl FnOnce() -> RgbaImage,
) -> anyhow::Result<Rc<Sprite>> {
    let layout = SpriteLayout::horizontal(frames);
    if let Some(path) = load_png(dir, name) {
        return resources
            .load_sprite(&path, fps, layout)
            .with_context(|| format!("loading {}", path.display()));
    }
    log::debug!("painting {name} sprite");
    let drawable = resources.insert_drawable(paint());
    Ok(resources.insert_sprite(name, Sprite::with_layout(drawable, layout, fps)?))
}

fn find_font(dir: &Path) -> Option<Font> {
    let local = dir.join("font.ttf");
    let candidates = std::iter::once(local.as_path()).chain(FONT_CANDIDATES.iter().map(Path::new));
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else { continue };
        match Font::from_bytes(&bytes) {
            Ok(font) => {
                log::debug!("using font {}", path.display());
                return Some(font);
            }
            Err(e) => log::warn!("skipping font {}: {e}", path.display()),
        }
    }
    None
}

// ── procedural sheets ─────────────────────────────────────────────────────

fn disc(img: &mut RgbaImage, ox: u32, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
    for y in 0..img.height() {
        for x in ox..ox + TILE {
            let dx = (x - ox) as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            if dx * dx + dy * dy <= r * r {
                img.put_pixel(x, y, Rgba(color));
            }
        }
    }
}

fn tree_sheet(frames: u32) -> RgbaImage {
    let mut img = RgbaImage::new(TILE * frames, TILE);
    for f in 0..frames {
        let ox = f * TILE;
        for y in 10..16 {
            for x in 7..9 {
                img.put_pixel(ox + x, y, Rgba([110, 70, 30, 255]));
            }
        }
        let sway = if f % 2 == 0 { 0.0 } else { 0.7 };
        disc(&mut img, ox, 8.0 + sway, 6.5, 6.0, [30, 120, 40, 255]);
        disc(&mut img, ox, 6.5 + sway, 5.0, 2.5, [60, 160, 60, 255]);
    }
    img
}

fn stone_sheet() -> RgbaImage {
    let mut img = RgbaImage::new(TILE, TILE);
    disc(&mut img, 0, 8.0, 9.0, 6.0, [120, 120, 125, 255]);
    disc(&mut img, 0, 6.5, 7.5, 2.0, [160, 160, 165, 255]);
    img
}

fn hero_sheet() -> RgbaImage {
    let mut img = RgbaImage::new(TILE, TILE);
    disc(&mut img, 0, 8.0, 8.0, 6.5, [40, 70, 200, 255]);
    disc(&mut img, 0, 6.0, 6.0, 1.2, [255, 255, 255, 255]);
    disc(&mut img, 0, 10.0, 6.0, 1.2, [255, 255, 255, 255]);
    img
}

fn bullet_sheet() -> RgbaImage {
    let mut img = RgbaImage::new(TILE, TILE);
    disc(&mut img, 0, 8.0, 8.0, 2.0, [250, 220, 60, 255]);
    img
}

/// 64×32: the released face on top, the held face below.
fn button_sheet() -> RgbaImage {
    RgbaImage::from_fn(64, 32, |x, y| {
        let (top, face) =
            if y < 16 { (0, [200, 200, 200, 255]) } else { (16, [150, 150, 150, 255]) };
        let edge = x == 0 || x == 63 || y == top || y == top + 15;
        if edge { Rgba([60, 60, 60, 255]) } else { Rgba(face) }
    })
}

/// White cross with a dark outline, readable on grass and on sprites.
fn crosshair() -> RgbaImage {
    let mid = CROSSHAIR / 2;
    let mut img = RgbaImage::new(CROSSHAIR, CROSSHAIR);
    for i in 0..CROSSHAIR {
        if i.abs_diff(mid) < 2 {
            continue;
        }
        for (x, y) in [(i, mid), (mid, i)] {
            img.put_pixel(x, y, Rgba([255, 255, 255, 255]));
        }
        for (x, y) in [(i, mid - 1), (i, mid + 1), (mid - 1, i), (mid + 1, i)] {
            if img.get_pixel(x, y)[3] == 0 {
                img.put_pixel(x, y, Rgba([20, 20, 20, 255]));
            }
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn procedural_sheets_split_evenly() {
        let mut res = Resources::new();
        let dir = Path::new("/nonexistent/sprig-assets");
        let tree = sheet(&mut res, dir, "tree", 2, 3.0, || tree_sheet(2)).unwrap();
        assert_eq!(tree.frames().len(), 2);
        assert_eq!(tree.frames()[1].rect, PixelRect::new(16, 0, 16, 16));
        assert!(res.sprite("tree").is_some());
    }

    #[test]
    fn button_faces_differ() {
        let img = button_sheet();
        assert_ne!(img.get_pixel(10, 8), img.get_pixel(10, 24));
        assert_eq!(img.get_pixel(0, 0), &Rgba([60, 60, 60, 255]));
    }

    #[test]
    fn sprites_load_without_asset_files() {
        let mut res = Resources::new();
        let sprites = Sprites::load(&mut res).unwrap();
        assert_eq!(sprites.tree.frames().len(), 2);
        assert_eq!(sprites.button_pressed.frames()[0].rect, PixelRect::new(0, 16, 64, 16));
        assert_eq!(sprites.button_normal.zoom(), BUTTON_ZOOM);
    }

    #[test]
    fn crosshair_leaves_the_hotspot_clear() {
        let img = crosshair();
        let mid = CROSSHAIR / 2;
        assert_eq!(img.get_pixel(mid, mid)[3], 0);
        assert_eq!(img.get_pixel(0, mid), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(mid, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(img.get_pixel(0, mid - 1), &Rgba([20, 20, 20, 255]));
        assert_eq!(img.get_pixel(0, 0)[3], 0);

        let mut res = Resources::new();
        let sprites = Sprites::load(&mut res).unwrap();
        assert_eq!(sprites.cursor.hotspot(), (mid, mid));
    }
}
