//! Sprite sheets and their playback.
//!
//! A [`Sprite`] is an immutable frame table over one drawable, shared through
//! `Rc` by every [`Animation`] that plays it.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use sprig_engine::coords::{PixelRect, ScreenPoint, ScreenVector};
use sprig_engine::drawable::Drawable;

use crate::error::{Error, Result};
use crate::painter::Painter;

/// One frame of a sprite: a source rectangle and how long it is shown.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub rect: PixelRect,
    /// Seconds.
    pub duration: f32,
}

// ── layout ────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum LayoutKind {
    #[default]
    Horizontal,
    Vertical,
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(LayoutKind::Horizontal),
            "vertical" => Ok(LayoutKind::Vertical),
            _ => Err(Error::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LayoutKind::Horizontal => "horizontal",
            LayoutKind::Vertical => "vertical",
        })
    }
}

/// How a sheet is cut into equally sized frames.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SpriteLayout {
    pub kind: LayoutKind,
    pub frame_count: u32,
}

impl SpriteLayout {
    pub const fn horizontal(frame_count: u32) -> Self {
        Self { kind: LayoutKind::Horizontal, frame_count }
    }

    pub const fn vertical(frame_count: u32) -> Self {
        Self { kind: LayoutKind::Vertical, frame_count }
    }

    /// Source rectangles for a sheet of `width` x `height` texels.
    fn split(self, width: u32, height: u32) -> Result<Vec<PixelRect>> {
        let n = self.frame_count;
        if n == 0 {
            return Err(Error::EmptySprite);
        }
        let (extent, axis) = match self.kind {
            LayoutKind::Horizontal => (width, "width"),
            LayoutKind::Vertical => (height, "height"),
        };
        if extent % n != 0 {
            return Err(Error::Division { extent, axis, frame_count: n });
        }
        let step = (extent / n) as i32;
        let (w, h) = (width as i32, height as i32);
        Ok((0..n as i32)
            .map(|i| match self.kind {
                LayoutKind::Horizontal => PixelRect::new(i * step, 0, step, h),
                LayoutKind::Vertical => PixelRect::new(0, i * step, w, step),
            })
            .collect())
    }
}

impl Default for SpriteLayout {
    fn default() -> Self {
        Self::horizontal(1)
    }
}

impl fmt::Display for SpriteLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.frame_count)
    }
}

fn layout_frames(layout: SpriteLayout, fps: f32, width: u32, height: u32) -> Result<Vec<Frame>> {
    if !(fps > 0.0) || !fps.is_finite() {
        return Err(Error::InvalidFps(fps));
    }
    let duration = 1.0 / fps;
    Ok(layout.split(width, height)?.into_iter().map(|rect| Frame { rect, duration }).collect())
}

// ── sprite ────────────────────────────────────────────────────────────────

/// Immutable frame table over a drawable.
///
/// Invariants: at least one frame, every duration positive, every frame
/// inside the drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    drawable: Drawable,
    frames: Vec<Frame>,
    zoom: f32,
    /// `cumulative[i]` is the end time of frame `i`.
    cumulative: Vec<f32>,
}

impl Sprite {
    /// Builds a sprite from explicit frames.
    pub fn new(drawable: Drawable, frames: Vec<Frame>, zoom: f32) -> Result<Self> {
        if frames.is_empty() {
            return Err(Error::EmptySprite);
        }
        if let Some(bad) = frames.iter().find(|f| !(f.duration > 0.0) || !f.duration.is_finite()) {
            return Err(Error::InvalidDuration(bad.duration));
        }
        let frames: Vec<Frame> = frames
            .into_iter()
            .map(|f| Frame { rect: fit(f.rect, drawable), duration: f.duration })
            .collect();
        let cumulative = frames
            .iter()
            .scan(0.0f32, |sum, f| {
                *sum += f.duration;
                Some(*sum)
            })
            .collect();
        Ok(Self { drawable, frames, zoom, cumulative })
    }

    /// Horizontal strip of `frame_count` frames played at `fps`.
    pub fn simple(drawable: Drawable, frame_count: u32, fps: f32) -> Result<Self> {
        Self::with_layout(drawable, SpriteLayout::horizontal(frame_count), fps)
    }

    pub fn with_layout(drawable: Drawable, layout: SpriteLayout, fps: f32) -> Result<Self> {
        let frames = layout_frames(layout, fps, drawable.width, drawable.height)?;
        Self::new(drawable, frames, 1.0)
    }

    /// Fails exactly when [`with_layout`](Self::with_layout) would for a
    /// `width` x `height` sheet.
    pub(crate) fn check_layout(
        layout: SpriteLayout,
        fps: f32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        layout_frames(layout, fps, width, height).map(drop)
    }

    /// A still image cut from `rect`, clamped to the drawable.
    pub fn one_frame(drawable: Drawable, rect: PixelRect, zoom: f32) -> Self {
        let frame = Frame { rect: fit(rect, drawable), duration: 1.0 };
        Self { drawable, frames: vec![frame], zoom, cumulative: vec![1.0] }
    }

    /// Same frames drawn at `zoom` times their texel size.
    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    #[inline]
    pub fn drawable(&self) -> Drawable {
        self.drawable
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Sum of all frame durations; always positive.
    #[inline]
    pub fn total_duration(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Index of the frame shown at `time` seconds into the sequence.
    pub fn frame_at(&self, time: f32) -> usize {
        let i = self.cumulative.partition_point(|&end| end <= time);
        i.min(self.frames.len() - 1)
    }
}

/// Floors the origin at 0 and keeps the extent inside the drawable.
fn fit(rect: PixelRect, drawable: Drawable) -> PixelRect {
    let (dw, dh) = (drawable.width as i32, drawable.height as i32);
    let x = rect.x.clamp(0, dw);
    let y = rect.y.clamp(0, dh);
    let w = rect.w.clamp(0, dw - x);
    let h = rect.h.clamp(0, dh - y);
    PixelRect::new(x, y, w, h)
}

// ── animation ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Playback {
    /// Wrap around at the end of the sequence.
    #[default]
    Loop,
    /// Stop at the end and hold the final frame.
    Once,
}

/// Playback cursor over a shared [`Sprite`].
#[derive(Debug, Clone)]
pub struct Animation {
    sprite: Rc<Sprite>,
    time: f32,
    frame_index: usize,
    playback: Playback,
}

impl Animation {
    pub fn new(sprite: Rc<Sprite>) -> Self {
        Self { sprite, time: 0.0, frame_index: 0, playback: Playback::Loop }
    }

    /// Plays the sequence once and holds the final frame.
    pub fn no_loop(mut self) -> Self {
        self.playback = Playback::Once;
        self
    }

    pub fn set_playback(&mut self, playback: Playback) {
        self.playback = playback;
    }

    #[inline]
    pub fn playback(&self) -> Playback {
        self.playback
    }

    #[inline]
    pub fn sprite(&self) -> &Rc<Sprite> {
        &self.sprite
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }

    #[inline]
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    #[inline]
    pub fn frame(&self) -> &Frame {
        &self.sprite.frames[self.frame_index]
    }

    /// Current frame size on screen, including the sprite zoom.
    pub fn size(&self) -> ScreenVector {
        let rect = self.frame().rect;
        ScreenVector::new(rect.w as f32 * self.sprite.zoom, rect.h as f32 * self.sprite.zoom)
    }

    pub fn update(&mut self, delta: f32) {
        let total = self.sprite.total_duration();
        match self.playback {
            Playback::Loop => {
                self.time = (self.time + delta).rem_euclid(total);
                self.frame_index = self.sprite.frame_at(self.time);
            }
            Playback::Once => {
                self.time = (self.time + delta).clamp(0.0, total);
                self.frame_index = if self.time >= total {
                    self.sprite.frames.len() - 1
                } else {
                    self.sprite.frame_at(self.time)
                };
            }
        }
    }

    pub fn reset(&mut self) {
        self.time = 0.0;
        self.frame_index = 0;
    }

    /// `true` once a non-looping animation reached its end.
    pub fn is_finished(&self) -> bool {
        self.playback == Playback::Once && self.time >= self.sprite.total_duration()
    }

    /// Draws the current frame at the sprite's own zoom.
    pub fn draw(&self, painter: &mut Painter<'_>, center: ScreenPoint) {
        self.draw_scaled(painter, center, self.sprite.zoom);
    }

    pub fn draw_scaled(&self, painter: &mut Painter<'_>, center: ScreenPoint, scale: f32) {
        painter.draw_frame(self.sprite.drawable.id, self.frame().rect, center, scale);
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;
    use sprig_engine::draw::{DrawCmd, DrawList};
    use sprig_engine::drawable::Drawables;

    use super::*;

    fn sheet(width: u32, height: u32) -> Drawable {
        Drawables::new().insert(RgbaImage::new(width, height))
    }

    fn rc(sprite: Sprite) -> Rc<Sprite> {
        Rc::new(sprite)
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn simple_splits_width() {
        let sprite = Sprite::simple(sheet(120, 16), 4, 5.0).unwrap();
        assert_eq!(sprite.frames().len(), 4);
        for (i, frame) in sprite.frames().iter().enumerate() {
            assert_eq!(frame.rect, PixelRect::new(30 * i as i32, 0, 30, 16));
            assert!((frame.duration - 0.2).abs() < 1e-6);
        }
    }

    #[test]
    fn simple_rejects_uneven_split() {
        let err = Sprite::simple(sheet(121, 16), 4, 5.0).unwrap_err();
        assert_eq!(err, Error::Division { extent: 121, axis: "width", frame_count: 4 });
        assert_eq!(err.to_string(), "cannot divide texture of width 121 into 4 parts");
    }

    #[test]
    fn vertical_layout_splits_height() {
        let sprite = Sprite::with_layout(sheet(16, 48), SpriteLayout::vertical(3), 2.0).unwrap();
        assert_eq!(sprite.frames()[2].rect, PixelRect::new(0, 32, 16, 16));

        let err = Sprite::with_layout(sheet(16, 50), SpriteLayout::vertical(3), 2.0).unwrap_err();
        assert_eq!(err.to_string(), "cannot divide texture of height 50 into 3 parts");
    }

    #[test]
    fn rejects_empty_and_bad_rates() {
        assert_eq!(Sprite::simple(sheet(8, 8), 0, 1.0), Err(Error::EmptySprite));
        assert_eq!(Sprite::simple(sheet(8, 8), 1, 0.0), Err(Error::InvalidFps(0.0)));
        assert!(matches!(Sprite::simple(sheet(8, 8), 1, f32::NAN), Err(Error::InvalidFps(_))));
        let frame = Frame { rect: PixelRect::new(0, 0, 8, 8), duration: -1.0 };
        assert_eq!(Sprite::new(sheet(8, 8), vec![frame], 1.0), Err(Error::InvalidDuration(-1.0)));
    }

    #[test]
    fn one_frame_is_clamped_to_drawable() {
        let d = sheet(64, 32);
        let inside = Sprite::one_frame(d, PixelRect::new(0, 16, 64, 16), 3.0);
        assert_eq!(inside.frames()[0].rect, PixelRect::new(0, 16, 64, 16));
        assert_eq!(inside.zoom(), 3.0);

        let oversized = Sprite::one_frame(d, PixelRect::new(-5, -2, 100, 100), 1.0);
        assert_eq!(oversized.frames()[0].rect, PixelRect::new(0, 0, 64, 32));

        let shifted = Sprite::one_frame(d, PixelRect::new(10, 0, 64, 8), 1.0);
        assert_eq!(shifted.frames()[0].rect, PixelRect::new(10, 0, 54, 8));
    }

    #[test]
    fn layout_kind_parses() {
        assert_eq!("vertical".parse::<LayoutKind>(), Ok(LayoutKind::Vertical));
        assert_eq!(" Horizontal ".parse::<LayoutKind>(), Ok(LayoutKind::Horizontal));
        assert_eq!("diagonal".parse::<LayoutKind>(), Err(Error::UnknownLayout("diagonal".into())));
    }

    // ── playback ──────────────────────────────────────────────────────────

    #[test]
    fn loop_wraps_time() {
        let mut anim = Animation::new(rc(Sprite::simple(sheet(120, 16), 4, 5.0).unwrap()));
        anim.update(0.9);
        assert!((anim.time() - 0.1).abs() < 1e-5);
        assert_eq!(anim.frame_index(), 0);

        anim.update(0.2);
        assert_eq!(anim.frame_index(), 1);
        assert!(!anim.is_finished());
    }

    #[test]
    fn frame_boundary_advances() {
        let mut anim = Animation::new(rc(Sprite::simple(sheet(120, 16), 4, 4.0).unwrap()));
        anim.update(0.25);
        assert_eq!(anim.frame_index(), 1);
    }

    #[test]
    fn once_holds_last_frame() {
        let sprite = rc(Sprite::simple(sheet(70, 10), 7, 14.0).unwrap());
        let mut anim = Animation::new(sprite).no_loop();
        anim.update(0.3);
        assert_eq!(anim.frame_index(), 4);
        anim.update(10.0);
        assert_eq!(anim.frame_index(), 6);
        assert!(anim.is_finished());
        anim.update(0.1);
        assert_eq!(anim.frame_index(), 6);

        anim.reset();
        assert_eq!((anim.time(), anim.frame_index()), (0.0, 0));
        assert!(!anim.is_finished());
    }

    #[test]
    fn size_includes_zoom() {
        let sprite = Sprite::one_frame(sheet(64, 32), PixelRect::new(0, 0, 64, 16), 3.0);
        assert_eq!(Animation::new(rc(sprite)).size(), ScreenVector::new(192.0, 48.0));
    }

    #[test]
    fn draw_records_current_frame() {
        let sprite = rc(Sprite::simple(sheet(40, 10), 4, 10.0).unwrap().with_zoom(2.0));
        let mut anim = Animation::new(sprite.clone());
        anim.update(0.15);

        let mut list = DrawList::new();
        anim.draw(&mut Painter::new(&mut list), ScreenPoint::new(5.0, 5.0));
        match &list.items()[0].cmd {
            DrawCmd::Sprite(cmd) => {
                assert_eq!(cmd.drawable, sprite.drawable().id);
                assert_eq!(cmd.source, PixelRect::new(10, 0, 10, 10));
                assert_eq!(cmd.scale, 2.0);
            }
            other => panic!("expected sprite, got {other:?}"),
        }
    }
}
