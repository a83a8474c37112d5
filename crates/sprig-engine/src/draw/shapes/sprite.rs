use crate::coords::{PixelRect, ScreenPoint, ScreenRect, ScreenVector};
use crate::draw::{DrawCmd, DrawList, ZIndex};
use crate::drawable::DrawableId;

/// Blit of a drawable sub-rectangle, centered on a screen point.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCmd {
    pub drawable: DrawableId,
    /// Source texels inside the drawable.
    pub source: PixelRect,
    /// Destination center in logical pixels.
    pub center: ScreenPoint,
    /// Uniform scale applied to the source size.
    pub scale: f32,
}

impl SpriteCmd {
    /// Screen-space destination rectangle.
    pub fn dest(&self) -> ScreenRect {
        let size = ScreenVector::new(
            self.source.w as f32 * self.scale,
            self.source.h as f32 * self.scale,
        );
        ScreenRect::at_position(self.center, size)
    }
}

impl DrawList {
    /// Records a sprite draw command.
    #[inline]
    pub fn push_sprite(
        &mut self,
        z: ZIndex,
        drawable: DrawableId,
        source: PixelRect,
        center: ScreenPoint,
        scale: f32,
    ) {
        self.push(z, DrawCmd::Sprite(SpriteCmd { drawable, source, center, scale }));
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;
    use crate::drawable::Drawables;

    #[test]
    fn dest_is_centered_and_scaled() {
        let mut store = Drawables::new();
        let d = store.insert(RgbaImage::new(64, 32));
        let cmd = SpriteCmd {
            drawable: d.id,
            source: PixelRect::new(0, 16, 64, 16),
            center: ScreenPoint::new(100.0, 50.0),
            scale: 3.0,
        };
        assert_eq!(cmd.dest(), ScreenRect::new(4.0, 26.0, 192.0, 48.0));
    }
}
