use sprig_engine::coords::{PixelRect, ScreenPoint, ScreenRect};
use sprig_engine::draw::{DrawList, ZIndex};
use sprig_engine::drawable::DrawableId;
use sprig_engine::paint::Color;

/// Drawing surface passed to [`Widget::render`](crate::widget::Widget::render).
///
/// Wraps the engine's `DrawList`; every call gets the next z-index, so later
/// calls paint over earlier ones.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList) -> Self {
        Self { draw_list, z: 0 }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Solid axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_rect(z, rect, color);
    }

    /// `source` texels of `drawable`, centered on `center` and scaled by `scale`.
    pub fn draw_frame(
        &mut self,
        drawable: DrawableId,
        source: PixelRect,
        center: ScreenPoint,
        scale: f32,
    ) {
        let z = self.next_z();
        self.draw_list.push_sprite(z, drawable, source, center, scale);
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Begin a scissor region. Must be paired with [`pop_clip`](Self::pop_clip).
    pub fn push_clip(&mut self, rect: ScreenRect) {
        self.draw_list.push_clip(rect);
    }

    pub fn pop_clip(&mut self) {
        self.draw_list.pop_clip();
    }

    // ── internal ──────────────────────────────────────────────────────────

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex(self.z);
        self.z += 1;
        z
    }
}
