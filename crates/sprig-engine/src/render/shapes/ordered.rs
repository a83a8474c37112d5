use crate::draw::{DrawKind, DrawList};
use crate::drawable::Drawables;
use crate::render::{RenderCtx, RenderTarget};

use super::rect::RectRenderer;
use super::sprite::SpriteRenderer;

/// Draws a whole [`DrawList`] in paint order.
///
/// Both shape renderers upload their instances up front; a single pass then
/// walks the paint runs back to front and switches pipeline whenever the kind
/// of the next run differs, so a rect with a higher z covers a sprite below it
/// and the other way round.
#[derive(Default)]
pub struct ShapeRenderer {
    rect: RectRenderer,
    sprite: SpriteRenderer,
}

impl ShapeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        drawables: &Drawables,
    ) {
        let runs = draw_list.paint_runs();
        let rects = self.rect.prepare(ctx, draw_list);
        let sprites = self.sprite.prepare(ctx, draw_list, drawables);
        if !rects && !sprites {
            return;
        }

        let mut rpass = target.load_pass("sprig shape pass");
        for (run, kind) in runs.into_iter().enumerate() {
            match kind {
                DrawKind::Rect if rects => self.rect.draw_run(ctx, &mut rpass, run),
                DrawKind::Sprite if sprites => self.sprite.draw_run(ctx, &mut rpass, run),
                _ => {}
            }
        }
    }
}
