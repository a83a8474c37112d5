use crate::coords::ScreenRect;

use super::{DrawCmd, DrawKind, SortKey, ZIndex};

/// A single draw item: sort key + command + clip rect.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub key: SortKey,
    pub cmd: DrawCmd,
    /// Scissor rect in logical pixels. `None` = no clipping.
    pub clip_rect: Option<ScreenRect>,
}

/// Recorded draw stream for a frame.
///
/// `push()` is O(1); paint-order iteration reuses an internal index buffer,
/// so a warmed-up list does not allocate per frame.
///
/// Use [`push_clip`](Self::push_clip) / [`pop_clip`](Self::pop_clip) to scope
/// commands to a scissor rect. Nested clips are intersected with their parent.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,

    sorted_indices: Vec<usize>,
    sorted_dirty: bool,

    /// Top is the effective clip, already intersected with all parents.
    clip_stack: Vec<ScreenRect>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears recorded items and the clip stack, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
        self.sorted_dirty = true;
        self.sorted_indices.clear();
        self.clip_stack.clear();
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pushes a draw command; it inherits the current clip rect.
    #[inline]
    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);

        self.items.push(DrawItem {
            key: SortKey::new(z, order),
            cmd,
            clip_rect: self.clip_stack.last().copied(),
        });

        self.sorted_dirty = true;
    }

    /// Begins a scissor region; must be balanced with [`pop_clip`](Self::pop_clip).
    #[inline]
    pub fn push_clip(&mut self, rect: ScreenRect) {
        let effective = match self.clip_stack.last() {
            None => rect,
            // No overlap: a zero-area rect makes renderers skip the draws.
            Some(&parent) => parent.intersect(rect).unwrap_or_default(),
        };
        self.clip_stack.push(effective);
    }

    #[inline]
    pub fn pop_clip(&mut self) {
        debug_assert!(!self.clip_stack.is_empty(), "pop_clip called without matching push_clip");
        self.clip_stack.pop();
    }

    /// Iterates items back-to-front without cloning draw commands.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        if self.sorted_dirty {
            self.rebuild_sorted_indices();
        }

        self.sorted_indices.iter().map(|&i| &self.items[i])
    }

    /// Paint-order iteration paired with the index of the run each item is in.
    ///
    /// A run is a maximal sequence of consecutive items of the same
    /// [`DrawKind`]; drawing runs in index order preserves paint order across
    /// renderers.
    pub fn iter_runs_in_paint_order(&mut self) -> impl Iterator<Item = (usize, &DrawItem)> {
        let mut run = 0;
        let mut prev: Option<DrawKind> = None;
        self.iter_in_paint_order().map(move |item| {
            let kind = item.cmd.kind();
            if prev.is_some_and(|p| p != kind) {
                run += 1;
            }
            prev = Some(kind);
            (run, item)
        })
    }

    /// Kind of every run, back to front.
    pub fn paint_runs(&mut self) -> Vec<DrawKind> {
        let mut runs = Vec::new();
        for (run, item) in self.iter_runs_in_paint_order() {
            if run == runs.len() {
                runs.push(item.cmd.kind());
            }
        }
        runs
    }

    fn rebuild_sorted_indices(&mut self) {
        self.sorted_indices.clear();
        self.sorted_indices.extend(0..self.items.len());

        let items = &self.items;
        self.sorted_indices.sort_by_key(|&i| items[i].key);

        self.sorted_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use image::RgbaImage;

    use super::*;
    use crate::coords::{PixelRect, ScreenPoint};
    use crate::drawable::Drawables;
    use crate::paint::Color;

    fn r(x: f32, y: f32, w: f32, h: f32) -> ScreenRect {
        ScreenRect::new(x, y, w, h)
    }

    fn rect_of(item: &DrawItem) -> ScreenRect {
        match &item.cmd {
            DrawCmd::Rect(cmd) => cmd.rect,
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn paint_order_sorts_by_z_then_insertion() {
        let mut list = DrawList::new();
        list.push_solid_rect(ZIndex(1), r(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.push_solid_rect(ZIndex(0), r(1.0, 0.0, 1.0, 1.0), Color::WHITE);
        list.push_solid_rect(ZIndex(1), r(2.0, 0.0, 1.0, 1.0), Color::WHITE);

        let xs: Vec<f32> = list.iter_in_paint_order().map(|i| rect_of(i).x).collect();
        assert_eq!(xs, vec![1.0, 0.0, 2.0]);
    }

    #[test]
    fn nested_clips_intersect() {
        let mut list = DrawList::new();
        list.push_clip(r(0.0, 0.0, 100.0, 100.0));
        list.push_clip(r(50.0, 50.0, 100.0, 100.0));
        list.push_solid_rect(ZIndex(0), r(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        list.pop_clip();
        list.push_solid_rect(ZIndex(0), r(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        list.pop_clip();
        list.push_solid_rect(ZIndex(0), r(0.0, 0.0, 10.0, 10.0), Color::BLACK);

        let clips: Vec<_> = list.items().iter().map(|i| i.clip_rect).collect();
        assert_eq!(
            clips,
            vec![Some(r(50.0, 50.0, 50.0, 50.0)), Some(r(0.0, 0.0, 100.0, 100.0)), None]
        );
    }

    #[test]
    fn disjoint_clip_becomes_empty() {
        let mut list = DrawList::new();
        list.push_clip(r(0.0, 0.0, 10.0, 10.0));
        list.push_clip(r(20.0, 20.0, 10.0, 10.0));
        list.push_solid_rect(ZIndex(0), r(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert_eq!(list.items()[0].clip_rect, Some(ScreenRect::default()));
    }

    #[test]
    fn runs_follow_z_across_kinds() {
        let mut list = DrawList::new();
        let d = Drawables::new().insert(RgbaImage::new(1, 1)).id;
        let sprite = |list: &mut DrawList, z| {
            list.push_sprite(ZIndex(z), d, PixelRect::new(0, 0, 1, 1), ScreenPoint::origin(), 1.0)
        };
        sprite(&mut list, 2);
        list.push_solid_rect(ZIndex(1), r(0.0, 0.0, 1.0, 1.0), Color::WHITE);
        sprite(&mut list, 0);
        sprite(&mut list, 0);
        list.push_solid_rect(ZIndex(3), r(0.0, 0.0, 1.0, 1.0), Color::WHITE);

        assert_eq!(
            list.paint_runs(),
            vec![DrawKind::Sprite, DrawKind::Rect, DrawKind::Sprite, DrawKind::Rect]
        );
        let runs: Vec<usize> = list.iter_runs_in_paint_order().map(|(run, _)| run).collect();
        assert_eq!(runs, vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn empty_list_has_no_runs() {
        assert!(DrawList::new().paint_runs().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut list = DrawList::new();
        list.push_clip(r(0.0, 0.0, 10.0, 10.0));
        list.push_solid_rect(ZIndex(0), r(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        list.clear();
        assert!(list.is_empty());
        list.push_solid_rect(ZIndex(0), r(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        assert_eq!(list.items()[0].clip_rect, None);
        assert_eq!(list.items()[0].key.order, 0);
    }
}
