//! Widget tree and pointer dispatch.
//!
//! [`Ui`] owns every widget, keeps their [`WidgetState`]s and tracks at most
//! one focused and one pressed widget.
//!
//! # How dispatch works
//!
//! 1. **Motion** hit-tests in reverse paint order (children before their
//!    container, later widgets before earlier ones, disabled widgets skipped).
//!    When the hit changes, the old widget is unfocused (a pressed one becomes
//!    `SlipPressed`) and the new one focused, unless another widget holds the
//!    press. The pressed widget then receives the motion delta as a drag.
//! 2. **Button down** presses the focused widget.
//! 3. **Button up** releases the pressed widget. If the pointer is still over
//!    it the widget is activated; otherwise it returns to `Normal` and the
//!    widget under the pointer regains focus.

use sprig_engine::coords::{ScreenPoint, ScreenRect, ScreenVector};
use sprig_engine::draw::DrawList;
use sprig_engine::input::{InputEvent, MouseButton};

use crate::arena::{Arena, Handle};
use crate::painter::Painter;
use crate::widget::{Widget, WidgetState};

/// Handle to a widget inside a [`Ui`]. Goes stale once the widget is removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WidgetId(Handle);

struct Node {
    widget: Box<dyn Widget>,
    state: WidgetState,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
}

#[derive(Default)]
pub struct Ui {
    nodes: Arena<Node>,
    /// Top-level widgets in paint order.
    roots: Vec<WidgetId>,
    focused: Option<WidgetId>,
    pressed: Option<WidgetId>,
    area: ScreenRect,
}

impl Ui {
    /// Empty tree laid out in `area` (normally the whole window).
    pub fn new(area: ScreenRect) -> Self {
        Self { area, ..Self::default() }
    }

    #[inline]
    pub fn area(&self) -> ScreenRect {
        self.area
    }

    pub fn set_area(&mut self, area: ScreenRect) {
        self.area = area;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── tree ──────────────────────────────────────────────────────────────

    /// Adds a top-level widget, painted above every widget added before it.
    pub fn add(&mut self, widget: impl Widget) -> WidgetId {
        let id = self.insert(Box::new(widget), None);
        self.roots.push(id);
        id
    }

    /// Adds `widget` as the last child of `parent`; `None` if `parent` is gone.
    pub fn add_child(&mut self, parent: WidgetId, widget: impl Widget) -> Option<WidgetId> {
        if !self.contains(parent) {
            return None;
        }
        let id = self.insert(Box::new(widget), Some(parent));
        self.nodes.get_mut(parent.0)?.children.push(id);
        Some(id)
    }

    fn insert(&mut self, widget: Box<dyn Widget>, parent: Option<WidgetId>) -> WidgetId {
        WidgetId(self.nodes.insert(Node {
            widget,
            state: WidgetState::Normal,
            parent,
            children: Vec::new(),
        }))
    }

    /// Removes a widget and all of its descendants. No hooks are called.
    pub fn remove(&mut self, id: WidgetId) -> bool {
        let Some(parent) = self.nodes.get(id.0).map(|n| n.parent) else {
            return false;
        };
        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(parent) => parent.children.retain(|&c| c != id),
            None => self.roots.retain(|&r| r != id),
        }

        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.remove(cur.0) {
                stack.extend(node.children);
            }
            if self.focused == Some(cur) {
                self.focused = None;
            }
            if self.pressed == Some(cur) {
                self.pressed = None;
            }
        }
        true
    }

    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains(id.0)
    }

    /// The widget behind `id`, if it is still alive and of type `W`.
    pub fn widget<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        (*self.nodes.get(id.0)?.widget).as_any().downcast_ref()
    }

    pub fn widget_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        (*self.nodes.get_mut(id.0)?.widget).as_any_mut().downcast_mut()
    }

    pub fn state(&self, id: WidgetId) -> Option<WidgetState> {
        self.nodes.get(id.0).map(|n| n.state)
    }

    #[inline]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    #[inline]
    pub fn pressed(&self) -> Option<WidgetId> {
        self.pressed
    }

    /// Enables or disables a widget; `false` if `id` is gone.
    ///
    /// A disabled widget and its descendants are never hit. Disabling drops
    /// any focus or press held inside that subtree without activating.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> bool {
        if !self.contains(id) {
            return false;
        }
        if enabled {
            if let Some(node) = self.nodes.get_mut(id.0) {
                if node.state == WidgetState::Disabled {
                    node.state = WidgetState::Normal;
                }
            }
            return true;
        }

        let focused = self.focused.filter(|&f| self.is_within(f, id));
        let focus_hooked =
            focused.and_then(|f| self.nodes.get(f.0)).is_some_and(|n| n.state.has_focus());

        if let Some(pressed) = self.pressed.filter(|&p| self.is_within(p, id)) {
            self.pressed = None;
            if let Some(node) = self.nodes.get_mut(pressed.0) {
                node.state = WidgetState::Normal;
                node.widget.on_release();
            }
        }
        if let Some(focused) = focused {
            self.focused = None;
            if let Some(node) = self.nodes.get_mut(focused.0) {
                node.state = WidgetState::Normal;
                if focus_hooked {
                    node.widget.on_unfocus();
                }
            }
        }
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.state = WidgetState::Disabled;
        }
        true
    }

    /// `true` if `id` is `root` or one of its descendants.
    fn is_within(&self, id: WidgetId, root: WidgetId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == root {
                return true;
            }
            cur = self.nodes.get(c.0).and_then(|n| n.parent);
        }
        false
    }

    /// Rectangle `id` is laid out in.
    fn layout_area(&self, id: WidgetId) -> ScreenRect {
        let mut chain = Vec::new();
        let mut cur = self.nodes.get(id.0).and_then(|n| n.parent);
        while let Some(p) = cur {
            chain.push(p);
            cur = self.nodes.get(p.0).and_then(|n| n.parent);
        }
        chain.iter().rev().fold(self.area, |area, p| {
            self.nodes.get(p.0).map_or(area, |n| n.widget.content_area(area))
        })
    }

    // ── frame ─────────────────────────────────────────────────────────────

    pub fn update(&mut self, delta: f32) {
        for node in self.nodes.values_mut() {
            node.widget.update(delta);
        }
    }

    /// Records every widget into `draw_list`, containers below their children.
    pub fn render(&self, draw_list: &mut DrawList) {
        let mut painter = Painter::new(draw_list);
        self.render_nodes(&self.roots, self.area, &mut painter);
    }

    fn render_nodes(&self, ids: &[WidgetId], area: ScreenRect, painter: &mut Painter<'_>) {
        for id in ids {
            let Some(node) = self.nodes.get(id.0) else { continue };
            node.widget.render(painter, area);
            self.render_nodes(&node.children, node.widget.content_area(area), painter);
        }
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Routes a pointer event through the widgets. Returns `true` if it was
    /// consumed and should not reach the game.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerMoved(m) => {
                self.pointer_moved(ScreenPoint::new(m.x, m.y), ScreenVector::new(m.dx, m.dy))
            }
            InputEvent::PointerLeft => {
                if self.focused.is_some() {
                    self.refocus(None);
                }
                false
            }
            InputEvent::PointerButton(b) if b.button == MouseButton::Left => {
                if b.is_press() {
                    self.pointer_down(ScreenPoint::new(b.x, b.y))
                } else {
                    self.pointer_up()
                }
            }
            InputEvent::Resized { width, height } => {
                self.area = ScreenRect::new(0.0, 0.0, *width, *height);
                false
            }
            _ => false,
        }
    }

    /// Topmost enabled widget under `point`.
    pub fn widget_at(&self, point: ScreenPoint) -> Option<WidgetId> {
        self.hit(&self.roots, self.area, point)
    }

    fn hit(&self, ids: &[WidgetId], area: ScreenRect, point: ScreenPoint) -> Option<WidgetId> {
        for &id in ids.iter().rev() {
            let Some(node) = self.nodes.get(id.0) else { continue };
            if node.state == WidgetState::Disabled {
                continue;
            }
            if let Some(hit) = self.hit(&node.children, node.widget.content_area(area), point) {
                return Some(hit);
            }
            if node.widget.locate(area, point) {
                return Some(id);
            }
        }
        None
    }

    /// Returns `true` while a drag is in progress.
    pub fn pointer_moved(&mut self, point: ScreenPoint, delta: ScreenVector) -> bool {
        let target = self.widget_at(point);
        if target != self.focused {
            self.refocus(target);
        }
        if let Some(node) = self.pressed.and_then(|p| self.nodes.get_mut(p.0)) {
            node.widget.on_drag(delta);
        }
        self.pressed.is_some()
    }

    fn refocus(&mut self, target: Option<WidgetId>) {
        if let Some(node) = self.focused.take().and_then(|old| self.nodes.get_mut(old.0)) {
            let had_focus = node.state.has_focus();
            node.state = match node.state {
                WidgetState::Focused => WidgetState::Normal,
                WidgetState::Pressed => WidgetState::SlipPressed,
                other => other,
            };
            // A widget hovered while another holds the press never got `on_focus`.
            if had_focus {
                node.widget.on_unfocus();
            }
        }

        self.focused = target;
        let pressed = self.pressed;
        let Some(new) = target else { return };
        let Some(node) = self.nodes.get_mut(new.0) else { return };
        if pressed.is_none() {
            node.state = WidgetState::Focused;
            node.widget.on_focus();
        } else if pressed == Some(new) {
            node.state = WidgetState::Pressed;
            node.widget.on_focus();
        }
    }

    pub fn pointer_down(&mut self, point: ScreenPoint) -> bool {
        let Some(id) = self.focused else { return false };
        let area = self.layout_area(id);
        let Some(node) = self.nodes.get_mut(id.0) else {
            self.focused = None;
            return false;
        };
        node.state = WidgetState::Pressed;
        node.widget.on_press(area, point);
        self.pressed = Some(id);
        true
    }

    pub fn pointer_up(&mut self) -> bool {
        let Some(id) = self.pressed.take() else { return false };
        let focused = self.focused;

        if let Some(node) = self.nodes.get_mut(id.0) {
            node.widget.on_release();
            if focused == Some(id) {
                node.state = WidgetState::Focused;
                log::debug!("widget {id:?} activated");
                node.widget.on_activate();
                return true;
            }
            node.state = WidgetState::Normal;
        }

        if let Some(node) = focused.and_then(|f| self.nodes.get_mut(f.0)) {
            node.state = WidgetState::Focused;
            node.widget.on_focus();
        }
        true
    }
}
