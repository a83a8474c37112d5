use std::any::Any;

use sprig_engine::coords::{ScreenPoint, ScreenRect, ScreenVector};

use crate::painter::Painter;

// ── WidgetState ───────────────────────────────────────────────────────────

/// Interaction state of a widget, owned and updated by [`Ui`](crate::ui::Ui).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Normal,
    /// The pointer is over the widget.
    Focused,
    /// Pressed, and the pointer is still over the widget.
    Pressed,
    /// Pressed, but the pointer has slipped off.
    SlipPressed,
    /// Never hit-tested.
    Disabled,
}

impl WidgetState {
    #[inline]
    pub fn is_pressed(self) -> bool {
        matches!(self, WidgetState::Pressed | WidgetState::SlipPressed)
    }

    /// `true` in the states entered through `on_focus`.
    #[inline]
    pub fn has_focus(self) -> bool {
        matches!(self, WidgetState::Focused | WidgetState::Pressed)
    }
}

// ── Widget trait ──────────────────────────────────────────────────────────

/// Downcasting support for `dyn Widget`, implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// The core trait every UI component implements.
///
/// `area` is always the rectangle the parent lays the widget out in: the
/// window for top-level widgets, the parent's
/// [`content_area`](Widget::content_area) for children.
///
/// The hooks are called by [`Ui`](crate::ui::Ui) as the pointer moves and
/// clicks; all of them default to doing nothing.
///
/// ```rust,ignore
/// struct Swatch(Color);
///
/// impl Widget for Swatch {
///     fn render(&self, painter: &mut Painter<'_>, area: ScreenRect) {
///         painter.fill_rect(area, self.0);
///     }
///     fn locate(&self, area: ScreenRect, point: ScreenPoint) -> bool {
///         area.contains(point)
///     }
/// }
/// ```
pub trait Widget: AsAny {
    /// Advances time-based state by `delta` seconds.
    fn update(&mut self, _delta: f32) {}

    fn render(&self, painter: &mut Painter<'_>, area: ScreenRect);

    /// Whether `point` hits this widget. Widgets that return `false` are
    /// transparent to the pointer.
    fn locate(&self, _area: ScreenRect, _point: ScreenPoint) -> bool {
        false
    }

    /// Area the widget's children are laid out in.
    fn content_area(&self, area: ScreenRect) -> ScreenRect {
        area
    }

    fn on_focus(&mut self) {}

    fn on_unfocus(&mut self) {}

    fn on_press(&mut self, _area: ScreenRect, _point: ScreenPoint) {}

    fn on_release(&mut self) {}

    /// A press was released while the pointer was still over the widget.
    fn on_activate(&mut self) {}

    /// Pointer motion while this widget is pressed.
    fn on_drag(&mut self, _delta: ScreenVector) {}
}
