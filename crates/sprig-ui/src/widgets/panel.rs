use sprig_engine::coords::{ScreenPoint, ScreenRect, UiRect};
use sprig_engine::paint::Color;

use crate::painter::Painter;
use crate::widget::Widget;

/// Container placing its children inside a container-relative rectangle.
///
/// Add children with [`Ui::add_child`](crate::ui::Ui::add_child). A panel
/// with a background catches clicks that miss its children; a bare one is
/// transparent to the pointer.
pub struct Panel {
    location: UiRect,
    background: Option<Color>,
}

impl Panel {
    pub fn new(location: UiRect) -> Self {
        Self { location, background: None }
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }
}

impl Widget for Panel {
    fn render(&self, painter: &mut Painter<'_>, area: ScreenRect) {
        if let Some(color) = self.background {
            painter.fill_rect(self.location.resolve(area), color);
        }
    }

    fn locate(&self, area: ScreenRect, point: ScreenPoint) -> bool {
        self.background.is_some() && self.location.resolve(area).contains(point)
    }

    fn content_area(&self, area: ScreenRect) -> ScreenRect {
        self.location.resolve(area)
    }
}

#[cfg(test)]
mod tests {
    use sprig_engine::coords::{Length, UiPoint, UiVector};

    use super::*;
    use crate::ui::Ui;
    use crate::widgets::Button;

    fn right_half() -> UiRect {
        UiRect::new(Length::fr(0.5), Length::ZERO, Length::fr(0.5), Length::fr(1.0))
    }

    fn small_button() -> Button {
        Button::new(UiPoint::new(Length::px(10.0), Length::px(10.0)))
            .size(UiVector::new(Length::px(20.0), Length::px(20.0)))
    }

    #[test]
    fn children_resolve_inside_panel() {
        let mut ui = Ui::new(ScreenRect::new(0.0, 0.0, 200.0, 100.0));
        let panel = ui.add(Panel::new(right_half()));
        let button = ui.add_child(panel, small_button()).unwrap();

        // Button centered at panel origin (100, 0) + (10, 10).
        assert_eq!(ui.widget_at(ScreenPoint::new(110.0, 10.0)), Some(button));
        assert_eq!(ui.widget_at(ScreenPoint::new(10.0, 10.0)), None);
    }

    #[test]
    fn bare_panel_is_transparent() {
        let mut ui = Ui::new(ScreenRect::new(0.0, 0.0, 200.0, 100.0));
        let panel = ui.add(Panel::new(right_half()));
        assert_eq!(ui.widget_at(ScreenPoint::new(150.0, 50.0)), None);

        let opaque = ui.add(Panel::new(right_half()).background(Color::BLACK));
        assert_ne!(panel, opaque);
        assert_eq!(ui.widget_at(ScreenPoint::new(150.0, 50.0)), Some(opaque));
    }
}
