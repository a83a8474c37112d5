use std::rc::Rc;

use sprig_engine::coords::{ScreenPoint, ScreenRect, ScreenVector, UiPoint, UiVector};
use sprig_engine::paint::Color;

use crate::painter::Painter;
use crate::sprite::{Animation, Sprite};
use crate::widget::Widget;

/// A clickable widget centered on a container-relative position.
///
/// Without sprites it is a `size` rectangle filled with `color`; with sprites
/// it takes the size of the current sprite frame. The optional text sprite is
/// drawn on top, nudged by one pixel while the button is held.
///
/// # Example
/// ```rust,ignore
/// Button::new(UiPoint::new(Length::fr(1.0) - Length::px(116.0), Length::px(44.0)))
///     .color(Color::rgb_u8(100, 50, 50))
///     .sprites(normal, pressed)
///     .text(label)
///     .on_activate(|| println!("clicked!"))
/// ```
pub struct Button {
    position: UiPoint,
    size: UiVector,
    color: Color,
    normal: Option<Animation>,
    held: Option<Animation>,
    text: Option<Animation>,
    pressed: bool,
    on_activate: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(position: UiPoint) -> Self {
        Self {
            position,
            size: UiVector::default(),
            color: Color::transparent(),
            normal: None,
            held: None,
            text: None,
            pressed: false,
            on_activate: None,
        }
    }

    /// Size used when the button has no sprites.
    pub fn size(mut self, size: UiVector) -> Self {
        self.size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Looks for the released and held states.
    pub fn sprites(mut self, normal: Rc<Sprite>, pressed: Rc<Sprite>) -> Self {
        self.normal = Some(Animation::new(normal));
        self.held = Some(Animation::new(pressed));
        self
    }

    /// Label drawn centered on the button.
    pub fn text(mut self, text: Rc<Sprite>) -> Self {
        self.text = Some(Animation::new(text));
        self
    }

    /// Callback invoked when the button is clicked.
    pub fn on_activate(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(f));
        self
    }

    #[inline]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn look(&self) -> Option<&Animation> {
        if self.pressed {
            self.held.as_ref().or(self.normal.as_ref())
        } else {
            self.normal.as_ref()
        }
    }

    /// Screen rectangle the button occupies inside `area`.
    pub fn ui_area(&self, area: ScreenRect) -> ScreenRect {
        let center = self.position.resolve(area);
        let size = match self.look() {
            Some(look) => look.size(),
            None => self.size.resolve(area),
        };
        ScreenRect::at_position(center, size)
    }
}

impl Widget for Button {
    fn update(&mut self, delta: f32) {
        for anim in [&mut self.normal, &mut self.held, &mut self.text].into_iter().flatten() {
            anim.update(delta);
        }
    }

    fn render(&self, painter: &mut Painter<'_>, area: ScreenRect) {
        let rect = self.ui_area(area);
        match self.look() {
            Some(look) => look.draw(painter, rect.center()),
            None => painter.fill_rect(rect, self.color),
        }
        if let Some(text) = &self.text {
            let mut center = rect.center();
            if self.pressed {
                center += ScreenVector::new(1.0, 1.0);
            }
            text.draw(painter, center);
        }
    }

    fn locate(&self, area: ScreenRect, point: ScreenPoint) -> bool {
        self.ui_area(area).contains(point)
    }

    fn on_press(&mut self, _area: ScreenRect, _point: ScreenPoint) {
        self.pressed = true;
    }

    fn on_release(&mut self) {
        self.pressed = false;
    }

    fn on_activate(&mut self) {
        if let Some(f) = &mut self.on_activate {
            f();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use image::RgbaImage;
    use sprig_engine::coords::{Length, PixelRect};
    use sprig_engine::draw::{DrawCmd, DrawList};
    use sprig_engine::drawable::Drawables;

    use super::*;
    use crate::ui::Ui;

    fn window() -> ScreenRect {
        ScreenRect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn quit_position() -> UiPoint {
        UiPoint::new(Length::fr(1.0) - Length::px(116.0), Length::px(44.0))
    }

    fn sheet_sprites() -> (Rc<Sprite>, Rc<Sprite>, Rc<Sprite>) {
        let mut store = Drawables::new();
        let sheet = store.insert(RgbaImage::new(64, 32));
        let label = store.insert(RgbaImage::new(20, 8));
        (
            Rc::new(Sprite::one_frame(sheet, PixelRect::new(0, 0, 64, 16), 3.0)),
            Rc::new(Sprite::one_frame(sheet, PixelRect::new(0, 16, 64, 16), 3.0)),
            Rc::new(Sprite::one_frame(label, PixelRect::new(0, 0, 20, 8), 1.0)),
        )
    }

    fn commands(button: &Button) -> Vec<DrawCmd> {
        let mut list = DrawList::new();
        button.render(&mut Painter::new(&mut list), window());
        list.items().iter().map(|item| item.cmd.clone()).collect()
    }

    #[test]
    fn plain_button_fills_its_rect() {
        let button = Button::new(quit_position())
            .size(UiVector::new(Length::px(192.0), Length::px(48.0)))
            .color(Color::rgb_u8(100, 50, 50));
        assert_eq!(button.ui_area(window()), ScreenRect::new(588.0, 20.0, 192.0, 48.0));
        match commands(&button).as_slice() {
            [DrawCmd::Rect(cmd)] => assert_eq!(cmd.color, Color::rgb_u8(100, 50, 50)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn sprite_button_takes_sprite_size() {
        let (normal, held, _) = sheet_sprites();
        let button = Button::new(quit_position()).sprites(normal, held);
        assert_eq!(button.ui_area(window()), ScreenRect::new(588.0, 20.0, 192.0, 48.0));
        assert!(button.locate(window(), ScreenPoint::new(600.0, 30.0)));
        assert!(!button.locate(window(), ScreenPoint::new(500.0, 30.0)));
    }

    #[test]
    fn pressed_button_swaps_sprite_and_nudges_text() {
        let (normal, held, text) = sheet_sprites();
        let mut button = Button::new(quit_position()).sprites(normal, held).text(text);

        let source_and_center = |cmds: &[DrawCmd]| -> Vec<(PixelRect, ScreenPoint)> {
            cmds.iter()
                .map(|cmd| match cmd {
                    DrawCmd::Sprite(s) => (s.source, s.center),
                    other => panic!("unexpected {other:?}"),
                })
                .collect()
        };

        let released = source_and_center(&commands(&button));
        assert_eq!(released[0].0, PixelRect::new(0, 0, 64, 16));
        assert_eq!(released[1].1, ScreenPoint::new(684.0, 44.0));

        button.on_press(window(), ScreenPoint::new(684.0, 44.0));
        let pressed = source_and_center(&commands(&button));
        assert_eq!(pressed[0].0, PixelRect::new(0, 16, 64, 16));
        assert_eq!(pressed[1].1, ScreenPoint::new(685.0, 45.0));

        button.on_release();
        assert!(!button.is_pressed());
    }

    #[test]
    fn click_through_ui_activates() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut ui = Ui::new(window());
        ui.add(
            Button::new(quit_position())
                .size(UiVector::new(Length::px(192.0), Length::px(48.0)))
                .on_activate(move || counter.set(counter.get() + 1)),
        );

        ui.pointer_moved(ScreenPoint::new(684.0, 44.0), ScreenVector::zero());
        ui.pointer_down(ScreenPoint::new(684.0, 44.0));
        ui.pointer_up();
        assert_eq!(clicks.get(), 1);

        ui.pointer_down(ScreenPoint::new(684.0, 44.0));
        ui.pointer_moved(ScreenPoint::new(10.0, 10.0), ScreenVector::zero());
        ui.pointer_up();
        assert_eq!(clicks.get(), 1);
    }
}
