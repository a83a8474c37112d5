//! World view widget.
//!
//! A [`Scene`] owns the objects of a game world, renders them through its
//! [`Camera`] centered on the widget area and turns clicks into world
//! coordinates.

use std::rc::Rc;

use sprig_engine::coords::{ScreenPoint, ScreenRect, WorldPoint};

use crate::arena::{Arena, Handle};
use crate::camera::Camera;
use crate::painter::Painter;
use crate::sprite::{Animation, Sprite};
use crate::widget::Widget;

/// Handle to an object inside a [`Scene`]. Goes stale once the object is removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId(Handle);

/// A sprite placed in the world.
#[derive(Debug, Clone)]
pub struct Object {
    pub animation: Animation,
    pub position: WorldPoint,
    kill: bool,
}

impl Object {
    /// `true` once [`Scene::kill`] was called; the object disappears on the
    /// next [`update`](Widget::update).
    #[inline]
    pub fn is_killed(&self) -> bool {
        self.kill
    }
}

#[derive(Default)]
pub struct Scene {
    objects: Arena<Object>,
    camera: Camera,
    follow: Option<ObjectId>,
    on_click: Option<Box<dyn FnMut(WorldPoint)>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callback receiving the world point under each click.
    pub fn on_click(mut self, f: impl FnMut(WorldPoint) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    // ── objects ───────────────────────────────────────────────────────────

    pub fn spawn(&mut self, sprite: Rc<Sprite>, position: WorldPoint) -> ObjectId {
        let id = ObjectId(self.objects.insert(Object {
            animation: Animation::new(sprite),
            position,
            kill: false,
        }));
        log::trace!("spawned {id:?} at ({}, {})", position.x, position.y);
        id
    }

    /// Flags an object for removal; `false` if `id` is stale.
    pub fn kill(&mut self, id: ObjectId) -> bool {
        match self.objects.get_mut(id.0) {
            Some(object) => {
                object.kill = true;
                log::trace!("killed {id:?}");
                true
            }
            None => false,
        }
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // ── camera ────────────────────────────────────────────────────────────

    /// Centers the camera on `center`, one world unit spanning
    /// `unit_pixel_size * zoom` pixels.
    pub fn setup_camera(&mut self, center: WorldPoint, unit_pixel_size: f32, zoom: f32) {
        let follow = self.camera.follow_config();
        self.camera = Camera::new(center, unit_pixel_size, zoom);
        self.camera.set_follow_config(follow);
    }

    /// Makes the camera chase `id` on every update.
    pub fn camera_follow(&mut self, id: ObjectId) {
        self.follow = Some(id);
    }

    pub fn stop_following(&mut self) {
        self.follow = None;
    }

    #[inline]
    pub fn following(&self) -> Option<ObjectId> {
        self.follow
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Screen position of a world point inside `area`.
    pub fn project(&self, area: ScreenRect, p: WorldPoint) -> ScreenPoint {
        area.center() + self.camera.world_to_screen_offset(p)
    }

    /// World point under a screen point inside `area`.
    pub fn unproject(&self, area: ScreenRect, point: ScreenPoint) -> WorldPoint {
        self.camera.screen_offset_to_world(point - area.center())
    }
}

impl Widget for Scene {
    fn update(&mut self, delta: f32) {
        if let Some(id) = self.follow {
            match self.objects.get(id.0).filter(|o| !o.kill) {
                Some(target) => self.camera.follow_step(target.position, delta),
                None => {
                    log::debug!("follow target {id:?} is gone");
                    self.follow = None;
                }
            }
        }

        for object in self.objects.values_mut() {
            object.animation.update(delta);
        }
        self.objects.retain(|o| !o.kill);
    }

    fn render(&self, painter: &mut Painter<'_>, area: ScreenRect) {
        painter.push_clip(area);
        let zoom = self.camera.zoom();
        for object in self.objects.values().filter(|o| !o.kill) {
            let center = self.project(area, object.position);
            let scale = zoom * object.animation.sprite().zoom();
            object.animation.draw_scaled(painter, center, scale);
        }
        painter.pop_clip();
    }

    fn locate(&self, area: ScreenRect, point: ScreenPoint) -> bool {
        area.contains(point)
    }

    fn on_press(&mut self, area: ScreenRect, point: ScreenPoint) {
        let world = self.unproject(area, point);
        if let Some(f) = &mut self.on_click {
            f(world);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use image::RgbaImage;
    use sprig_engine::coords::PixelRect;
    use sprig_engine::draw::{DrawCmd, DrawList};
    use sprig_engine::drawable::Drawables;

    use super::*;
    use crate::ui::Ui;

    fn area() -> ScreenRect {
        ScreenRect::new(0.0, 0.0, 800.0, 600.0)
    }

    fn sprite() -> Rc<Sprite> {
        let d = Drawables::new().insert(RgbaImage::new(16, 16));
        Rc::new(Sprite::one_frame(d, PixelRect::new(0, 0, 16, 16), 1.0))
    }

    fn w(x: f32, y: f32) -> WorldPoint {
        WorldPoint::new(x, y)
    }

    fn centers(scene: &Scene) -> Vec<ScreenPoint> {
        let mut list = DrawList::new();
        scene.render(&mut Painter::new(&mut list), area());
        list.items()
            .iter()
            .map(|item| match &item.cmd {
                DrawCmd::Sprite(cmd) => cmd.center,
                other => panic!("unexpected {other:?}"),
            })
            .collect()
    }

    // ── objects ───────────────────────────────────────────────────────────

    #[test]
    fn spawned_objects_render_through_camera() {
        let mut scene = Scene::new();
        scene.setup_camera(w(0.0, 0.0), 16.0, 4.0);
        scene.spawn(sprite(), w(0.0, 0.0));
        scene.spawn(sprite(), w(1.0, 1.0));
        assert_eq!(
            centers(&scene),
            vec![ScreenPoint::new(400.0, 300.0), ScreenPoint::new(464.0, 236.0)]
        );
    }

    #[test]
    fn render_is_clipped_and_scaled_by_zoom() {
        let mut scene = Scene::new();
        scene.setup_camera(w(0.0, 0.0), 16.0, 4.0);
        scene.spawn(sprite(), w(0.0, 0.0));
        let mut list = DrawList::new();
        scene.render(&mut Painter::new(&mut list), area());
        let item = &list.items()[0];
        assert_eq!(item.clip_rect, Some(area()));
        match &item.cmd {
            DrawCmd::Sprite(cmd) => assert_eq!(cmd.scale, 4.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn killed_object_is_removed_on_update() {
        let mut scene = Scene::new();
        let a = scene.spawn(sprite(), w(0.0, 0.0));
        let b = scene.spawn(sprite(), w(1.0, 0.0));

        assert!(scene.kill(a));
        assert!(scene.object(a).is_some_and(Object::is_killed));
        let only_b = centers(&scene);
        assert_eq!(only_b.len(), 1);

        scene.update(0.1);
        assert_eq!(centers(&scene), only_b);
        assert!(scene.object(a).is_none());
        assert!(!scene.kill(a));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.object(b).map(|o| o.position), Some(w(1.0, 0.0)));

        let c = scene.spawn(sprite(), w(2.0, 0.0));
        assert_ne!(a, c);
        assert!(scene.object(a).is_none());
    }

    // ── camera ────────────────────────────────────────────────────────────

    #[test]
    fn camera_follows_target() {
        let mut scene = Scene::new();
        scene.setup_camera(w(0.0, 0.0), 16.0, 4.0);
        let hero = scene.spawn(sprite(), w(0.0, 0.5));
        scene.camera_follow(hero);
        scene.update(1.0);
        assert_eq!(scene.camera().position(), w(0.0, 0.5));
    }

    #[test]
    fn stale_follow_target_is_cleared() {
        let mut scene = Scene::new();
        let hero = scene.spawn(sprite(), w(3.0, 3.0));
        scene.camera_follow(hero);
        scene.kill(hero);
        scene.update(1.0);
        assert_eq!(scene.following(), None);
        assert_eq!(scene.camera().position(), w(0.0, 0.0));
    }

    // ── clicks ────────────────────────────────────────────────────────────

    #[test]
    fn click_reports_world_point() {
        let clicks = Rc::new(RefCell::new(Vec::new()));
        let sink = clicks.clone();
        let mut ui = Ui::new(area());
        let scene = ui.add(Scene::new().on_click(move |p| sink.borrow_mut().push(p)));
        ui.widget_mut::<Scene>(scene).unwrap().setup_camera(w(1.0, 1.0), 16.0, 4.0);

        let point = ScreenPoint::new(464.0, 236.0);
        ui.pointer_moved(point, Default::default());
        assert!(ui.pointer_down(point));
        ui.pointer_up();
        assert_eq!(clicks.borrow().as_slice(), &[w(2.0, 2.0)]);
    }
}
