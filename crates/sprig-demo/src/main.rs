//! Top-down demo: walk with WASD, click to shoot, trees and stones break.

mod assets;
mod world;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::Context;
use sprig_engine::logging::{LoggingConfig, init_logging};
use sprig_ui::prelude::*;

use crate::assets::Sprites;
use crate::world::{Message, ObjectType, World};

const UNIT_PIXEL_SIZE: f32 = 16.0;
const CAMERA_ZOOM: f32 = 4.0;

/// Scene-side state, created in `setup`.
struct View {
    sprites: Sprites,
    scene: WidgetId,
    hero: ObjectId,
    objects: HashMap<u64, ObjectId>,
}

struct Demo {
    world: World,
    messages: Vec<Message>,
    /// Click targets queued by the scene, consumed on the next step.
    shots: Rc<RefCell<Vec<WorldPoint>>>,
    quit: Rc<Cell<bool>>,
    view: Option<View>,
}

impl Demo {
    fn new() -> Self {
        let mut messages = Vec::new();
        let world = World::new(&mut messages);
        Self {
            world,
            messages,
            shots: Rc::default(),
            quit: Rc::default(),
            view: None,
        }
    }
}

impl View {
    fn sprite_for(&self, kind: ObjectType) -> Option<&Rc<Sprite>> {
        match kind {
            ObjectType::Tree => Some(&self.sprites.tree),
            ObjectType::Stone => Some(&self.sprites.stone),
            ObjectType::Hero => Some(&self.sprites.hero),
            ObjectType::Bullet => Some(&self.sprites.bullet),
            ObjectType::None | ObjectType::Grass | ObjectType::Road => None,
        }
    }

    fn apply(&mut self, scene: &mut Scene, message: Message) {
        match self.objects.get(&message.object_id) {
            Some(&id) if !message.alive => {
                scene.kill(id);
                self.objects.remove(&message.object_id);
            }
            Some(&id) => {
                if let Some(object) = scene.object_mut(id) {
                    object.position = message.position;
                }
            }
            None => {
                if let Some(sprite) = self.sprite_for(message.kind).cloned() {
                    let id = scene.spawn(sprite, message.position);
                    self.objects.insert(message.object_id, id);
                }
            }
        }
    }
}

impl Game for Demo {
    fn setup(&mut self, ctx: &mut GameCtx<'_>) -> anyhow::Result<()> {
        let sprites = Sprites::load(ctx.resources).context("loading sprites")?;
        ctx.resources.set_cursor(sprites.cursor.clone());

        let shots = self.shots.clone();
        let mut scene = Scene::new().on_click(move |target| shots.borrow_mut().push(target));
        scene.setup_camera(WorldPoint::origin(), UNIT_PIXEL_SIZE, CAMERA_ZOOM);
        let hero = scene.spawn(sprites.hero.clone(), self.world.hero_position);
        scene.camera_follow(hero);
        let scene = ctx.ui.add(scene);

        let quit = self.quit.clone();
        let mut button = Button::new(UiPoint::new(
            Length::fr(1.0) - Length::px(20.0) - Length::px(96.0),
            Length::px(20.0) + Length::px(24.0),
        ))
        .color(Color::rgb_u8(100, 50, 50))
        .sprites(sprites.button_normal.clone(), sprites.button_pressed.clone())
        .on_activate(move || quit.set(true));
        if let Some(label) = &sprites.quit_label {
            button = button.text(label.clone());
        }
        ctx.ui.add(button);

        self.view = Some(View { sprites, scene, hero, objects: HashMap::new() });
        Ok(())
    }

    fn on_input(&mut self, event: &InputEvent, _input: &InputState, _ctx: &mut GameCtx<'_>) {
        if let InputEvent::Key { key, state, repeat: false, .. } = event {
            self.world.handle_key(*key, *state == KeyState::Pressed);
        }
    }

    fn update(&mut self, delta: f32, _ctx: &mut GameCtx<'_>) {
        for target in self.shots.borrow_mut().drain(..) {
            self.world.shoot_in_direction_of(target, &mut self.messages);
        }
        self.world.update(delta, &mut self.messages);
    }

    fn sync(&mut self, ctx: &mut GameCtx<'_>) {
        if self.quit.get() {
            log::info!("quit requested");
            ctx.exit();
            return;
        }
        let Some(view) = self.view.as_mut() else { return };
        let Some(scene) = ctx.ui.widget_mut::<Scene>(view.scene) else {
            log::warn!("scene widget is gone");
            return;
        };
        for message in self.messages.drain(..) {
            view.apply(scene, message);
        }
        if let Some(hero) = scene.object_mut(view.hero) {
            hero.position = self.world.hero_position;
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    Application::new()
        .title("sprig demo")
        .size(800.0, 600.0)
        .fps(60)
        .clear_color(Color::rgb_u8(70, 130, 60))
        .run(Demo::new())
        .context("demo failed")
}
