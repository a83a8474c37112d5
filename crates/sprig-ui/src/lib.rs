//! sprig UI: sprites, camera, scene and a small widget tree on top of `sprig-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use sprig_ui::prelude::*;
//!
//! struct MyGame { scene: Option<WidgetId> }
//!
//! impl Game for MyGame {
//!     fn setup(&mut self, ctx: &mut GameCtx<'_>) -> anyhow::Result<()> {
//!         let hero = ctx.resources.load_sprite("hero.png", 4.0, SpriteLayout::horizontal(4))?;
//!         let mut scene = Scene::new();
//!         scene.setup_camera(WorldPoint::origin(), 16.0, 4.0);
//!         let id = scene.spawn(hero, WorldPoint::origin());
//!         scene.camera_follow(id);
//!         self.scene = Some(ctx.ui.add(scene));
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, delta: f32, ctx: &mut GameCtx<'_>) { /* ... */ }
//! }
//!
//! Application::new().title("my game").run(MyGame { scene: None })?;
//! ```
//!
//! # Extending with custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any `'static` type and add it
//! with [`Ui::add`](ui::Ui::add); the dispatcher takes care of focus, press
//! and activation.

pub mod app;
pub mod arena;
pub mod camera;
pub mod painter;
pub mod resources;
pub mod sprite;
pub mod ui;
pub mod widget;
pub mod widgets;

mod error;

pub use app::Application;
pub use error::{Error, Result};

/// Everything you need to build a game and its widgets.
pub mod prelude {
    pub use crate::app::{Application, Game, GameCtx};
    pub use crate::camera::{Camera, FollowConfig};
    pub use crate::painter::Painter;
    pub use crate::resources::Resources;
    pub use crate::sprite::{Animation, Frame, LayoutKind, Playback, Sprite, SpriteLayout};
    pub use crate::ui::{Ui, WidgetId};
    pub use crate::widget::{Widget, WidgetState};
    pub use crate::widgets::{Button, Object, ObjectId, Panel, Scene};

    // Re-export the engine primitives everyone needs.
    pub use sprig_engine::coords::{
        Length, PixelRect, ScreenPoint, ScreenRect, ScreenVector, UiPoint, UiRect, UiVector,
        WorldPoint, WorldVector,
    };
    pub use sprig_engine::input::{InputEvent, InputState, Key, KeyState, MouseButton};
    pub use sprig_engine::paint::Color;
    pub use sprig_engine::text::Font;
    pub use sprig_engine::window::CursorImage;
}
