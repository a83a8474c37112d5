use std::time::Instant;

use anyhow::Context;
use winit::dpi::LogicalSize;

use sprig_engine::coords::ScreenRect;
use sprig_engine::core::{App as EngineApp, AppControl, FrameCtx};
use sprig_engine::device::GpuInit;
use sprig_engine::draw::DrawList;
use sprig_engine::input::{InputEvent, InputState, Key};
use sprig_engine::paint::Color;
use sprig_engine::render::shapes::ShapeRenderer;
use sprig_engine::time::FixedStep;
use sprig_engine::window::{CursorImage, Runtime, RuntimeConfig};

use crate::resources::Resources;
use crate::ui::Ui;

// ── Game ──────────────────────────────────────────────────────────────────

/// What a [`Game`] can reach from its callbacks.
pub struct GameCtx<'a> {
    pub ui: &'a mut Ui,
    pub resources: &'a mut Resources,
    exit: &'a mut bool,
}

impl<'a> GameCtx<'a> {
    pub fn new(ui: &'a mut Ui, resources: &'a mut Resources, exit: &'a mut bool) -> Self {
        Self { ui, resources, exit }
    }

    /// Closes the window after the current callback.
    pub fn exit(&mut self) {
        *self.exit = true;
    }
}

/// Game logic driven by an [`Application`].
///
/// Each frame the application feeds the game the input its widgets did not
/// consume, runs as many fixed [`update`](Game::update) steps as are due,
/// calls [`sync`](Game::sync) once, then updates and renders the widgets.
pub trait Game: 'static {
    /// Called once before the window opens; load sprites and add widgets here.
    fn setup(&mut self, ctx: &mut GameCtx<'_>) -> anyhow::Result<()>;

    fn on_input(&mut self, _event: &InputEvent, _input: &InputState, _ctx: &mut GameCtx<'_>) {}

    /// One fixed step of `delta` seconds.
    fn update(&mut self, delta: f32, ctx: &mut GameCtx<'_>);

    /// Called once per frame after the fixed steps, before widgets update.
    fn sync(&mut self, _ctx: &mut GameCtx<'_>) {}
}

// ── Application ───────────────────────────────────────────────────────────

/// Top-level application builder.
///
/// ```rust,ignore
/// Application::new()
///     .title("sprig demo")
///     .size(1024.0, 768.0)
///     .fps(60)
///     .run(MyGame::default())?;
/// ```
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    fps: u32,
    clear_color: Color,
    exit_on_escape: bool,
    cursor: Option<CursorImage>,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "sprig".to_string(),
            width: 1280.0,
            height: 720.0,
            fps: 60,
            clear_color: Color::BLACK,
            exit_on_escape: true,
            cursor: None,
        }
    }

    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Fixed update rate of the game.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Whether Escape closes the window (on by default).
    pub fn exit_on_escape(mut self, enabled: bool) -> Self {
        self.exit_on_escape = enabled;
        self
    }

    /// Cursor shown once the window opens. The game can replace it through
    /// [`Resources::set_cursor`].
    pub fn cursor(mut self, cursor: CursorImage) -> Self {
        self.cursor = Some(cursor);
        self
    }

    /// Sets the game up and runs the event loop until the window closes.
    pub fn run<G: Game>(self, game: G) -> anyhow::Result<()> {
        let config = RuntimeConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(self.width, self.height),
        };
        let state = UiAppState::new(self, game)?;
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

// ── UiAppState ────────────────────────────────────────────────────────────

/// Internal state that implements `sprig_engine::core::App`.
///
/// Everything engine-specific (renderers, FrameCtx) lives here.
struct UiAppState<G: Game> {
    game: G,
    ui: Ui,
    resources: Resources,
    step: FixedStep,
    started: bool,
    exit_requested: bool,
    exit_on_escape: bool,
    clear_color: Color,

    draw_list: DrawList,
    renderer: ShapeRenderer,
}

impl<G: Game> UiAppState<G> {
    fn new(app: Application, mut game: G) -> anyhow::Result<Self> {
        let step = FixedStep::new(app.fps).context("invalid update rate")?;
        let mut ui = Ui::new(ScreenRect::new(0.0, 0.0, app.width as f32, app.height as f32));
        let mut resources = Resources::new();
        if let Some(cursor) = app.cursor {
            resources.set_cursor(cursor);
        }
        let mut exit_requested = false;

        game.setup(&mut GameCtx::new(&mut ui, &mut resources, &mut exit_requested))
            .context("game setup failed")?;
        log::info!(
            "game ready: {} widgets, {} drawables",
            ui.len(),
            resources.drawables().len()
        );

        Ok(Self {
            game,
            ui,
            resources,
            step,
            started: false,
            exit_requested,
            exit_on_escape: app.exit_on_escape,
            clear_color: app.clear_color,
            draw_list: DrawList::new(),
            renderer: ShapeRenderer::new(),
        })
    }

    fn ctx(&mut self) -> (&mut G, GameCtx<'_>) {
        let ctx = GameCtx::new(&mut self.ui, &mut self.resources, &mut self.exit_requested);
        (&mut self.game, ctx)
    }

    fn control(&self) -> AppControl {
        if self.exit_requested { AppControl::Exit } else { AppControl::Continue }
    }

    /// Routes one event: exit keys first, then widgets, then the game.
    fn input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        if *event == InputEvent::Quit {
            return AppControl::Exit;
        }
        if self.exit_on_escape && event.key_pressed() == Some(Key::Escape) {
            log::info!("escape pressed, exiting");
            return AppControl::Exit;
        }
        if !self.ui.handle_event(event) {
            let (game, mut ctx) = self.ctx();
            game.on_input(event, input, &mut ctx);
        }
        self.control()
    }

    /// Runs the fixed steps due at `now`, then advances the widgets by the
    /// same amount of time.
    fn advance(&mut self, now: Instant) -> AppControl {
        if !self.started {
            self.step.restart(now);
            self.started = true;
        }
        let steps = self.step.advance(now);
        let delta = self.step.delta();
        {
            let (game, mut ctx) = self.ctx();
            for _ in 0..steps {
                game.update(delta, &mut ctx);
            }
            game.sync(&mut ctx);
        }
        self.ui.update(delta * steps as f32);
        self.control()
    }
}

impl<G: Game> EngineApp for UiAppState<G> {
    fn on_input(&mut self, event: &InputEvent, input: &InputState) -> AppControl {
        self.input(event, input)
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let (w, h) = ctx.window.logical_size();
        self.ui.set_area(ScreenRect::new(0.0, 0.0, w, h));

        if self.advance(ctx.time.now) == AppControl::Exit {
            return AppControl::Exit;
        }

        self.draw_list.clear();
        self.ui.render(&mut self.draw_list);

        let dl = &mut self.draw_list;
        let drawables = self.resources.drawables();
        let renderer = &mut self.renderer;

        ctx.render(self.clear_color, |rctx, target| {
            renderer.render(rctx, target, dl, drawables);
        })
    }

    fn next_frame_at(&self) -> Option<Instant> {
        Some(self.step.next_deadline())
    }

    fn take_cursor(&mut self) -> Option<CursorImage> {
        self.resources.take_cursor()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;
    use std::time::Duration;

    use image::RgbaImage;
    use sprig_engine::coords::{Length, PixelRect, UiRect, WorldPoint};
    use sprig_engine::draw::DrawKind;
    use sprig_engine::input::{KeyState, Modifiers};

    use super::*;
    use crate::sprite::Sprite;
    use crate::widgets::{Panel, Scene};

    #[derive(Default)]
    struct Counter {
        updates: Vec<f32>,
        syncs: u32,
        keys: Vec<Key>,
        quit_after: Option<u32>,
    }

    impl Game for Counter {
        fn setup(&mut self, _ctx: &mut GameCtx<'_>) -> anyhow::Result<()> {
            Ok(())
        }

        fn on_input(&mut self, event: &InputEvent, _input: &InputState, _ctx: &mut GameCtx<'_>) {
            if let Some(key) = event.key_pressed() {
                self.keys.push(key);
            }
        }

        fn update(&mut self, delta: f32, ctx: &mut GameCtx<'_>) {
            self.updates.push(delta);
            if self.quit_after.is_some_and(|n| self.updates.len() as u32 >= n) {
                ctx.exit();
            }
        }

        fn sync(&mut self, _ctx: &mut GameCtx<'_>) {
            self.syncs += 1;
        }
    }

    struct FailingSetup;

    impl Game for FailingSetup {
        fn setup(&mut self, _ctx: &mut GameCtx<'_>) -> anyhow::Result<()> {
            anyhow::bail!("no assets")
        }

        fn update(&mut self, _delta: f32, _ctx: &mut GameCtx<'_>) {}
    }

    /// Scene, opaque panel, scene: each covers the one before.
    struct Layered;

    impl Game for Layered {
        fn setup(&mut self, ctx: &mut GameCtx<'_>) -> anyhow::Result<()> {
            let drawable = ctx.resources.insert_drawable(RgbaImage::new(16, 16));
            let sprite = Rc::new(Sprite::one_frame(drawable, PixelRect::new(0, 0, 16, 16), 1.0));
            let scene = || {
                let mut scene = Scene::new();
                scene.spawn(sprite.clone(), WorldPoint::origin());
                scene
            };
            let full = UiRect::new(Length::ZERO, Length::ZERO, Length::fr(1.0), Length::fr(1.0));
            ctx.ui.add(scene());
            ctx.ui.add(Panel::new(full).background(Color::BLACK));
            ctx.ui.add(scene());
            Ok(())
        }

        fn update(&mut self, _delta: f32, _ctx: &mut GameCtx<'_>) {}
    }

    struct Crosshair(CursorImage);

    impl Game for Crosshair {
        fn setup(&mut self, ctx: &mut GameCtx<'_>) -> anyhow::Result<()> {
            ctx.resources.set_cursor(self.0.clone());
            Ok(())
        }

        fn update(&mut self, _delta: f32, _ctx: &mut GameCtx<'_>) {}
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    fn state(game: Counter) -> UiAppState<Counter> {
        UiAppState::new(Application::new().fps(10), game).unwrap()
    }

    #[test]
    fn fixed_steps_run_before_sync() {
        let mut app = state(Counter::default());
        let t0 = Instant::now();
        assert_eq!(app.advance(t0), AppControl::Continue);
        assert!(app.game.updates.is_empty());
        assert_eq!(app.game.syncs, 1);

        app.advance(t0 + Duration::from_millis(350));
        assert_eq!(app.game.updates, vec![0.1; 3]);
        assert_eq!(app.game.syncs, 2);
    }

    #[test]
    fn game_can_request_exit() {
        let mut app = state(Counter { quit_after: Some(2), ..Counter::default() });
        let t0 = Instant::now();
        app.advance(t0);
        assert_eq!(app.advance(t0 + Duration::from_millis(250)), AppControl::Exit);
    }

    #[test]
    fn escape_and_quit_exit() {
        let mut app = state(Counter::default());
        let input = InputState::default();
        assert_eq!(app.input(&InputEvent::Quit, &input), AppControl::Exit);
        assert_eq!(app.input(&key(Key::Escape), &input), AppControl::Exit);
        assert!(app.game.keys.is_empty());
    }

    #[test]
    fn unconsumed_keys_reach_the_game() {
        let mut app = state(Counter::default());
        let input = InputState::default();
        assert_eq!(app.input(&key(Key::W), &input), AppControl::Continue);
        assert_eq!(app.game.keys, vec![Key::W]);
    }

    #[test]
    fn escape_can_be_left_to_the_game() {
        let app = Application::new().exit_on_escape(false);
        let mut app = UiAppState::new(app, Counter::default()).unwrap();
        assert_eq!(app.input(&key(Key::Escape), &InputState::default()), AppControl::Continue);
        assert_eq!(app.game.keys, vec![Key::Escape]);
    }

    #[test]
    fn setup_errors_are_reported() {
        let err = UiAppState::new(Application::new(), FailingSetup).err().unwrap();
        assert_eq!(err.to_string(), "game setup failed");
        assert_eq!(err.root_cause().to_string(), "no assets");
    }

    #[test]
    fn later_widgets_draw_over_earlier_ones() {
        let mut app = UiAppState::new(Application::new(), Layered).unwrap();
        app.ui.render(&mut app.draw_list);
        assert_eq!(
            app.draw_list.paint_runs(),
            vec![DrawKind::Sprite, DrawKind::Rect, DrawKind::Sprite]
        );
    }

    #[test]
    fn game_cursor_replaces_the_configured_one() {
        let arrow = CursorImage::new(RgbaImage::new(4, 4), 0, 0).unwrap();
        let cross = CursorImage::new(RgbaImage::new(5, 5), 2, 2).unwrap();

        let app = Application::new().cursor(arrow.clone());
        let mut plain = UiAppState::new(app, Counter::default()).unwrap();
        assert_eq!(plain.take_cursor(), Some(arrow.clone()));
        assert_eq!(plain.take_cursor(), None);

        let app = Application::new().cursor(arrow);
        let mut state = UiAppState::new(app, Crosshair(cross.clone())).unwrap();
        assert_eq!(state.take_cursor(), Some(cross));
    }

    #[test]
    fn zero_fps_is_rejected() {
        assert!(UiAppState::new(Application::new().fps(0), Counter::default()).is_err());
    }
}
