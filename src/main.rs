//! Brick Breaker entry point
//!
//! The browser build wires the game to the page (canvas, buttons, keyboard,
//! LocalStorage, music). The native build runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use brick_breaker::audio::WebMusic;
    use brick_breaker::platform::{
        Direction, KeyValueStore, LocalStorage, MemoryStorage, apply_key, set_direction,
    };
    use brick_breaker::renderer::{RenderState, ShapeBatch};
    use brick_breaker::sim::{GameEvent, RunMode};
    use brick_breaker::{Game, Schedule, Tuning, TuningError};

    const MUSIC_SRC: &str = "music.mp3";

    /// Everything the page callbacks share
    struct App {
        game: Game<Box<dyn KeyValueStore>, WebMusic>,
        render_state: Option<RenderState>,
        batch: ShapeBatch,
        /// A requestAnimationFrame callback is pending
        loop_running: bool,
    }

    impl App {
        fn new() -> Result<Self, TuningError> {
            let storage: Box<dyn KeyValueStore> = match LocalStorage::open() {
                Ok(storage) => Box::new(storage),
                Err(e) => {
                    log::warn!("LocalStorage unavailable ({e}), highscores will not persist");
                    Box::new(MemoryStorage::new())
                }
            };

            Ok(Self {
                game: Game::new(Tuning::default(), storage, WebMusic::new(MUSIC_SRC))?,
                render_state: None,
                batch: ShapeBatch::new(),
                loop_running: false,
            })
        }

        /// One animation frame: simulate, draw, react to events
        fn run_frame(&mut self) -> Schedule {
            let outcome = self.game.frame(&mut self.batch);
            self.render();

            for event in &outcome.events {
                if let GameEvent::HighscoreBeaten { score } = *event {
                    self.ask_highscore_name(score);
                }
            }

            self.update_hud();
            outcome.schedule
        }

        /// Draw the current state without simulating
        fn redraw(&mut self) {
            self.game.draw(&mut self.batch);
            self.render();
            self.update_hud();
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.batch.vertices()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn ask_highscore_name(&mut self, score: u32) {
            let name = web_sys::window()
                .and_then(|w| {
                    w.prompt_with_message(&format!(
                        "New highscore: {score}! Please enter your name:"
                    ))
                    .ok()
                })
                .flatten();
            self.game.submit_highscore_name(name.as_deref());
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let session = self.game.session();

            if let Some(el) = document.get_element_by_id("scoreDisplay") {
                el.set_text_content(Some(&session.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("highscoreDisplay") {
                el.set_text_content(Some(&session.highscore.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("highscoreName") {
                el.set_text_content(Some(&format!("({})", session.highscore.name)));
            }

            // Start shows between games, pause while one is going
            let between_games = matches!(session.mode, RunMode::Idle | RunMode::Ended);
            let class_for = |visible: bool| if visible { "" } else { "hidden" };
            if let Some(el) = document.get_element_by_id("startButton") {
                let _ = el.set_attribute("class", class_for(between_games));
            }
            if let Some(el) = document.get_element_by_id("pauseButton") {
                let _ = el.set_attribute("class", class_for(!between_games));
                let label = if session.mode == RunMode::Paused {
                    "Resume"
                } else {
                    "Pause"
                };
                el.set_text_content(Some(label));
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("board")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let app = match App::new() {
            Ok(app) => Rc::new(RefCell::new(app)),
            Err(e) => {
                log::error!("Invalid tuning: {e}");
                return;
            }
        };

        // Canvas backing store follows the board size at device resolution
        let tuning = app.borrow().game.session().tuning.clone();
        let dpr = window.device_pixel_ratio();
        let width = (tuning.board_width as f64 * dpr) as u32;
        let height = (tuning.board_height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let board_size = (tuning.board_width, tuning.board_height);
        match RenderState::new(surface, &adapter, width, height, board_size).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {e}"),
        }

        setup_keyboard(app.clone());
        setup_control_buttons(&document, app.clone());
        setup_game_buttons(&document, app.clone());
        setup_auto_pause(app.clone());

        // Start screen
        app.borrow_mut().redraw();

        log::info!("Brick Breaker ready");
    }

    /// Request frames until the game halts; no-op if a loop is already pending
    fn ensure_loop(app: &Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if a.loop_running {
                return;
            }
            a.loop_running = true;
        }
        request_animation_frame(app.clone());
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>) {
        let schedule = app.borrow_mut().run_frame();
        match schedule {
            Schedule::NextFrame => request_animation_frame(app),
            Schedule::Halt => app.borrow_mut().loop_running = false,
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                if apply_key(a.game.input_mut(), &event.key(), pressed) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen left/right buttons, held with mouse or touch
    fn setup_control_buttons(document: &Document, app: Rc<RefCell<App>>) {
        let bindings = [
            ("leftButton", Direction::Left),
            ("rightButton", Direction::Right),
        ];
        let events = [
            ("mousedown", true),
            ("touchstart", true),
            ("mouseup", false),
            ("mouseleave", false),
            ("touchend", false),
        ];

        for (id, direction) in bindings {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing control button #{id}");
                continue;
            };
            for (event_name, pressed) in events {
                let app = app.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    if event.type_().starts_with("touch") {
                        event.prevent_default();
                    }
                    set_direction(app.borrow_mut().game.input_mut(), direction, pressed);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_game_buttons(document: &Document, app: Rc<RefCell<App>>) {
        // Start / restart
        if let Some(btn) = document.get_element_by_id("startButton") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let started = app.borrow_mut().game.start();
                match started {
                    Ok(()) => {
                        app.borrow().update_hud();
                        ensure_loop(&app);
                    }
                    Err(e) => log::warn!("{e}"),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pause / resume
        if let Some(btn) = document.get_element_by_id("pauseButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let toggled = app.borrow_mut().game.toggle_pause();
                match toggled {
                    Ok(()) => {
                        app.borrow().update_hud();
                        ensure_loop(&app);
                    }
                    Err(e) => log::warn!("{e}"),
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Window blur (click outside, tab switch)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut a = app.borrow_mut();
            if a.game.settings().pause_on_blur
                && a.game.session().mode == RunMode::Running
                && a.game.pause().is_ok()
            {
                log::info!("Auto-paused (window blur)");
                a.update_hud();
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_host::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs the autopilot demo - run with `trunk serve` for the web version");

    demo::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use brick_breaker::audio::SilentMusic;
    use brick_breaker::platform::FileStorage;
    use brick_breaker::renderer::ShapeBatch;
    use brick_breaker::sim::{GameEvent, autopilot};
    use brick_breaker::{Game, Schedule, Tuning};

    /// Directory for persisted highscores and settings
    const DATA_DIR_ENV: &str = "BREAKOUT_DATA_DIR";
    const DEFAULT_DATA_DIR: &str = ".brick-breaker";
    /// Safety cap; a perfect autopilot would never lose
    const MAX_TICKS: u64 = 200_000;
    const AUTOPILOT_NAME: &str = "Autopilot";

    #[derive(Debug, Default)]
    struct Summary {
        blocks: u32,
        paddle_hits: u32,
        rounds_cleared: u32,
        max_score_reached: bool,
        new_highscore: bool,
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading tuning from {path}");
                Tuning::from_json_file(&path)?
            }
            None => Tuning::default(),
        };

        let data_dir = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let storage = FileStorage::open(&data_dir)?;
        log::info!("Storing data in {}", data_dir.display());

        let mut game = Game::new(tuning, storage, SilentMusic)?;
        let previous = game.session().highscore.clone();
        game.start()?;

        let mut batch = ShapeBatch::new();
        let mut summary = Summary::default();

        loop {
            let intent = autopilot::steer(game.session());
            game.set_input(intent);
            let outcome = game.frame(&mut batch);

            for event in outcome.events {
                match event {
                    GameEvent::PaddleHit => summary.paddle_hits += 1,
                    GameEvent::BlockDestroyed { .. } => summary.blocks += 1,
                    GameEvent::RoundCleared { .. } => summary.rounds_cleared += 1,
                    GameEvent::MaxScoreReached { .. } => summary.max_score_reached = true,
                    GameEvent::HighscoreBeaten { .. } => {
                        summary.new_highscore = true;
                        game.submit_highscore_name(Some(AUTOPILOT_NAME));
                    }
                    _ => {}
                }
            }

            if outcome.schedule == Schedule::Halt {
                break;
            }
            if game.session().time_ticks >= MAX_TICKS {
                log::info!("Stopping demo after {MAX_TICKS} ticks");
                break;
            }
        }

        let session = game.session();
        println!("\n=== Brick Breaker demo ===");
        println!("Ticks:           {}", session.time_ticks);
        println!("Final score:     {}", session.score);
        println!("Round:           {}", session.round);
        println!("Blocks:          {}", summary.blocks);
        println!("Paddle hits:     {}", summary.paddle_hits);
        println!("Rounds cleared:  {}", summary.rounds_cleared);
        if summary.max_score_reached {
            println!("Max score reached; the board stayed empty");
        }
        if summary.new_highscore {
            println!(
                "New highscore!   {} (was {} by {})",
                session.highscore.score, previous.score, previous.name
            );
        } else {
            println!(
                "Highscore:       {} by {}",
                session.highscore.score, session.highscore.name
            );
        }
        println!("Last frame:      {} vertices", batch.len());

        Ok(())
    }
}
