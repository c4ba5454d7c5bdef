//! Jungle Run: main loop and application entry point.
//!
//! winit drives the event loop via `ApplicationHandler`. The simulation runs
//! inside `RedrawRequested` on a fixed timestep (see `TimeState`):
//!
//!   1. `begin_frame()` measures the wall-clock delta and feeds the accumulator
//!   2. `Game::run_frame` runs one `Game::tick` per banked 1/30 s slice and
//!      clears edge-triggered input after each, so a press is handled once
//!   3. audio cues are drained and the HUD is pushed to the window title
//!
//! Sprite blitting, fonts and sound playback are left to a presentation layer;
//! the game exposes `Game::draw_list` and `Game::drain_cues` for it.

mod collision;
mod config;
mod cue;
mod entities;
mod game;
mod highscore;
mod level;
mod mask;
mod player;
#[cfg(test)]
mod replay;
mod world;

use std::path::Path;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use config::{load_config_from_path, GameConfig};
use game::{Game, Screen};
use highscore::HighScoreStore;
use jr_core::{Binding, InputBindings, InputState, TimeState};
use jr_platform::keys::map_key;
use jr_platform::window::{PlatformConfig, GAME_TITLE};
use level::LevelCatalog;
use mask::Masks;

const CONFIG_PATH: &str = "assets/config/game.json";

struct App {
    platform: PlatformConfig,
    bindings: InputBindings,
    input: InputState,
    time: TimeState,
    game: Game,
    window: Option<Arc<Window>>,
    title: String,
}

impl App {
    fn new(config: &GameConfig, game: Game) -> Self {
        Self {
            platform: PlatformConfig::for_screen(config.screen_width, config.screen_height),
            bindings: config.input_bindings(),
            input: InputState::new(),
            time: TimeState::with_tick_rate(config.tick_rate),
            game,
            window: None,
            title: String::new(),
        }
    }

    fn status_line(&self) -> String {
        let hud = self.game.hud();
        match self.game.screen() {
            Screen::Playing | Screen::Hold(_) => format!(
                "{GAME_TITLE}  Level {}  Lives {}  Score {}  Time {}",
                hud.level, hud.lives, hud.score, hud.seconds_left
            ),
            Screen::EnterName => format!(
                "{GAME_TITLE}  Enter initials: {}",
                self.game.initials().iter().collect::<String>()
            ),
            Screen::GameComplete => format!(
                "{GAME_TITLE}  Game complete! Final score {}",
                self.game.final_score()
            ),
            Screen::HighScore => {
                let table = self
                    .game
                    .high_scores()
                    .table()
                    .entries()
                    .iter()
                    .map(|e| format!("{} {}", e.score, e.initials))
                    .collect::<Vec<_>>()
                    .join(" | ");
                format!("{GAME_TITLE}  High scores: {table}")
            }
            other => format!("{GAME_TITLE}  {other:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match jr_platform::window::create_window(event_loop, &self.platform) {
            Ok(window) => {
                log::info!(
                    "Window created: {}x{}",
                    self.platform.width,
                    self.platform.height
                );
                self.window = Some(window);
                self.time.resync();
            }
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting.");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    if let Some(key) = map_key(key_code) {
                        let pressed = event.state == ElementState::Pressed;
                        self.input
                            .apply(&self.bindings, Binding::Key(key), pressed);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                self.time.begin_frame();

                if let Err(e) = self.game.run_frame(&mut self.input, &mut self.time) {
                    log::error!("Level load failed: {e}");
                    event_loop.exit();
                    return;
                }
                if self.game.is_finished() {
                    log::info!("Quit requested, exiting.");
                    event_loop.exit();
                    return;
                }

                for cue in self.game.drain_cues() {
                    log::debug!("Cue: {}", cue.name());
                }
                log::trace!("{} sprites queued", self.game.draw_list().len());

                let title = self.status_line();
                if title != self.title {
                    if let Some(window) = &self.window {
                        window.set_title(&title);
                    }
                    self.title = title;
                }
            }

            _ => {}
        }
    }
}

fn load_config(path: &Path) -> GameConfig {
    if !path.exists() {
        log::info!("No config at {}, using defaults", path.display());
        return GameConfig::default();
    }
    match load_config_from_path(path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("{e}; using defaults");
            GameConfig::default()
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Jungle Run starting...");

    let config = load_config(Path::new(CONFIG_PATH));
    let catalog = match LevelCatalog::load(&config.level_manifest) {
        Ok(catalog) if !catalog.is_empty() => catalog,
        Ok(_) => {
            log::error!(
                "Level manifest {} lists no levels",
                config.level_manifest.display()
            );
            std::process::exit(1);
        }
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };
    let masks = Masks::from_config(&config);
    let high_scores = HighScoreStore::load(&config.high_score_file);
    let game = match Game::new(config.clone(), catalog, masks, high_scores) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&config, game);
    event_loop.run_app(&mut app).expect("Event loop error");
}
