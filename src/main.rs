//! Pixel Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use pixel_dash::input::{is_autopilot_toggle, key_from_dom};
    use pixel_dash::renderer::CanvasRenderer;
    use pixel_dash::{GameConfig, KeyResponse, Outcome, Simulation, TickStatus, autopilot};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        renderer: CanvasRenderer,
        /// A frame request is outstanding
        running: bool,
        autopilot: bool,
    }

    impl Game {
        fn step(&mut self) -> TickStatus {
            if self.autopilot {
                autopilot::drive(&mut self.sim);
            }

            let mut outcome = None;
            let status = self
                .sim
                .tick(&mut self.renderer, &mut |o: Outcome| outcome = Some(o));
            if let Some(outcome) = outcome {
                self.renderer.draw_banner(outcome);
            }
            status
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Pixel Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let config = GameConfig::default();
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_width(config.field_width as u32);
        canvas.set_height(config.field_height as u32);
        canvas.set_attribute("style", "border: 1px solid black")?;
        document
            .body()
            .ok_or("no body")?
            .append_child(&canvas)?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;
        let renderer = CanvasRenderer::new(
            ctx,
            config.field_width as f64,
            config.field_height as f64,
        );

        let seed = js_sys::Date::now() as u64;
        let sim = Simulation::with_seed(config, seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            sim,
            renderer,
            running: true,
            autopilot: false,
        }));

        setup_input_handlers(game.clone())?;
        request_animation_frame(game);

        log::info!("Pixel Dash running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down: steer, toggle demo mode, or restart after game over
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let resume = {
                    let mut g = game.borrow_mut();
                    if is_autopilot_toggle(&key) {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    match key_from_dom(&key, &event.code()) {
                        Some(k) => {
                            event.prevent_default();
                            let restarted = g.sim.handle_key_down(k) == KeyResponse::Restarted;
                            if restarted && !g.running {
                                g.running = true;
                                true
                            } else {
                                false
                            }
                        }
                        None => false,
                    }
                };
                if resume {
                    request_animation_frame(game.clone());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up: any release stops the player
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: KeyboardEvent| {
                game.borrow_mut().sim.handle_key_up();
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let status = game.borrow_mut().step();
        match status {
            TickStatus::Continue => request_animation_frame(game),
            TickStatus::Halted => game.borrow_mut().running = false,
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), pixel_dash::ConfigError> {
    env_logger::init();
    log::info!("Pixel Dash (native) starting...");
    log::info!("Native mode runs headless autopilot games - run with `trunk serve` to play");

    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::time::{SystemTime, UNIX_EPOCH};

    use pixel_dash::sim::Frame;
    use pixel_dash::{ConfigError, GameConfig, Key, Outcome, Renderer, Simulation, TickStatus, autopilot};

    /// Upper bound on one headless game (one minute at 60 Hz)
    const MAX_TICKS: u64 = 60 * 60;
    const DEFAULT_GAMES: u32 = 3;

    /// Logs a one-line summary every second of game time
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &Frame) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::debug!(
                    "frame {}: player ({:.0}, {:.0}), {} left, score {}",
                    self.frames,
                    frame.player.pos.x,
                    frame.player.pos.y,
                    frame.collectables.len(),
                    frame.score
                );
            }
        }
    }

    fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
        let value = std::env::var(name).ok()?;
        match value.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                log::warn!("Ignoring unparseable {}={:?}", name, value);
                None
            }
        }
    }

    pub fn run() -> Result<(), ConfigError> {
        let config = match std::env::var("PIXEL_DASH_CONFIG") {
            Ok(path) => {
                log::info!("Loading config from {}", path);
                GameConfig::load(path)?
            }
            Err(_) => GameConfig::default(),
        };

        let seed = env_parse("PIXEL_DASH_SEED").unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        let games: u32 = env_parse("PIXEL_DASH_GAMES").unwrap_or(DEFAULT_GAMES);

        let mut sim = Simulation::with_seed(config, seed)?;
        log::info!("Game initialized with seed: {}", seed);

        let mut renderer = LogRenderer::default();
        let (mut wins, mut losses) = (0, 0);

        for game in 1..=games {
            let mut outcome = None;
            while sim.state().time_ticks < MAX_TICKS {
                autopilot::drive(&mut sim);
                let status = sim.tick(&mut renderer, &mut |o: Outcome| outcome = Some(o));
                if status == TickStatus::Halted {
                    break;
                }
            }

            match outcome {
                Some(Outcome::Win { score }) => {
                    wins += 1;
                    log::info!("Game {}: won with score {} in {} ticks", game, score, sim.state().time_ticks);
                }
                Some(Outcome::Loss { score }) => {
                    losses += 1;
                    log::info!("Game {}: lost with score {} after {} ticks", game, score, sim.state().time_ticks);
                }
                None => log::info!("Game {}: out of time with score {}", game, sim.score()),
            }

            if sim.handle_key_down(Key::Restart) != pixel_dash::KeyResponse::Restarted {
                sim.restart();
            }
        }

        log::info!("{} games: {} won, {} lost", games, wins, losses);
        Ok(())
    }
}
