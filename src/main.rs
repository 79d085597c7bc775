//! Court Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use court_pong::renderer::Renderer;
    use court_pong::sim::{Control, GameState, InputMap, clamp_frame_dt, tick};
    use court_pong::{AudioManager, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputMap,
        audio: AudioManager,
        renderer: Option<Renderer>,
        settings: Settings,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);

            Self {
                state: GameState::new(seed),
                input: InputMap::new(),
                audio,
                renderer: None,
                settings,
                last_time: 0.0,
            }
        }

        /// One display-refresh step: resolve input, advance physics, dispatch
        /// cues, then render unconditionally (paused or not)
        fn frame(&mut self, time: f64) {
            // First invocation has no previous timestamp: zero movement
            let raw_dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;
            let dt = clamp_frame_dt(raw_dt);

            let input = self.input.tick_input();
            let cues = tick(&mut self.state, &input, dt);
            for cue in cues {
                self.audio.play(cue);
            }

            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state);
            }
        }
    }

    /// Map a physical key code to a logical control
    fn bind_key(code: &str) -> Option<Control> {
        match code {
            "KeyW" => Some(Control::LeftUp),
            "KeyS" => Some(Control::LeftDown),
            "ArrowUp" => Some(Control::RightUp),
            "ArrowDown" => Some(Control::RightDown),
            "Space" => Some(Control::Pause),
            "KeyR" => Some(Control::Restart),
            _ => None,
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Court Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        match Renderer::new(&canvas) {
            Some(renderer) => game.borrow_mut().renderer = Some(renderer),
            None => log::error!("Failed to acquire 2D canvas context"),
        }

        setup_input_handlers(game.clone());
        setup_blur_mute(game.clone());

        request_animation_frame(game);

        log::info!("Court Pong running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown: press controls, and resume audio on the user gesture
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(control) = bind_key(&event.code()) {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.input.set(control, true);
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup: release controls
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(control) = bind_key(&event.code()) {
                    game.borrow_mut().input.set(control, false);
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use court_pong::consts::MAX_FRAME_DT;
    use court_pong::sim::{Cue, GameState, TickInput, clamp_frame_dt, tick};

    env_logger::init();
    log::info!("Court Pong (native) starting...");
    log::info!("Native mode is headless - serve index.html with the wasm build to play");

    // Smoke run: thirty simulated seconds of untouched rallies
    let mut state = GameState::new(0x5eed);
    let input = TickInput::default();
    let dt = clamp_frame_dt(1.0 / 60.0);
    let mut hits = 0u32;
    for _ in 0..(30 * 60) {
        for cue in tick(&mut state, &input, dt) {
            if cue == Cue::Hit {
                hits += 1;
            }
        }
    }
    log::info!(
        "Simulated 30s: {} hits, score {} : {}, ball speed {:.1}",
        hits,
        state.left_score,
        state.right_score,
        state.ball.speed
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
