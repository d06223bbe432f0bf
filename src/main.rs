//! Math Master entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use glam::Vec2;
    use math_master::audio::AudioManager;
    use math_master::config::GameConfig;
    use math_master::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use math_master::renderer::{CanvasBackend, build_scene};
    use math_master::sim::{MusicTrack, Session, SimEvent, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        session: Session,
        config: GameConfig,
        backend: Option<CanvasBackend>,
        audio: AudioManager,
        input: TickInput,
        running: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let config = GameConfig::default();
            Self {
                session: Session::new(seed, &config.layout),
                config,
                backend: None,
                audio: AudioManager::new(),
                input: TickInput::default(),
                running: true,
            }
        }

        /// One loop iteration: tick the sim, dispatch effects, render
        fn frame(&mut self, now_ms: f64) {
            self.input.now_ms = now_ms;
            let events = tick(&mut self.session, &self.input, &self.config.layout);

            // Clear one-shot inputs after processing
            self.input.pointer_down = false;
            self.input.pointer_up = false;
            self.input.acknowledge = false;

            for event in events {
                match event {
                    SimEvent::Sound(effect) => self.audio.play(effect),
                    SimEvent::Music(track) => self.audio.play_music(track),
                    SimEvent::Quit => {
                        self.audio.stop_music();
                        self.running = false;
                        log::info!("quit requested, stopping loop");
                    }
                }
            }

            if let Some(backend) = &self.backend {
                backend.render(&build_scene(&self.session, &self.config, self.input.pointer));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Math Master starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(SCREEN_WIDTH as u32);
        canvas.set_height(SCREEN_HEIGHT as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        {
            let mut g = game.borrow_mut();
            g.backend = CanvasBackend::new(&canvas);
            if g.backend.is_none() {
                log::warn!("2D canvas context unavailable - rendering disabled");
            }
            g.audio.play_music(MusicTrack::Menu);
        }

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Math Master running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().input.pointer =
                    Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer_down = true;
                // Browsers unlock audio on the first gesture
                g.audio.resume();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.pointer = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                g.input.pointer_up = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == " " {
                    game.borrow_mut().input.acknowledge = true;
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let running = {
            let mut g = game.borrow_mut();
            g.frame(time);
            g.running
        };
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Math Master (native) starting...");
    log::info!("Native mode is a headless self-check - serve the wasm build for the game");

    println!("\nRunning sim self-check...");
    self_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn self_check() {
    use math_master::config::Layout;
    use math_master::sim::{ProblemKind, Screen, Session, TickInput, tick};

    let layout = Layout::default();
    let mut session = Session::new(0x5eed, &layout);

    for kind in ProblemKind::ALL {
        session.kind = kind;
        session.next_problem(0.0);
        println!("  {:?}: {} -> {}", kind, session.problem.question, session.problem.answer);
    }

    // Start a round through the menu button and answer it correctly
    let start = layout.menu_start.center();
    tick(
        &mut session,
        &TickInput {
            pointer: start,
            pointer_down: true,
            ..Default::default()
        },
        &layout,
    );
    tick(
        &mut session,
        &TickInput {
            pointer: start,
            pointer_up: true,
            ..Default::default()
        },
        &layout,
    );
    assert_eq!(session.screen, Screen::Playing);

    let correct = session
        .problem
        .options
        .iter()
        .position(|o| *o == session.problem.answer)
        .unwrap_or(0);
    tick(
        &mut session,
        &TickInput {
            pointer: layout.answer_boxes[correct].center(),
            pointer_down: true,
            now_ms: 100.0,
            ..Default::default()
        },
        &layout,
    );
    assert_eq!(session.score, 10);
    println!("✓ Sim self-check passed!");
}
