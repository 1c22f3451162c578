//! Hoopshot entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use hoopshot::consts::MAX_FRAME_DT;
    use hoopshot::sim::{CameraBasis, GameState, InputState, advance};
    use hoopshot::{Feedback, HudSnapshot, Settings, Tuning};

    // Scene bridge: the page owns the 3D scene, we only hand it numbers
    #[wasm_bindgen(inline_js = "
        export function place_ball(x, y, z, rx, rz) {
            const ball = window.hoopshotScene && window.hoopshotScene.ball;
            if (ball) {
                ball.position.set(x, y, z);
                ball.rotation.x = rx;
                ball.rotation.z = rz;
            }
        }

        export function camera_basis() {
            const cam = window.hoopshotScene && window.hoopshotScene.camera;
            if (!cam || !cam.getWorldDirection) {
                return new Float32Array(0);
            }
            const dir = cam.getWorldDirection(cam.position.clone());
            return new Float32Array([dir.x, dir.y, dir.z, cam.up.x, cam.up.y, cam.up.z]);
        }

        export function update_hud(json) {
            const hud = JSON.parse(json);
            const set = (id, text) => {
                const el = document.getElementById(id);
                if (el) { el.textContent = text; }
            };
            set('score', hud.score);
            set('shots', hud.shots);
            set('accuracy', hud.accuracy + '%');
            set('power', hud.power_percent + '%');
            set('power-bar', hud.power_bar);
        }

        export function show_feedback(message, color, secs) {
            const el = document.getElementById('feedback');
            if (!el) { return; }
            el.textContent = message;
            el.style.color = color;
            el.style.display = 'block';
            clearTimeout(el._hideTimer);
            el._hideTimer = setTimeout(() => { el.style.display = 'none'; }, secs * 1000);
        }
    ")]
    extern "C" {
        fn place_ball(x: f32, y: f32, z: f32, rx: f32, rz: f32);
        fn camera_basis() -> Vec<f32>;
        fn update_hud(json: &str);
        fn show_feedback(message: &str, color: &str, secs: f32);
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        last_time: f64,
        last_hud: Option<HudSnapshot>,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
            Self {
                state: GameState::new(tuning, settings, seed),
                input: InputState::default(),
                last_time: 0.0,
                last_hud: None,
            }
        }

        /// Run one simulation frame
        fn update(&mut self, dt: f32) {
            if let [fx, fy, fz, ux, uy, uz] = camera_basis()[..] {
                self.input.camera = CameraBasis {
                    forward: glam::Vec3::new(fx, fy, fz),
                    up: glam::Vec3::new(ux, uy, uz),
                };
            }

            advance(&mut self.state, &self.input, dt.min(MAX_FRAME_DT));
            // Commands are one-shot
            self.input.clear_commands();

            for event in self.state.drain_events() {
                if let Some(feedback) = Feedback::for_event(&event, &self.state.settings) {
                    show_feedback(feedback.message, feedback.color, feedback.secs);
                }
            }
        }

        /// Push ball pose to the scene
        fn render(&self) {
            let ball = &self.state.ball;
            place_ball(ball.pos.x, ball.pos.y, ball.pos.z, ball.rotation.x, ball.rotation.z);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = HudSnapshot::from_state(&self.state);
            if !hud.differs_from(self.last_hud.as_ref()) {
                return;
            }
            let json = serde_json::json!({
                "score": hud.score,
                "shots": hud.shots_line(),
                "accuracy": hud.accuracy,
                "power_percent": hud.power_percent,
                "power_bar": hud.power_bar(),
            });
            update_hud(&json.to_string());
            self.last_hud = Some(hud);
        }
    }

    /// Text of an inline `<script>` config block
    fn page_json(id: &str) -> Option<String> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.text_content())
    }

    /// Tuning overrides embedded in the page, if any
    fn load_tuning() -> Tuning {
        match page_json("hoopshot-tuning") {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        }
    }

    /// Settings embedded in the page, if any
    fn load_settings() -> Settings {
        match page_json("hoopshot-settings") {
            Some(json) => Settings::from_json_or_default(&json),
            None => Settings::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Hoopshot starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(load_tuning(), load_settings(), seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, game.clone());
        request_animation_frame(game);
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.input.key_down(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup never arrives for keys held while focus leaves
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;
    use hoopshot::MissTimerPolicy;
    use std::path::PathBuf;

    #[derive(Parser)]
    #[command(name = "hoopshot")]
    #[command(about = "Run a headless shooting session and print the final scoreboard", long_about = None)]
    pub struct Cli {
        /// Tuning JSON file
        pub tuning: Option<PathBuf>,

        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Miss timer policy (cancel or parity), overrides the settings file
        #[arg(long, value_parser = parse_miss_timer)]
        pub miss_timer: Option<MissTimerPolicy>,

        /// Let demo mode play instead of the scripted routine
        #[arg(long)]
        pub demo: bool,

        /// Seconds of demo play
        #[arg(long, default_value_t = 60.0)]
        pub demo_secs: f32,

        /// Demo mode seed
        #[arg(long, default_value_t = 0)]
        pub seed: u64,
    }

    fn parse_miss_timer(s: &str) -> Result<MissTimerPolicy, String> {
        MissTimerPolicy::from_str(s)
            .ok_or_else(|| format!("unknown miss timer policy '{}' (expected cancel or parity)", s))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Hoopshot (native) starting...");
    log::info!("Native mode runs a headless shooting session - run with `trunk serve` for the web version");

    let cli = cli::Cli::parse();

    let tuning = match &cli.tuning {
        Some(path) => match read_config(path, hoopshot::Tuning::from_json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => hoopshot::Tuning::default(),
    };

    let mut settings = match &cli.settings {
        Some(path) => match read_config(path, hoopshot::Settings::from_json) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => hoopshot::Settings::default(),
    };
    if let Some(policy) = cli.miss_timer {
        settings.miss_timer = policy;
    }
    settings.demo_mode |= cli.demo;
    log::info!(
        "Miss timer: {}, demo mode: {}",
        settings.miss_timer.as_str(),
        settings.demo_mode
    );

    let hud = headless::run_session(tuning, settings, cli.seed, cli.demo_secs);
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode HUD: {}", e),
    }
}

/// Read a JSON config file and parse it with `parse`
#[cfg(not(target_arch = "wasm32"))]
fn read_config<T, E>(
    path: &std::path::Path,
    parse: fn(&str) -> Result<T, E>,
) -> Result<T, Box<dyn std::error::Error>>
where
    E: std::error::Error + 'static,
{
    let json = std::fs::read_to_string(path)?;
    Ok(parse(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec3;
    use hoopshot::sim::{Command, GameState, InputState, ShotPower, advance};
    use hoopshot::{Feedback, HudSnapshot, Settings, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up on a flight after this many frames
    const MAX_FLIGHT_FRAMES: u32 = 60 * 60;

    /// Shooting spots (x, z) and powers
    const ROUTINE: [(f32, f32, f32); 5] = [
        (7.0, 0.0, 50.0),
        (-7.0, 0.0, 50.0),
        (9.0, 3.0, 35.0),
        (-2.0, -4.0, 90.0),
        (4.0, 5.5, 60.0),
    ];

    /// Play the session and return the final scoreboard. Demo mode plays on
    /// its own for `demo_secs`; otherwise the scripted routine is shot.
    pub fn run_session(
        tuning: Tuning,
        settings: Settings,
        seed: u64,
        demo_secs: f32,
    ) -> HudSnapshot {
        let mut state = GameState::new(tuning, settings, seed);
        if state.settings.demo_mode {
            run_demo(&mut state, demo_secs);
        } else {
            run_routine(&mut state);
        }

        let hud = HudSnapshot::from_state(&state);
        log::info!(
            "Session done: {} points, {} ({}%)",
            hud.score,
            hud.shots_line(),
            hud.accuracy
        );
        hud
    }

    fn run_routine(state: &mut GameState) {
        let idle = InputState::default();
        let shoot = InputState {
            commands: vec![Command::Shoot],
            ..Default::default()
        };

        for (x, z, power) in ROUTINE {
            state.ball.pos = Vec3::new(x, state.tuning.physics.ground_level, z);
            state.power = ShotPower::new(power);
            advance(state, &shoot, FRAME_DT);

            let mut frames = 0;
            while state.ball.in_flight && frames < MAX_FLIGHT_FRAMES {
                advance(state, &idle, FRAME_DT);
                frames += 1;
            }
            report_feedback(state);
        }
    }

    fn run_demo(state: &mut GameState, secs: f32) {
        let idle = InputState::default();
        let frames = (secs.max(0.0) / FRAME_DT) as u32;
        for _ in 0..frames {
            advance(state, &idle, FRAME_DT);
            report_feedback(state);
        }
    }

    fn report_feedback(state: &mut GameState) {
        for event in state.drain_events() {
            if let Some(feedback) = Feedback::for_event(&event, &state.settings) {
                log::info!("{}", feedback.message);
            }
        }
    }
}
