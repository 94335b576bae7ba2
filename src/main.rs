//! Dice Defense entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement};

    use dice_defense::consts::SIM_DT_MS;
    use dice_defense::platform::{DiePresenter, Viewport, dispatch_events, handle_resize};
    use dice_defense::renderer::{CanvasRenderer, DrawList};
    use dice_defense::sim::{
        DieFaces, FaceId, FixedClock, GameEvent, GamePhase, GameState, TickInput, Upgrade, tick,
    };
    use dice_defense::{HudSnapshot, InitError, Tuning};

    /// How long the startup error banner stays up
    pub const ERROR_BANNER_MS: u32 = 5000;

    // three.js die. The page loads three.js; a missing runtime makes
    // `die_init` throw and the game does not start.
    #[wasm_bindgen(inline_js = "
        let die = null;

        function faceTexture(THREE, value) {
            const c = document.createElement('canvas');
            c.width = 128; c.height = 128;
            const g = c.getContext('2d');
            g.fillStyle = '#fafafa';
            g.fillRect(0, 0, 128, 128);
            g.fillStyle = '#222';
            g.font = 'bold 72px sans-serif';
            g.textAlign = 'center';
            g.textBaseline = 'middle';
            g.fillText(String(value), 64, 68);
            return new THREE.CanvasTexture(c);
        }

        export function die_init(container_id, values) {
            const THREE = window.THREE;
            if (!THREE) { throw new Error('three.js is not loaded'); }
            const container = document.getElementById(container_id);
            if (!container) { throw new Error('missing #' + container_id); }
            const w = container.clientWidth || 160, h = container.clientHeight || 160;
            const renderer = new THREE.WebGLRenderer({ antialias: true, alpha: true });
            renderer.setSize(w, h);
            container.appendChild(renderer.domElement);
            const scene = new THREE.Scene();
            const camera = new THREE.PerspectiveCamera(45, w / h, 0.1, 100);
            camera.position.z = 4;
            scene.add(new THREE.AmbientLight(0xffffff, 0.6));
            const light = new THREE.DirectionalLight(0xffffff, 0.8);
            light.position.set(2, 3, 4);
            scene.add(light);
            const mats = Array.from(values, v => new THREE.MeshStandardMaterial({ map: faceTexture(THREE, v) }));
            const cube = new THREE.Mesh(new THREE.BoxGeometry(1.5, 1.5, 1.5), mats);
            scene.add(cube);
            die = { THREE, container, renderer, scene, camera, cube, anim: null };
            const frame = (t) => {
                if (die.anim) {
                    const a = die.anim;
                    const k = Math.min(1, (t - a.start) / a.duration);
                    const e = 1 - Math.pow(1 - k, 3);
                    cube.rotation.x = a.fromX + (a.toX - a.fromX) * e;
                    cube.rotation.y = a.fromY + (a.toY - a.fromY) * e;
                    if (k >= 1) { die.anim = null; }
                }
                renderer.render(scene, camera);
                requestAnimationFrame(frame);
            };
            requestAnimationFrame(frame);
        }

        export function die_roll(x, y, duration_ms) {
            if (!die) { return; }
            const c = die.cube;
            const turns = 2 * Math.PI * (2 + Math.floor(Math.random() * 2));
            die.anim = {
                start: performance.now(), duration: duration_ms,
                fromX: c.rotation.x % (2 * Math.PI), fromY: c.rotation.y % (2 * Math.PI),
                toX: x + turns, toY: y + turns,
            };
        }

        export function die_resize() {
            if (!die) { return; }
            const w = die.container.clientWidth, h = die.container.clientHeight;
            if (w === 0 || h === 0) { return; }
            die.camera.aspect = w / h;
            die.camera.updateProjectionMatrix();
            die.renderer.setSize(w, h);
        }

        export function die_update_faces(values) {
            if (!die) { return; }
            die.cube.material.forEach((m, i) => {
                if (m.map) { m.map.dispose(); }
                m.map = faceTexture(die.THREE, values[i]);
                m.needsUpdate = true;
            });
        }

        export function show_error_banner(message, ms) {
            const el = document.getElementById('error-banner');
            if (!el) { return; }
            el.textContent = message;
            el.classList.remove('hidden');
            setTimeout(() => el.classList.add('hidden'), ms);
        }
    ")]
    extern "C" {
        #[wasm_bindgen(catch)]
        fn die_init(container_id: &str, values: &[u32]) -> Result<(), JsValue>;
        fn die_roll(x: f32, y: f32, duration_ms: f32);
        fn die_update_faces(values: &[u32]);
        fn die_resize();
        pub fn show_error_banner(message: &str, ms: u32);
    }

    /// three.js die behind the presenter port
    struct ThreeDie {
        faces: DieFaces,
    }

    impl ThreeDie {
        fn new(faces: DieFaces) -> Result<Self, InitError> {
            die_init("die-container", &faces.values()).map_err(|e| {
                InitError::RendererUnavailable {
                    reason: e.as_string().unwrap_or_else(|| format!("{e:?}")),
                }
            })?;
            Ok(Self { faces })
        }
    }

    impl DiePresenter for ThreeDie {
        fn current_face_values(&self) -> DieFaces {
            self.faces
        }

        fn request_roll(&mut self, target: Option<u32>, duration_ms: f32) {
            let face = match target {
                Some(value) => self.faces.landing_face(value),
                None => {
                    let i = (js_sys::Math::random() * FaceId::ALL.len() as f64) as usize;
                    FaceId::ALL[i.min(FaceId::ALL.len() - 1)]
                }
            };
            let (x, y) = face.orientation();
            die_roll(x, y, duration_ms);
        }

        fn apply_face_value_update(&mut self, faces: DieFaces) {
            self.faces = faces;
            die_update_faces(&faces.values());
        }

        /// Match the camera and drawing buffer to the container's new size
        fn resize(&mut self) {
            die_resize();
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        clock: FixedClock,
        input: TickInput,
        die: ThreeDie,
        renderer: CanvasRenderer,
    }

    impl Game {
        /// Run simulation ticks for this frame and hand events to the die
        fn update(&mut self, time: f64) {
            let steps = self.clock.advance_to(time);
            for _ in 0..steps {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT_MS);

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            let events = self.state.drain_events();
            dispatch_events(&events, &mut self.die);
            for event in &events {
                match event {
                    GameEvent::LevelUp { options, .. } => show_upgrade_modal(options),
                    GameEvent::GameOver { wave } => show_game_over(*wave),
                    _ => {}
                }
            }
        }

        fn render(&self) {
            self.renderer.render(&DrawList::from_state(&self.state));
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else {
                return;
            };
            let hud = HudSnapshot::from_state(&self.state);

            set_text(&document, "hud-wave", &hud.wave.to_string());
            set_text(&document, "hud-enemies", &hud.enemies.to_string());
            set_text(&document, "hud-hp", &hud.hp_text());
            set_text(&document, "hud-level", &hud.level.to_string());
            set_text(&document, "hud-xp", &hud.xp_text());
            set_text(&document, "hud-roll", &hud.countdown_text());
            set_text(&document, "pause-btn", hud.pause_label());
            set_bar(&document, "hp-bar", hud.hp_ratio());
            set_bar(&document, "xp-bar", hud.xp_ratio());
        }

        fn resize(&mut self, dpr: f64) {
            let (width, height) = BrowserViewport.size();
            self.renderer.resize(width, height, dpr);
            handle_resize(&mut self.state, &BrowserViewport, &mut self.die);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window().and_then(|w| w.document())
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_bar(document: &Document, id: &str, ratio: f32) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el
                .style()
                .set_property("width", &format!("{:.1}%", ratio * 100.0));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = if hidden {
                el.class_list().add_1("hidden")
            } else {
                el.class_list().remove_1("hidden")
            };
        }
    }

    fn show_upgrade_modal(options: &[Upgrade; 3]) {
        let Some(document) = document() else {
            return;
        };
        for upgrade in options {
            set_text(&document, &format!("upgrade-{}", upgrade.id()), upgrade.label());
        }
        set_hidden(&document, "upgrade-modal", false);
    }

    fn show_game_over(wave: u32) {
        let Some(document) = document() else {
            return;
        };
        set_text(&document, "final-wave", &wave.to_string());
        set_hidden(&document, "game-over", false);
    }

    fn required_element(document: &Document, id: &'static str) -> Result<web_sys::Element, InitError> {
        document
            .get_element_by_id(id)
            .ok_or(InitError::MissingElement { id })
    }

    pub fn run() -> Result<(), InitError> {
        log::info!("Dice Defense starting...");

        let tuning = Tuning::load()?;

        let window = web_sys::window().ok_or_else(|| InitError::RendererUnavailable {
            reason: "no window".into(),
        })?;
        let document = window.document().ok_or(InitError::MissingElement { id: "document" })?;

        let canvas: HtmlCanvasElement = required_element(&document, "canvas")?
            .dyn_into()
            .map_err(|_| InitError::MissingElement { id: "canvas" })?;

        // Size the canvas to the page
        let dpr = window.device_pixel_ratio();
        let (width, height) = BrowserViewport.size();
        let mut renderer = CanvasRenderer::new(canvas)?;
        renderer.resize(width, height, dpr);

        let seed = js_sys::Date::now() as u64;
        let area = BrowserViewport.play_area(tuning.ui_strip_height);
        let state = GameState::start(seed, tuning, area);
        let die = ThreeDie::new(state.faces)?;

        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            clock: FixedClock::new(),
            input: TickInput::default(),
            die,
            renderer,
        }));

        set_hidden(&document, "loading", true);
        set_hidden(&document, "hud", false);

        setup_input_handlers(game.clone());
        setup_pause_button(game.clone());
        setup_upgrade_modal(game.clone());
        setup_resize(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Dice Defense running!");
        Ok(())
    }

    /// Browser window as seen by the simulation
    struct BrowserViewport;

    impl Viewport for BrowserViewport {
        fn size(&self) -> (f32, f32) {
            let Some(window) = web_sys::window() else {
                return (0.0, 0.0);
            };
            let w = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let h = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            (w as f32, h as f32)
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                // Visual-only spin; does not touch the simulation
                " " => {
                    event.prevent_default();
                    let duration = g.state.tuning.roll_duration_ms;
                    g.die.request_roll(None, duration);
                }
                "Escape" | "p" | "P" => g.input.pause = true,
                "1" | "2" | "3" if g.state.is_leveling_up() => {
                    let id = event.key().parse::<u8>().unwrap_or_default();
                    pick_upgrade(&mut g, id);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn pick_upgrade(game: &mut Game, id: u8) {
        match Upgrade::from_id(id) {
            Some(upgrade) => {
                game.input.upgrade = Some(upgrade);
                if let Some(document) = document() {
                    set_hidden(&document, "upgrade-modal", true);
                }
            }
            None => log::warn!("Ignoring unknown upgrade option {}", id),
        }
    }

    fn setup_pause_button(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };
        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.pause = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_upgrade_modal(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else {
            return;
        };
        for upgrade in Upgrade::ALL {
            let id = upgrade.id();
            if let Some(btn) = document.get_element_by_id(&format!("upgrade-{id}")) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    pick_upgrade(&mut game.borrow_mut(), id);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            game.borrow_mut().resize(window.device_pixel_ratio());
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Playing {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
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
        let over = {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
            g.state.is_game_over()
        };

        // Game over is terminal; a page reload starts a new run
        if !over {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {}", e);
        wasm_game::show_error_banner(&e.to_string(), wasm_game::ERROR_BANNER_MS);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dice Defense (native) starting...");
    log::info!("Native mode runs a headless autoplay session - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    match autoplay::run(seed, autoplay::MAX_TICKS) {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless session: the die never moves, upgrades are picked automatically
#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use dice_defense::consts::{SIM_DT_MS, SIM_HZ};
    use dice_defense::platform::{FixedViewport, NullDie, Viewport, dispatch_events};
    use dice_defense::sim::{GameEvent, GameState, TickInput, tick};
    use dice_defense::{InitError, Tuning};

    /// Ten simulated minutes
    pub const MAX_TICKS: u64 = 10 * 60 * SIM_HZ as u64;

    pub fn run(seed: u64, max_ticks: u64) -> Result<String, InitError> {
        let tuning = Tuning::load()?;
        let viewport = FixedViewport {
            width: 1280.0,
            height: 800.0,
        };
        let area = viewport.play_area(tuning.ui_strip_height);
        let mut state = GameState::start(seed, tuning, area);
        let mut die = NullDie {
            faces: state.faces,
            ..NullDie::default()
        };
        let mut input = TickInput::default();

        log::info!("Autoplay with seed {}", seed);

        for _ in 0..max_ticks {
            tick(&mut state, &input, SIM_DT_MS);
            input = TickInput::default();

            let events = state.drain_events();
            dispatch_events(&events, &mut die);
            for event in &events {
                if let GameEvent::LevelUp { level, options } = event {
                    // Rotate through the options so every kind gets exercised
                    let pick = options[*level as usize % options.len()];
                    log::info!("Autoplay picks {} at level {}", pick.label(), level);
                    input.upgrade = Some(pick);
                }
            }

            if state.is_game_over() {
                break;
            }
        }

        Ok(format!(
            "seed {}: wave {}, level {}, hp {}/{}, faces {:?}, {} rolls in {:.1}s",
            seed,
            state.wave,
            state.level,
            state.hp.max(0),
            state.max_hp,
            die.faces.values(),
            die.rolls.len(),
            state.time_ticks as f32 * SIM_DT_MS / 1000.0,
        ))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_autoplay_runs_one_minute() {
            let summary = run(7, 60 * SIM_HZ as u64).unwrap();
            assert!(summary.starts_with("seed 7: wave "));
            assert!(summary.contains(" rolls in "));
        }
    }
}
