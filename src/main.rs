//! Neon Invaders entry point
//!
//! The browser build wires the canvas, keyboard, DOM HUD and audio to `Game`.
//! The native build runs a headless autopilot session and prints the final HUD.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use neon_invaders::audio::AudioManager;
    use neon_invaders::consts::*;
    use neon_invaders::renderer::{Presenter, SpriteBank};
    use neon_invaders::sim::GameEvent;
    use neon_invaders::{Error, Game, HudSnapshot, Settings};

    /// Game plus its browser-side collaborators
    struct Host {
        game: Game,
        presenter: Option<Presenter>,
        audio: AudioManager,
        sprites: SpriteBank,
        /// Last HUD written to the DOM
        shown_hud: Option<HudSnapshot>,
    }

    impl Host {
        fn tick(&mut self, time: f64) {
            if self.game.frame(time, &self.sprites) {
                self.present();
            }

            for event in self.game.drain_events() {
                match event {
                    GameEvent::Audio(cue) => self.audio.play(cue),
                    GameEvent::LevelUp { level, bonus } => {
                        log::debug!("Level {} (bonus {})", level, bonus)
                    }
                    GameEvent::AlienDestroyed { .. } | GameEvent::GameOver { .. } => {}
                }
            }

            self.update_hud();
        }

        fn present(&mut self) {
            let Some(presenter) = &mut self.presenter else {
                return;
            };
            match presenter.present(self.game.frame_buffer()) {
                Ok(()) => {}
                Err(Error::Surface(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                    log::warn!("Surface lost, reconfiguring");
                    let (w, h) = presenter.size;
                    presenter.resize(w, h);
                }
                Err(e) => log::warn!("Present failed: {}", e),
            }
        }

        fn update_hud(&mut self) {
            let hud = self.game.hud();
            if self.shown_hud == Some(hud) {
                return;
            }
            self.shown_hud = Some(hud);

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            set_text(&document, "score", &hud.score.to_string());
            set_text(&document, "level", &hud.level.to_string());
            if let Some(final_score) = hud.final_score {
                set_text(&document, "final-score", &final_score.to_string());
            }
            if let Some(overlay) = document.get_element_by_id("game-over-overlay") {
                let classes = overlay.class_list();
                let _ = if hud.game_over {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Optional `<script id="settings" type="application/json">` block
    fn read_settings(document: &Document) -> Settings {
        let Some(json) = document
            .get_element_by_id("settings")
            .and_then(|el| el.text_content())
        else {
            return Settings::default();
        };
        Settings::from_json(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring settings block: {}", e);
            Settings::default()
        })
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Neon Invaders starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width().max(1) as f64) * dpr) as u32;
        let height = ((canvas.client_height().max(1) as f64) * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = read_settings(&document);
        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host {
            game: Game::new(seed, settings.clone()),
            presenter: None,
            audio: AudioManager::new(&settings),
            sprites: SpriteBank::builtin(),
            shown_hud: None,
        }));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let frame_size = (BOARD_WIDTH as u32, BOARD_HEIGHT as u32);
                        match Presenter::new(surface, &adapter, width, height, frame_size).await {
                            Ok(presenter) => host.borrow_mut().presenter = Some(presenter),
                            Err(e) => log::warn!("Presenter unavailable: {}", e),
                        }
                    }
                    Err(e) => log::warn!("No GPU adapter: {}", e),
                }
            }
            Err(e) => log::warn!("Failed to create surface: {}", e),
        }

        setup_keyboard(host.clone());
        setup_restart_button(host.clone());

        request_animation_frame(host);
        log::info!("Neon Invaders running!");
    }

    /// Keys the page should not scroll on
    fn is_game_key(code: &str) -> bool {
        matches!(code, "Space" | "ArrowLeft" | "ArrowRight")
    }

    fn setup_keyboard(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if is_game_key(&code) {
                    event.prevent_default();
                }
                let mut h = host.borrow_mut();
                h.audio.resume();
                h.game.key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                host.borrow_mut().game.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(host: Rc<RefCell<Host>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut h = host.borrow_mut();
                h.game.restart(seed);
                h.update_hud();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        host.borrow_mut().tick(time);
        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_host::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames simulated by the headless run (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use neon_invaders::renderer::SpriteBank;
    use neon_invaders::sim::{GameEvent, autopilot_input};
    use neon_invaders::{Game, Settings};

    env_logger::init();
    log::info!("Neon Invaders (native) starting headless autopilot run...");

    let settings = match std::env::args().nth(1) {
        Some(path) => load_settings(&path),
        None => Settings::default(),
    };

    let sprites = SpriteBank::builtin();
    let mut game = Game::new(0x5EED, settings);
    let mut frames = 0;
    let mut kills = 0;
    while frames < HEADLESS_FRAMES {
        let input = autopilot_input(game.state());
        if !game.advance(&input, 1.0, &sprites) {
            break;
        }
        frames += 1;
        for event in game.drain_events() {
            match event {
                GameEvent::AlienDestroyed { .. } => kills += 1,
                GameEvent::LevelUp { level, bonus } => {
                    log::info!("Frame {}: level {} (+{})", frames, level, bonus)
                }
                _ => {}
            }
        }
    }
    log::info!("Ran {} frames, {} aliens destroyed", frames, kills);

    match serde_json::to_string_pretty(&game.hud()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize HUD: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> neon_invaders::Settings {
    use neon_invaders::Settings;

    let loaded = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| Settings::from_json(&json).map_err(|e| e.to_string()));
    match loaded {
        Ok(settings) => {
            log::info!("Loaded settings from {}", path);
            settings
        }
        Err(e) => {
            log::warn!("Using default settings, could not load {}: {}", path, e);
            Settings::default()
        }
    }
}
