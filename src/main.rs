//! Archimedes π entry point
//!
//! On the web: sets up the canvas, WebGPU and DOM controls, then runs the
//! animation from requestAnimationFrame. On native: runs an auto-play session
//! headlessly and prints the final state.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement};

    use archimedes_pi::renderer::LineRenderState;
    use archimedes_pi::sim::{Command, Phase, SimEvent, TickInput};
    use archimedes_pi::ui::{HudModel, command_for_key};
    use archimedes_pi::{Driver, Settings};

    /// App instance holding all state
    struct App {
        driver: Driver,
        render_state: Option<LineRenderState>,
        /// Commands queued by input callbacks, drained each frame
        pending: Vec<Command>,
        last_time: f64,
        start_time: f64,
        /// Last HUD written to the DOM
        last_hud: Option<HudModel>,
    }

    impl App {
        fn new(settings: &Settings) -> Self {
            Self {
                driver: Driver::new(settings),
                render_state: None,
                pending: Vec::new(),
                last_time: 0.0,
                start_time: 0.0,
                last_hud: None,
            }
        }

        fn update(&mut self, time: f64) {
            if self.start_time == 0.0 {
                self.start_time = time;
            }
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;

            let input = TickInput {
                dt,
                elapsed: ((time - self.start_time) / 1000.0) as f32,
                commands: std::mem::take(&mut self.pending),
            };

            for event in self.driver.update(&input) {
                if let SimEvent::PhaseChanged { to, .. } = event {
                    log::info!("Entered {:?} phase", to);
                }
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.driver.scene()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Copy the HUD model into the DOM when it changed
        fn update_hud(&mut self) {
            let hud = self.driver.hud();
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "phase-indicator", hud.phase_label);
            set_text(&document, "pi-value", &hud.pi_value);
            set_text(&document, "sides-value", &hud.sides.to_string());
            set_text(&document, "error-value", &hud.error);
            if let Some(el) = document.get_element_by_id("error-value") {
                let _ = el.set_attribute("style", &format!("color: {}", hud.accuracy.css_color()));
            }

            if let Some(el) = document.get_element_by_id("revolution-stat") {
                let _ = el.class_list().toggle_with_force("hidden", hud.rotation.is_none());
            }
            if let Some(rotation) = &hud.rotation {
                set_text(&document, "revolution-value", rotation);
            }
            set_text(&document, "formula-display", &hud.formulas.join("\n"));

            if let Some(message) = hud.final_message {
                set_text(&document, "final-message", message);
            }
            if let Some(el) = document.get_element_by_id("final-text") {
                let _ = el.class_list().toggle_with_force("visible", hud.final_message.is_some());
            }
            set_text(&document, "play-btn", if hud.auto_play { "Pause" } else { "Play" });

            // Keep sliders in step with auto-play
            let state = self.driver.state();
            set_input_value(&document, "sides-input", &state.rounded_sides().to_string());
            set_input_value(&document, "progress-input", &format!("{:.1}", state.revolution_progress()));
            set_input_checked(&document, "autoplay-input", state.auto_play());
            set_input_checked(&document, "rotate-input", self.driver.scene().camera.auto_rotate);

            let next_disabled = match state.phase() {
                Phase::Polygon => false,
                Phase::Revolution => !state.revolution_complete(),
                Phase::Complete => true,
            };
            if let Some(el) = document.get_element_by_id("next-btn") {
                let _ = el.toggle_attribute_with_force("disabled", next_disabled);
            }

            self.last_hud = Some(hud);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn input_element(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn set_input_value(document: &Document, id: &str, value: &str) {
        if let Some(input) = input_element(document, id) {
            input.set_value(value);
        }
    }

    fn set_input_checked(document: &Document, id: &str, checked: bool) {
        if let Some(input) = input_element(document, id) {
            input.set_checked(checked);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Archimedes π starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let app = Rc::new(RefCell::new(App::new(&settings)));
        apply_settings_to_controls(&document, &settings);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {}", e);
                return;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match LineRenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_keyboard(app.clone());
        setup_buttons(&document, app.clone());
        setup_controls(&document, app.clone());
        setup_resize(canvas, app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.class_list().remove_1("hidden");
        }

        request_animation_frame(app);

        log::info!("Archimedes π running!");
    }

    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    fn apply_settings_to_controls(document: &Document, settings: &Settings) {
        set_input_value(document, "radius-input", &settings.radius.to_string());
        set_input_value(document, "speed-input", &settings.speed.to_string());
        set_input_checked(document, "axis-input", settings.show_axis);
        set_input_checked(document, "grid-input", settings.show_grid);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(command) = command_for_key(&event.key()) {
                // Space and arrows would otherwise scroll the page
                event.prevent_default();
                app.borrow_mut().pending.push(command);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, app: Rc<RefCell<App>>) {
        let buttons = [
            ("play-btn", Command::TogglePlay),
            ("next-btn", Command::Advance),
            ("reset-btn", Command::Reset),
        ];
        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{}", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().pending.push(command);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Range and checkbox inputs of the control panel
    fn setup_controls(document: &Document, app: Rc<RefCell<App>>) {
        let sliders: [(&str, fn(f32) -> Command); 4] = [
            ("sides-input", Command::SetSides),
            ("radius-input", Command::SetRadius),
            ("speed-input", Command::SetSpeed),
            ("progress-input", Command::SetRevolutionProgress),
        ];
        for (id, make) in sliders {
            let Some(input) = input_element(document, id) else {
                continue;
            };
            let app = app.clone();
            let source = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                match source.value().parse::<f32>() {
                    Ok(value) => app.borrow_mut().pending.push(make(value)),
                    Err(_) => log::warn!("Ignoring non-numeric input '{}'", source.value()),
                }
            });
            let _ = input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let toggles: [(&str, fn(bool) -> Command); 4] = [
            ("axis-input", Command::ToggleAxis),
            ("grid-input", Command::ToggleGrid),
            ("rotate-input", Command::SetAutoRotate),
            ("autoplay-input", Command::SetAutoPlay),
        ];
        for (id, make) in toggles {
            let Some(input) = input_element(document, id) else {
                continue;
            };
            let app = app.clone();
            let source = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().pending.push(make(source.checked()));
            });
            let _ = input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = app.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            a.update(time);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Archimedes π (native) starting...");
    log::info!("Rendering needs a browser - run with `trunk serve` for the web version");

    let settings = match std::env::args().nth(1) {
        Some(path) => match archimedes_pi::Settings::load_from_path(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path);
                settings
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                archimedes_pi::Settings::default()
            }
        },
        None => archimedes_pi::Settings::default(),
    };

    headless::run(&settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use archimedes_pi::sim::{Command, Phase, SimEvent, TickInput};
    use archimedes_pi::{Driver, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;
    const REPORT_EVERY: u32 = 60;

    /// Auto-play from the first polygon to the finished sphere
    pub fn run(settings: &Settings) {
        let mut driver = Driver::new(settings);
        driver.execute(Command::TogglePlay);

        let mut elapsed = 0.0;
        let mut frames = 0;
        while driver.state().phase() != Phase::Complete && frames < MAX_FRAMES {
            elapsed += FRAME_DT;
            frames += 1;

            let input = TickInput {
                dt: FRAME_DT,
                elapsed,
                commands: Vec::new(),
            };
            for event in driver.update(&input) {
                if let SimEvent::PhaseChanged { from, to } = event {
                    log::info!("{:?} -> {:?} at {:.2}s", from, to, elapsed);
                }
            }

            if frames % REPORT_EVERY == 0 {
                let hud = driver.hud();
                match driver.state().phase() {
                    Phase::Polygon => log::info!(
                        "sides {:>3}  π ≈ {}  error {}",
                        hud.sides,
                        hud.pi_value,
                        hud.error
                    ),
                    _ => log::info!("rotation {}", hud.rotation.unwrap_or_default()),
                }
            }
        }

        if driver.state().phase() != Phase::Complete {
            log::warn!("Stopped after {} frames without completing", frames);
        }

        let snapshot = serde_json::json!({
            "frames": frames,
            "elapsed": elapsed,
            "state": driver.state(),
            "hud": driver.hud(),
        });
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize state: {}", e),
        }
    }
}
