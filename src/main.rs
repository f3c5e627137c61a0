//! Flappy Pipes entry point
//!
//! Handles platform-specific initialization and wires input to the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Display;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent, Window};

    use flappy_pipes::platform::AnimationFrameScheduler;
    use flappy_pipes::renderer::{RenderState, build_scene};
    use flappy_pipes::{GameClock, GameConfig, Snapshot, Surface};

    type Clock = GameClock<AnimationFrameScheduler>;
    type SharedRender = Rc<RefCell<Option<RenderState>>>;

    fn js_err(e: impl Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    /// Window inner size in CSS pixels
    fn window_size(window: &Window) -> Result<(u32, u32), JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        Ok((width as u32, height as u32))
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Draw one snapshot, recovering from a lost surface
    fn draw(render: &SharedRender, snapshot: &Snapshot<'_>) {
        if let Some(render_state) = render.borrow_mut().as_mut() {
            match render_state.render(&build_scene(snapshot)) {
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

    /// Config passed in the page URL as `?config=<url-encoded JSON>`
    fn query_override(window: &Window) -> Option<GameConfig> {
        let search = window.location().search().ok()?;
        let raw = search
            .trim_start_matches('?')
            .split('&')
            .find_map(|pair| pair.strip_prefix("config="))?;
        let json = js_sys::decode_uri_component(raw).ok()?.as_string()?;
        match GameConfig::from_json(&json) {
            Ok(config) => {
                log::info!("Using config from URL");
                Some(config)
            }
            Err(e) => {
                log::warn!("Ignoring URL config: {}", e);
                None
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, flappy_pipes::renderer::RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Flappy Pipes starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()?;

        let (width, height) = window_size(&window)?;
        canvas.set_width(width);
        canvas.set_height(height);

        // `?config={...}` overrides are remembered for later visits
        let config = match query_override(&window) {
            Some(config) => {
                config.save();
                config
            }
            None => GameConfig::load(),
        };
        let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let render: SharedRender = Rc::new(RefCell::new(None));
        match init_renderer(&canvas, width, height).await {
            Ok(render_state) => *render.borrow_mut() = Some(render_state),
            Err(e) => log::error!("Rendering disabled: {}", e),
        }

        let scheduler = AnimationFrameScheduler::new().map_err(js_err)?;
        let clock = Rc::new(RefCell::new(
            GameClock::new(
                config,
                Surface::new(width as f32, height as f32),
                seed,
                scheduler,
            )
            .map_err(js_err)?,
        ));
        log::info!("Game initialized with seed: {}", seed);

        // Fired animation frames go straight back into the loop
        {
            let weak = Rc::downgrade(&clock);
            clock.borrow().scheduler().set_frame_handler(move |handle| {
                if let Some(clock) = weak.upgrade() {
                    clock.borrow_mut().on_frame(handle);
                }
            });
        }

        {
            let mut c = clock.borrow_mut();

            let render_frame = Rc::clone(&render);
            c.set_render_callback(move |snapshot| draw(&render_frame, snapshot));

            let render_over = Rc::clone(&render);
            let document_over = document.clone();
            c.set_game_over_callback(move |snapshot| {
                draw(&render_over, snapshot);
                set_hidden(&document_over, "game-over", false);
                log::info!("Game over after {} ticks", snapshot.frame);
            });
        }

        setup_input_handlers(&document, &canvas, clock.clone());
        setup_resize_handler(&window, &canvas, clock.clone(), render.clone());
        setup_retry_button(&document, clock.clone());
        setup_fullscreen_button(&document);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        clock.borrow_mut().start();
        log::info!("Flappy Pipes running!");
        Ok(())
    }

    fn setup_input_handlers(document: &Document, canvas: &HtmlCanvasElement, clock: Rc<RefCell<Clock>>) {
        // Any key flaps
        {
            let clock = clock.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if !event.repeat() {
                    clock.borrow_mut().on_flap();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touching the canvas flaps
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                clock.borrow_mut().on_flap();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &Window,
        canvas: &HtmlCanvasElement,
        clock: Rc<RefCell<Clock>>,
        render: SharedRender,
    ) {
        let window_clone = window.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Ok((width, height)) = window_size(&window_clone) else {
                return;
            };
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = render.borrow_mut().as_mut() {
                render_state.resize(width, height);
            }
            clock.borrow_mut().on_resize(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_retry_button(document: &Document, clock: Rc<RefCell<Clock>>) {
        if let Some(btn) = document.get_element_by_id("retry-btn") {
            let document = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_hidden(&document, "game-over", true);
                clock.borrow_mut().on_reset();
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_fullscreen_button(document: &Document) {
        if let Some(btn) = document.get_element_by_id("fullscreen-btn") {
            let document = document.clone();
            let btn_clone = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if document.fullscreen_element().is_none() {
                    let entered = document
                        .document_element()
                        .map(|root| root.request_fullscreen());
                    match entered {
                        Some(Ok(())) => btn_clone.set_text_content(Some("Exit Full Screen")),
                        Some(Err(e)) => log::warn!("Full screen refused: {:?}", e),
                        None => {}
                    }
                } else {
                    document.exit_fullscreen();
                    btn_clone.set_text_content(Some("Full Screen"));
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::cell::Cell;
    use std::rc::Rc;

    use flappy_pipes::{ClockState, ConfigError, GameClock, GameConfig, ManualScheduler, Surface};

    /// Play one session with a simple autopilot; returns ticks survived
    pub fn run(config: GameConfig, surface: Surface, seed: u64, max_ticks: u64) -> Result<u64, ConfigError> {
        let mut clock = GameClock::new(config, surface, seed, ManualScheduler::new())?;

        let survived = Rc::new(Cell::new(0u64));
        {
            let survived = Rc::clone(&survived);
            clock.set_game_over_callback(move |snapshot| survived.set(snapshot.frame));
        }

        clock.start();
        while clock.game().frame < max_ticks {
            if should_flap(&clock) {
                clock.on_flap();
            }
            let Some(handle) = clock.scheduler_mut().next_due() else {
                break;
            };
            clock.on_frame(handle);
        }

        if clock.state() == ClockState::Running {
            log::info!("Autopilot still alive after {} ticks", max_ticks);
            clock.shutdown();
            return Ok(max_ticks);
        }
        Ok(survived.get())
    }

    /// Flap when falling below the middle of the next gap
    fn should_flap(clock: &GameClock<ManualScheduler>) -> bool {
        let game = clock.game();
        let avatar = &game.avatar;
        let height = game.surface.height;

        let target = game
            .field
            .iter()
            .find(|pipe| pipe.right() > avatar.pos.x)
            .map(|pipe| pipe.top + pipe.gap(height) / 2.0)
            .unwrap_or(height / 2.0);

        avatar.velocity >= 0.0 && avatar.pos.y + avatar.height / 2.0 > target + 10.0
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), flappy_pipes::ConfigError> {
    env_logger::init();
    log::info!("Flappy Pipes (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let config = flappy_pipes::GameConfig::load();
    let seed = config.seed.unwrap_or(2024);
    let survived = headless::run(config, flappy_pipes::Surface::new(800.0, 600.0), seed, 20_000)?;
    println!("Autopilot survived {} ticks", survived);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
