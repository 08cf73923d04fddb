pub mod runner;

pub use orrery;
pub use runner::SessionRunner;

use wasm_bindgen::prelude::*;

/// Generate all `#[wasm_bindgen]` exports for an orrery session.
///
/// Generates:
/// - `thread_local!` storage for the SessionRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, input handlers, UI controls,
///   hover popover, buffer accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// orrery_web::export_session!("my-orrery");
/// ```
///
/// The invoking crate needs `wasm-bindgen`, `js-sys`, `console_log`,
/// `console_error_panic_hook` and `log` as dependencies.
#[macro_export]
macro_rules! export_session {
    ($name:literal) => {
        use std::cell::RefCell;
        use $crate::orrery::InputEvent;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SessionRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SessionRunner) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Session not initialized. Call session_init() first.");
                f(runner)
            })
        }

        fn install(runner: $crate::SessionRunner) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
        }

        fn init_logging() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);
        }

        /// Start a session over the built-in solar system.
        #[wasm_bindgen]
        pub fn session_init() -> Result<(), JsValue> {
            session_init_with_config("")
        }

        /// Start a session from JSON config (see `SessionConfig`).
        #[wasm_bindgen]
        pub fn session_init_with_config(json: &str) -> Result<(), JsValue> {
            init_logging();
            match $crate::SessionRunner::from_json(json) {
                Ok(runner) => {
                    install(runner);
                    log::info!("{}: initialized", $name);
                    Ok(())
                }
                Err(e) => {
                    log::error!("{}: {}", $name, e);
                    Err(JsValue::from_str(&e))
                }
            }
        }

        #[wasm_bindgen]
        pub fn session_tick(dt: f64) {
            with_runner(|r| r.tick(dt));
        }

        /// Tick using the browser clock instead of a host-supplied delta.
        #[wasm_bindgen]
        pub fn session_tick_now() {
            let now = js_sys::Date::now() / 1000.0;
            with_runner(|r| r.tick_at(now));
        }

        #[wasm_bindgen]
        pub fn session_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn session_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn session_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn session_pointer_leave() {
            with_runner(|r| r.push_input(InputEvent::PointerLeave));
        }

        #[wasm_bindgen]
        pub fn session_wheel(delta_y: f32) {
            with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
        }

        #[wasm_bindgen]
        pub fn session_resize(width: f32, height: f32) {
            with_runner(|r| r.push_input(InputEvent::Resize { width, height }));
        }

        // ---- UI controls ----

        #[wasm_bindgen]
        pub fn session_set_speed(multiplier: f64) {
            with_runner(|r| r.set_speed(multiplier));
        }

        #[wasm_bindgen]
        pub fn session_set_orbit_lines_visible(visible: bool) {
            with_runner(|r| r.set_orbit_lines_visible(visible));
        }

        // ---- Hover popover ----

        #[wasm_bindgen]
        pub fn session_hover_name() -> Option<String> {
            with_runner(|r| r.hover_name())
        }

        #[wasm_bindgen]
        pub fn session_hover_description() -> Option<String> {
            with_runner(|r| r.hover_description())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        #[wasm_bindgen]
        pub fn get_bodies_ptr() -> *const f32 {
            with_runner(|r| r.bodies_ptr())
        }

        #[wasm_bindgen]
        pub fn get_body_count() -> u32 {
            with_runner(|r| r.body_count())
        }

        #[wasm_bindgen]
        pub fn get_lines_ptr() -> *const f32 {
            with_runner(|r| r.lines_ptr())
        }

        #[wasm_bindgen]
        pub fn get_line_vertex_count() -> u32 {
            with_runner(|r| r.line_vertex_count())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_bodies() -> u32 {
            with_runner(|r| r.max_bodies())
        }

        #[wasm_bindgen]
        pub fn get_max_line_vertices() -> u32 {
            with_runner(|r| r.max_line_vertices())
        }
    };
}

export_session!("orrery");
