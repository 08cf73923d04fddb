// api/session.rs
//
// Frame-driven controller that ties the pieces together. The host owns the
// loop and calls `frame` once per display refresh; everything inside runs
// synchronously on that call.

use glam::DVec2;
use serde::Deserialize;

use crate::api::types::BodyIdentity;
use crate::core::presentation::{PresentationState, MAX_SPEED, MIN_SPEED};
use crate::core::time::{FrameClock, DEFAULT_MAX_FRAME_DT};
use crate::hierarchy::{SolarSystem, ORBIT_SEGMENTS};
use crate::input::queue::{InputEvent, InputQueue};
use crate::picking::{resolve, screen_to_ndc};
use crate::registry::{Registry, RegistryError};
use crate::renderer::camera::{CameraConfig, OrbitCamera};
use crate::renderer::instance::RenderBuffer;
use crate::renderer::traits::{DrawTiming, FrameData, Renderer};
use crate::systems::animation::step;
use crate::systems::render::build_render_buffer;

/// Wheel pixels per zoom step. One notch on most mice.
const WHEEL_PIXELS_PER_STEP: f64 = 100.0;

/// Configuration for a session, all fields optional in JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    /// Registry JSON. `None` uses the built-in solar system.
    pub registry: Option<serde_json::Value>,
    /// Longest frame the clock lets through, in seconds (default: 0.1).
    pub max_frame_dt: f64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub initial_speed: f64,
    pub orbit_lines_visible: bool,
    /// Segments per orbit loop (default: 128).
    pub orbit_segments: usize,
    /// Body + ring instance capacity of the shared buffer (default: 64).
    pub max_bodies: usize,
    /// Orbit-line vertex capacity of the shared buffer (default: 8192).
    pub max_line_vertices: usize,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub camera: CameraConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            registry: None,
            max_frame_dt: DEFAULT_MAX_FRAME_DT,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            initial_speed: 1.0,
            orbit_lines_visible: true,
            orbit_segments: ORBIT_SEGMENTS,
            max_bodies: 64,
            max_line_vertices: 8192,
            viewport_width: 1280.0,
            viewport_height: 720.0,
            camera: CameraConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// One running orrery: the animated hierarchy plus everything the UI drives.
pub struct Session {
    system: SolarSystem,
    presentation: PresentationState,
    camera: OrbitCamera,
    clock: FrameClock,
    input: InputQueue,
    /// Last pointer position in pixels, `None` once it leaves the canvas.
    pointer: Option<DVec2>,
    dragging: bool,
    hover: Option<BodyIdentity>,
    render_buffer: RenderBuffer,
    frame_count: u64,
    config: SessionConfig,
}

impl Session {
    /// Build a session from config. The registry comes from `config.registry`
    /// when present, otherwise the built-in solar system.
    pub fn new(config: SessionConfig) -> Result<Self, RegistryError> {
        let registry = match &config.registry {
            Some(value) => Registry::from_value(value.clone())?,
            None => Registry::solar_system()?,
        };
        Self::with_registry(&registry, config)
    }

    pub fn with_registry(registry: &Registry, config: SessionConfig) -> Result<Self, RegistryError> {
        let system = SolarSystem::build_with_segments(registry, config.orbit_segments)?;

        let mut presentation = PresentationState::new().with_speed_range(config.min_speed, config.max_speed);
        presentation.set_speed_multiplier(config.initial_speed);
        presentation.set_orbit_lines_visible(config.orbit_lines_visible);

        let camera = OrbitCamera::from_config(&config.camera, config.viewport_width, config.viewport_height);

        log::info!(
            "orrery: session ready, {} bodies, speed {}x, orbit lines {}",
            system.body_count(),
            presentation.speed_multiplier(),
            if presentation.orbit_lines_visible() { "on" } else { "off" }
        );

        let mut session = Self {
            system,
            presentation,
            camera,
            clock: FrameClock::new(config.max_frame_dt),
            input: InputQueue::new(),
            pointer: None,
            dragging: false,
            hover: None,
            render_buffer: RenderBuffer::with_capacity(config.max_bodies, config.max_line_vertices),
            frame_count: 0,
            config,
        };
        session.rebuild_render_buffer();
        Ok(session)
    }

    /// Queue a host event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame of `dt` seconds: apply queued input, advance the
    /// animation, propagate, update the camera, resolve hover, build the
    /// render buffer.
    pub fn frame(&mut self, dt: f64) {
        for event in self.input.drain() {
            self.apply(event);
        }

        let dt = self.clock.clamp(dt);
        step(&mut self.system, dt, self.presentation.speed_multiplier());
        self.system.graph_mut().propagate();
        self.camera.update(dt);

        self.hover = self.resolve_hover();
        self.rebuild_render_buffer();
        self.frame_count += 1;
    }

    /// Run one frame timed by a host timestamp in seconds.
    pub fn frame_at(&mut self, now_seconds: f64) {
        let dt = self.clock.tick_at(now_seconds);
        self.frame(dt);
    }

    fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => {
                let position = DVec2::new(x as f64, y as f64);
                if let (true, Some(last)) = (self.dragging, self.pointer) {
                    let delta = position - last;
                    self.camera.orbit(delta.x, delta.y);
                }
                self.pointer = Some(position);
            }
            InputEvent::PointerDown { x, y } => {
                self.dragging = true;
                self.pointer = Some(DVec2::new(x as f64, y as f64));
            }
            InputEvent::PointerUp { x, y } => {
                self.dragging = false;
                self.pointer = Some(DVec2::new(x as f64, y as f64));
            }
            InputEvent::PointerLeave => {
                self.dragging = false;
                self.pointer = None;
            }
            InputEvent::Wheel { delta_y } => {
                self.camera.zoom(-(delta_y as f64) / WHEEL_PIXELS_PER_STEP);
            }
            InputEvent::Resize { width, height } => {
                self.camera.resize(width as f64, height as f64);
            }
            InputEvent::SetSpeed { multiplier } => {
                self.presentation.set_speed_multiplier(multiplier as f64);
            }
            InputEvent::SetOrbitLinesVisible { visible } => {
                self.presentation.set_orbit_lines_visible(visible);
            }
        }
    }

    fn resolve_hover(&self) -> Option<BodyIdentity> {
        let pointer = self.pointer?;
        let viewport = self.camera.viewport();
        let ndc = screen_to_ndc(pointer.x, pointer.y, viewport.x, viewport.y)?;
        resolve(&self.system, &self.camera, ndc)
    }

    fn rebuild_render_buffer(&mut self) {
        let hovered = self.hover.as_ref().map(|h| h.name.as_str());
        build_render_buffer(&self.system, &self.presentation, hovered, &mut self.render_buffer);
    }

    /// Hand the last built frame to a native renderer.
    pub fn render<R: Renderer>(&self, renderer: &mut R) -> DrawTiming {
        let frame = FrameData {
            bodies: &self.render_buffer.bodies,
            lines: &self.render_buffer.lines,
            camera: self.camera.uniform(),
            hover: self.hover.as_ref(),
            pointer: self.pointer.map(|p| p.as_vec2().to_array()),
        };
        renderer.draw(&frame)
    }

    // ---- UI controls. Both take effect on the next frame. ----

    pub fn set_speed_multiplier(&mut self, value: f64) {
        self.presentation.set_speed_multiplier(value);
    }

    pub fn set_orbit_lines_visible(&mut self, visible: bool) {
        self.presentation.set_orbit_lines_visible(visible);
    }

    // ---- Read access ----

    /// Identity under the pointer as of the last frame.
    pub fn hover(&self) -> Option<&BodyIdentity> {
        self.hover.as_ref()
    }

    pub fn pointer(&self) -> Option<DVec2> {
        self.pointer
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn presentation(&self) -> &PresentationState {
        &self.presentation
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(SessionConfig::default()).unwrap()
    }

    #[test]
    fn default_session_loads_the_solar_system() {
        let s = session();
        assert_eq!(s.system().body_count(), 19);
        assert_eq!(s.presentation().speed_multiplier(), 1.0);
        // Render buffer is ready before the first frame.
        assert_eq!(s.render_buffer().body_count(), 20);
    }

    #[test]
    fn frame_advances_by_clamped_dt() {
        let mut s = session();
        let earth = s.system().find("Earth").unwrap();
        s.frame(5.0);
        let angle = s.system().orbit_angle(earth).unwrap();
        assert!((angle - 0.03 * 0.1).abs() < 1e-12);
        assert_eq!(s.frame_count(), 1);
    }

    #[test]
    fn frame_at_uses_timestamps() {
        let mut s = session();
        let earth = s.system().find("Earth").unwrap();
        s.frame_at(100.0);
        assert_eq!(s.system().orbit_angle(earth), Some(0.0));
        s.frame_at(100.05);
        let angle = s.system().orbit_angle(earth).unwrap();
        assert!((angle - 0.03 * 0.05).abs() < 1e-9);
    }

    #[test]
    fn speed_events_are_clamped() {
        let mut s = session();
        s.push_input(InputEvent::SetSpeed { multiplier: 1000.0 });
        s.frame(0.0);
        assert_eq!(s.presentation().speed_multiplier(), 50.0);
    }

    #[test]
    fn pointer_at_center_hovers_the_star() {
        let mut s = session();
        s.push_input(InputEvent::PointerMove { x: 640.0, y: 360.0 });
        s.frame(0.016);
        assert_eq!(s.hover().map(|h| h.name.as_str()), Some("Sun"));

        s.push_input(InputEvent::PointerLeave);
        s.frame(0.016);
        assert!(s.hover().is_none());
    }

    #[test]
    fn pointer_in_the_corner_hovers_nothing() {
        let mut s = session();
        s.push_input(InputEvent::PointerMove { x: 2.0, y: 2.0 });
        s.frame(0.016);
        assert!(s.hover().is_none());
    }

    #[test]
    fn hovering_does_not_move_anything() {
        let mut a = session();
        let mut b = session();
        b.push_input(InputEvent::PointerMove { x: 640.0, y: 360.0 });
        for _ in 0..10 {
            a.frame(0.016);
            b.frame(0.016);
        }
        let angles = |s: &Session| {
            s.system()
                .bodies()
                .map(|(id, _)| (s.system().orbit_angle(id), s.system().spin(id)))
                .collect::<Vec<_>>()
        };
        assert_eq!(angles(&a), angles(&b));
    }

    #[test]
    fn orbit_line_toggle_reaches_the_render_buffer() {
        let mut s = session();
        assert!(!s.render_buffer().lines.is_empty());
        s.push_input(InputEvent::SetOrbitLinesVisible { visible: false });
        s.frame(0.016);
        assert!(s.render_buffer().lines.is_empty());
        s.set_orbit_lines_visible(true);
        s.frame(0.016);
        assert!(!s.render_buffer().lines.is_empty());
    }

    #[test]
    fn drag_orbits_the_camera() {
        let mut s = session();
        let start = s.camera().azimuth;
        s.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
        s.push_input(InputEvent::PointerMove { x: 300.0, y: 100.0 });
        s.push_input(InputEvent::PointerUp { x: 300.0, y: 100.0 });
        for _ in 0..120 {
            s.frame(1.0 / 60.0);
        }
        assert!(s.camera().azimuth < start);

        // Moving without a press doesn't orbit.
        let settled = s.camera().azimuth;
        s.push_input(InputEvent::PointerMove { x: 600.0, y: 100.0 });
        s.frame(0.0);
        assert!((s.camera().azimuth - settled).abs() < 1e-3);
    }

    #[test]
    fn config_from_partial_json() {
        let config = SessionConfig::from_json(r#"{ "initialSpeed": 5, "orbitLinesVisible": false }"#).unwrap();
        assert_eq!(config.initial_speed, 5.0);
        assert_eq!(config.max_frame_dt, DEFAULT_MAX_FRAME_DT);
        let s = Session::new(config).unwrap();
        assert_eq!(s.presentation().speed_multiplier(), 5.0);
        assert!(s.render_buffer().lines.is_empty());
    }

    #[test]
    fn embedded_registry_is_used() {
        let config = SessionConfig::from_json(
            r#"{ "registry": { "sun": { "name": "Sol", "radius": 4, "color": 16777215 }, "planets": [] } }"#,
        )
        .unwrap();
        let s = Session::new(config).unwrap();
        assert_eq!(s.system().body_count(), 1);
        assert!(s.system().find("Sol").is_some());
    }

    #[test]
    fn invalid_registry_is_rejected() {
        let config = SessionConfig::from_json(
            r#"{ "registry": { "sun": { "name": "Sol", "radius": -1, "color": 0 }, "planets": [] } }"#,
        )
        .unwrap();
        assert!(matches!(Session::new(config), Err(RegistryError::InvalidRadius { .. })));
    }

    struct CountingRenderer {
        frames: usize,
        bodies: usize,
        hovered: Option<String>,
    }

    impl Renderer for CountingRenderer {
        fn backend(&self) -> &'static str {
            "counting"
        }

        fn draw(&mut self, frame: &FrameData) -> DrawTiming {
            self.frames += 1;
            self.bodies = frame.bodies.len();
            self.hovered = frame.hover.map(|h| h.name.clone());
            DrawTiming::default()
        }

        fn resize(&mut self, _width: u32, _height: u32) {}
    }

    #[test]
    fn render_hands_the_frame_to_the_backend() {
        let mut s = session();
        s.push_input(InputEvent::PointerMove { x: 640.0, y: 360.0 });
        s.frame(0.016);
        let mut renderer = CountingRenderer { frames: 0, bodies: 0, hovered: None };
        s.render(&mut renderer);
        assert_eq!(renderer.frames, 1);
        assert_eq!(renderer.bodies, 20);
        assert_eq!(renderer.hovered.as_deref(), Some("Sun"));
    }
}
