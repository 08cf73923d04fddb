use orrery::{InputEvent, ProtocolLayout, Session, SessionConfig};
use orrery::bridge::protocol::{HEADER_PROTOCOL_VERSION, PROTOCOL_VERSION};

/// Drives a [`Session`] from the browser frame loop and keeps the shared
/// protocol buffer up to date.
///
/// wasm-bindgen cannot export a struct holding a session across calls
/// without handing ownership to JS, so the exports keep one runner in a
/// `thread_local!` (see [`export_session!`](crate::export_session)).
pub struct SessionRunner {
    session: Session,
    layout: ProtocolLayout,
    buffer: Vec<f32>,
}

impl SessionRunner {
    pub fn new(session: Session) -> Self {
        let layout = ProtocolLayout::from_config(session.config());
        let mut buffer = vec![0.0; layout.buffer_total_floats];
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        let mut runner = Self {
            session,
            layout,
            buffer,
        };
        runner.pack();
        runner
    }

    /// Build from JSON config. An empty string uses defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config = if json.trim().is_empty() {
            SessionConfig::default()
        } else {
            SessionConfig::from_json(json).map_err(|e| e.to_string())?
        };
        let session = Session::new(config).map_err(|e| e.to_string())?;
        Ok(Self::new(session))
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.session.push_input(event);
    }

    /// Run one frame with a host-supplied delta in seconds.
    pub fn tick(&mut self, dt: f64) {
        self.session.frame(dt);
        self.pack();
    }

    /// Run one frame timed by a host timestamp in seconds.
    pub fn tick_at(&mut self, now_seconds: f64) {
        self.session.frame_at(now_seconds);
        self.pack();
    }

    fn pack(&mut self) {
        self.layout.pack(&self.session, &mut self.buffer);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        self.session.set_speed_multiplier(multiplier);
    }

    pub fn set_orbit_lines_visible(&mut self, visible: bool) {
        self.session.set_orbit_lines_visible(visible);
    }

    // ---- Hover popover ----

    pub fn hover_name(&self) -> Option<String> {
        self.session.hover().map(|h| h.name.clone())
    }

    pub fn hover_description(&self) -> Option<String> {
        self.session.hover().map(|h| h.description.clone())
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    pub fn bodies_ptr(&self) -> *const f32 {
        self.session.render_buffer().bodies_ptr()
    }

    pub fn body_count(&self) -> u32 {
        self.session.render_buffer().body_count()
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.session.render_buffer().lines_ptr()
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.session.render_buffer().line_vertex_count()
    }

    // ---- Capacity accessors ----

    pub fn max_bodies(&self) -> u32 {
        self.layout.max_bodies as u32
    }

    pub fn max_line_vertices(&self) -> u32 {
        self.layout.max_line_vertices as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }

    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }
}
