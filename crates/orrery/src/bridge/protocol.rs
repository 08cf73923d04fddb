/// Shared-buffer layout read by the host renderer.
/// Must stay in sync with the TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Bodies: max_bodies × 24 floats]
/// [Lines: max_line_vertices × 4 floats]
/// [Camera: 20 floats (view-projection, column-major, then eye xyzw)]
/// ```
///
/// Capacities are written into the header every frame.
/// The host reads them from the header to compute offsets dynamically.

use crate::api::session::{Session, SessionConfig};
use crate::renderer::instance::{BodyInstance, LineVertex, KIND_RING};

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_LINE_VERTICES: usize = 4;
pub const HEADER_LINE_VERTEX_COUNT: usize = 5;
pub const HEADER_ORBIT_LINES_VISIBLE: usize = 6;
/// Index into the body section of the hovered body, or -1.
pub const HEADER_HOVERED_BODY: usize = 7;
pub const HEADER_SPEED_MULTIPLIER: usize = 8;
pub const HEADER_VIEWPORT_WIDTH: usize = 9;
pub const HEADER_VIEWPORT_HEIGHT: usize = 10;
pub const HEADER_POINTER_X: usize = 11;
pub const HEADER_POINTER_Y: usize = 12;
pub const HEADER_PROTOCOL_VERSION: usize = 13;
/// 1 while the pointer is over the canvas.
pub const HEADER_POINTER_VALID: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats in the camera section.
pub const CAMERA_FLOATS: usize = 20;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_line_vertices: usize,

    pub body_data_floats: usize,
    pub line_data_floats: usize,

    /// Offset (in floats) where body instance data begins.
    pub body_data_offset: usize,
    /// Offset (in floats) where line vertex data begins.
    pub line_data_offset: usize,
    /// Offset (in floats) where camera data begins.
    pub camera_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_bodies: usize, max_line_vertices: usize) -> Self {
        let body_data_floats = max_bodies * BodyInstance::FLOATS;
        let line_data_floats = max_line_vertices * LineVertex::FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let line_data_offset = body_data_offset + body_data_floats;
        let camera_data_offset = line_data_offset + line_data_floats;

        let buffer_total_floats = camera_data_offset + CAMERA_FLOATS;

        Self {
            max_bodies,
            max_line_vertices,
            body_data_floats,
            line_data_floats,
            body_data_offset,
            line_data_offset,
            camera_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.max_bodies, config.max_line_vertices)
    }

    /// Write the session's current frame into `out`, which must be
    /// `buffer_total_floats` long. Sections past capacity are truncated;
    /// orbit lines are cut on a segment boundary.
    pub fn pack(&self, session: &Session, out: &mut [f32]) {
        if out.len() < self.buffer_total_floats {
            log::error!(
                "protocol buffer too small: {} < {} floats",
                out.len(),
                self.buffer_total_floats
            );
            return;
        }
        out[HEADER_LOCK] = 1.0;

        let buffer = session.render_buffer();
        let bodies = &buffer.bodies[..buffer.bodies.len().min(self.max_bodies)];
        let line_cap = self.max_line_vertices & !1;
        let lines = &buffer.lines[..buffer.lines.len().min(line_cap)];
        if bodies.len() < buffer.bodies.len() || lines.len() < buffer.lines.len() {
            log::warn!(
                "render buffer exceeds protocol capacity ({} bodies, {} line vertices)",
                buffer.bodies.len(),
                buffer.lines.len()
            );
        }

        let body_floats: &[f32] = bytemuck::cast_slice(bodies);
        out[self.body_data_offset..self.body_data_offset + body_floats.len()].copy_from_slice(body_floats);
        let line_floats: &[f32] = bytemuck::cast_slice(lines);
        out[self.line_data_offset..self.line_data_offset + line_floats.len()].copy_from_slice(line_floats);

        let camera = session.camera().uniform();
        let cam = self.camera_data_offset;
        out[cam..cam + 16].copy_from_slice(bytemuck::cast_slice(&camera.view_projection));
        out[cam + 16..cam + 20].copy_from_slice(&camera.eye);

        let hovered = bodies
            .iter()
            .position(|b| b.highlight > 0.0 && b.kind != KIND_RING)
            .map_or(-1.0, |i| i as f32);
        let viewport = session.camera().viewport();
        let pointer = session.pointer();

        out[HEADER_FRAME_COUNTER] = session.frame_count() as f32;
        out[HEADER_MAX_BODIES] = self.max_bodies as f32;
        out[HEADER_BODY_COUNT] = bodies.len() as f32;
        out[HEADER_MAX_LINE_VERTICES] = self.max_line_vertices as f32;
        out[HEADER_LINE_VERTEX_COUNT] = lines.len() as f32;
        out[HEADER_ORBIT_LINES_VISIBLE] = if session.presentation().orbit_lines_visible() { 1.0 } else { 0.0 };
        out[HEADER_HOVERED_BODY] = hovered;
        out[HEADER_SPEED_MULTIPLIER] = session.presentation().speed_multiplier() as f32;
        out[HEADER_VIEWPORT_WIDTH] = viewport.x as f32;
        out[HEADER_VIEWPORT_HEIGHT] = viewport.y as f32;
        out[HEADER_POINTER_X] = pointer.map_or(0.0, |p| p.x as f32);
        out[HEADER_POINTER_Y] = pointer.map_or(0.0, |p| p.y as f32);
        out[HEADER_POINTER_VALID] = if pointer.is_some() { 1.0 } else { 0.0 };
        out[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        out[HEADER_RESERVED] = 0.0;

        out[HEADER_LOCK] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::queue::InputEvent;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&SessionConfig::default());
        assert_eq!(layout.max_bodies, 64);
        assert_eq!(layout.max_line_vertices, 8192);
        assert_eq!(layout.body_data_offset, 16);
        assert_eq!(layout.line_data_offset, 16 + 64 * 24);
        assert_eq!(layout.camera_data_offset, 16 + 64 * 24 + 8192 * 4);
        assert_eq!(layout.buffer_total_floats, 16 + 64 * 24 + 8192 * 4 + 20);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 300);
        assert_eq!(layout.line_data_offset, layout.body_data_offset + layout.body_data_floats);
        assert_eq!(layout.camera_data_offset, layout.line_data_offset + layout.line_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.camera_data_offset + CAMERA_FLOATS);
    }

    #[test]
    fn pack_writes_header_and_sections() {
        let mut session = Session::new(SessionConfig::default()).unwrap();
        session.push_input(InputEvent::PointerMove { x: 640.0, y: 360.0 });
        session.frame(0.016);

        let layout = ProtocolLayout::from_config(session.config());
        let mut out = vec![0.0; layout.buffer_total_floats];
        layout.pack(&session, &mut out);

        assert_eq!(out[HEADER_LOCK], 0.0);
        assert_eq!(out[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(out[HEADER_BODY_COUNT], 20.0);
        assert_eq!(out[HEADER_LINE_VERTEX_COUNT], (18 * 128 * 2) as f32);
        assert_eq!(out[HEADER_ORBIT_LINES_VISIBLE], 1.0);
        // The star is the first instance.
        assert_eq!(out[HEADER_HOVERED_BODY], 0.0);
        assert_eq!(out[HEADER_POINTER_VALID], 1.0);
        assert_eq!(out[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);

        let first = &out[layout.body_data_offset..layout.body_data_offset + BodyInstance::FLOATS];
        assert_eq!(first, bytemuck::cast_slice::<BodyInstance, f32>(&session.render_buffer().bodies[..1]));
    }

    #[test]
    fn pack_truncates_lines_on_segment_boundary() {
        let session = Session::new(SessionConfig {
            max_line_vertices: 101,
            ..Default::default()
        })
        .unwrap();
        let layout = ProtocolLayout::from_config(session.config());
        let mut out = vec![0.0; layout.buffer_total_floats];
        layout.pack(&session, &mut out);
        assert_eq!(out[HEADER_LINE_VERTEX_COUNT], 100.0);
    }

    #[test]
    fn pack_refuses_short_buffers() {
        let session = Session::new(SessionConfig::default()).unwrap();
        let layout = ProtocolLayout::from_config(session.config());
        let mut out = vec![0.0; 8];
        layout.pack(&session, &mut out);
        assert!(out.iter().all(|v| *v == 0.0));
    }
}
