use bytemuck::{Pod, Zeroable};
use glam::DAffine3;

/// Emissive, unlit sphere.
pub const KIND_STAR: f32 = 0.0;
/// Lit sphere (planet or moon).
pub const KIND_BODY: f32 = 1.0;
/// Flat annulus in the model's XZ plane.
pub const KIND_RING: f32 = 2.0;

/// Per-instance data for one body or ring, as read by the host renderer.
/// 24 floats = 96 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Column-major model matrix. For spheres this includes spin and the
    /// radius scale, so the mesh is a unit sphere.
    pub model: [f32; 16],
    pub color: [f32; 3],
    /// One of `KIND_STAR`, `KIND_BODY`, `KIND_RING`.
    pub kind: f32,
    /// Ring inner radius in model units. 0 for spheres.
    pub inner: f32,
    /// Ring outer radius in model units. 1 for spheres.
    pub outer: f32,
    /// 1.0 while the body is hovered.
    pub highlight: f32,
    pub _pad: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 24;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn new(model: &DAffine3, color: [f32; 3], kind: f32) -> Self {
        Self {
            model: glam::DMat4::from(*model).as_mat4().to_cols_array(),
            color,
            kind,
            inner: 0.0,
            outer: 1.0,
            highlight: 0.0,
            _pad: 0.0,
        }
    }
}

/// One orbit-line vertex in world space. 4 floats = 16 bytes stride.
/// Vertices come in pairs, one pair per line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub alpha: f32,
}

impl LineVertex {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Per-frame render output: body instances plus orbit-line vertices.
pub struct RenderBuffer {
    pub bodies: Vec<BodyInstance>,
    pub lines: Vec<LineVertex>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 8192)
    }

    pub fn with_capacity(bodies: usize, line_vertices: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(bodies),
            lines: Vec::with_capacity(line_vertices),
        }
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
        self.lines.clear();
    }

    pub fn push_body(&mut self, instance: BodyInstance) {
        self.bodies.push(instance);
    }

    pub fn push_line(&mut self, a: LineVertex, b: LineVertex) {
        self.lines.push(a);
        self.lines.push(b);
    }

    pub fn body_count(&self) -> u32 {
        self.bodies.len() as u32
    }

    pub fn line_vertex_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Raw pointer to body instance data for shared-buffer reads.
    pub fn bodies_ptr(&self) -> *const f32 {
        self.bodies.as_ptr() as *const f32
    }

    pub fn lines_ptr(&self) -> *const f32 {
        self.lines.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
