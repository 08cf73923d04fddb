//! Renderer trait for native GPU backends.
//!
//! The web build hands the flat protocol buffer to a TypeScript renderer
//! instead. Native hosts implement this trait and receive the same data as
//! typed slices.

use super::camera::CameraUniform;
use super::instance::{BodyInstance, LineVertex};
use crate::api::types::BodyIdentity;

/// Timing information from a draw call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrawTiming {
    /// Time spent submitting draw calls (microseconds)
    pub draw_us: u32,
    /// Time spent in GPU rasterization (microseconds, if measurable)
    pub raster_us: u32,
}

/// Everything a backend needs for one frame.
pub struct FrameData<'a> {
    pub bodies: &'a [BodyInstance],
    /// Segment pairs. Empty while orbit lines are hidden.
    pub lines: &'a [LineVertex],
    pub camera: CameraUniform,
    /// Identity under the pointer, for the hover popover.
    pub hover: Option<&'a BodyIdentity>,
    /// Pointer position in pixels, where the popover is anchored.
    pub pointer: Option<[f32; 2]>,
}

/// Renderer trait for GPU backends.
///
/// ```ignore
/// struct WgpuRenderer { /* device, queue, pipelines */ }
///
/// impl Renderer for WgpuRenderer {
///     fn backend(&self) -> &'static str { "wgpu" }
///     fn draw(&mut self, frame: &FrameData) -> DrawTiming { /* encode passes */ }
///     fn resize(&mut self, width: u32, height: u32) { /* reconfigure surface */ }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "wgpu", "metal", "canvas2d")
    fn backend(&self) -> &'static str;

    /// Draw a complete frame. Returns timing information for profiling.
    fn draw(&mut self, frame: &FrameData) -> DrawTiming;

    /// Handle window resize.
    fn resize(&mut self, width: u32, height: u32);
}
