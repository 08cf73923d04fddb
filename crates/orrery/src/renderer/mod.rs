pub mod camera;
pub mod instance;
pub mod traits;

pub use camera::{CameraConfig, CameraUniform, OrbitCamera};
pub use instance::{BodyInstance, LineVertex, RenderBuffer};
pub use traits::{DrawTiming, FrameData, Renderer};
