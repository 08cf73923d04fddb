pub mod api;
pub mod bridge;
pub mod core;
pub mod hierarchy;
pub mod input;
pub mod picking;
pub mod registry;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::session::{Session, SessionConfig};
pub use api::types::{BodyIdentity, NodeId};
pub use bridge::protocol::ProtocolLayout;
pub use core::presentation::PresentationState;
pub use core::time::FrameClock;
pub use hierarchy::{LocalTransform, NodeKind, OrbitLine, SceneGraph, SolarSystem};
pub use input::queue::{InputEvent, InputQueue};
pub use picking::{resolve, screen_to_ndc, Ray};
pub use registry::{CelestialBodySpec, PlanetSpec, Registry, RegistryError, RingSpec, Rgb};
pub use renderer::camera::{CameraConfig, OrbitCamera};
pub use renderer::instance::{BodyInstance, LineVertex, RenderBuffer};
pub use renderer::traits::{DrawTiming, FrameData, Renderer};
pub use systems::animation::step;
pub use systems::render::build_render_buffer;
