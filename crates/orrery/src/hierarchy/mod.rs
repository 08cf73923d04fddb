// hierarchy/mod.rs
//
// Transform hierarchy: an arena scene graph of pivot, body and ring nodes,
// built once from the registry and mutated only by the animation stepper.

pub mod builder;
pub mod graph;
pub mod orbit_line;
pub mod system;

pub use graph::{BodyNode, LocalTransform, Node, NodeKind, OrbitNode, RingNode, SceneGraph};
pub use orbit_line::{OrbitLine, ORBIT_SEGMENTS};
pub use system::SolarSystem;
