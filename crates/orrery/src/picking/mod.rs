pub mod ray;
pub mod resolver;
pub mod target;

pub use ray::Ray;
pub use resolver::{resolve, resolve_ray, screen_to_ndc, PickHit};
pub use target::{PickShape, PickTarget};
