// registry/mod.rs
//
// Celestial body registry: authored, read-only data describing the star, its
// planets and their moons. Validated once at load; never mutated afterwards.

pub mod error;
pub mod json;
pub mod solar_system;
pub mod spec;

pub use error::RegistryError;
pub use spec::{CelestialBodySpec, OrbitSpec, PlanetSpec, Registry, RingSpec, Rgb, STAR_SPIN_RATE};
