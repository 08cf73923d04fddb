// hierarchy/builder.rs
//
// Builds the transform tree from a validated registry, once, at startup:
//
//   star body
//   ├── planet pivot ── planet body (offset by distance along +X)
//   │                   ├── ring
//   │                   └── moon pivot ── moon body (offset by distance)
//   └── ...
//
// Moon pivots hang off the planet body, so moon orbits compose with the
// planet's orbit through the tree instead of through world-space math.

use std::collections::HashMap;
use std::sync::Arc;

use glam::DVec3;

use crate::api::types::{BodyIdentity, NodeId};
use crate::picking::target::{PickShape, PickTarget};
use crate::registry::{CelestialBodySpec, Registry, RegistryError};

use super::graph::{BodyNode, LocalTransform, NodeKind, OrbitNode, RingNode, SceneGraph};
use super::orbit_line::{OrbitLine, ORBIT_SEGMENTS};
use super::system::SolarSystem;

struct Builder {
    graph: SceneGraph,
    by_name: HashMap<String, NodeId>,
    orbit_lines: Vec<OrbitLine>,
    pick_targets: Vec<PickTarget>,
    segments: usize,
}

impl Builder {
    fn insert(
        &mut self,
        owner: &str,
        parent: Option<NodeId>,
        local: LocalTransform,
        kind: NodeKind,
    ) -> Result<NodeId, RegistryError> {
        self.graph
            .insert(parent, local, kind)
            .ok_or_else(|| RegistryError::Detached { body: owner.to_string() })
    }

    fn add_body(&mut self, parent: Option<NodeId>, spec: &CelestialBodySpec) -> Result<NodeId, RegistryError> {
        let local = match spec.orbit {
            Some(orbit) => LocalTransform::new().with_translation(DVec3::new(orbit.distance, 0.0, 0.0)),
            None => LocalTransform::new(),
        };
        let id = self.insert(
            &spec.name,
            parent,
            local,
            NodeKind::Body(BodyNode {
                spec: Arc::new(spec.clone()),
                spin: 0.0,
            }),
        )?;
        self.by_name.insert(spec.name.clone(), id);
        self.pick_targets.push(PickTarget {
            node: id,
            shape: PickShape::Sphere { radius: spec.radius },
            identity: BodyIdentity::new(spec.name.clone(), spec.description.clone()),
        });
        Ok(id)
    }

    /// Pivot under `center`, body under the pivot, and the orbit loop.
    fn add_orbiting(&mut self, center: NodeId, spec: &CelestialBodySpec) -> Result<NodeId, RegistryError> {
        let orbit = spec.orbit.ok_or_else(|| RegistryError::MissingOrbit {
            body: spec.name.clone(),
        })?;
        let pivot = self.insert(
            &spec.name,
            Some(center),
            LocalTransform::new(),
            NodeKind::Pivot(OrbitNode {
                angle: 0.0,
                angular_speed: orbit.angular_speed,
            }),
        )?;
        let body = self.add_body(Some(pivot), spec)?;
        self.orbit_lines
            .push(OrbitLine::new(center, body, orbit.distance, self.segments));
        Ok(body)
    }
}

impl SolarSystem {
    /// Build the hierarchy with the default orbit-line resolution.
    pub fn build(registry: &Registry) -> Result<Self, RegistryError> {
        Self::build_with_segments(registry, ORBIT_SEGMENTS)
    }

    /// Build the hierarchy, depth-first: star, then each planet in registry
    /// order followed by its ring and moons.
    ///
    /// The registry is validated first; nothing is returned for invalid data.
    pub fn build_with_segments(registry: &Registry, segments: usize) -> Result<Self, RegistryError> {
        registry.validate()?;

        let mut b = Builder {
            graph: SceneGraph::new(),
            by_name: HashMap::with_capacity(registry.body_count()),
            orbit_lines: Vec::with_capacity(registry.body_count().saturating_sub(1)),
            pick_targets: Vec::with_capacity(registry.body_count() + 1),
            segments,
        };

        let star = b.add_body(None, registry.star())?;

        for planet in registry.planets() {
            let planet_body = b.add_orbiting(star, &planet.body)?;

            if let Some(ring) = planet.ring {
                let ring_node = b.insert(
                    &planet.body.name,
                    Some(planet_body),
                    LocalTransform::new(),
                    NodeKind::Ring(RingNode { spec: ring }),
                )?;
                b.pick_targets.push(PickTarget {
                    node: ring_node,
                    shape: PickShape::Annulus {
                        inner: ring.inner_radius,
                        outer: ring.outer_radius,
                    },
                    identity: BodyIdentity::new(planet.body.name.clone(), planet.body.description.clone()),
                });
            }

            for moon in &planet.moons {
                b.add_orbiting(planet_body, moon)?;
            }
        }

        b.graph.propagate();

        log::info!(
            "orrery: built hierarchy with {} bodies, {} nodes, {} orbit lines",
            b.by_name.len(),
            b.graph.len(),
            b.orbit_lines.len()
        );

        Ok(SolarSystem::from_parts(
            b.graph,
            star,
            b.by_name,
            b.orbit_lines,
            b.pick_targets,
        ))
    }
}
