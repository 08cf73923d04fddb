use glam::DVec2;

use crate::api::types::{BodyIdentity, NodeId};
use crate::hierarchy::SolarSystem;
use crate::renderer::camera::OrbitCamera;

use super::ray::Ray;
use super::target::{PickShape, PickTarget};

/// Nearest interactive primitive under a ray.
#[derive(Debug, Clone, PartialEq)]
pub struct PickHit<'a> {
    /// Node that was hit (a body, or a ring for ringed planets).
    pub node: NodeId,
    /// Distance along the ray.
    pub distance: f64,
    pub identity: &'a BodyIdentity,
}

/// Map a pointer position in pixels (origin top-left, +y down) to normalized
/// device coordinates (origin center, +y up). `None` for an empty viewport.
pub fn screen_to_ndc(x: f64, y: f64, width: f64, height: f64) -> Option<DVec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    let ndc = DVec2::new(x / width * 2.0 - 1.0, 1.0 - y / height * 2.0);
    ndc.is_finite().then_some(ndc)
}

fn hit_distance(system: &SolarSystem, target: &PickTarget, ray: &Ray) -> Option<f64> {
    let world = system.graph().world(target.node)?;
    match target.shape {
        PickShape::Sphere { radius } => ray.intersect_sphere(world.translation, radius),
        PickShape::Annulus { inner, outer } => ray.intersect_annulus(&world, inner, outer),
    }
}

/// Nearest hit along `ray` against every interactive primitive. Ties keep the
/// earlier target in hierarchy order.
pub fn resolve_ray<'a>(system: &'a SolarSystem, ray: &Ray) -> Option<PickHit<'a>> {
    let mut best: Option<PickHit<'a>> = None;
    for target in system.pick_targets() {
        let Some(distance) = hit_distance(system, target, ray) else {
            continue;
        };
        if best.as_ref().map_or(true, |b| distance < b.distance) {
            best = Some(PickHit {
                node: target.node,
                distance,
                identity: &target.identity,
            });
        }
    }
    best
}

/// Identity of the body under a pointer at `ndc`, or `None` on a miss.
///
/// Reads world transforms as of the last propagate; never mutates.
pub fn resolve(system: &SolarSystem, camera: &OrbitCamera, ndc: DVec2) -> Option<BodyIdentity> {
    let ray = camera.ray_from_ndc(ndc);
    resolve_ray(system, &ray).map(|hit| hit.identity.clone())
}
