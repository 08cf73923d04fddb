use glam::DVec3;

use crate::core::presentation::PresentationState;
use crate::hierarchy::{NodeKind, OrbitLine, SolarSystem};
use crate::renderer::instance::{BodyInstance, LineVertex, RenderBuffer, KIND_BODY, KIND_RING, KIND_STAR};

/// Orbit lines are drawn faint.
pub const ORBIT_LINE_ALPHA: f32 = 0.3;

/// Build the render buffer from the propagated hierarchy.
///
/// Writes one instance per body and ring in hierarchy order, then the orbit
/// lines as world-space segment pairs when they are visible. Bodies whose name
/// matches `hovered` (and a hovered planet's ring) are flagged for highlight.
pub fn build_render_buffer(
    system: &SolarSystem,
    presentation: &PresentationState,
    hovered: Option<&str>,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for (id, kind, model) in system.draw_list() {
        let instance = match kind {
            NodeKind::Body(body) => {
                let kind = if body.spec.orbit.is_none() { KIND_STAR } else { KIND_BODY };
                let mut instance = BodyInstance::new(&model, body.spec.color.to_array(), kind);
                if hovered == Some(body.spec.name.as_str()) {
                    instance.highlight = 1.0;
                }
                instance
            }
            NodeKind::Ring(ring) => {
                let mut instance = BodyInstance::new(&model, ring.spec.color.to_array(), KIND_RING);
                instance.inner = ring.spec.inner_radius as f32;
                instance.outer = ring.spec.outer_radius as f32;
                let owner = system
                    .graph()
                    .parent(id)
                    .and_then(|p| system.body(p))
                    .map(|b| b.spec.name.as_str());
                if hovered.is_some() && owner == hovered {
                    instance.highlight = 1.0;
                }
                instance
            }
            NodeKind::Pivot(_) => continue,
        };
        buffer.push_body(instance);
    }

    if presentation.orbit_lines_visible() {
        for line in system.orbit_lines() {
            push_orbit_line(system, line, buffer);
        }
    }
}

fn push_orbit_line(system: &SolarSystem, line: &OrbitLine, buffer: &mut RenderBuffer) {
    let Some(frame) = system.graph().world(line.center) else {
        return;
    };
    let vertex = |p: DVec3| {
        let w = frame.transform_point3(p).as_vec3();
        LineVertex {
            x: w.x,
            y: w.y,
            z: w.z,
            alpha: ORBIT_LINE_ALPHA,
        }
    };
    for pair in line.points().windows(2) {
        buffer.push_line(vertex(pair[0]), vertex(pair[1]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::systems::animation::step;

    fn built() -> SolarSystem {
        SolarSystem::build(&Registry::solar_system().unwrap()).unwrap()
    }

    #[test]
    fn one_instance_per_body_and_ring() {
        let system = built();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&system, &PresentationState::default(), None, &mut buffer);
        // 19 bodies + Saturn's ring.
        assert_eq!(buffer.body_count(), 20);
        assert_eq!(buffer.bodies[0].kind, KIND_STAR);
        assert_eq!(buffer.bodies.iter().filter(|b| b.kind == KIND_RING).count(), 1);
    }

    #[test]
    fn hiding_orbit_lines_drops_only_line_vertices() {
        let system = built();
        let mut presentation = PresentationState::default();
        let mut shown = RenderBuffer::new();
        build_render_buffer(&system, &presentation, None, &mut shown);
        assert_eq!(shown.lines.len(), 18 * 128 * 2);

        presentation.set_orbit_lines_visible(false);
        let mut hidden = RenderBuffer::new();
        build_render_buffer(&system, &presentation, None, &mut hidden);
        assert!(hidden.lines.is_empty());
        assert_eq!(hidden.bodies, shown.bodies);
    }

    #[test]
    fn moon_orbit_line_follows_its_planet() {
        let mut system = built();
        step(&mut system, 10.0, 1.0);
        system.graph_mut().propagate();
        let earth = system.find("Earth").unwrap();
        let earth_pos = system.world_position(earth).unwrap();

        let moon_line = system.orbit_lines().iter().position(|l| l.center == earth).unwrap();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&system, &PresentationState::default(), None, &mut buffer);

        let start = moon_line * 128 * 2;
        let v = buffer.lines[start];
        let d = DVec3::new(v.x as f64, v.y as f64, v.z as f64) - earth_pos;
        assert!((d.length() - 2.5).abs() < 1e-4);
        assert!((v.alpha - ORBIT_LINE_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn hovered_planet_and_ring_are_highlighted() {
        let system = built();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&system, &PresentationState::default(), Some("Saturn"), &mut buffer);
        let lit: Vec<f32> = buffer
            .bodies
            .iter()
            .filter(|b| b.highlight > 0.0)
            .map(|b| b.kind)
            .collect();
        assert_eq!(lit, [KIND_BODY, KIND_RING]);
    }

    #[test]
    fn sphere_model_carries_radius_scale() {
        let system = built();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(&system, &PresentationState::default(), None, &mut buffer);
        let sun = buffer.bodies[0];
        // First column length = radius.
        let col = glam::Vec3::new(sun.model[0], sun.model[1], sun.model[2]);
        assert!((col.length() - 5.0).abs() < 1e-5);
    }
}
