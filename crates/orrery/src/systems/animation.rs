//! Advances every orbit pivot and body spin by elapsed time.

use crate::hierarchy::{NodeKind, SolarSystem};

/// Advance every pivot's orbit angle and every body's spin by
/// `rate * speed_multiplier * elapsed_seconds`.
///
/// Call exactly once per frame, then [`SceneGraph::propagate`](crate::hierarchy::SceneGraph::propagate)
/// before reading world transforms. Does not allocate. Angles are accumulated
/// without wrapping. A node whose update would go non-finite is logged and left
/// as it was; the other nodes still advance.
///
/// `elapsed_seconds` is used as given. Clamping long frames is the frame
/// clock's job.
pub fn step(system: &mut SolarSystem, elapsed_seconds: f64, speed_multiplier: f64) {
    let scale = speed_multiplier * elapsed_seconds;

    for (id, node) in system.graph_mut().iter_mut() {
        match &mut node.kind {
            NodeKind::Pivot(pivot) => {
                let angle = pivot.angle + pivot.angular_speed * scale;
                if !angle.is_finite() {
                    log::error!(
                        "orbit pivot {:?}: non-finite angle (rate={}, speed={}, dt={}), skipped",
                        id,
                        pivot.angular_speed,
                        speed_multiplier,
                        elapsed_seconds
                    );
                    continue;
                }
                pivot.angle = angle;
                node.local.rotation_y = angle;
            }
            NodeKind::Body(body) => {
                let spin = body.spin + body.spec.rotation_speed * scale;
                if !spin.is_finite() {
                    log::error!(
                        "{}: non-finite spin (rate={}, speed={}, dt={}), skipped",
                        body.spec.name,
                        body.spec.rotation_speed,
                        speed_multiplier,
                        elapsed_seconds
                    );
                    continue;
                }
                body.spin = spin;
            }
            NodeKind::Ring(_) => {}
        }
    }
}
