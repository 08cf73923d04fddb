use glam::DVec3;

use crate::api::types::NodeId;

/// Number of segments in an orbit loop.
pub const ORBIT_SEGMENTS: usize = 128;

/// Circle traced by an orbiting body, drawn in the frame of the body it orbits.
///
/// Geometry is fixed at build time. Only its visibility changes, and that is
/// a global switch held by [`PresentationState`](crate::core::presentation::PresentationState).
#[derive(Debug, Clone)]
pub struct OrbitLine {
    /// Body whose (unspun) frame the loop is centered on.
    pub center: NodeId,
    /// Body that travels along the loop.
    pub body: NodeId,
    pub radius: f64,
    points: Vec<DVec3>,
}

impl OrbitLine {
    /// Closed loop of `segments + 1` points in the XZ plane; the last point
    /// repeats the first.
    pub fn new(center: NodeId, body: NodeId, radius: f64, segments: usize) -> Self {
        let segments = segments.max(3);
        let points = (0..=segments)
            .map(|i| {
                let theta = (i as f64 / segments as f64) * std::f64::consts::TAU;
                DVec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
            })
            .collect();
        Self {
            center,
            body,
            radius,
            points,
        }
    }

    /// Points local to the center body's frame.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_is_closed_and_on_the_circle() {
        let line = OrbitLine::new(NodeId(0), NodeId(2), 20.0, ORBIT_SEGMENTS);
        let pts = line.points();
        assert_eq!(pts.len(), ORBIT_SEGMENTS + 1);
        assert_eq!(line.segment_count(), ORBIT_SEGMENTS);
        assert!((pts[0] - pts[ORBIT_SEGMENTS]).length() < 1e-9);
        for p in pts {
            assert!((p.length() - 20.0).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn degenerate_segment_count_is_raised() {
        let line = OrbitLine::new(NodeId(0), NodeId(1), 1.0, 0);
        assert_eq!(line.segment_count(), 3);
    }
}
