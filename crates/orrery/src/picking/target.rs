use crate::api::types::{BodyIdentity, NodeId};

/// Geometry tested against pick rays, in the node's world frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickShape {
    Sphere { radius: f64 },
    /// Flat ring in the node's XZ plane.
    Annulus { inner: f64, outer: f64 },
}

/// One interactive primitive and the identity it reports when hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct PickTarget {
    pub node: NodeId,
    pub shape: PickShape,
    pub identity: BodyIdentity,
}
