// hierarchy/graph.rs
//
// Arena-backed transform tree. Parents own children by index; a node only
// ever points at its parent by `NodeId`, never by handle.
//
// Nodes are appended depth-first, so a parent always has a lower index than
// its children and world transforms can be propagated in one forward pass.

use std::sync::Arc;

use glam::{DAffine3, DQuat, DVec3};

use crate::api::types::NodeId;
use crate::registry::{CelestialBodySpec, RingSpec};

/// Transform relative to the parent node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Offset from the parent's origin.
    pub translation: DVec3,
    /// Rotation about the parent's vertical (+Y) axis, radians.
    pub rotation_y: f64,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: DVec3::ZERO,
            rotation_y: 0.0,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: DVec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation_y(mut self, rotation_y: f64) -> Self {
        self.rotation_y = rotation_y;
        self
    }

    pub fn to_affine(&self) -> DAffine3 {
        DAffine3::from_rotation_translation(DQuat::from_rotation_y(self.rotation_y), self.translation)
    }
}

/// One level of orbital pivoting. Never translates; the orbit radius lives in
/// the child body's local translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitNode {
    /// Accumulated orbit angle in radians. Not wrapped.
    pub angle: f64,
    /// Radians per second at speed multiplier 1.
    pub angular_speed: f64,
}

/// The visual and identity representation of one celestial body.
#[derive(Debug, Clone)]
pub struct BodyNode {
    pub spec: Arc<CelestialBodySpec>,
    /// Accumulated self-rotation in radians. Applies to this body's own
    /// geometry only; moons hang off the unspun frame.
    pub spin: f64,
}

/// Ring geometry attached to a body, lying in the body's XZ plane.
#[derive(Debug, Clone, Copy)]
pub struct RingNode {
    pub spec: RingSpec,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Pivot(OrbitNode),
    Body(BodyNode),
    Ring(RingNode),
}

#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub local: LocalTransform,
    pub kind: NodeKind,
    world: DAffine3,
}

impl Node {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Accumulated world frame as of the last [`SceneGraph::propagate`].
    pub fn world(&self) -> DAffine3 {
        self.world
    }

    pub fn as_body(&self) -> Option<&BodyNode> {
        match &self.kind {
            NodeKind::Body(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_pivot(&self) -> Option<&OrbitNode> {
        match &self.kind {
            NodeKind::Pivot(pivot) => Some(pivot),
            _ => None,
        }
    }
}

/// Transform tree with a single root.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    /// Set when local transforms change, cleared after propagate.
    dirty: bool,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. The first node inserted must be the root; every later
    /// node needs an existing parent.
    ///
    /// Returns `None` if the parent doesn't exist or a second root is requested.
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalTransform, kind: NodeKind) -> Option<NodeId> {
        match parent {
            None if !self.nodes.is_empty() => return None,
            Some(p) if p.index() >= self.nodes.len() => return None,
            _ => {}
        }

        let id = NodeId(self.nodes.len() as u32);
        let world = match parent {
            Some(p) => self.nodes[p.index()].world * local.to_affine(),
            None => local.to_affine(),
        };
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            local,
            kind,
            world,
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        self.dirty = true;
        Some(id)
    }

    pub fn root(&self) -> Option<NodeId> {
        (!self.nodes.is_empty()).then_some(NodeId(0))
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Mutable access marks the graph dirty.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.dirty = true;
        self.nodes.get_mut(id.index())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.get(id).map(|n| n.children.as_slice())
    }

    /// Nodes in hierarchy order (every parent before its children).
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Mutable iteration over nodes in hierarchy order. Marks the graph dirty.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.dirty = true;
        self.nodes
            .iter_mut()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Recompute every world frame from local transforms.
    pub fn propagate(&mut self) {
        if !self.dirty {
            return;
        }
        for i in 0..self.nodes.len() {
            let parent_world = match self.nodes[i].parent {
                Some(p) => self.nodes[p.index()].world,
                None => DAffine3::IDENTITY,
            };
            let node = &mut self.nodes[i];
            node.world = parent_world * node.local.to_affine();
        }
        self.dirty = false;
    }

    pub fn world(&self, id: NodeId) -> Option<DAffine3> {
        self.get(id).map(|n| n.world)
    }

    pub fn world_position(&self, id: NodeId) -> Option<DVec3> {
        self.get(id).map(|n| n.world.translation)
    }

    /// The transform geometry is drawn with: the world frame, plus the body's
    /// spin and radius for bodies. Rings are drawn in their own frame and
    /// pivots have no geometry.
    pub fn draw_transform(&self, id: NodeId) -> Option<DAffine3> {
        let node = self.get(id)?;
        match &node.kind {
            NodeKind::Body(body) => Some(
                node.world
                    * DAffine3::from_scale_rotation_translation(
                        DVec3::splat(body.spec.radius),
                        DQuat::from_rotation_y(body.spin),
                        DVec3::ZERO,
                    ),
            ),
            NodeKind::Ring(_) => Some(node.world),
            NodeKind::Pivot(_) => None,
        }
    }

    /// Number of ancestors between `id` and the root, or `None` if the parent
    /// chain is longer than the node count (which would mean a cycle).
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut current = self.get(id)?.parent;
        let mut depth = 0;
        while let Some(p) = current {
            depth += 1;
            if depth > self.nodes.len() {
                return None;
            }
            current = self.get(p)?.parent;
        }
        Some(depth)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Rgb;

    fn body(name: &str, radius: f64) -> NodeKind {
        NodeKind::Body(BodyNode {
            spec: Arc::new(CelestialBodySpec::star(name, "", radius, Rgb::WHITE)),
            spin: 0.0,
        })
    }

    fn pivot(angle: f64) -> NodeKind {
        NodeKind::Pivot(OrbitNode { angle, angular_speed: 0.0 })
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(None, LocalTransform::new(), body("root", 1.0)).unwrap();
        let child = graph.insert(Some(root), LocalTransform::new(), pivot(0.0)).unwrap();

        assert_eq!(graph.parent(child), Some(root));
        assert_eq!(graph.children(root), Some([child].as_slice()));
        assert_eq!(graph.parent(root), None);
    }

    #[test]
    fn second_root_and_dangling_parent_are_refused() {
        let mut graph = SceneGraph::new();
        graph.insert(None, LocalTransform::new(), body("root", 1.0)).unwrap();
        assert!(graph.insert(None, LocalTransform::new(), pivot(0.0)).is_none());
        assert!(graph.insert(Some(NodeId(7)), LocalTransform::new(), pivot(0.0)).is_none());
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn propagate_composes_rotation_then_offset() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(None, LocalTransform::new(), body("root", 1.0)).unwrap();
        let p = graph.insert(Some(root), LocalTransform::new(), pivot(0.0)).unwrap();
        let b = graph
            .insert(
                Some(p),
                LocalTransform::new().with_translation(DVec3::new(10.0, 0.0, 0.0)),
                body("child", 1.0),
            )
            .unwrap();

        graph.get_mut(p).unwrap().local.rotation_y = std::f64::consts::FRAC_PI_2;
        graph.propagate();

        // +Y quarter turn maps +X onto -Z.
        let pos = graph.world_position(b).unwrap();
        assert!(pos.x.abs() < 1e-9);
        assert!((pos.z + 10.0).abs() < 1e-9);
        assert!(!graph.is_dirty());
    }

    #[test]
    fn draw_transform_scales_by_radius_and_ignores_pivots() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(None, LocalTransform::new(), body("root", 5.0)).unwrap();
        let p = graph.insert(Some(root), LocalTransform::new(), pivot(0.0)).unwrap();

        let m = graph.draw_transform(root).unwrap();
        let edge = m.transform_point3(DVec3::X);
        assert!((edge.length() - 5.0).abs() < 1e-9);
        assert!(graph.draw_transform(p).is_none());
    }

    #[test]
    fn depth_counts_ancestors() {
        let mut graph = SceneGraph::new();
        let root = graph.insert(None, LocalTransform::new(), body("root", 1.0)).unwrap();
        let p = graph.insert(Some(root), LocalTransform::new(), pivot(0.0)).unwrap();
        let b = graph.insert(Some(p), LocalTransform::new(), body("b", 1.0)).unwrap();
        assert_eq!(graph.depth(root), Some(0));
        assert_eq!(graph.depth(b), Some(2));
    }
}
