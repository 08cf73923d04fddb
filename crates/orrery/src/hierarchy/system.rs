use std::collections::HashMap;

use glam::{DAffine3, DVec3};

use crate::api::types::NodeId;
use crate::picking::target::PickTarget;

use super::graph::{BodyNode, Node, NodeKind, OrbitNode, SceneGraph};
use super::orbit_line::OrbitLine;

/// The built hierarchy plus its side tables.
///
/// Name lookup and pick identity live in flat tables next to the graph, not on
/// the nodes themselves.
#[derive(Debug)]
pub struct SolarSystem {
    graph: SceneGraph,
    star: NodeId,
    by_name: HashMap<String, NodeId>,
    orbit_lines: Vec<OrbitLine>,
    pick_targets: Vec<PickTarget>,
}

impl SolarSystem {
    pub(crate) fn from_parts(
        graph: SceneGraph,
        star: NodeId,
        by_name: HashMap<String, NodeId>,
        orbit_lines: Vec<OrbitLine>,
        pick_targets: Vec<PickTarget>,
    ) -> Self {
        Self {
            graph,
            star,
            by_name,
            orbit_lines,
            pick_targets,
        }
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// The star's body node, root of the tree.
    pub fn star(&self) -> NodeId {
        self.star
    }

    /// Body node for a name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn body(&self, id: NodeId) -> Option<&BodyNode> {
        self.graph.get(id).and_then(|n| n.as_body())
    }

    /// The pivot a body orbits with, i.e. its parent. `None` for the star.
    pub fn pivot_of(&self, body: NodeId) -> Option<NodeId> {
        let parent = self.graph.parent(body)?;
        self.graph.get(parent)?.as_pivot().map(|_| parent)
    }

    pub fn pivot(&self, id: NodeId) -> Option<&OrbitNode> {
        self.graph.get(id).and_then(|n| n.as_pivot())
    }

    /// Current orbit angle of a body, looked up through its pivot.
    pub fn orbit_angle(&self, body: NodeId) -> Option<f64> {
        self.pivot_of(body).and_then(|p| self.pivot(p)).map(|p| p.angle)
    }

    pub fn spin(&self, body: NodeId) -> Option<f64> {
        self.body(body).map(|b| b.spin)
    }

    pub fn world_position(&self, id: NodeId) -> Option<DVec3> {
        self.graph.world_position(id)
    }

    /// Body ids in hierarchy order.
    pub fn bodies(&self) -> impl Iterator<Item = (NodeId, &BodyNode)> {
        self.graph.iter().filter_map(|(id, n)| match &n.kind {
            NodeKind::Body(b) => Some((id, b)),
            _ => None,
        })
    }

    pub fn body_count(&self) -> usize {
        self.by_name.len()
    }

    pub fn orbit_lines(&self) -> &[OrbitLine] {
        &self.orbit_lines
    }

    pub fn pick_targets(&self) -> &[PickTarget] {
        &self.pick_targets
    }

    /// Number of orbital levels between a body and the star: 0 for the star,
    /// 1 for planets, 2 for moons. `None` if the chain doesn't end at the star.
    pub fn orbital_depth(&self, body: NodeId) -> Option<usize> {
        let mut current = body;
        let mut levels = 0;
        // Each orbital level is a pivot plus its parent body.
        while current != self.star {
            let pivot = self.pivot_of(current)?;
            current = self.graph.parent(pivot)?;
            levels += 1;
            if levels > self.graph.len() {
                return None;
            }
        }
        Some(levels)
    }

    /// Every node in hierarchy order, with its kind, local and world transform.
    /// Parents always come before their children.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.graph.iter()
    }

    /// Transforms in hierarchy order for a render collaborator.
    pub fn draw_list(&self) -> impl Iterator<Item = (NodeId, &NodeKind, DAffine3)> {
        self.graph.iter().filter_map(|(id, node)| {
            self.graph
                .draw_transform(id)
                .map(|m| (id, &node.kind, m))
        })
    }
}
