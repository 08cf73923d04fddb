/// Index of a node in the scene graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What the hover popover shows for a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyIdentity {
    pub name: String,
    pub description: String,
}

impl BodyIdentity {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
