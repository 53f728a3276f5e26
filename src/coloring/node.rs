//! Graph vertex with its current color and adjacency.

/// Vertex identifier. Ids are dense: `0..n`.
pub type NodeId = usize;

/// Color index in `[0, k)`.
pub type Color = usize;

/// A vertex of the coloring state.
///
/// The neighbor list is an unordered multiset: adding the same edge twice
/// records the neighbor twice.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    id: NodeId,
    color: Option<Color>,
    neighbors: Vec<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            color: None,
            neighbors: Vec::new(),
        }
    }

    /// Identifier of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current color, `None` while unassigned.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Neighbor ids, duplicates included.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }

    /// Number of neighbor entries.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub(crate) fn add_neighbor(&mut self, neighbor: NodeId) {
        self.neighbors.push(neighbor);
    }
}
