//! Graph with a current coloring and per-node conflict counters.

#[cfg(feature = "serde")]
use std::collections::HashMap;

use super::node::{Color, Node, NodeId};
use crate::error::{ColoringError, Result};

/// Graph plus coloring, with incrementally maintained conflict counters.
///
/// `conflicts[i]` always equals the number of entries in node `i`'s
/// neighbor list whose node shares `i`'s color. Unassigned nodes never
/// conflict. The sum of all counters is cached, so
/// [`total_conflicts`](Self::total_conflicts) is O(1).
///
/// Cloning produces a fully independent copy. Deserialization checks the
/// adjacency and rebuilds the counters from the colors; serialized
/// counters are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StateRepr"))]
pub struct ColoringState {
    nodes: Vec<Node>,
    conflicts: Vec<usize>,
    /// Σ conflicts[i]; every conflicting edge is counted twice.
    conflict_sum: usize,
}

impl ColoringState {
    /// Creates `n` uncolored nodes without edges.
    pub fn new(n: usize) -> Self {
        Self {
            nodes: (0..n).map(Node::new).collect(),
            conflicts: vec![0; n],
            conflict_sum: 0,
        }
    }

    /// Creates a state from a signed node count, as read from untrusted input.
    pub fn try_new(n: i64) -> Result<Self> {
        let n = usize::try_from(n)
            .map_err(|_| ColoringError::invalid(format!("node count must be non-negative, got {n}")))?;
        Ok(Self::new(n))
    }

    /// Builds a state with `n` nodes and the given zero-based edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_kcolor::coloring::ColoringState;
    ///
    /// let state = ColoringState::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    /// assert_eq!(state.len(), 3);
    /// assert_eq!(state.edge_count(), 2);
    /// assert_eq!(state.node(1).unwrap().neighbors(), &[0, 2]);
    /// ```
    pub fn from_edges(n: usize, edges: &[(NodeId, NodeId)]) -> Result<Self> {
        let mut state = Self::new(n);
        for &(u, v) in edges {
            state.add_edge(u, v)?;
        }
        Ok(state)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges, counting duplicates.
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(Node::degree).sum::<usize>() / 2
    }

    /// Adds the undirected edge `u - v`, recording both directions.
    ///
    /// Counters stay exact even if both endpoints are already colored.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId) -> Result<()> {
        let n = self.len();
        if u >= n || v >= n {
            return Err(ColoringError::invalid(format!(
                "edge ({u}, {v}) has an endpoint outside [0, {n})"
            )));
        }
        self.nodes[u].add_neighbor(v);
        self.nodes[v].add_neighbor(u);

        if let (Some(cu), Some(cv)) = (self.nodes[u].color(), self.nodes[v].color()) {
            if cu == cv {
                self.conflicts[u] += 1;
                self.conflicts[v] += 1;
                self.conflict_sum += 2;
            }
        }
        Ok(())
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id).ok_or(ColoringError::OutOfRange {
            id,
            len: self.nodes.len(),
        })
    }

    /// All nodes, indexed by id.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Current color of `id`.
    pub fn color(&self, id: NodeId) -> Result<Option<Color>> {
        self.node(id).map(Node::color)
    }

    /// Degree of `id`.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(Node::degree)
    }

    /// Conflict counter of `id`.
    pub fn conflicts_of(&self, id: NodeId) -> Result<usize> {
        self.check(id)?;
        Ok(self.conflicts[id])
    }

    /// All conflict counters, indexed by id.
    pub fn conflict_counters(&self) -> &[usize] {
        &self.conflicts
    }

    /// Number of conflicting edges.
    pub fn total_conflicts(&self) -> usize {
        self.conflict_sum / 2
    }

    /// Number of conflicting edges, summed from the per-node counters in O(V).
    pub fn total_conflicts_from_counters(&self) -> usize {
        self.conflicts.iter().sum::<usize>() / 2
    }

    /// Rebuilds every counter from the current colors in O(V + E).
    pub fn recompute_conflicts(&mut self) {
        let nodes = &self.nodes;
        let mut sum = 0;
        for (node, counter) in nodes.iter().zip(self.conflicts.iter_mut()) {
            *counter = match node.color() {
                Some(c) => node
                    .neighbors()
                    .iter()
                    .filter(|&&nb| nodes[nb].color() == Some(c))
                    .count(),
                None => 0,
            };
            sum += *counter;
        }
        self.conflict_sum = sum;
    }

    /// Sets the color of `id`, updating counters in O(degree).
    ///
    /// For every neighbor sharing the old color, both counters drop by one;
    /// for every neighbor sharing the new color, both rise by one.
    /// Self-loops always conflict and are left untouched, except when the
    /// node goes from unassigned to colored.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_kcolor::coloring::ColoringState;
    ///
    /// let mut state = ColoringState::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    /// for id in 0..3 {
    ///     state.recolor(id, 0).unwrap();
    /// }
    /// assert_eq!(state.total_conflicts(), 2);
    ///
    /// state.recolor(1, 1).unwrap();
    /// assert_eq!(state.total_conflicts(), 0);
    /// ```
    pub fn recolor(&mut self, id: NodeId, color: Color) -> Result<()> {
        self.check(id)?;
        let old = self.nodes[id].color();
        if old == Some(color) {
            return Ok(());
        }

        let nodes = &self.nodes;
        let conflicts = &mut self.conflicts;
        let mut sum = self.conflict_sum;
        let mut self_entries = 0;
        for &nb in nodes[id].neighbors() {
            if nb == id {
                self_entries += 1;
                continue;
            }
            let nb_color = nodes[nb].color();
            if nb_color.is_some() && nb_color == old {
                conflicts[nb] -= 1;
                conflicts[id] -= 1;
                sum -= 2;
            } else if nb_color == Some(color) {
                conflicts[nb] += 1;
                conflicts[id] += 1;
                sum += 2;
            }
        }
        if old.is_none() {
            conflicts[id] += self_entries;
            sum += self_entries;
        }
        self.conflict_sum = sum;
        self.nodes[id].set_color(Some(color));
        Ok(())
    }

    /// Current colors, indexed by id.
    pub fn colors(&self) -> Vec<Option<Color>> {
        self.nodes.iter().map(Node::color).collect()
    }

    /// Overwrites every color and rebuilds the counters.
    pub fn assign_colors(&mut self, colors: &[Option<Color>]) -> Result<()> {
        if colors.len() != self.len() {
            return Err(ColoringError::invalid(format!(
                "expected {} colors, got {}",
                self.len(),
                colors.len()
            )));
        }
        for (node, &c) in self.nodes.iter_mut().zip(colors) {
            node.set_color(c);
        }
        self.recompute_conflicts();
        Ok(())
    }

    /// Marks every node unassigned. No node conflicts afterwards.
    pub fn clear_colors(&mut self) {
        for node in &mut self.nodes {
            node.set_color(None);
        }
        self.conflicts.iter_mut().for_each(|c| *c = 0);
        self.conflict_sum = 0;
    }

    /// Ids of nodes with a nonzero conflict counter, in ascending order.
    pub fn conflicted_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.conflicted_nodes_into(&mut out);
        out
    }

    /// Like [`conflicted_nodes`](Self::conflicted_nodes), reusing `out`.
    pub fn conflicted_nodes_into(&self, out: &mut Vec<NodeId>) {
        out.clear();
        out.extend(
            self.conflicts
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c > 0)
                .map(|(i, _)| i),
        );
    }

    /// Whether every node has a color.
    pub fn is_fully_colored(&self) -> bool {
        self.nodes.iter().all(|n| n.color().is_some())
    }

    /// Number of distinct colors in use.
    pub fn colors_used(&self) -> usize {
        let mut seen: Vec<Color> = self.nodes.iter().filter_map(Node::color).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    /// Checks that every node is colored with a color in `[0, k)`.
    pub fn validate_coloring(&self, k: usize) -> Result<()> {
        for node in &self.nodes {
            match node.color() {
                None => {
                    return Err(ColoringError::invalid(format!(
                        "node {} has no color",
                        node.id()
                    )))
                }
                Some(c) if c >= k => {
                    return Err(ColoringError::invalid(format!(
                        "node {} has color {c}, outside [0, {k})",
                        node.id()
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn check(&self, id: NodeId) -> Result<()> {
        if id < self.nodes.len() {
            Ok(())
        } else {
            Err(ColoringError::OutOfRange {
                id,
                len: self.nodes.len(),
            })
        }
    }
}

/// Serialized form accepted by deserialization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct StateRepr {
    nodes: Vec<Node>,
}

#[cfg(feature = "serde")]
impl TryFrom<StateRepr> for ColoringState {
    type Error = ColoringError;

    fn try_from(repr: StateRepr) -> Result<Self> {
        let n = repr.nodes.len();
        let mut directed: HashMap<(NodeId, NodeId), usize> = HashMap::new();
        for (index, node) in repr.nodes.iter().enumerate() {
            if node.id() != index {
                return Err(ColoringError::invalid(format!(
                    "node at position {index} has id {}",
                    node.id()
                )));
            }
            for &nb in node.neighbors() {
                if nb >= n {
                    return Err(ColoringError::invalid(format!(
                        "node {index} lists neighbor {nb} outside [0, {n})"
                    )));
                }
                *directed.entry((index, nb)).or_insert(0) += 1;
            }
        }
        for (&(u, v), &count) in &directed {
            // a self-loop records its endpoint twice
            let symmetric = if u == v {
                count % 2 == 0
            } else {
                directed.get(&(v, u)) == Some(&count)
            };
            if !symmetric {
                return Err(ColoringError::invalid(format!(
                    "adjacency between nodes {u} and {v} is not symmetric"
                )));
            }
        }

        let mut state = Self {
            nodes: repr.nodes,
            conflicts: vec![0; n],
            conflict_sum: 0,
        };
        state.recompute_conflicts();
        Ok(state)
    }
}
