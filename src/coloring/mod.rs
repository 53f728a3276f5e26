//! Coloring state with incremental conflict tracking.
//!
//! [`ColoringState`] owns the nodes, their adjacency and one conflict
//! counter per node. [`ColoringState::recolor`] is the primitive every
//! search strategy builds on: it changes one color and repairs the
//! counters of the node and its neighbors in O(degree), so the global
//! conflict count never has to be recomputed during a search.

mod node;
mod state;

pub use node::{Color, Node, NodeId};
pub use state::ColoringState;
