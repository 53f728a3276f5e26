//! Greedy construction of an initial coloring.
//!
//! A single pass in descending-degree order that never fails: when `k` is
//! too small to avoid conflicts, each node falls back to the color least
//! used by its neighbors.

mod runner;

pub use runner::GreedyColoring;
