//! Degree-ordered greedy construction.

use std::cmp::Reverse;

use crate::coloring::{Color, ColoringState, NodeId};
use crate::error::{ColoringError, Result};

/// Builds an initial coloring with at most `k` colors.
pub struct GreedyColoring;

impl GreedyColoring {
    /// Colors every node of `state` and returns the resulting conflict count.
    ///
    /// Nodes are visited by descending degree, ties by ascending id. Each
    /// node takes the smallest color unused by its already-colored
    /// neighbors; if all `k` colors are taken, it takes the least frequent
    /// one among them (ties by smallest index). Colors present on `state`
    /// beforehand are discarded.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_kcolor::coloring::ColoringState;
    /// use u_kcolor::greedy::GreedyColoring;
    ///
    /// let mut state = ColoringState::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    /// let conflicts = GreedyColoring::run(&mut state, 2).unwrap();
    /// assert_eq!(conflicts, 0);
    /// assert!(state.is_fully_colored());
    /// ```
    pub fn run(state: &mut ColoringState, k: usize) -> Result<usize> {
        if k == 0 {
            return Err(ColoringError::invalid("k must be at least 1"));
        }

        let order = visiting_order(state);
        let mut assigned: Vec<Option<Color>> = vec![None; state.len()];
        let mut counts = vec![0usize; k];

        for &id in &order {
            counts.iter_mut().for_each(|c| *c = 0);
            for &nb in state.nodes()[id].neighbors() {
                if let Some(c) = assigned[nb] {
                    counts[c] += 1;
                }
            }
            assigned[id] = Some(pick_color(&counts));
        }

        state.assign_colors(&assigned)?;
        let conflicts = state.total_conflicts();
        log::debug!(
            "greedy: {} nodes, k={k}, {conflicts} conflicts, {} colors used",
            state.len(),
            state.colors_used()
        );
        Ok(conflicts)
    }
}

/// Node ids sorted by descending degree; the stable sort keeps ids ascending
/// within a degree.
fn visiting_order(state: &ColoringState) -> Vec<NodeId> {
    let mut order: Vec<NodeId> = (0..state.len()).collect();
    order.sort_by_key(|&id| Reverse(state.nodes()[id].degree()));
    order
}

/// First color with no occurrence among neighbors, otherwise the least
/// frequent one. `min_by_key` returns the first minimum, i.e. the smallest
/// index.
fn pick_color(counts: &[usize]) -> Color {
    counts
        .iter()
        .enumerate()
        .min_by_key(|&(_, &c)| c)
        .map(|(color, _)| color)
        .unwrap_or(0)
}
