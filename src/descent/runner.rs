//! Min-conflicts descent loop.

use rand::Rng;

use super::config::DescentConfig;
use crate::coloring::{Color, ColoringState};
use crate::error::{ColoringError, Result};
use crate::random::{create_rng, entropy_seed};

/// Result of a descent pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentResult {
    /// Conflicts before the pass.
    pub initial_cost: usize,
    /// Conflicts after the pass.
    pub final_cost: usize,
    /// Repair steps executed.
    pub iterations: usize,
    /// Steps that changed a color.
    pub recolored: usize,
}

/// Single-node steepest descent on the conflict count.
pub struct DescentRunner;

impl DescentRunner {
    /// Repairs `state` in place.
    ///
    /// Each step draws a node uniformly, counts its same-colored neighbors
    /// for every color in `[0, k)`, and moves it to a color with the fewest,
    /// ties broken uniformly at random. A step never increases the total
    /// conflict count. The pass stops early once no conflict is left.
    pub fn run(state: &mut ColoringState, k: usize, config: &DescentConfig) -> Result<DescentResult> {
        config.validate()?;
        if k == 0 {
            return Err(ColoringError::invalid("k must be at least 1"));
        }
        state.validate_coloring(k)?;

        let mut rng = create_rng(config.seed.unwrap_or_else(|| entropy_seed(1)));
        let initial_cost = state.total_conflicts();
        let n = state.len();

        let mut counts = vec![0usize; k];
        let mut minimizers: Vec<Color> = Vec::with_capacity(k);
        let mut iterations = 0;
        let mut recolored = 0;

        while iterations < config.max_iterations && n > 0 && state.total_conflicts() > 0 {
            let id = rng.random_range(0..n);

            counts.iter_mut().for_each(|c| *c = 0);
            for &nb in state.nodes()[id].neighbors() {
                if nb == id {
                    continue;
                }
                if let Some(c) = state.nodes()[nb].color() {
                    counts[c] += 1;
                }
            }

            let min = counts.iter().copied().min().unwrap_or(0);
            minimizers.clear();
            minimizers.extend((0..k).filter(|&c| counts[c] == min));
            let chosen = minimizers[rng.random_range(0..minimizers.len())];

            if state.color(id)? != Some(chosen) {
                state.recolor(id, chosen)?;
                recolored += 1;
            }
            iterations += 1;
        }

        let final_cost = state.total_conflicts();
        log::debug!("descent: {initial_cost} -> {final_cost} conflicts in {iterations} steps ({recolored} recolored)");

        Ok(DescentResult {
            initial_cost,
            final_cost,
            iterations,
            recolored,
        })
    }
}
