//! SA move modes and run results.

use std::time::Duration;

use crate::coloring::ColoringState;

/// Which nodes a recoloring move may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveSelection {
    /// Only nodes with a nonzero conflict counter.
    #[default]
    Conflicted,
    /// Any node, regardless of conflict status.
    Uniform,
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaResult {
    /// Best coloring found, with consistent conflict counters.
    pub best: ColoringState,

    /// Conflicts of `best`.
    pub best_cost: usize,

    /// Iterations executed.
    pub iterations: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Accepted moves, improving ones included.
    pub accepted_moves: usize,

    /// Moves that strictly lowered the current cost.
    pub improving_moves: usize,

    /// Iteration count at which `best` was found (0 = initial coloring).
    pub best_iteration: usize,

    /// Time from start until `best` was found.
    pub best_elapsed: Duration,

    /// Iteration count of the last improving move.
    pub last_improvement_iteration: usize,

    /// Time from start until the last improving move.
    pub last_improvement_elapsed: Duration,

    /// Whether the wall-clock budget ended the run.
    pub timed_out: bool,

    /// Seed the run's generator was built from.
    pub seed: u64,

    /// Best cost sampled every `history_interval` iterations. Non-increasing.
    pub cost_history: Vec<usize>,
}
