//! End-to-end pipeline: greedy construction, parallel annealing, descent.

use std::time::Duration;

use crate::coloring::{Color, ColoringState, NodeId};
use crate::descent::{DescentConfig, DescentResult, DescentRunner};
use crate::error::{ColoringError, Result};
use crate::greedy::GreedyColoring;
use crate::portfolio::PortfolioRunner;
use crate::sa::{SaConfig, SaResult};

/// Parameters of a full solve.
///
/// # Examples
///
/// ```
/// use u_kcolor::descent::DescentConfig;
/// use u_kcolor::sa::SaConfig;
/// use u_kcolor::solver::SolverConfig;
///
/// let config = SolverConfig::new(3)
///     .with_threads(2)
///     .with_annealing(SaConfig::default().with_max_iterations(10_000))
///     .with_descent(DescentConfig::default());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    /// Maximum number of colors.
    pub k: usize,
    /// Parallel annealing runs. `None` uses the hardware concurrency.
    pub threads: Option<usize>,
    /// Parameters shared by every annealing run.
    pub annealing: SaConfig,
    /// Optional descent polish of the best run.
    pub descent: Option<DescentConfig>,
}

impl SolverConfig {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            threads: None,
            annealing: SaConfig::default(),
            descent: None,
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_descent(mut self, descent: DescentConfig) -> Self {
        self.descent = Some(descent);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ColoringError::invalid("k must be at least 1"));
        }
        if self.threads == Some(0) {
            return Err(ColoringError::invalid("threads must be at least 1"));
        }
        if let Some(descent) = &self.descent {
            descent.validate()?;
        }
        self.annealing.validate()
    }
}

/// Per-run diagnostics of a solve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Worker index.
    pub worker: usize,
    /// Seed of the run's generator.
    pub seed: u64,
    pub best_cost: usize,
    pub iterations: usize,
    /// Iteration at which `best_cost` was reached.
    pub best_iteration: usize,
    pub best_elapsed: Duration,
    pub timed_out: bool,
}

impl RunSummary {
    fn from_result(worker: usize, run: &SaResult) -> Self {
        Self {
            worker,
            seed: run.seed,
            best_cost: run.best_cost,
            iterations: run.iterations,
            best_iteration: run.best_iteration,
            best_elapsed: run.best_elapsed,
            timed_out: run.timed_out,
        }
    }
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Final coloring.
    pub state: ColoringState,
    /// Conflicts of `state`.
    pub conflicts: usize,
    /// Conflicts right after greedy construction.
    pub greedy_conflicts: usize,
    /// One summary per annealing run, in worker order.
    pub runs: Vec<RunSummary>,
    /// Index in `runs` of the run that produced `state`.
    pub best_run: usize,
    /// Descent statistics, if a polish pass ran.
    pub descent: Option<DescentResult>,
}

impl Solution {
    /// Final color of every node, indexed by id.
    pub fn colors(&self) -> Vec<Option<Color>> {
        self.state.colors()
    }

    /// Whether the coloring has no conflict.
    pub fn is_proper(&self) -> bool {
        self.conflicts == 0
    }
}

/// Runs the whole pipeline.
pub struct Solver;

impl Solver {
    /// Colors the graph given by `node_count` and zero-based `edges`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_kcolor::sa::SaConfig;
    /// use u_kcolor::solver::{Solver, SolverConfig};
    ///
    /// let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 5), (5, 0)];
    /// let config = SolverConfig::new(3)
    ///     .with_threads(2)
    ///     .with_annealing(SaConfig::default().with_seed(42));
    /// let solution = Solver::solve(6, &edges, &config).unwrap();
    /// assert!(solution.is_proper());
    /// ```
    pub fn solve(node_count: usize, edges: &[(NodeId, NodeId)], config: &SolverConfig) -> Result<Solution> {
        let state = ColoringState::from_edges(node_count, edges)?;
        Self::solve_state(state, config)
    }

    /// Like [`solve`](Self::solve), on an already built state. Existing
    /// colors are replaced by the greedy construction.
    pub fn solve_state(mut state: ColoringState, config: &SolverConfig) -> Result<Solution> {
        config.validate()?;
        let k = config.k;

        let greedy_conflicts = GreedyColoring::run(&mut state, k)?;
        let portfolio =
            PortfolioRunner::run(&state, k, &config.annealing, config.threads.unwrap_or(0))?;

        let runs: Vec<RunSummary> = portfolio
            .runs
            .iter()
            .enumerate()
            .map(|(worker, run)| RunSummary::from_result(worker, run))
            .collect();
        let best_run = portfolio.best_index;
        let mut best = portfolio.into_best().best;

        let descent = match &config.descent {
            Some(descent_config) if best.total_conflicts() > 0 => {
                Some(DescentRunner::run(&mut best, k, descent_config)?)
            }
            _ => None,
        };

        let conflicts = best.total_conflicts();
        log::debug!("solver: greedy {greedy_conflicts} -> final {conflicts} conflicts (run {best_run})");

        Ok(Solution {
            state: best,
            conflicts,
            greedy_conflicts,
            runs,
            best_run,
            descent,
        })
    }
}
