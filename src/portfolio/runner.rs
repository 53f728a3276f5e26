//! Fork/join execution of independent annealing runs.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::coloring::ColoringState;
use crate::error::Result;
use crate::random::{entropy_seed, worker_seed};
use crate::sa::{SaConfig, SaResult, SaRunner};

/// Results of all runs of a portfolio, in worker order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioResult {
    /// One result per worker.
    pub runs: Vec<SaResult>,
    /// Index in `runs` of the lowest-cost run (first one on ties).
    pub best_index: usize,
}

impl PortfolioResult {
    /// The lowest-cost run.
    pub fn best(&self) -> &SaResult {
        &self.runs[self.best_index]
    }

    /// Consumes the portfolio and returns the lowest-cost run.
    pub fn into_best(mut self) -> SaResult {
        self.runs.swap_remove(self.best_index)
    }

    /// Best cost of every run, in worker order.
    pub fn costs(&self) -> Vec<usize> {
        self.runs.iter().map(|r| r.best_cost).collect()
    }
}

/// Runs several independent annealing searches in parallel.
pub struct PortfolioRunner;

impl PortfolioRunner {
    /// Runs `threads` annealing searches on private clones of `base`, one
    /// per worker thread, and waits for all of them.
    ///
    /// `threads == 0` uses the available hardware parallelism. Each worker
    /// gets its own generator: with `config.seed` set, seeds are derived
    /// deterministically from it and the worker index; otherwise from the
    /// clock and the worker index. The first failing worker's error is
    /// returned.
    pub fn run(
        base: &ColoringState,
        k: usize,
        config: &SaConfig,
        threads: usize,
    ) -> Result<PortfolioResult> {
        config.validate()?;
        let threads = resolve_threads(threads);
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("u-kcolor-sa-{i}"))
            .build()?;

        log::debug!("portfolio: {threads} runs, n={} k={k}", base.len());

        let runs: Vec<SaResult> = pool.install(|| {
            (0..threads)
                .into_par_iter()
                .map(|worker| {
                    let seed = match config.seed {
                        Some(base_seed) => worker_seed(base_seed, worker as u64),
                        None => entropy_seed(worker as u64),
                    };
                    SaRunner::run(base, k, &config.clone().with_seed(seed))
                })
                .collect::<Result<Vec<_>>>()
        })?;

        for (worker, run) in runs.iter().enumerate() {
            log::info!(
                "run {worker}: {} conflicts after {} iterations (best at {}, {:.3}s){}",
                run.best_cost,
                run.iterations,
                run.best_iteration,
                run.best_elapsed.as_secs_f64(),
                if run.timed_out { ", timed out" } else { "" }
            );
        }

        let best_index = runs
            .iter()
            .enumerate()
            .min_by_key(|(_, r)| r.best_cost)
            .map(|(i, _)| i)
            .unwrap_or(0);

        Ok(PortfolioResult { runs, best_index })
    }
}

/// Maps `0` to the hardware concurrency (at least one).
pub fn resolve_threads(threads: usize) -> usize {
    if threads > 0 {
        threads
    } else {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}
