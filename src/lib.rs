//! Low-conflict k-coloring of undirected graphs.
//!
//! Given a graph and a color budget `k`, finds a coloring with as few
//! conflicting edges (both endpoints sharing a color) as possible:
//!
//! - **Coloring state**: nodes, adjacency and per-node conflict counters
//!   kept consistent in O(degree) per recoloring.
//! - **Greedy**: degree-ordered construction of an initial coloring.
//! - **Simulated Annealing (SA)**: random recoloring moves with Metropolis
//!   acceptance and geometric cooling.
//! - **Descent**: min-conflicts single-node repair.
//! - **Portfolio**: independent annealing runs on a fork/join thread pool.
//! - **Solver**: the pipeline greedy → portfolio → descent.
//!
//! The [`dimacs`] module reads graphs from DIMACS files; everything else
//! works on in-memory edge lists.
//!
//! # Example
//!
//! ```
//! use u_kcolor::sa::SaConfig;
//! use u_kcolor::solver::{Solver, SolverConfig};
//!
//! // 5-cycle: needs 3 colors.
//! let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)];
//! let config = SolverConfig::new(3)
//!     .with_threads(1)
//!     .with_annealing(SaConfig::default().with_seed(7));
//! let solution = Solver::solve(5, &edges, &config).unwrap();
//! assert_eq!(solution.conflicts, 0);
//! ```

pub mod coloring;
pub mod descent;
pub mod dimacs;
pub mod error;
pub mod greedy;
pub mod portfolio;
pub mod random;
pub mod sa;
pub mod solver;

pub use error::{ColoringError, Result};
