//! Local descent refinement.
//!
//! A min-conflicts repair pass: repeatedly move one random node to the
//! color shared by the fewest of its neighbors. Meant to polish an
//! annealing result; repeated application converges to a local optimum.
//!
//! # References
//!
//! - Minton, Johnston, Philips & Laird (1992), "Minimizing conflicts: a
//!   heuristic repair method for constraint satisfaction and scheduling
//!   problems"

mod config;
mod runner;

pub use config::DescentConfig;
pub use runner::{DescentResult, DescentRunner};
