//! Simulated Annealing (SA) over colorings.
//!
//! Each iteration recolors a few nodes in place through the incremental
//! recolor primitive, evaluates the new conflict count, and either keeps
//! the move (always when it improves, otherwise with the Metropolis
//! probability `exp(-Δ/T)`) or rolls it back from the move's undo log.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Johnson, Aragon, McGeoch & Schevon (1991), "Optimization by Simulated
//!   Annealing: An Experimental Evaluation; Part II, Graph Coloring and
//!   Number Partitioning"

mod config;
mod moves;
mod runner;
mod types;

pub use config::SaConfig;
pub use moves::RecolorMove;
pub use runner::SaRunner;
pub use types::{MoveSelection, SaResult};
