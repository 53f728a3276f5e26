//! Parallel multi-restart annealing.
//!
//! A fixed pool of worker threads, one per run, each owning a private
//! clone of the base coloring and its own generator. Nothing is shared or
//! locked during the search; results are collected after every worker has
//! finished.

mod runner;

pub use runner::{resolve_threads, PortfolioResult, PortfolioRunner};
