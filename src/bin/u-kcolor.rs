//! Command-line front end: colors a DIMACS graph with at most k colors.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use u_kcolor::descent::DescentConfig;
use u_kcolor::dimacs::read_dimacs_file;
use u_kcolor::sa::{MoveSelection, SaConfig};
use u_kcolor::solver::{Solver, SolverConfig};

#[derive(Parser, Debug)]
#[command(name = "u-kcolor")]
#[command(about = "Low-conflict k-coloring by greedy construction and parallel simulated annealing")]
#[command(version)]
struct Args {
    /// DIMACS graph file (`p edge N M` / `e U V`)
    file: PathBuf,

    /// Maximum number of colors
    #[arg(short = 'k', long = "colors")]
    k: usize,

    /// Parallel annealing runs (defaults to hardware concurrency)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Initial annealing temperature
    #[arg(long, default_value_t = 10.0)]
    temperature: f64,

    /// Multiplicative cooling factor in (0, 1)
    #[arg(long, default_value_t = 0.999)]
    cooling: f64,

    /// Iteration cap per run
    #[arg(long, default_value_t = 100_000)]
    iterations: usize,

    /// Nodes recolored per move
    #[arg(long, default_value_t = 1)]
    recolor: usize,

    /// Wall-clock budget per run, in seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Pick moved nodes among all nodes instead of conflicted ones
    #[arg(long)]
    uniform_moves: bool,

    /// Descent polish steps after annealing (0 disables)
    #[arg(long, default_value_t = 0)]
    descent_iterations: usize,

    /// Base random seed (per-run seeds are derived from it)
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let graph = read_dimacs_file(&args.file)
        .with_context(|| format!("failed to load graph from {}", args.file.display()))?;
    info!(
        "loaded {}: {} nodes, {} edges",
        args.file.display(),
        graph.node_count,
        graph.edges.len()
    );

    let mut annealing = SaConfig::default()
        .with_initial_temperature(args.temperature)
        .with_cooling_factor(args.cooling)
        .with_max_iterations(args.iterations)
        .with_recolor_count(args.recolor);
    if args.uniform_moves {
        annealing = annealing.with_move_selection(MoveSelection::Uniform);
    }
    if let Some(secs) = args.time_limit {
        let limit = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("invalid time limit {secs}"))?;
        annealing = annealing.with_time_limit(limit);
    }
    if let Some(seed) = args.seed {
        annealing = annealing.with_seed(seed);
    }

    let mut config = SolverConfig::new(args.k).with_annealing(annealing);
    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    if args.descent_iterations > 0 {
        let mut descent = DescentConfig::default().with_max_iterations(args.descent_iterations);
        if let Some(seed) = args.seed {
            descent = descent.with_seed(seed);
        }
        config = config.with_descent(descent);
    }

    let start = Instant::now();
    let solution = Solver::solve(graph.node_count, &graph.edges, &config)?;
    let elapsed = start.elapsed();

    println!("greedy conflicts: {}", solution.greedy_conflicts);
    for run in &solution.runs {
        println!(
            "run {}: {} conflicts, {} iterations, best at iteration {} ({:.3}s){}",
            run.worker,
            run.best_cost,
            run.iterations,
            run.best_iteration,
            run.best_elapsed.as_secs_f64(),
            if run.timed_out { ", timed out" } else { "" }
        );
    }
    if let Some(descent) = &solution.descent {
        println!(
            "descent: {} -> {} conflicts",
            descent.initial_cost, descent.final_cost
        );
    }
    println!(
        "best: {} conflicts with k={} ({} colors used) in {:.3}s",
        solution.conflicts,
        args.k,
        solution.state.colors_used(),
        elapsed.as_secs_f64()
    );
    for (id, color) in solution.colors().iter().enumerate() {
        if let Some(color) = color {
            println!("{} {}", id + 1, color);
        }
    }

    Ok(())
}
