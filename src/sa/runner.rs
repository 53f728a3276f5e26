//! SA execution loop.

use std::time::{Duration, Instant};

use rand::Rng;

use super::config::SaConfig;
use super::moves::RecolorMove;
use super::types::SaResult;
use crate::coloring::{Color, ColoringState, Node};
use crate::error::{ColoringError, Result};
use crate::random::{create_rng, entropy_seed};

/// Executes simulated annealing on a coloring.
pub struct SaRunner;

impl SaRunner {
    /// Anneals `initial` with `k` colors and returns the best coloring seen.
    ///
    /// Every node of `initial` must be colored with a color below `k`
    /// (e.g. by [`GreedyColoring`](crate::greedy::GreedyColoring)).
    /// `initial` itself is not modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_kcolor::coloring::ColoringState;
    /// use u_kcolor::greedy::GreedyColoring;
    /// use u_kcolor::sa::{SaConfig, SaRunner};
    ///
    /// let mut state = ColoringState::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
    /// GreedyColoring::run(&mut state, 2).unwrap();
    ///
    /// let config = SaConfig::default().with_max_iterations(1_000).with_seed(42);
    /// let result = SaRunner::run(&state, 2, &config).unwrap();
    /// assert_eq!(result.best_cost, 0);
    /// ```
    pub fn run(initial: &ColoringState, k: usize, config: &SaConfig) -> Result<SaResult> {
        config.validate()?;
        if k == 0 {
            return Err(ColoringError::invalid("k must be at least 1"));
        }
        initial.validate_coloring(k)?;

        let seed = config.seed.unwrap_or_else(|| entropy_seed(0));
        let mut rng = create_rng(seed);
        let start = Instant::now();

        let mut current = initial.clone();
        let mut current_cost = current.total_conflicts();
        let mut best_colors: Vec<Option<Color>> = current.colors();
        let mut best_cost = current_cost;
        let mut best_iteration = 0usize;
        let mut best_elapsed = Duration::ZERO;
        let mut last_improvement_iteration = 0usize;
        let mut last_improvement_elapsed = Duration::ZERO;

        let mut temperature = config.initial_temperature;
        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut timed_out = false;

        let mut cost_history = vec![best_cost];
        let mut mv = RecolorMove::new();

        log::debug!(
            "sa: start n={} k={k} cost={current_cost} T0={} seed={seed}",
            current.len(),
            config.initial_temperature
        );

        while iterations < config.max_iterations {
            if config.stop_when_proper && best_cost == 0 {
                break;
            }
            if let Some(limit) = config.time_limit {
                if start.elapsed() >= limit {
                    timed_out = true;
                    break;
                }
            }

            mv.apply(
                &mut current,
                k,
                config.recolor_count,
                config.move_selection,
                &mut rng,
            )?;
            let candidate_cost = current.total_conflicts();

            // Metropolis acceptance criterion
            let accept = if candidate_cost < current_cost {
                improving_moves += 1;
                last_improvement_iteration = iterations + 1;
                last_improvement_elapsed = start.elapsed();
                true
            } else {
                let delta = current_cost as f64 - candidate_cost as f64;
                let probability = (delta / temperature).exp();
                rng.random::<f64>() < probability
            };

            if accept {
                current_cost = candidate_cost;
                accepted_moves += 1;

                if current_cost < best_cost {
                    best_cost = current_cost;
                    best_colors.clear();
                    best_colors.extend(current.nodes().iter().map(Node::color));
                    best_iteration = iterations + 1;
                    best_elapsed = start.elapsed();
                    log::trace!("sa: new best {best_cost} at iteration {best_iteration}");
                }
            } else {
                mv.undo(&mut current)?;
            }

            iterations += 1;

            if iterations.is_multiple_of(config.cooling_interval) {
                temperature = (temperature * config.cooling_factor).max(config.min_temperature);
            }

            if iterations.is_multiple_of(config.history_interval) {
                cost_history.push(best_cost);
            }
        }

        if cost_history.last() != Some(&best_cost) {
            cost_history.push(best_cost);
        }

        let mut best = initial.clone();
        best.assign_colors(&best_colors)?;

        log::debug!(
            "sa: done best={best_cost} iterations={iterations} accepted={accepted_moves} \
             T={temperature:.3e} timed_out={timed_out}"
        );

        Ok(SaResult {
            best,
            best_cost,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            best_iteration,
            best_elapsed,
            last_improvement_iteration,
            last_improvement_elapsed,
            timed_out,
            seed,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::GreedyColoring;
    use crate::sa::MoveSelection;

    fn chord_cycle() -> ColoringState {
        let edges = [(0, 1), (0, 2), (1, 3), (2, 3), (3, 4), (4, 5), (5, 0)];
        ColoringState::from_edges(6, &edges).unwrap()
    }

    fn complete(n: usize) -> ColoringState {
        let edges: Vec<(usize, usize)> = (0..n)
            .flat_map(|u| ((u + 1)..n).map(move |v| (u, v)))
            .collect();
        ColoringState::from_edges(n, &edges).unwrap()
    }

    /// Random graph with a hidden proper 3-coloring: node `i` belongs to
    /// class `i % 3` and edges only join different classes.
    fn planted_three_colorable(n: usize, edges: usize, seed: u64) -> ColoringState {
        let mut rng = create_rng(seed);
        let mut state = ColoringState::new(n);
        let mut added = 0;
        while added < edges {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u % 3 != v % 3 {
                state.add_edge(u, v).unwrap();
                added += 1;
            }
        }
        state
    }

    fn greedy(mut state: ColoringState, k: usize) -> ColoringState {
        GreedyColoring::run(&mut state, k).unwrap();
        state
    }

    #[test]
    fn test_chord_cycle_reaches_proper_coloring() {
        let state = greedy(chord_cycle(), 3);
        let config = SaConfig::default()
            .with_max_iterations(200_000)
            .with_seed(42);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert_eq!(result.best_cost, 0);
        assert_eq!(result.best.total_conflicts(), 0);
        assert!(result.best.validate_coloring(3).is_ok());
    }

    #[test]
    fn test_chord_cycle_uniform_moves() {
        // Start from a deliberately bad coloring so the search has work to do.
        let mut state = chord_cycle();
        state.assign_colors(&[Some(0); 6]).unwrap();
        let config = SaConfig::default()
            .with_max_iterations(200_000)
            .with_move_selection(MoveSelection::Uniform)
            .with_seed(7);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert_eq!(result.best_cost, 0);
        assert!(result.improving_moves > 0);
    }

    #[test]
    fn test_planted_graph_improves_on_greedy() {
        let state = greedy(planted_three_colorable(90, 400, 11), 3);
        let initial_cost = state.total_conflicts();
        let config = SaConfig::default()
            .with_initial_temperature(2.0)
            .with_cooling_factor(0.9995)
            .with_max_iterations(100_000)
            .with_recolor_count(2)
            .with_seed(3);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert!(result.best_cost <= initial_cost);

        let mut check = result.best.clone();
        check.recompute_conflicts();
        assert_eq!(check.total_conflicts(), result.best_cost);
    }

    #[test]
    fn test_input_not_modified() {
        let state = greedy(complete(5), 3);
        let before = state.clone();
        let config = SaConfig::default().with_max_iterations(500).with_seed(1);
        SaRunner::run(&state, 3, &config).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_max_iterations_limit() {
        // K4 with 3 colors always has a conflict, so the run uses its full budget.
        let state = greedy(complete(4), 3);
        let config = SaConfig::default().with_max_iterations(500).with_seed(42);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert_eq!(result.iterations, 500);
        assert_eq!(result.best_cost, 1);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_time_limit_stops_run() {
        let state = greedy(complete(4), 3);
        let config = SaConfig::default()
            .with_max_iterations(usize::MAX)
            .with_time_limit(Duration::ZERO)
            .with_seed(42);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert!(result.timed_out);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_stops_when_proper() {
        let mut state = chord_cycle();
        state.assign_colors(&[Some(0); 6]).unwrap();
        let config = SaConfig::default().with_max_iterations(200_000).with_seed(1);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert_eq!(result.best_cost, 0);
        assert_eq!(result.iterations, result.best_iteration);
    }

    #[test]
    fn test_best_history_non_increasing() {
        let state = greedy(planted_three_colorable(60, 300, 5), 3);
        let config = SaConfig::default()
            .with_initial_temperature(5.0)
            .with_max_iterations(20_000)
            .with_history_interval(50)
            .with_stop_when_proper(false)
            .with_seed(9);
        let result = SaRunner::run(&state, 3, &config).unwrap();

        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
        assert_eq!(result.cost_history.last(), Some(&result.best_cost));
        assert!(result.best_iteration <= result.iterations);
    }

    #[test]
    fn test_metropolis_accepts_uphill_at_high_temperature() {
        let state = greedy(complete(6), 3);
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_cooling_factor(0.99)
            .with_max_iterations(2_000)
            .with_move_selection(MoveSelection::Uniform)
            .with_seed(42);
        let result = SaRunner::run(&state, 3, &config).unwrap();

        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.8,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
        assert!(result.final_temperature >= 1e7);
    }

    #[test]
    fn test_temperature_floor() {
        let state = greedy(complete(4), 3);
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_min_temperature(0.5)
            .with_cooling_factor(0.5)
            .with_max_iterations(100)
            .with_seed(42);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert!((result.final_temperature - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_cooling_interval() {
        let state = greedy(complete(4), 3);
        let config = SaConfig::default()
            .with_initial_temperature(1.0)
            .with_cooling_factor(0.5)
            .with_cooling_interval(10)
            .with_min_temperature(1e-9)
            .with_max_iterations(30)
            .with_seed(42);
        let result = SaRunner::run(&state, 3, &config).unwrap();
        assert!((result.final_temperature - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_result() {
        let state = greedy(planted_three_colorable(45, 150, 2), 3);
        let config = SaConfig::default()
            .with_max_iterations(5_000)
            .with_stop_when_proper(false)
            .with_seed(1234);
        let a = SaRunner::run(&state, 3, &config).unwrap();
        let b = SaRunner::run(&state, 3, &config).unwrap();
        assert_eq!(a.best.colors(), b.best.colors());
        assert_eq!(a.accepted_moves, b.accepted_moves);
        assert_eq!(a.seed, 1234);
    }

    #[test]
    fn test_rejects_k_zero() {
        let state = greedy(chord_cycle(), 3);
        assert!(matches!(
            SaRunner::run(&state, 0, &SaConfig::default()),
            Err(ColoringError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_uncolored_input() {
        let state = chord_cycle();
        assert!(matches!(
            SaRunner::run(&state, 3, &SaConfig::default()),
            Err(ColoringError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_colors_outside_palette() {
        let state = greedy(complete(4), 4);
        assert!(SaRunner::run(&state, 3, &SaConfig::default()).is_err());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let state = greedy(chord_cycle(), 3);
        let config = SaConfig::default().with_cooling_factor(2.0);
        assert!(SaRunner::run(&state, 3, &config).is_err());
    }

    #[test]
    fn test_single_color_keeps_conflicts() {
        let state = greedy(ColoringState::from_edges(3, &[(0, 1), (1, 2)]).unwrap(), 1);
        let config = SaConfig::default().with_max_iterations(100).with_seed(1);
        let result = SaRunner::run(&state, 1, &config).unwrap();
        assert_eq!(result.best_cost, 2);
    }

    #[test]
    fn test_empty_graph() {
        let state = ColoringState::new(0);
        let result = SaRunner::run(&state, 2, &SaConfig::default()).unwrap();
        assert_eq!(result.best_cost, 0);
        assert_eq!(result.iterations, 0);
    }
}
