//! SA configuration.

use std::time::Duration;

use super::types::MoveSelection;
use crate::error::{ColoringError, Result};

/// Configuration for the annealing controller.
///
/// Temperature follows a geometric schedule: every `cooling_interval`
/// iterations it is multiplied by `cooling_factor`, and it never drops
/// below `min_temperature`.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_kcolor::sa::{MoveSelection, SaConfig};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(5.0)
///     .with_cooling_factor(0.995)
///     .with_max_iterations(50_000)
///     .with_recolor_count(2)
///     .with_move_selection(MoveSelection::Uniform)
///     .with_time_limit(Duration::from_secs(2));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values accept more worsening moves.
    pub initial_temperature: f64,

    /// Multiplicative cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_factor: f64,

    /// Temperature floor. Keeps the Metropolis ratio finite.
    pub min_temperature: f64,

    /// Number of iterations between two cooling steps.
    pub cooling_interval: usize,

    /// Iteration cap.
    pub max_iterations: usize,

    /// Nodes recolored per move. Clamped to the number of eligible nodes.
    pub recolor_count: usize,

    /// Which nodes a move may pick.
    pub move_selection: MoveSelection,

    /// Wall-clock budget, checked once per iteration.
    pub time_limit: Option<Duration>,

    /// Stop as soon as a coloring without conflicts is found.
    pub stop_when_proper: bool,

    /// Best cost is sampled into the history every this many iterations.
    pub history_interval: usize,

    /// Random seed. `None` derives one from the clock.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 10.0,
            cooling_factor: 0.999,
            min_temperature: 1e-6,
            cooling_interval: 1,
            max_iterations: 100_000,
            recolor_count: 1,
            move_selection: MoveSelection::default(),
            time_limit: None,
            stop_when_proper: true,
            history_interval: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, factor: f64) -> Self {
        self.cooling_factor = factor;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_interval(mut self, n: usize) -> Self {
        self.cooling_interval = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_recolor_count(mut self, n: usize) -> Self {
        self.recolor_count = n;
        self
    }

    pub fn with_move_selection(mut self, selection: MoveSelection) -> Self {
        self.move_selection = selection;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_stop_when_proper(mut self, stop: bool) -> Self {
        self.stop_when_proper = stop;
        self
    }

    pub fn with_history_interval(mut self, n: usize) -> Self {
        self.history_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.initial_temperature > 0.0) {
            return Err(ColoringError::invalid(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(ColoringError::invalid(format!(
                "cooling_factor must be in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if !(self.min_temperature > 0.0) {
            return Err(ColoringError::invalid("min_temperature must be positive"));
        }
        if self.min_temperature > self.initial_temperature {
            return Err(ColoringError::invalid(
                "min_temperature must not exceed initial_temperature",
            ));
        }
        if self.cooling_interval == 0 {
            return Err(ColoringError::invalid("cooling_interval must be at least 1"));
        }
        if self.recolor_count == 0 {
            return Err(ColoringError::invalid("recolor_count must be at least 1"));
        }
        if self.history_interval == 0 {
            return Err(ColoringError::invalid("history_interval must be at least 1"));
        }
        Ok(())
    }
}
