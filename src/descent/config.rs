//! Local descent configuration.

use crate::error::{ColoringError, Result};

/// Configuration for the min-conflicts descent pass.
///
/// # Examples
///
/// ```
/// use u_kcolor::descent::DescentConfig;
///
/// let config = DescentConfig::default()
///     .with_max_iterations(5_000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescentConfig {
    /// Number of single-node repair steps.
    pub max_iterations: usize,
    /// Random seed (None derives one from the clock).
    pub seed: Option<u64>,
}

impl Default for DescentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            seed: None,
        }
    }
}

impl DescentConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(ColoringError::invalid("max_iterations must be at least 1"));
        }
        Ok(())
    }
}
