//! Configuration types for agent creation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Hyperparameters for a Q-learning run.
///
/// Defaults: α = 0.1, γ = 0.9, ε = 0.1 with no decay, unbounded episodes and
/// a non-deterministic seed.
///
/// # Examples
///
/// ```
/// use qmaze::app::LearningConfig;
///
/// let config = LearningConfig::new(0.5, 0.95, 0.3)
///     .with_epsilon_decay(0.99, 0.05)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningConfig {
    /// Learning rate α, in (0, 1]
    pub learning_rate: f64,
    /// Discount factor γ, in [0, 1]
    pub discount_factor: f64,
    /// Exploration rate ε, in [0, 1]
    pub epsilon: f64,
    /// Multiplicative decay applied to ε after each episode, in (0, 1]
    pub epsilon_decay: f64,
    /// Floor for ε under decay
    pub min_epsilon: f64,
    /// Maximum transitions per episode; `None` runs until the goal is reached
    pub step_limit: Option<usize>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl LearningConfig {
    /// Create a configuration with fixed ε and the remaining defaults.
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            learning_rate,
            discount_factor,
            epsilon,
            ..Self::default()
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Decay ε by `decay` after every episode, never below `min_epsilon`.
    pub fn with_epsilon_decay(mut self, decay: f64, min_epsilon: f64) -> Self {
        self.epsilon_decay = decay;
        self.min_epsilon = min_epsilon;
        self
    }

    /// Cap every episode at `steps` transitions.
    pub fn with_step_limit(mut self, steps: usize) -> Self {
        self.step_limit = Some(steps);
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter against its admissible range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (
                self.learning_rate > 0.0 && self.learning_rate <= 1.0,
                "learning rate",
                self.learning_rate,
                "(0, 1]",
            ),
            (
                (0.0..=1.0).contains(&self.discount_factor),
                "discount factor",
                self.discount_factor,
                "[0, 1]",
            ),
            (
                (0.0..=1.0).contains(&self.epsilon),
                "epsilon",
                self.epsilon,
                "[0, 1]",
            ),
            (
                self.epsilon_decay > 0.0 && self.epsilon_decay <= 1.0,
                "epsilon decay",
                self.epsilon_decay,
                "(0, 1]",
            ),
            (
                self.min_epsilon >= 0.0 && self.min_epsilon <= self.epsilon,
                "min epsilon",
                self.min_epsilon,
                "[0, epsilon]",
            ),
        ];

        for (ok, name, value, range) in checks {
            if !ok {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} {value} must lie in {range}"),
                });
            }
        }

        if self.step_limit == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "step limit must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            epsilon: 0.1,
            epsilon_decay: 1.0,
            min_epsilon: 0.0,
            step_limit: None,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = LearningConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.learning_rate, 0.1);
        assert_eq!(config.discount_factor, 0.9);
        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.step_limit, None);
    }

    #[test]
    fn test_rejects_zero_learning_rate() {
        let err = LearningConfig::default()
            .with_learning_rate(0.0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("learning rate"));
    }

    #[test]
    fn test_boundary_values_accepted() {
        let config = LearningConfig::new(1.0, 1.0, 1.0);
        assert!(config.validate().is_ok());
        let config = LearningConfig::new(1.0, 0.0, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        assert!(
            LearningConfig::default()
                .with_discount_factor(1.5)
                .validate()
                .is_err()
        );
        assert!(LearningConfig::default().with_epsilon(-0.1).validate().is_err());
        assert!(
            LearningConfig::default()
                .with_epsilon_decay(0.0, 0.0)
                .validate()
                .is_err()
        );
        assert!(
            LearningConfig::default()
                .with_epsilon_decay(0.9, 0.5)
                .validate()
                .is_err()
        );
        assert!(LearningConfig::default().with_step_limit(0).validate().is_err());
        assert!(
            LearningConfig::default()
                .with_learning_rate(f64::NAN)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let config = LearningConfig::default().with_seed(3).with_step_limit(50);
        let json = serde_json::to_string(&config).unwrap();
        let parsed: LearningConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
