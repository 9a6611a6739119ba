//! ε-greedy exploration over valid actions

use rand::{Rng, seq::IndexedRandom};

use super::q_table::QTable;
use crate::{
    Error, Result,
    types::{Action, Position},
};

/// ε-greedy selector with optional per-episode decay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
    initial_epsilon: f64,
    decay: f64,
    min_epsilon: f64,
}

impl EpsilonGreedy {
    /// Fixed exploration rate.
    pub fn new(epsilon: f64) -> Self {
        Self::with_decay(epsilon, 1.0, 0.0)
    }

    pub fn with_decay(epsilon: f64, decay: f64, min_epsilon: f64) -> Self {
        Self {
            epsilon,
            initial_epsilon: epsilon,
            decay,
            min_epsilon,
        }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn initial_epsilon(&self) -> f64 {
        self.initial_epsilon
    }

    /// Choose among `legal_actions` at `state`.
    ///
    /// Always draws one uniform value first; below ε a uniformly random legal
    /// action is returned, otherwise the greedy one under `q_table`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoValidActions`] if `legal_actions` is empty.
    pub fn select<R: Rng>(
        &self,
        state: Position,
        legal_actions: &[Action],
        q_table: &QTable,
        rng: &mut R,
    ) -> Result<Action> {
        let explore = rng.random::<f64>() < self.epsilon;
        let chosen = if explore {
            legal_actions.choose(rng).copied()
        } else {
            q_table.greedy_action(state, legal_actions)
        };
        chosen.ok_or(Error::NoValidActions { state })
    }

    /// Decay epsilon after episode
    pub fn decay(&mut self) {
        self.epsilon = (self.epsilon * self.decay).max(self.min_epsilon);
    }
}
