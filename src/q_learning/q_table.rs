//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::types::{Action, Position};

/// Learned values for the actions of a single state.
///
/// Entries keep the order in which they were first written. A missing entry
/// reads as 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionValues {
    entries: Vec<(Action, f64)>,
}

impl ActionValues {
    /// Stored value for `action`, 0.0 if never written.
    pub fn get(&self, action: Action) -> f64 {
        self.value(action).unwrap_or(0.0)
    }

    /// Stored value for `action`, if any.
    pub fn value(&self, action: Action) -> Option<f64> {
        self.entries
            .iter()
            .find(|(stored, _)| *stored == action)
            .map(|&(_, value)| value)
    }

    fn set(&mut self, action: Action, value: f64) {
        match self.entries.iter_mut().find(|(stored, _)| *stored == action) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((action, value)),
        }
    }

    /// Largest stored value, `None` when nothing is stored.
    pub fn max_value(&self) -> Option<f64> {
        self.best_entry().map(|(_, value)| value)
    }

    /// Action with the largest stored value.
    ///
    /// Only stored actions are considered; ties go to the entry written first,
    /// which need not match the canonical action order.
    pub fn best_action(&self) -> Option<Action> {
        self.best_entry().map(|(action, _)| action)
    }

    fn best_entry(&self) -> Option<(Action, f64)> {
        self.entries.iter().copied().fold(None, |best, entry| match best {
            Some((_, best_value)) if entry.1 <= best_value => best,
            _ => Some(entry),
        })
    }

    /// Stored `(action, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Q-table mapping (state, action) pairs to Q-values
///
/// States are keyed structurally by [`Position`]. The table only grows: a
/// state gets an entry when it is updated or first referenced as a successor.
#[derive(Debug, Clone)]
pub struct QTable {
    q_values: HashMap<Position, ActionValues>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new(learning_rate: f64, discount_factor: f64) -> Self {
        Self {
            q_values: HashMap::new(),
            learning_rate,
            discount_factor,
        }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Get Q-value for a state-action pair, 0.0 when absent
    pub fn get(&self, state: Position, action: Action) -> f64 {
        self.q_values
            .get(&state)
            .map_or(0.0, |values| values.get(action))
    }

    /// Stored values for `state`, if the state has an entry
    pub fn action_values(&self, state: Position) -> Option<&ActionValues> {
        self.q_values.get(&state)
    }

    pub fn contains_state(&self, state: Position) -> bool {
        self.q_values.contains_key(&state)
    }

    /// Set Q-value for a state-action pair
    pub fn set(&mut self, state: Position, action: Action, value: f64) {
        self.q_values.entry(state).or_default().set(action, value);
    }

    /// Maximum stored Q-value in a state over all actions, 0.0 if none stored
    pub fn max_q(&self, state: Position) -> f64 {
        self.q_values
            .get(&state)
            .and_then(ActionValues::max_value)
            .unwrap_or(0.0)
    }

    /// Select greedy action (highest Q-value) from legal actions
    ///
    /// Unseen pairs count as 0.0 and ties go to the first action in
    /// `legal_actions`. Returns `None` only when `legal_actions` is empty.
    pub fn greedy_action(&self, state: Position, legal_actions: &[Action]) -> Option<Action> {
        let mut best: Option<(Action, f64)> = None;
        for &action in legal_actions {
            let value = self.get(state, action);
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((action, value)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Also creates an empty entry for `next_state` if it has none. Returns
    /// the new Q(s,a).
    pub fn q_learning_update(
        &mut self,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
    ) -> f64 {
        self.q_values.entry(next_state).or_default();
        let max_next_q = self.max_q(next_state);
        let current_q = self.get(state, action);
        let td_target = reward + self.discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + self.learning_rate * td_error;
        self.set(state, action, new_q);
        new_q
    }

    /// Number of states with an entry (including empty ones)
    pub fn state_count(&self) -> usize {
        self.q_values.len()
    }

    /// Get total number of Q-values stored
    pub fn size(&self) -> usize {
        self.q_values.values().map(ActionValues::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Iterate over every stored `(state, action, value)` triple
    pub fn iter(&self) -> impl Iterator<Item = (Position, Action, f64)> + '_ {
        self.q_values.iter().flat_map(|(&state, values)| {
            values.iter().map(move |(action, value)| (state, action, value))
        })
    }
}
