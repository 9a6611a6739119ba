//! Greedy policy extraction from a Q-table

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::{
    grid::Grid,
    types::{Action, Position},
};

/// Mapping from open, non-goal cells to the action with the highest learned
/// value.
///
/// Cells the Q-table has never learned anything about have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(Position, Action)>", into = "Vec<(Position, Action)>")]
pub struct Policy {
    actions: BTreeMap<Position, Action>,
}

/// Where following a policy from the start cell ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutOutcome {
    ReachedGoal,
    /// The policy led back into this already-visited cell.
    Cycle(Position),
    /// The policy has no action for this cell.
    MissingEntry(Position),
    StepLimit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRollout {
    /// Visited cells, starting with the start cell.
    pub path: Vec<Position>,
    pub outcome: RolloutOutcome,
}

impl PolicyRollout {
    pub fn reached_goal(&self) -> bool {
        self.outcome == RolloutOutcome::ReachedGoal
    }

    /// Number of moves taken.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl Policy {
    /// Derive the greedy policy for every open, non-goal cell of `grid`.
    ///
    /// Only actions stored for a cell compete, and ties go to the action whose
    /// value was stored first. This differs from action selection during
    /// training, which scans valid actions in canonical order and reads
    /// missing values as 0.0. Cells whose entry is missing or empty are left
    /// out.
    pub fn extract(grid: &Grid, q_table: &QTable) -> Self {
        let actions = grid
            .open_cells()
            .filter(|&cell| !grid.is_goal(cell))
            .filter_map(|cell| {
                q_table
                    .action_values(cell)
                    .and_then(|values| values.best_action())
                    .map(|action| (cell, action))
            })
            .collect();
        Self { actions }
    }

    pub fn get(&self, position: Position) -> Option<Action> {
        self.actions.get(&position).copied()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.actions.contains_key(&position)
    }

    /// Entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Action)> + '_ {
        self.actions.iter().map(|(&position, &action)| (position, action))
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Follow the policy from the grid's start for at most `max_steps` moves.
    pub fn greedy_path(&self, grid: &Grid, max_steps: usize) -> PolicyRollout {
        let mut current = grid.start();
        let mut path = vec![current];
        let mut visited = HashSet::from([current]);

        let outcome = loop {
            if grid.is_goal(current) {
                break RolloutOutcome::ReachedGoal;
            }
            if path.len() > max_steps {
                break RolloutOutcome::StepLimit;
            }
            let Some(action) = self.get(current) else {
                break RolloutOutcome::MissingEntry(current);
            };
            let next = current.step(action);
            if !visited.insert(next) {
                break RolloutOutcome::Cycle(next);
            }
            path.push(next);
            current = next;
        };

        PolicyRollout { path, outcome }
    }
}

impl FromIterator<(Position, Action)> for Policy {
    fn from_iter<T: IntoIterator<Item = (Position, Action)>>(iter: T) -> Self {
        Self {
            actions: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<(Position, Action)>> for Policy {
    fn from(entries: Vec<(Position, Action)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Policy> for Vec<(Position, Action)> {
    fn from(policy: Policy) -> Self {
        policy.actions.into_iter().collect()
    }
}
