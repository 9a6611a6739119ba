//! Independent training runs over several seeds
//!
//! Each seed gets a fresh agent and its own Q-table, so runs never share
//! state and can be executed in parallel without changing their results.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::training::{TrainingConfig, TrainingPipeline, TrainingResult};
use crate::{
    Result,
    app::LearningConfig,
    grid::Grid,
    q_learning::{Policy, QLearningAgent},
    types::{Action, Position},
};

/// Outcome of training one seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRun {
    pub seed: u64,
    pub result: TrainingResult,
    pub policy: Policy,
}

/// Per-seed runs in the order the seeds were given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepResult {
    pub runs: Vec<SweepRun>,
}

impl SweepResult {
    /// How many runs chose each action at `position`
    pub fn action_votes(&self, position: Position) -> BTreeMap<Action, usize> {
        let mut votes = BTreeMap::new();
        for action in self.runs.iter().filter_map(|run| run.policy.get(position)) {
            *votes.entry(action).or_insert(0) += 1;
        }
        votes
    }

    /// Most chosen action at `position`; ties go to canonical order
    pub fn majority_action(&self, position: Position) -> Option<Action> {
        self.action_votes(position)
            .into_iter()
            .fold(None, |best: Option<(Action, usize)>, (action, count)| match best {
                Some((_, best_count)) if count <= best_count => best,
                _ => Some((action, count)),
            })
            .map(|(action, _)| action)
    }

    /// Fraction of runs whose action at `position` satisfies `accept`
    ///
    /// Runs without an entry at `position` count as not accepted.
    pub fn fraction_choosing<F>(&self, position: Position, accept: F) -> f64
    where
        F: Fn(Action) -> bool,
    {
        if self.runs.is_empty() {
            return 0.0;
        }
        let hits = self
            .runs
            .iter()
            .filter(|run| run.policy.get(position).is_some_and(&accept))
            .count();
        hits as f64 / self.runs.len() as f64
    }

    /// Fraction of runs whose greedy policy leads from start to goal
    pub fn goal_reach_rate(&self, grid: &Grid, max_steps: usize) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let reached = self
            .runs
            .iter()
            .filter(|run| run.policy.greedy_path(grid, max_steps).reached_goal())
            .count();
        reached as f64 / self.runs.len() as f64
    }
}

/// Trains one agent per seed on the same grid and configuration
#[derive(Debug, Clone)]
pub struct SeedSweep {
    grid: Grid,
    config: LearningConfig,
    episodes: usize,
}

impl SeedSweep {
    pub fn new(grid: Grid, config: LearningConfig, episodes: usize) -> Self {
        Self {
            grid,
            config,
            episodes,
        }
    }

    /// Run every seed on the current thread
    pub fn run(&self, seeds: &[u64]) -> Result<SweepResult> {
        let runs = seeds
            .iter()
            .map(|&seed| self.run_seed(seed))
            .collect::<Result<Vec<_>>>()?;
        Ok(SweepResult { runs })
    }

    /// Run seeds concurrently; results match [`SeedSweep::run`]
    pub fn run_parallel(&self, seeds: &[u64]) -> Result<SweepResult> {
        let runs = seeds
            .par_iter()
            .map(|&seed| self.run_seed(seed))
            .collect::<Result<Vec<_>>>()?;
        Ok(SweepResult { runs })
    }

    fn run_seed(&self, seed: u64) -> Result<SweepRun> {
        let config = self.config.clone().with_seed(seed);
        let mut agent = QLearningAgent::new(self.grid.clone(), &config)?;
        let mut pipeline = TrainingPipeline::new(TrainingConfig {
            episodes: self.episodes,
            seed: Some(seed),
        });
        let result = pipeline.run(&mut agent)?;
        tracing::debug!(seed, mean_steps = result.mean_steps, "seed finished");

        Ok(SweepRun {
            seed,
            result,
            policy: agent.policy(),
        })
    }
}
