//! Training pipeline for Q-learning agents

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    q_learning::{EpisodeStatus, QLearningAgent},
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,

    /// Random seed applied to the agent before training
    pub seed: Option<u64>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
        }
    }
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes run
    pub total_episodes: usize,

    /// Episodes that ended at the goal
    pub reached_goal: usize,

    /// Episodes cut off by the step limit
    pub budget_exhausted: usize,

    /// Transitions across all episodes
    pub total_steps: usize,

    /// Mean transitions per episode
    pub mean_steps: f64,

    /// Fraction of episodes that reached the goal
    pub success_rate: f64,

    /// Exploration rate after the last episode
    pub final_epsilon: f64,

    /// States with an entry in the Q-table
    pub q_table_states: usize,

    /// Stored Q-values
    pub q_table_values: usize,
}

impl TrainingResult {
    fn from_counts(
        agent: &QLearningAgent,
        total_episodes: usize,
        reached_goal: usize,
        total_steps: usize,
    ) -> Self {
        let (mean_steps, success_rate) = if total_episodes > 0 {
            (
                total_steps as f64 / total_episodes as f64,
                reached_goal as f64 / total_episodes as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_episodes,
            reached_goal,
            budget_exhausted: total_episodes - reached_goal,
            total_steps,
            mean_steps,
            success_rate,
            final_epsilon: agent.epsilon(),
            q_table_states: agent.q_table().state_count(),
            q_table_values: agent.q_table().size(),
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline that drives an agent through episodes and reports to
/// observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the configured number of episodes on `agent`.
    ///
    /// The agent's Q-table carries over from any earlier training. An error
    /// from the agent or from an observer aborts the run; observers still get
    /// `on_training_end` in that case, and errors they return from it are
    /// logged and dropped in favor of the original one.
    pub fn run(&mut self, agent: &mut QLearningAgent) -> Result<TrainingResult> {
        if let Some(seed) = self.config.seed {
            agent.set_rng_seed(seed);
        }

        let total = self.config.episodes;
        tracing::info!(episodes = total, "training pipeline started");

        let (reached_goal, total_steps) = match self.run_episodes(agent, total) {
            Ok(counts) => counts,
            Err(err) => {
                tracing::error!(error = %err, "training pipeline aborted");
                for observer in &mut self.observers {
                    if let Err(end_err) = observer.on_training_end() {
                        tracing::warn!(error = %end_err, "observer failed to finish aborted run");
                    }
                }
                return Err(err);
            }
        };

        // Notify observers of training end
        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        let result = TrainingResult::from_counts(agent, total, reached_goal, total_steps);
        tracing::info!(
            reached_goal = result.reached_goal,
            budget_exhausted = result.budget_exhausted,
            mean_steps = result.mean_steps,
            "training pipeline finished"
        );
        Ok(result)
    }

    /// Returns `(reached_goal, total_steps)`.
    fn run_episodes(&mut self, agent: &mut QLearningAgent, total: usize) -> Result<(usize, usize)> {
        // Notify observers of training start
        for observer in &mut self.observers {
            observer.on_training_start(total)?;
        }

        let start = agent.grid().start();
        let mut reached_goal = 0;
        let mut total_steps = 0;

        for episode in 0..total {
            for observer in &mut self.observers {
                observer.on_episode_start(episode, start)?;
            }

            let observers = &mut self.observers;
            let mut step = 0;
            let outcome = agent.run_episode_with(|transition| {
                for observer in observers.iter_mut() {
                    observer.on_step(episode, step, transition)?;
                }
                step += 1;
                Ok(())
            })?;

            total_steps += outcome.steps;
            match outcome.status {
                EpisodeStatus::ReachedGoal => reached_goal += 1,
                EpisodeStatus::BudgetExhausted => tracing::warn!(
                    episode,
                    steps = outcome.steps,
                    "episode exhausted its step limit"
                ),
            }

            for observer in &mut self.observers {
                observer.on_episode_end(episode, &outcome)?;
            }
        }

        Ok((reached_goal, total_steps))
    }
}
