//! Q-learning agent for grid navigation
//!
//! The agent owns the grid, the Q-table and its random source. Episodes run
//! strictly sequentially against the single shared table.

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::{exploration::EpsilonGreedy, policy::Policy, q_table::QTable};
use crate::{
    Result,
    app::LearningConfig,
    grid::Grid,
    types::{Action, Position},
};

/// One environment step as seen by the learner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: Position,
    pub action: Action,
    pub reward: f64,
    pub next_state: Position,
}

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    ReachedGoal,
    /// The configured step limit ran out before the goal was reached.
    BudgetExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeOutcome {
    pub status: EpisodeStatus,
    pub steps: usize,
    pub total_reward: f64,
}

impl EpisodeOutcome {
    pub fn reached_goal(&self) -> bool {
        self.status == EpisodeStatus::ReachedGoal
    }
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Tabular Q-learning agent (off-policy TD control)
///
/// Learns Q* by always updating toward the maximum successor value,
/// regardless of the action the ε-greedy policy takes next.
///
/// # Examples
///
/// ```
/// use qmaze::{app::LearningConfig, q_learning::QLearningAgent, types::Position};
///
/// let mut agent = QLearningAgent::from_layout(
///     3,
///     3,
///     [],
///     Position::new(0, 0),
///     Position::new(2, 2),
///     &LearningConfig::default().with_seed(1),
/// )?;
/// agent.train(200)?;
/// let policy = agent.policy();
/// assert!(policy.get(Position::new(0, 0)).is_some());
/// # Ok::<(), qmaze::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    grid: Grid,
    q_table: QTable,
    exploration: EpsilonGreedy,
    step_limit: Option<usize>,
    rng: StdRng,
    rng_seed: Option<u64>,
    episodes_completed: usize,
}

impl QLearningAgent {
    /// Create an agent for `grid`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `config` fails
    /// validation.
    pub fn new(grid: Grid, config: &LearningConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            grid,
            q_table: QTable::new(config.learning_rate, config.discount_factor),
            exploration: EpsilonGreedy::with_decay(
                config.epsilon,
                config.epsilon_decay,
                config.min_epsilon,
            ),
            step_limit: config.step_limit,
            rng: build_rng(config.seed),
            rng_seed: config.seed,
            episodes_completed: 0,
        })
    }

    /// Build the grid and the agent in one call.
    ///
    /// # Errors
    ///
    /// Any grid validation error from [`Grid::new`], or an invalid `config`.
    pub fn from_layout(
        rows: usize,
        cols: usize,
        walls: impl IntoIterator<Item = Position>,
        start: Position,
        goal: Position,
        config: &LearningConfig,
    ) -> Result<Self> {
        let grid = Grid::new(rows, cols, walls, start, goal)?;
        Self::new(grid, config)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.set_rng_seed(seed);
        self
    }

    /// Reseed the random source; learned values are kept.
    pub fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
        self.rng_seed = Some(seed);
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    pub fn step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    pub fn episodes_completed(&self) -> usize {
        self.episodes_completed
    }

    pub fn valid_moves(&self, state: Position) -> Vec<Action> {
        self.grid.valid_moves(state)
    }

    /// ε-greedy action selection among the valid moves at `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoValidActions`] for a fully enclosed cell.
    pub fn choose_action(&mut self, state: Position) -> Result<Action> {
        let legal = self.grid.valid_moves(state);
        self.exploration
            .select(state, &legal, &self.q_table, &mut self.rng)
    }

    /// Apply the TD update for one observed transition. Returns the new Q(s,a).
    pub fn update(
        &mut self,
        state: Position,
        action: Action,
        reward: f64,
        next_state: Position,
    ) -> f64 {
        self.q_table
            .q_learning_update(state, action, reward, next_state)
    }

    /// Choose, apply and learn from a single action at `state`.
    ///
    /// The chosen action is always valid, so the successor is not re-checked.
    pub fn step(&mut self, state: Position) -> Result<Transition> {
        let action = self.choose_action(state)?;
        let next_state = state.step(action);
        let reward = self.grid.reward(next_state);
        self.update(state, action, reward, next_state);
        Ok(Transition {
            state,
            action,
            reward,
            next_state,
        })
    }

    /// Run one episode from the start cell.
    pub fn run_episode(&mut self) -> Result<EpisodeOutcome> {
        self.run_episode_with(|_| Ok(()))
    }

    /// Run one episode, handing every transition to `on_step` after its
    /// update has been applied.
    ///
    /// Without a step limit this loops until the goal is reached, which never
    /// happens when the goal is unreachable from the start.
    pub fn run_episode_with<F>(&mut self, mut on_step: F) -> Result<EpisodeOutcome>
    where
        F: FnMut(&Transition) -> Result<()>,
    {
        let goal = self.grid.goal();
        let mut state = self.grid.start();
        let mut steps = 0;
        let mut total_reward = 0.0;

        let status = loop {
            if state == goal {
                break EpisodeStatus::ReachedGoal;
            }
            if self.step_limit.is_some_and(|limit| steps >= limit) {
                break EpisodeStatus::BudgetExhausted;
            }

            let transition = self.step(state)?;
            on_step(&transition)?;
            steps += 1;
            total_reward += transition.reward;
            state = transition.next_state;
        };

        self.exploration.decay();
        self.episodes_completed += 1;

        tracing::debug!(
            episode = self.episodes_completed,
            steps,
            ?status,
            epsilon = self.exploration.epsilon(),
            "episode finished"
        );

        Ok(EpisodeOutcome {
            status,
            steps,
            total_reward,
        })
    }

    /// Run `episodes` episodes against the shared Q-table.
    ///
    /// Episodes that exhaust the step limit are logged and training moves on.
    pub fn train(&mut self, episodes: usize) -> Result<()> {
        tracing::info!(
            episodes,
            start = %self.grid.start(),
            goal = %self.grid.goal(),
            "training started"
        );

        let mut exhausted = 0usize;
        for _ in 0..episodes {
            let outcome = self.run_episode()?;
            if !outcome.reached_goal() {
                exhausted += 1;
                tracing::warn!(
                    episode = self.episodes_completed,
                    steps = outcome.steps,
                    "episode exhausted its step limit before reaching the goal"
                );
            }
        }

        tracing::info!(
            episodes,
            exhausted,
            states = self.q_table.state_count(),
            "training finished"
        );
        Ok(())
    }

    /// Greedy policy derived from the current Q-table.
    pub fn policy(&self) -> Policy {
        Policy::extract(&self.grid, &self.q_table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn agent(grid: Grid, config: LearningConfig) -> QLearningAgent {
        QLearningAgent::new(grid, &config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected() {
        let grid = Grid::builder(2, 2).build().unwrap();
        let err = QLearningAgent::new(grid, &LearningConfig::default().with_learning_rate(2.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_step_applies_reward_and_update() {
        // 1x2 corridor: the only move from the start reaches the goal.
        let grid = Grid::builder(1, 2).build().unwrap();
        let mut agent = agent(grid, LearningConfig::new(0.5, 0.9, 0.0).with_seed(0));

        let transition = agent.step(Position::new(0, 0)).unwrap();
        assert_eq!(transition.action, Action::Right);
        assert_eq!(transition.next_state, Position::new(0, 1));
        assert_eq!(transition.reward, 1.0);
        assert_eq!(agent.q_table().get(Position::new(0, 0), Action::Right), 0.5);
    }

    #[test]
    fn test_episode_in_corridor() {
        let grid = Grid::builder(1, 4).build().unwrap();
        let mut agent = agent(grid, LearningConfig::new(1.0, 0.9, 0.0).with_seed(5));

        let outcome = agent.run_episode().unwrap();
        assert!(outcome.reached_goal());
        assert_eq!(outcome.steps, 3);
        assert_eq!(outcome.total_reward, 1.0);
        assert_eq!(agent.episodes_completed(), 1);
        // α = 1 makes the last step's value exactly the reward.
        assert_eq!(agent.q_table().get(Position::new(0, 2), Action::Right), 1.0);
    }

    #[test]
    fn test_callback_sees_every_transition() {
        let grid = Grid::builder(3, 3).build().unwrap();
        let mut agent = agent(grid, LearningConfig::default().with_seed(11));

        let mut seen = Vec::new();
        let outcome = agent
            .run_episode_with(|t| {
                seen.push(*t);
                Ok(())
            })
            .unwrap();

        assert_eq!(seen.len(), outcome.steps);
        assert_eq!(seen.first().map(|t| t.state), Some(Position::new(0, 0)));
        assert_eq!(seen.last().map(|t| t.next_state), Some(Position::new(2, 2)));
        for pair in seen.windows(2) {
            assert_eq!(pair[0].next_state, pair[1].state);
        }
    }

    #[test]
    fn test_step_limit_stops_unreachable_goal() {
        let grid = Grid::builder(3, 3)
            .walls([Position::new(1, 2), Position::new(2, 1)])
            .build()
            .unwrap();
        let mut agent = agent(
            grid,
            LearningConfig::default().with_step_limit(25).with_seed(2),
        );

        let outcome = agent.run_episode().unwrap();
        assert_eq!(outcome.status, EpisodeStatus::BudgetExhausted);
        assert_eq!(outcome.steps, 25);
        assert_eq!(outcome.total_reward, 0.0);
    }

    #[test]
    fn test_enclosed_start_surfaces_error() {
        let grid = Grid::builder(3, 3)
            .walls([Position::new(0, 1), Position::new(1, 0)])
            .build()
            .unwrap();
        let mut agent = agent(grid, LearningConfig::default().with_seed(0));

        let err = agent.train(1).unwrap_err();
        assert!(matches!(err, Error::NoValidActions { state } if state == Position::new(0, 0)));
        assert!(agent.q_table().is_empty());
    }

    #[test]
    fn test_epsilon_decays_per_episode() {
        let grid = Grid::builder(1, 2).build().unwrap();
        let config = LearningConfig::new(0.1, 0.9, 0.8)
            .with_epsilon_decay(0.5, 0.1)
            .with_seed(4);
        let mut agent = agent(grid, config);

        agent.train(2).unwrap();
        assert!((agent.epsilon() - 0.2).abs() < 1e-12);
        agent.train(5).unwrap();
        assert!((agent.epsilon() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_same_table() {
        let grid = Grid::builder(4, 4).wall(Position::new(1, 1)).build().unwrap();
        let config = LearningConfig::default().with_seed(21);
        let mut a = agent(grid.clone(), config.clone());
        let mut b = agent(grid, config);

        a.train(50).unwrap();
        b.train(50).unwrap();

        for (state, action, value) in a.q_table().iter() {
            assert_eq!(b.q_table().get(state, action), value);
        }
        assert_eq!(a.q_table().size(), b.q_table().size());
    }
}
