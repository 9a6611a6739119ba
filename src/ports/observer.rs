//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling training
//! logic to specific output formats or metrics.

use crate::{
    Result,
    q_learning::{EpisodeOutcome, Transition},
    types::Position,
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different types of data during
/// training, such as progress bars for user feedback or per-episode metrics.
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode, start)`
///    - `on_step(...)` - For each transition, after its update
///    - `on_episode_end(episode, outcome)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use qmaze::{ports::Observer, q_learning::EpisodeOutcome};
///
/// struct GoalCounter {
///     reached: usize,
/// }
///
/// impl Observer for GoalCounter {
///     fn on_episode_end(
///         &mut self,
///         _episode: usize,
///         outcome: &EpisodeOutcome,
///     ) -> qmaze::Result<()> {
///         if outcome.reached_goal() {
///             self.reached += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first episode.
    ///
    /// * `total_episodes` - Number of episodes that will be run
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts (`episode` is 0-based) at cell `start`.
    fn on_episode_start(&mut self, _episode: usize, _start: Position) -> Result<()> {
        Ok(())
    }

    /// Called for each transition after the Q-table has been updated.
    ///
    /// * `episode` - Index of the current episode
    /// * `step` - Step number within the episode (0-based)
    /// * `transition` - State, action, reward and successor of the step
    fn on_step(&mut self, _episode: usize, _step: usize, _transition: &Transition) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends, whether at the goal or at the step limit.
    fn on_episode_end(&mut self, _episode: usize, _outcome: &EpisodeOutcome) -> Result<()> {
        Ok(())
    }

    /// Called once after the last episode.
    ///
    /// Use this to finalize outputs or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
