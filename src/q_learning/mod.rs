//! Tabular Q-learning for grid navigation
//!
//! Q-learning is off-policy temporal difference control: every transition
//! moves Q(s,a) toward `r + γ max_a' Q(s',a')`, whatever the behavior policy
//! does next. Here the behavior policy is ε-greedy over the valid moves of the
//! current cell, and the learned table is turned into a greedy [`Policy`] once
//! training is done.
//!
//! ## Pieces
//!
//! | Type | Role |
//! |------|------|
//! | [`QTable`] | sparse (state, action) → value map, 0.0 when absent |
//! | [`EpsilonGreedy`] | exploration during training |
//! | [`QLearningAgent`] | episode loop and updates |
//! | [`Policy`] | arg-max per learned cell |
//!
//! ## Usage Example
//!
//! ```no_run
//! use qmaze::{app::LearningConfig, grid::Grid, q_learning::QLearningAgent, types::Position};
//!
//! let grid = Grid::builder(5, 5)
//!     .walls([Position::new(1, 1), Position::new(2, 1), Position::new(3, 1)])
//!     .build()?;
//! let mut agent = QLearningAgent::new(grid, &LearningConfig::default().with_seed(42))?;
//! agent.train(1000)?;
//! for (cell, action) in agent.policy().iter() {
//!     println!("{cell} -> {action}");
//! }
//! # Ok::<(), qmaze::Error>(())
//! ```

pub mod agent;
pub mod exploration;
pub mod policy;
pub mod q_table;

// Public re-exports
pub use agent::{EpisodeOutcome, EpisodeStatus, QLearningAgent, Transition};
pub use exploration::EpsilonGreedy;
pub use policy::{Policy, PolicyRollout, RolloutOutcome};
pub use q_table::{ActionValues, QTable};
