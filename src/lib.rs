//! Tabular Q-learning for grid mazes
//!
//! This crate provides:
//! - A grid model with walls, start and goal, plus the four-move action set
//! - ε-greedy exploration over the valid moves of a cell
//! - A sparse Q-table updated with the Q-learning TD rule
//! - An episodic training loop with an optional per-episode step limit
//! - Greedy policy extraction and rollout
//! - Training pipelines with observers and multi-seed sweeps

pub mod app;
pub mod error;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod types;

pub use app::LearningConfig;
pub use error::{Error, Result};
pub use grid::Grid;
pub use q_learning::{EpisodeOutcome, EpisodeStatus, Policy, QLearningAgent, QTable};
pub use types::{Action, Position};
