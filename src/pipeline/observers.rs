//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::Observer,
    q_learning::{EpisodeOutcome, EpisodeStatus, Transition},
    types::Position,
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    reached: usize,
    exhausted: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            reached: 0,
            exhausted: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} cut:{}", self.reached, self.exhausted)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes (goal:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: &EpisodeOutcome) -> Result<()> {
        match outcome.status {
            EpisodeStatus::ReachedGoal => self.reached += 1,
            EpisodeStatus::BudgetExhausted => self.exhausted += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks episode lengths and outcomes
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    episode_lengths: Vec<usize>,
    reached: usize,
    exhausted: usize,
    total_reward: f64,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps taken in each finished episode, in order
    pub fn episode_lengths(&self) -> &[usize] {
        &self.episode_lengths
    }

    pub fn total_episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    /// Fraction of episodes that reached the goal
    pub fn success_rate(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.reached as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f64 {
        mean(&self.episode_lengths)
    }

    /// Average length over the last `window` episodes
    pub fn recent_avg_length(&self, window: usize) -> f64 {
        let start = self.episode_lengths.len().saturating_sub(window);
        mean(&self.episode_lengths[start..])
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            reached_goal: self.reached,
            budget_exhausted: self.exhausted,
            success_rate: self.success_rate(),
            avg_episode_length: self.avg_episode_length(),
            shortest_episode: self.episode_lengths.iter().copied().min(),
            total_reward: self.total_reward,
        }
    }
}

fn mean(values: &[usize]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<usize>() as f64 / values.len() as f64
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub reached_goal: usize,
    pub budget_exhausted: usize,
    pub success_rate: f64,
    pub avg_episode_length: f64,
    pub shortest_episode: Option<usize>,
    pub total_reward: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _episode: usize, outcome: &EpisodeOutcome) -> Result<()> {
        self.episode_lengths.push(outcome.steps);
        self.total_reward += outcome.total_reward;
        match outcome.status {
            EpisodeStatus::ReachedGoal => self.reached += 1,
            EpisodeStatus::BudgetExhausted => self.exhausted += 1,
        }
        Ok(())
    }
}

/// Record of a single episode as written by [`JsonlObserver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub status: EpisodeStatus,
    pub steps: usize,
    pub total_reward: f64,
    /// Visited cells, starting with the start cell; empty unless recorded
    pub path: Vec<Position>,
}

/// JSONL observer - Exports one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    record_paths: bool,
    current_path: Vec<Position>,
}

impl JsonlObserver {
    /// Create a new JSONL observer writing to `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            record_paths: false,
            current_path: Vec::new(),
        })
    }

    /// Also write the visited cells of each episode
    pub fn with_paths(mut self) -> Self {
        self.record_paths = true;
        self
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize, start: Position) -> Result<()> {
        self.current_path.clear();
        if self.record_paths {
            self.current_path.push(start);
        }
        Ok(())
    }

    fn on_step(&mut self, _episode: usize, _step: usize, transition: &Transition) -> Result<()> {
        if self.record_paths {
            self.current_path.push(transition.next_state);
        }
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: &EpisodeOutcome) -> Result<()> {
        let record = EpisodeRecord {
            episode,
            status: outcome.status,
            steps: outcome.steps,
            total_reward: outcome.total_reward,
            path: std::mem::take(&mut self.current_path),
        };

        serde_json::to_writer(&mut self.writer, &record)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
