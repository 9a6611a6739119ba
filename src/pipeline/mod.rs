//! Training pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training an agent with observers attached
//! - Recording per-episode metrics and logs
//! - Repeating training over independent seeds

pub mod observers;
pub mod sweep;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{
    EpisodeRecord, JsonlObserver, MetricsObserver, MetricsSummary, ProgressObserver,
};
pub use sweep::{SeedSweep, SweepResult, SweepRun};
pub use training::{TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::Observer;
