//! Train on an open 3x3 grid and print the learned policy.
//!
//! Run with `RUST_LOG=qmaze=debug cargo run --example open_grid` to see
//! per-episode logs.

use anyhow::Result;
use qmaze::{
    Grid, LearningConfig, Position, QLearningAgent,
    pipeline::{MetricsObserver, ProgressObserver, TrainingConfig, TrainingPipeline},
};
use tracing_subscriber::{EnvFilter, fmt};

fn init_logging() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "qmaze=info".parse() {
        filter = filter.add_directive(directive);
    }
    fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    init_logging();

    let grid = Grid::new(3, 3, [], Position::new(0, 0), Position::new(2, 2))?;
    let config = LearningConfig::new(0.1, 0.9, 0.1);
    let mut agent = QLearningAgent::new(grid, &config)?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        episodes: 2000,
        seed: Some(42),
    })
    .with_observer(Box::new(ProgressObserver::new()))
    .with_observer(Box::new(MetricsObserver::new()));
    let result = pipeline.run(&mut agent)?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    let policy = agent.policy();
    for (cell, action) in policy.iter() {
        println!("{cell} -> {action}");
    }

    let rollout = policy.greedy_path(agent.grid(), 9);
    println!("greedy path: {:?} ({:?})", rollout.path, rollout.outcome);
    Ok(())
}
