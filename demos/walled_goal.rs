//! Compare learned policies across seeds on a goal with a single entrance.

use anyhow::Result;
use qmaze::{Grid, LearningConfig, Position, pipeline::SeedSweep};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let grid = Grid::builder(4, 4)
        .walls([Position::new(0, 1), Position::new(1, 0), Position::new(1, 2)])
        .start(Position::new(3, 3))
        .goal(Position::new(1, 1))
        .build()?;
    let config = LearningConfig::new(0.1, 0.9, 0.2).with_step_limit(100_000);

    let seeds: Vec<u64> = (0..8).collect();
    let sweep = SeedSweep::new(grid.clone(), config, 3000).run_parallel(&seeds)?;

    for cell in grid.open_cells().filter(|&cell| !grid.is_goal(cell)) {
        let votes = sweep.action_votes(cell);
        if !votes.is_empty() {
            println!("{cell}: {votes:?}");
        }
    }
    println!(
        "greedy policy reaches goal in {:.0}% of runs",
        sweep.goal_reach_rate(&grid, 16) * 100.0
    );
    Ok(())
}
