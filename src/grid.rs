//! Grid world: dimensions, walls, start and goal

pub mod builder;
pub mod maze;
pub mod reachability;

pub use builder::GridBuilder;
pub use maze::Grid;
