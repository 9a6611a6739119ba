//! Shared grid layouts and checks for the integration tests.

#![allow(dead_code)]

use qmaze::{Grid, Position, QTable};

pub fn cell(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

/// Open 3x3 grid from (0, 0) to (2, 2).
pub fn open_3x3() -> Grid {
    Grid::new(3, 3, [], cell(0, 0), cell(2, 2)).unwrap()
}

/// 4x4 grid whose goal at (1, 1) is walled in on three sides; the only
/// opening is (2, 1), directly below it.
pub fn walled_goal() -> Grid {
    Grid::builder(4, 4)
        .walls([cell(0, 1), cell(1, 0), cell(1, 2)])
        .start(cell(3, 3))
        .goal(cell(1, 1))
        .build()
        .unwrap()
}

/// Goal in the corner cut off by two walls.
pub fn unreachable_goal() -> Grid {
    Grid::builder(3, 3)
        .walls([cell(1, 2), cell(2, 1)])
        .build()
        .unwrap()
}

/// Largest stored value, or 0.0 for an empty table.
pub fn max_stored_value(q_table: &QTable) -> f64 {
    q_table
        .iter()
        .map(|(_, _, value)| value)
        .fold(0.0, f64::max)
}

pub fn min_stored_value(q_table: &QTable) -> f64 {
    q_table
        .iter()
        .map(|(_, _, value)| value)
        .fold(0.0, f64::min)
}
