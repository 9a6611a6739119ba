//! Immutable grid model and the action validity filter

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::builder::GridBuilder;
use crate::{
    Error, Result,
    types::{Action, Position},
};

/// A rectangular maze with blocked cells.
///
/// Constructed once and never mutated. `start` and `goal` are guaranteed to be
/// in bounds and open. Deserialization goes through [`Grid::new`], so a
/// layout read from JSON is validated the same way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridLayout", into = "GridLayout")]
pub struct Grid {
    rows: usize,
    cols: usize,
    walls: HashSet<Position>,
    start: Position,
    goal: Position,
}

/// Serialized form of a [`Grid`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GridLayout {
    rows: usize,
    cols: usize,
    walls: Vec<Position>,
    start: Position,
    goal: Position,
}

impl TryFrom<GridLayout> for Grid {
    type Error = Error;

    fn try_from(layout: GridLayout) -> Result<Self> {
        Grid::new(
            layout.rows,
            layout.cols,
            layout.walls,
            layout.start,
            layout.goal,
        )
    }
}

impl From<Grid> for GridLayout {
    fn from(grid: Grid) -> Self {
        let mut walls: Vec<_> = grid.walls.into_iter().collect();
        walls.sort();
        Self {
            rows: grid.rows,
            cols: grid.cols,
            walls,
            start: grid.start,
            goal: grid.goal,
        }
    }
}

impl Grid {
    /// Create a grid, validating dimensions and endpoints.
    ///
    /// Walls outside the grid are accepted and have no effect. A goal that
    /// cannot be reached from the start is logged but not rejected; training on
    /// such a grid only terminates when a step limit is configured.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if `rows` or `cols` is zero or too large
    /// - [`Error::OutOfBounds`] if start or goal lies outside the grid
    /// - [`Error::BlockedEndpoint`] if start or goal is a wall
    pub fn new(
        rows: usize,
        cols: usize,
        walls: impl IntoIterator<Item = Position>,
        start: Position,
        goal: Position,
    ) -> Result<Self> {
        let max = i32::MAX as usize;
        if rows == 0 || cols == 0 || rows > max || cols > max {
            return Err(Error::InvalidDimensions { rows, cols });
        }

        let grid = Self {
            rows,
            cols,
            walls: walls.into_iter().collect(),
            start,
            goal,
        };

        for (role, position) in [("start", start), ("goal", goal)] {
            if !grid.in_bounds(position) {
                return Err(Error::OutOfBounds {
                    role,
                    position,
                    rows,
                    cols,
                });
            }
            if grid.is_wall(position) {
                return Err(Error::BlockedEndpoint { role, position });
            }
        }

        if !grid.is_goal_reachable() {
            tracing::warn!(
                start = %start,
                goal = %goal,
                "goal is unreachable from start; episodes will not terminate without a step limit"
            );
        }

        Ok(grid)
    }

    /// Start a [`GridBuilder`] for a `rows` x `cols` grid.
    pub fn builder(rows: usize, cols: usize) -> GridBuilder {
        GridBuilder::new(rows, cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn walls(&self) -> &HashSet<Position> {
        &self.walls
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.row >= 0
            && position.col >= 0
            && (position.row as usize) < self.rows
            && (position.col as usize) < self.cols
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }

    /// In bounds and not a wall.
    pub fn is_open(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.is_wall(position)
    }

    pub fn is_goal(&self, position: Position) -> bool {
        position == self.goal
    }

    /// Actions from `state` that land on an open cell, in canonical order.
    ///
    /// Empty only for a fully enclosed cell.
    pub fn valid_moves(&self, state: Position) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|&action| self.is_open(state.step(action)))
            .collect()
    }

    /// Reward for arriving at `next_state`: 1 at the goal, 0 elsewhere.
    pub fn reward(&self, next_state: Position) -> f64 {
        if self.is_goal(next_state) { 1.0 } else { 0.0 }
    }

    /// All open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows as i32)
            .flat_map(move |row| (0..self.cols as i32).map(move |col| Position::new(row, col)))
            .filter(|&position| !self.is_wall(position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_3x3() -> Grid {
        Grid::new(3, 3, [], Position::new(0, 0), Position::new(2, 2)).unwrap()
    }

    #[test]
    fn test_valid_moves_corner() {
        let grid = open_3x3();
        assert_eq!(
            grid.valid_moves(Position::new(0, 0)),
            vec![Action::Right, Action::Down]
        );
        assert_eq!(
            grid.valid_moves(Position::new(2, 2)),
            vec![Action::Left, Action::Up]
        );
    }

    #[test]
    fn test_valid_moves_center_keeps_canonical_order() {
        let grid = open_3x3();
        assert_eq!(grid.valid_moves(Position::new(1, 1)), Action::ALL.to_vec());
    }

    #[test]
    fn test_valid_moves_excludes_walls() {
        let grid = Grid::new(
            3,
            3,
            [Position::new(1, 2), Position::new(0, 1)],
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap();
        assert_eq!(
            grid.valid_moves(Position::new(1, 1)),
            vec![Action::Down, Action::Left]
        );
    }

    #[test]
    fn test_valid_moves_empty_for_enclosed_cell() {
        let grid = Grid::new(
            3,
            3,
            [Position::new(0, 1), Position::new(1, 0)],
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap();
        assert!(grid.valid_moves(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_valid_moves_far_off_grid_is_empty() {
        let grid = open_3x3();
        assert!(grid.valid_moves(Position::new(i32::MAX, i32::MAX)).is_empty());
        assert!(grid.valid_moves(Position::new(i32::MIN, 0)).is_empty());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let err = Grid::new(0, 3, [], Position::new(0, 0), Position::new(0, 0)).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { rows: 0, cols: 3 }));
    }

    #[test]
    fn test_rejects_out_of_bounds_endpoints() {
        let err = Grid::new(3, 3, [], Position::new(-1, 0), Position::new(2, 2)).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { role: "start", .. }));

        let err = Grid::new(3, 3, [], Position::new(0, 0), Position::new(3, 0)).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { role: "goal", .. }));
    }

    #[test]
    fn test_rejects_walled_endpoints() {
        let err = Grid::new(
            3,
            3,
            [Position::new(2, 2)],
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap_err();
        assert!(matches!(err, Error::BlockedEndpoint { role: "goal", .. }));
    }

    #[test]
    fn test_deserialize_validates_layout() {
        let json = r#"{"rows":0,"cols":3,"walls":[{"row":0,"col":0}],
            "start":{"row":0,"col":0},"goal":{"row":9,"col":9}}"#;
        let err = serde_json::from_str::<Grid>(json).unwrap_err();
        assert!(err.to_string().contains("0x3"), "{err}");

        let walled_start = r#"{"rows":2,"cols":2,"walls":[{"row":0,"col":0}],
            "start":{"row":0,"col":0},"goal":{"row":1,"col":1}}"#;
        assert!(serde_json::from_str::<Grid>(walled_start).is_err());

        let goal_outside = r#"{"rows":2,"cols":2,"walls":[],
            "start":{"row":0,"col":0},"goal":{"row":9,"col":9}}"#;
        assert!(serde_json::from_str::<Grid>(goal_outside).is_err());
    }

    #[test]
    fn test_serde_roundtrip_keeps_layout() {
        let grid = Grid::new(
            3,
            3,
            [Position::new(1, 1), Position::new(0, 2)],
            Position::new(0, 0),
            Position::new(2, 2),
        )
        .unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.rows(), 3);
        assert_eq!(parsed.walls(), grid.walls());
        assert_eq!(parsed.start(), grid.start());
        assert_eq!(parsed.goal(), grid.goal());
    }

    #[test]
    fn test_reward_only_at_goal() {
        let grid = open_3x3();
        assert_eq!(grid.reward(Position::new(2, 2)), 1.0);
        assert_eq!(grid.reward(Position::new(2, 1)), 0.0);
    }

    #[test]
    fn test_open_cells_row_major_without_walls() {
        let grid = Grid::new(
            2,
            2,
            [Position::new(0, 1)],
            Position::new(0, 0),
            Position::new(1, 1),
        )
        .unwrap();
        let cells: Vec<_> = grid.open_cells().collect();
        assert_eq!(
            cells,
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)]
        );
    }
}
