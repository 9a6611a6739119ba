//! Fluent construction of [`Grid`] values

use std::collections::HashSet;

use super::maze::Grid;
use crate::{Result, types::Position};

/// Builder for [`Grid`].
///
/// Start defaults to the top-left cell and goal to the bottom-right cell.
///
/// # Examples
///
/// ```
/// use qmaze::{grid::Grid, types::Position};
///
/// let grid = Grid::builder(4, 4)
///     .wall(Position::new(1, 1))
///     .walls([Position::new(2, 1), Position::new(2, 2)])
///     .start(Position::new(0, 0))
///     .goal(Position::new(3, 3))
///     .build()
///     .unwrap();
/// assert_eq!(grid.walls().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GridBuilder {
    rows: usize,
    cols: usize,
    walls: HashSet<Position>,
    start: Option<Position>,
    goal: Option<Position>,
}

impl GridBuilder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            walls: HashSet::new(),
            start: None,
            goal: None,
        }
    }

    pub fn wall(mut self, position: Position) -> Self {
        self.walls.insert(position);
        self
    }

    pub fn walls(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(positions);
        self
    }

    pub fn start(mut self, position: Position) -> Self {
        self.start = Some(position);
        self
    }

    pub fn goal(mut self, position: Position) -> Self {
        self.goal = Some(position);
        self
    }

    /// Validate and build the grid. See [`Grid::new`] for the error cases.
    pub fn build(self) -> Result<Grid> {
        let start = self.start.unwrap_or(Position::new(0, 0));
        let goal = self.goal.unwrap_or_else(|| {
            Position::new(
                self.rows.saturating_sub(1) as i32,
                self.cols.saturating_sub(1) as i32,
            )
        });
        Grid::new(self.rows, self.cols, self.walls, start, goal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_default_corners() {
        let grid = GridBuilder::new(3, 5).build().unwrap();
        assert_eq!(grid.start(), Position::new(0, 0));
        assert_eq!(grid.goal(), Position::new(2, 4));
        assert!(grid.walls().is_empty());
    }

    #[test]
    fn test_build_propagates_validation() {
        let err = GridBuilder::new(2, 2)
            .wall(Position::new(0, 0))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::BlockedEndpoint { role: "start", .. }));
    }
}
