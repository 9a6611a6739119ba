//! Breadth-first reachability over the action validity filter

use std::collections::{HashSet, VecDeque};

use super::maze::Grid;
use crate::types::Position;

impl Grid {
    /// Open cells reachable from `origin` (inclusive) through valid moves.
    ///
    /// The goal is treated as absorbing: it is included but never expanded,
    /// since episodes end there.
    pub fn reachable_from(&self, origin: Position) -> HashSet<Position> {
        let mut seen = HashSet::new();
        if !self.is_open(origin) {
            return seen;
        }

        let mut frontier = VecDeque::from([origin]);
        seen.insert(origin);
        while let Some(current) = frontier.pop_front() {
            if self.is_goal(current) {
                continue;
            }
            for action in self.valid_moves(current) {
                let next = current.step(action);
                if seen.insert(next) {
                    frontier.push_back(next);
                }
            }
        }
        seen
    }

    pub fn is_goal_reachable(&self) -> bool {
        self.reachable_from(self.start()).contains(&self.goal())
    }

    /// Reachable non-goal cells with no valid moves, sorted.
    ///
    /// Action selection fails on any of these.
    pub fn dead_ends(&self) -> Vec<Position> {
        let mut cells: Vec<_> = self
            .reachable_from(self.start())
            .into_iter()
            .filter(|&cell| !self.is_goal(cell) && self.valid_moves(cell).is_empty())
            .collect();
        cells.sort();
        cells
    }
}

#[cfg(test)]
mod tests {
    use crate::{grid::Grid, types::Position};

    #[test]
    fn test_open_grid_fully_reachable() {
        let grid = Grid::builder(3, 3).build().unwrap();
        assert_eq!(grid.reachable_from(grid.start()).len(), 9);
        assert!(grid.is_goal_reachable());
        assert!(grid.dead_ends().is_empty());
    }

    #[test]
    fn test_walled_off_goal_is_unreachable() {
        let grid = Grid::builder(3, 3)
            .walls([Position::new(1, 2), Position::new(2, 1)])
            .build()
            .unwrap();
        assert!(!grid.is_goal_reachable());
        assert!(!grid.reachable_from(grid.start()).contains(&grid.goal()));
    }

    #[test]
    fn test_enclosed_start_is_dead_end() {
        let grid = Grid::builder(3, 3)
            .walls([Position::new(0, 1), Position::new(1, 0)])
            .build()
            .unwrap();
        assert_eq!(grid.dead_ends(), vec![Position::new(0, 0)]);
    }

    #[test]
    fn test_goal_is_not_expanded() {
        // The only route to (0, 2) passes through the goal at (0, 1).
        let grid = Grid::builder(1, 3)
            .goal(Position::new(0, 1))
            .build()
            .unwrap();
        let reachable = grid.reachable_from(grid.start());
        assert!(reachable.contains(&Position::new(0, 1)));
        assert!(!reachable.contains(&Position::new(0, 2)));
    }

    #[test]
    fn test_wall_origin_reaches_nothing() {
        let grid = Grid::builder(2, 2).wall(Position::new(0, 1)).build().unwrap();
        assert!(grid.reachable_from(Position::new(0, 1)).is_empty());
    }
}
