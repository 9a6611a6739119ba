//! Value types shared by the grid model and the learner.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A grid cell addressed by `(row, col)`.
///
/// Coordinates are signed so that applying an action to a border cell yields
/// an off-grid position instead of wrapping; bounds are the grid's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Position reached by applying `action`'s delta, without any grid bounds
    /// check. Saturates at the `i32` limits.
    pub fn step(self, action: Action) -> Position {
        let (d_row, d_col) = action.delta();
        Position::new(self.row.saturating_add(d_row), self.col.saturating_add(d_col))
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Position::new(row, col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four axis-aligned moves.
///
/// The declaration order is the canonical order: it fixes each action's
/// index and is the tie-break order for greedy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// +column
    Right,
    /// +row
    Down,
    /// -column
    Left,
    /// -row
    Up,
}

impl Action {
    /// All actions in canonical order.
    pub const ALL: [Action; 4] = [Action::Right, Action::Down, Action::Left, Action::Up];

    /// Stable index in `0..4`.
    pub fn index(self) -> usize {
        match self {
            Action::Right => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Up => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }

    /// `(row, col)` delta applied by this action.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Right => (0, 1),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Up => (-1, 0),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
            Action::Up => "up",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_and_indices() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(4), None);
    }

    #[test]
    fn test_deltas_follow_canonical_order() {
        let deltas: Vec<_> = Action::ALL.iter().map(|a| a.delta()).collect();
        assert_eq!(deltas, vec![(0, 1), (1, 0), (0, -1), (-1, 0)]);
    }

    #[test]
    fn test_step_does_not_clamp() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Action::Up), Position::new(-1, 0));
        assert_eq!(origin.step(Action::Right), Position::new(0, 1));
    }

    #[test]
    fn test_step_saturates_at_extremes() {
        let corner = Position::new(i32::MAX, i32::MIN);
        assert_eq!(corner.step(Action::Down), corner);
        assert_eq!(corner.step(Action::Left), corner);
        assert_eq!(corner.step(Action::Up), Position::new(i32::MAX - 1, i32::MIN));
    }

    #[test]
    fn test_position_equality_is_componentwise() {
        assert_eq!(Position::from((2, 3)), Position::new(2, 3));
        assert_ne!(Position::new(2, 3), Position::new(3, 2));
        assert_eq!(Position::new(0, 0).manhattan(Position::new(2, 3)), 5);
    }
}
