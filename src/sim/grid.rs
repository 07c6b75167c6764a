//! Board geometry: cells and movement directions

use serde::{Deserialize, Serialize};

/// A board coordinate. Valid cells satisfy `0 <= x, y < grid_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell one step away along `direction`. May leave the board.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Wrap both axes onto the board (euclidean modulo, so -1 maps to
    /// `grid_size - 1`).
    pub fn wrapped(self, grid_size: i32) -> Self {
        Self::new(self.x.rem_euclid(grid_size), self.y.rem_euclid(grid_size))
    }

    pub fn in_bounds(self, grid_size: i32) -> bool {
        (0..grid_size).contains(&self.x) && (0..grid_size).contains(&self.y)
    }
}

/// Snake heading. `Up` decreases y (screen coordinates, row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit delta for one tick of movement.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A heading change is allowed unless it reverses the committed direction.
/// Reversal would put the head straight into the neck segment.
pub fn can_change_direction(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}
