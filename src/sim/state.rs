//! Game state snapshot and entity types
//!
//! A [`GameState`] is one immutable instant of play. Transitions in
//! [`super::tick`] take a snapshot by reference and return a fresh one;
//! nothing here is ever mutated in place after being returned to a caller.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction};
use super::spawn::spawn_food;
use crate::daily::RandomSource;

/// Food variety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodKind {
    /// Worth 1 point, never expires
    Normal,
    /// Worth 3 points, grants wrap mode, expires after a ttl
    Gold,
}

impl FoodKind {
    /// Base score before the combo multiplier.
    pub const fn value(self) -> u64 {
        match self {
            FoodKind::Normal => 1,
            FoodKind::Gold => 3,
        }
    }
}

/// The single food item on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Food {
    pub pos: Cell,
    pub kind: FoodKind,
    /// Ticks left before a gold food is replaced; `None` for normal food
    pub ttl: Option<u32>,
}

/// Two linked cells; entering either exits at the other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalPair {
    pub a: Cell,
    pub b: Cell,
    /// Ticks left before the pair closes
    pub ttl: u32,
}

impl PortalPair {
    /// Exit cell when entering at `entry`, or `None` if `entry` is not a
    /// portal cell.
    pub fn other_end(&self, entry: Cell) -> Option<Cell> {
        if entry == self.a {
            Some(self.b)
        } else if entry == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn covers(&self, cell: Cell) -> bool {
        cell == self.a || cell == self.b
    }

    /// Both cells, for spawn-blocking.
    pub fn cells(&self) -> [Cell; 2] {
        [self.a, self.b]
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Board side length in cells
    pub grid_size: i32,
    /// Body segments, head first, tail last; never empty
    pub snake: VecDeque<Cell>,
    /// Committed heading the last tick moved along
    pub direction: Direction,
    /// Buffered heading for the next tick
    pub pending_direction: Direction,
    /// The single food item, if an open cell existed to place one
    pub food: Option<Food>,
    /// Active portal pair, if any
    pub portals: Option<PortalPair>,
    pub score: u64,
    /// Current combo multiplier; 0 while idle
    pub combo: u32,
    /// Ticks left in the combo window
    pub combo_ticks_left: u32,
    /// Ticks of wall passthrough left
    pub wrap_ticks_left: u32,
    /// Terminal flag; once set, `step` is a no-op
    pub is_game_over: bool,
    /// Suspends ticking without ending the run
    pub is_paused: bool,
}

impl GameState {
    /// Opening state: a 3-segment snake centered horizontally, facing right,
    /// with the first food already on the board.
    pub fn new(grid_size: i32, rng: &mut impl RandomSource) -> Self {
        let mid = grid_size / 2;
        let snake: VecDeque<Cell> = [
            Cell::new(mid, mid),
            Cell::new(mid - 1, mid),
            Cell::new(mid - 2, mid),
        ]
        .into_iter()
        .collect();
        let food = spawn_food(grid_size, &snake, rng, &[]);

        Self {
            grid_size,
            snake,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            food,
            portals: None,
            score: 0,
            combo: 0,
            combo_ticks_left: 0,
            wrap_ticks_left: 0,
            is_game_over: false,
            is_paused: false,
        }
    }
}
