//! Food and portal placement
//!
//! Placement enumerates every open cell in row-major order and picks one
//! uniformly. Enumeration is O(grid_size^2) per spawn, which is fine at the
//! board sizes in play and keeps the distribution exactly uniform over open
//! cells rather than approximating it with rejection sampling.

use std::collections::{HashSet, VecDeque};

use super::grid::Cell;
use super::state::{Food, FoodKind, PortalPair};
use crate::consts::{GOLD_CHANCE, GOLD_TTL, PORTAL_TTL};
use crate::daily::RandomSource;

/// All cells not occupied by the snake or `blocked`, row-major.
fn open_cells(grid_size: i32, snake: &VecDeque<Cell>, blocked: &[Cell]) -> Vec<Cell> {
    let occupied: HashSet<Cell> = snake.iter().copied().chain(blocked.iter().copied()).collect();
    let mut open =
        Vec::with_capacity(((grid_size * grid_size) as usize).saturating_sub(occupied.len()));
    for y in 0..grid_size {
        for x in 0..grid_size {
            let cell = Cell::new(x, y);
            if !occupied.contains(&cell) {
                open.push(cell);
            }
        }
    }
    open
}

/// Uniform index draw. Draws are strictly below 1.0, so the floor stays in
/// range; the min guards against scripted sources that return exactly 1.0.
fn pick_index(rng: &mut impl RandomSource, len: usize) -> usize {
    ((rng.next_unit() * len as f64) as usize).min(len - 1)
}

/// Place a new food on a uniformly chosen open cell.
///
/// `blocked` lists extra cells to avoid beyond the snake body (active portal
/// cells). Returns `None` when the board has no open cell; play continues
/// foodless until one frees up. Consumes two draws: position, then gold roll.
pub fn spawn_food(
    grid_size: i32,
    snake: &VecDeque<Cell>,
    rng: &mut impl RandomSource,
    blocked: &[Cell],
) -> Option<Food> {
    let open = open_cells(grid_size, snake, blocked);
    if open.is_empty() {
        return None;
    }
    let pos = open[pick_index(rng, open.len())];
    let gold = rng.next_unit() < GOLD_CHANCE;
    Some(Food {
        pos,
        kind: if gold { FoodKind::Gold } else { FoodKind::Normal },
        ttl: gold.then_some(GOLD_TTL),
    })
}

/// Open a portal pair on two distinct open cells, avoiding the snake and the
/// food. Returns `None` when fewer than two cells are open.
pub fn spawn_portals(
    grid_size: i32,
    snake: &VecDeque<Cell>,
    food: Option<&Food>,
    rng: &mut impl RandomSource,
) -> Option<PortalPair> {
    let blocked: Vec<Cell> = food.map(|f| f.pos).into_iter().collect();
    let mut open = open_cells(grid_size, snake, &blocked);
    if open.len() < 2 {
        return None;
    }
    let a = open.remove(pick_index(rng, open.len()));
    let b = open[pick_index(rng, open.len())];
    Some(PortalPair {
        a,
        b,
        ttl: PORTAL_TTL,
    })
}
