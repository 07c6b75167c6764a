//! Per-tick state transition
//!
//! [`step`] advances one snapshot by one tick. It is a pure function of the
//! snapshot and the random source: the driver owns the timer and simply stops
//! calling it to pause or tear down. Order inside a tick matters and is fixed:
//! resolve heading, move, wrap-or-die, portal redirect, collision, grow,
//! decay counters, then eat/spawn.

use crate::consts::{
    COMBO_WINDOW, PORTAL_CHANCE, TICK_MS_BASE, TICK_MS_FLOOR, TICK_MS_PER_POINT,
    WRAP_TICKS_ON_GOLD,
};
use crate::daily::RandomSource;

use super::grid::{Direction, can_change_direction};
use super::spawn::{spawn_food, spawn_portals};
use super::state::{Food, FoodKind, GameState, PortalPair};

/// Buffer a heading change for the next tick.
///
/// Reversals against the committed direction and redundant requests are
/// silently ignored; invalid input is not an error here.
pub fn queue_direction(state: &GameState, requested: Direction) -> GameState {
    let mut next = state.clone();
    if can_change_direction(state.direction, requested) {
        next.pending_direction = requested;
    }
    next
}

/// Advance the game by one tick.
pub fn step(state: &GameState, rng: &mut impl RandomSource) -> GameState {
    if state.is_game_over || state.is_paused {
        return state.clone();
    }

    let direction = if can_change_direction(state.direction, state.pending_direction) {
        state.pending_direction
    } else {
        state.direction
    };

    let Some(&head) = state.snake.front() else {
        return state.clone();
    };
    let mut next_head = head.step(direction);

    if state.wrap_ticks_left > 0 {
        next_head = next_head.wrapped(state.grid_size);
    } else if !next_head.in_bounds(state.grid_size) {
        return game_over(state, direction);
    }

    // Teleport before any collision check; the exit cell is where the head
    // actually lands this tick.
    if let Some(exit) = state.portals.and_then(|p| p.other_end(next_head)) {
        next_head = exit;
    }

    let eating = state.food.is_some_and(|f| f.pos == next_head);

    // When not eating the tail vacates its cell this tick, so it is excluded
    // from the self-collision check; when eating it stays and counts.
    let body_len = state.snake.len() - usize::from(!eating);
    if state.snake.iter().take(body_len).any(|&c| c == next_head) {
        return game_over(state, direction);
    }

    let mut snake = state.snake.clone();
    snake.push_front(next_head);
    if !eating {
        snake.pop_back();
    }

    // Counter decay. The combo check deliberately uses the decremented value:
    // a combo survives the tick where the window hits 0 and resets the tick
    // after.
    let mut combo_ticks_left = state.combo_ticks_left.saturating_sub(1);
    let mut combo = if combo_ticks_left > 0 { state.combo } else { 0 };
    let mut wrap_ticks_left = state.wrap_ticks_left.saturating_sub(1);
    let mut score = state.score;
    let mut food = state.food;
    let mut portals = state.portals.and_then(|p| {
        (p.ttl > 1).then(|| PortalPair {
            ttl: p.ttl - 1,
            ..p
        })
    });

    if eating {
        combo = if state.combo_ticks_left > 0 {
            state.combo + 1
        } else {
            1
        };
        combo_ticks_left = COMBO_WINDOW;
        let eaten = state.food.map_or(FoodKind::Normal, |f| f.kind);
        score += eaten.value() * u64::from(combo);

        let blocked: Vec<_> = portals.map(|p| p.cells()).into_iter().flatten().collect();
        food = spawn_food(state.grid_size, &snake, rng, &blocked);

        if eaten == FoodKind::Gold {
            wrap_ticks_left = WRAP_TICKS_ON_GOLD;
        }
        if portals.is_none() && rng.next_unit() < PORTAL_CHANCE {
            portals = spawn_portals(state.grid_size, &snake, food.as_ref(), rng);
        }
    } else {
        food = match food {
            Some(f) if f.kind == FoodKind::Gold => {
                let ttl = f.ttl.map_or(0, |t| t.saturating_sub(1));
                if ttl > 0 {
                    Some(Food { ttl: Some(ttl), ..f })
                } else {
                    let blocked: Vec<_> =
                        portals.map(|p| p.cells()).into_iter().flatten().collect();
                    spawn_food(state.grid_size, &snake, rng, &blocked)
                }
            }
            other => other,
        };
    }

    GameState {
        snake,
        direction,
        pending_direction: direction,
        food,
        portals,
        score,
        combo,
        combo_ticks_left,
        wrap_ticks_left,
        ..state.clone()
    }
}

fn game_over(state: &GameState, direction: Direction) -> GameState {
    let mut over = state.clone();
    over.direction = direction;
    over.is_game_over = true;
    over
}

/// Flip pause. A finished run is terminal and cannot be paused or resumed.
pub fn toggle_pause(state: &GameState) -> GameState {
    let mut next = state.clone();
    if !state.is_game_over {
        next.is_paused = !next.is_paused;
    }
    next
}

/// Fresh opening state on the same board, nothing carried over.
pub fn restart(state: &GameState, rng: &mut impl RandomSource) -> GameState {
    GameState::new(state.grid_size, rng)
}

/// Tick interval for the current score: max(75, 140 - 3 * score) ms.
pub fn tick_ms(state: &GameState) -> u64 {
    let penalty = TICK_MS_PER_POINT.saturating_mul(state.score.min(i64::MAX as u64) as i64);
    TICK_MS_BASE.saturating_sub(penalty).max(TICK_MS_FLOOR) as u64
}
