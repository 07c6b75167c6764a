//! Driver-owned game session
//!
//! Bundles the live state, its RNG and the seed label into one object the
//! driver constructs at startup and replaces on restart. The simulation
//! itself stays pure; this is the only place in the crate that holds a
//! mutable handle between ticks.

use crate::daily::{DailyRng, today_seed_label};
use crate::sim::{self, Direction, GameState};

/// One run of the daily challenge
#[derive(Debug, Clone)]
pub struct GameSession {
    seed_label: String,
    rng: DailyRng,
    state: GameState,
}

impl GameSession {
    /// Start today's challenge.
    pub fn new_daily(grid_size: i32) -> Self {
        Self::with_seed_label(grid_size, today_seed_label())
    }

    /// Start a run for a specific seed label (replays a past day's board).
    pub fn with_seed_label(grid_size: i32, seed_label: String) -> Self {
        let mut rng = DailyRng::from_label(&seed_label);
        let state = GameState::new(grid_size, &mut rng);
        log::info!("new run: seed {seed_label}, grid {grid_size}x{grid_size}");
        Self {
            seed_label,
            rng,
            state,
        }
    }

    pub fn seed_label(&self) -> &str {
        &self.seed_label
    }

    /// Current snapshot, for rendering.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Buffer a heading change for the next tick.
    pub fn queue_direction(&mut self, direction: Direction) {
        self.state = sim::queue_direction(&self.state, direction);
    }

    /// Advance one tick and return the new snapshot.
    pub fn advance(&mut self) -> &GameState {
        let next = sim::step(&self.state, &mut self.rng);
        if next.is_game_over && !self.state.is_game_over {
            log::info!(
                "run over: seed {}, score {}, length {}",
                self.seed_label,
                next.score,
                next.snake.len()
            );
        }
        self.state = next;
        &self.state
    }

    pub fn toggle_pause(&mut self) {
        self.state = sim::toggle_pause(&self.state);
    }

    /// Restart against today's seed, which may have rolled over to a new day
    /// since the session began.
    pub fn restart_daily(&mut self) {
        *self = Self::new_daily(self.state.grid_size);
    }

    /// Restart the same challenge from the top.
    pub fn restart(&mut self) {
        *self = Self::with_seed_label(self.state.grid_size, self.seed_label.clone());
    }

    /// Milliseconds until the driver should call [`Self::advance`] again.
    pub fn tick_ms(&self) -> u64 {
        sim::tick_ms(&self.state)
    }
}
