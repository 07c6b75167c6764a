//! Daily Snake - a deterministic grid-snake game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game state)
//! - `daily`: Seeded RNG and UTC calendar-day seed labels
//! - `highscores`: Bounded local leaderboard
//! - `persistence`: Ledger load/save over an injected key-value store
//! - `session`: Driver-owned session wiring state, RNG and seed label
//!
//! The crate has no rendering, input, or timer code of its own. An external
//! driver owns the clock: each tick it calls [`sim::step`], repaints from the
//! returned snapshot, and reschedules at [`sim::tick_ms`] cadence. Every
//! transition takes an immutable snapshot and returns a new one, so the same
//! seed label always replays the same game.

pub mod daily;
pub mod highscores;
pub mod persistence;
pub mod session;
pub mod sim;

pub use daily::{DailyRng, RandomSource, daily_seed_label, today_seed_label};
pub use highscores::{HighScoreEntry, HighScores, sanitize_name};
pub use persistence::{
    HIGH_SCORE_STORAGE_KEY, KeyValueStore, MemoryStore, StoreError, load_high_scores,
    save_high_scores,
};
pub use session::GameSession;
pub use sim::{
    Cell, Direction, Food, FoodKind, GameState, PortalPair, queue_direction, restart, step,
    tick_ms, toggle_pause,
};

/// Game tuning constants
pub mod consts {
    /// Default board side length in cells
    pub const DEFAULT_GRID_SIZE: i32 = 16;
    /// Snake length at the start of a run
    pub const START_LENGTH: usize = 3;

    /// Chance that a freshly spawned food is gold
    pub const GOLD_CHANCE: f64 = 0.14;
    /// Ticks a gold food survives before it is replaced
    pub const GOLD_TTL: u32 = 28;
    /// Wall-passthrough ticks granted by eating gold food
    pub const WRAP_TICKS_ON_GOLD: u32 = 24;

    /// Ticks after an eat during which the next eat extends the combo
    pub const COMBO_WINDOW: u32 = 10;

    /// Chance to open a portal pair after an eat (when none is active)
    pub const PORTAL_CHANCE: f64 = 0.22;
    /// Ticks a portal pair stays open
    pub const PORTAL_TTL: u32 = 36;

    /// Tick interval at score 0 (milliseconds)
    pub const TICK_MS_BASE: i64 = 140;
    /// Interval reduction per point of score
    pub const TICK_MS_PER_POINT: i64 = 3;
    /// Fastest allowed tick interval
    pub const TICK_MS_FLOOR: i64 = 75;
}
