//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Turn-based ticks only, driven by an external scheduler
//! - Seeded RNG only, threaded in by the caller
//! - Snapshot in, snapshot out; no snapshot is mutated after being returned
//! - No rendering or platform dependencies

pub mod grid;
pub mod spawn;
pub mod state;
pub mod tick;

pub use grid::{Cell, Direction, can_change_direction};
pub use spawn::{spawn_food, spawn_portals};
pub use state::{Food, FoodKind, GameState, PortalPair};
pub use tick::{queue_direction, restart, step, tick_ms, toggle_pause};
