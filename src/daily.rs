//! Daily challenge seeding
//!
//! Every run is driven by a [`DailyRng`] built from a calendar-day label, so
//! two players starting on the same UTC day see the same food, portals and
//! gold drops. The label is the only non-determinism entry point; once it is
//! fixed, the whole run replays bit-for-bit.

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of unit-interval draws for the simulation.
///
/// Implemented by [`DailyRng`] for real runs and blanket-implemented for
/// closures so tests can script exact draw sequences.
pub trait RandomSource {
    /// Next draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<F: FnMut() -> f64> RandomSource for F {
    fn next_unit(&mut self) -> f64 {
        self()
    }
}

/// Deterministic per-run RNG seeded from a day label
#[derive(Debug, Clone)]
pub struct DailyRng {
    inner: Pcg32,
}

impl DailyRng {
    /// Build from a seed label such as `"2026-02-18"`.
    ///
    /// Equal labels yield equal streams; the label is hashed to a 64-bit
    /// seed, so any string works, not just dates.
    pub fn from_label(label: &str) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed_from_label(label)),
        }
    }

    /// Build from today's UTC seed label.
    pub fn for_today() -> Self {
        Self::from_label(&today_seed_label())
    }
}

impl RandomSource for DailyRng {
    fn next_unit(&mut self) -> f64 {
        self.inner.random()
    }
}

/// Format a moment as its UTC calendar-day seed label, e.g. `"2026-02-18"`.
///
/// Sortable and timezone-independent: the label flips at UTC midnight
/// everywhere at once.
pub fn daily_seed_label(when: DateTime<Utc>) -> String {
    when.format("%Y-%m-%d").to_string()
}

/// Seed label for the current instant.
pub fn today_seed_label() -> String {
    daily_seed_label(Utc::now())
}

/// FNV-1a fold of the label bytes into a PCG seed.
fn seed_from_label(label: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in label.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}
