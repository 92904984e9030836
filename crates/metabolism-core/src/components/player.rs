//! Player components: identity, cycle counters and the exhaustion latch.

use std::fmt;

use metabolism_logic::config::MetabolismConfig;
use serde::{Deserialize, Serialize};

/// Stable host-assigned player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player#{}", self.0)
    }
}

/// Tick and cycle counters driving the per-player cadence.
///
/// Host ticks accumulate into `base_tick`; each completed base cycle feeds
/// the environment, damage and regen counters. Counters are transient and
/// restart from zero on restore.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cadence {
    pub base_tick: u32,
    pub environment: u32,
    pub damage: u32,
    pub regen: u32,
}

impl Cadence {
    /// Count one host tick. Returns `true` when it completes a base cycle,
    /// resetting the tick counter.
    pub fn count_tick(&mut self, config: &MetabolismConfig) -> bool {
        self.base_tick += 1;
        if self.base_tick >= config.base_tick_count {
            self.base_tick = 0;
            true
        } else {
            false
        }
    }

    /// Advance the cycle counters after a completed base cycle. A player
    /// with more warmth than health regens a whole regen window at once.
    pub fn complete_base_cycle(&mut self, config: &MetabolismConfig, warmth_exceeds_health: bool) {
        self.environment += 1;
        self.damage += 1;
        self.regen += if warmth_exceeds_health {
            config.regen_cycles
        } else {
            1
        };
    }

    pub fn take_environment(&mut self, config: &MetabolismConfig) -> bool {
        take(&mut self.environment, config.environment_cycles)
    }

    pub fn take_damage(&mut self, config: &MetabolismConfig) -> bool {
        take(&mut self.damage, config.damage_cycles)
    }

    pub fn take_regen(&mut self, config: &MetabolismConfig) -> bool {
        take(&mut self.regen, config.regen_cycles)
    }
}

fn take(counter: &mut u32, threshold: u32) -> bool {
    if *counter >= threshold {
        *counter = 0;
        true
    } else {
        false
    }
}

/// Set when a hook already charged an action; the host reads and clears it
/// in place of applying its own default exhaustion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExhaustionLatch(pub bool);

impl ExhaustionLatch {
    pub fn set(&mut self) {
        self.0 = true;
    }

    /// Read and clear.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.0)
    }
}
