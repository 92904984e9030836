//! Per-player resource state: heat, warmth, food, hydration and progress.
//!
//! Every setter clamps, so after any public call:
//! - `0 <= warmth <= max_warmth - |heat|`
//! - `-max_warmth <= heat <= max_warmth`
//! - `0 <= food, hydration <= max_food`
//!
//! Progress is the exception; it is re-normalized once per metabolize check
//! (see [`crate::metabolize`]).

use serde::{Deserialize, Serialize};

use crate::config::MetabolismConfig;
use crate::metabolite::Metabolite;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    max_warmth: f32,
    warmth: f32,
    heat: f32,
    hydration: f32,
    food: f32,
    progress: f32,
    max_food: f32,
    adaptation_ticks: u32,
    heat_coefficient: f32,
}

impl ResourceState {
    /// Fresh state: full warmth, neutral heat, starting food and hydration.
    pub fn new(config: &MetabolismConfig) -> Self {
        let mut state = Self {
            max_warmth: config.max_warmth,
            warmth: config.max_warmth,
            heat: 0.0,
            hydration: 0.0,
            food: 0.0,
            progress: 0.0,
            max_food: config.max_food,
            adaptation_ticks: config.adaptation_ticks,
            heat_coefficient: 0.0,
        };
        state.set_food(config.start_food);
        state.set_hydration(config.start_hydration);
        state.set_adaptation_ticks(config.adaptation_ticks, config);
        state
    }

    pub fn max_warmth(&self) -> f32 {
        self.max_warmth
    }

    pub fn warmth(&self) -> f32 {
        self.warmth
    }

    pub fn heat(&self) -> f32 {
        self.heat
    }

    pub fn food(&self) -> f32 {
        self.food
    }

    pub fn hydration(&self) -> f32 {
        self.hydration
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn max_food(&self) -> f32 {
        self.max_food
    }

    /// Exertion reserve. Energy is drawn from the warmth buffer.
    pub fn energy(&self) -> f32 {
        self.warmth
    }

    pub fn adaptation_ticks(&self) -> u32 {
        self.adaptation_ticks
    }

    pub fn heat_coefficient(&self) -> f32 {
        self.heat_coefficient
    }

    /// Highest warmth allowed at the current heat.
    pub fn warmth_ceiling(&self) -> f32 {
        (self.max_warmth - self.heat.abs()).max(0.0)
    }

    pub fn set_warmth(&mut self, warmth: f32) {
        self.warmth = warmth.clamp(0.0, self.warmth_ceiling());
    }

    /// Clamp heat, then re-clamp warmth against the new ceiling.
    pub fn set_heat(&mut self, heat: f32) {
        self.heat = heat.clamp(-self.max_warmth, self.max_warmth);
        self.set_warmth(self.warmth);
    }

    pub fn set_food(&mut self, food: f32) {
        self.food = food.clamp(0.0, self.max_food);
    }

    pub fn set_hydration(&mut self, hydration: f32) {
        self.hydration = hydration.clamp(0.0, self.max_food);
    }

    pub fn set_progress(&mut self, progress: f32) {
        self.progress = progress;
    }

    pub fn add_progress(&mut self, amount: f32) {
        self.progress += amount;
    }

    pub fn set_adaptation_ticks(&mut self, ticks: u32, config: &MetabolismConfig) {
        self.adaptation_ticks = ticks.max(1);
        self.heat_coefficient = config.heat_coefficient(self.adaptation_ticks);
    }

    pub fn warm(&mut self, amount: f32) {
        self.set_warmth(self.warmth + amount);
    }

    pub fn consume_food(&mut self, amount: f32) {
        self.set_food(self.food - amount);
    }

    pub fn consume_hydration(&mut self, amount: f32) {
        self.set_hydration(self.hydration - amount);
    }

    pub fn consume_energy(&mut self, amount: f32) {
        self.set_warmth(self.warmth - amount);
    }

    /// Apply the immediate part of eating.
    ///
    /// Returns `true` when the metabolite warms, in which case the caller
    /// must start a metabolism boost; the warmth itself is not added here.
    pub fn eat(&mut self, metabolite: &Metabolite) -> bool {
        self.set_food(self.food + metabolite.food);
        self.set_hydration(self.hydration + metabolite.hydration);
        if metabolite.is_warming() {
            true
        } else {
            if metabolite.is_cooling() {
                self.warm(metabolite.warmth);
            }
            false
        }
    }

    /// Whether the item may be eaten without overfilling food or hydration.
    ///
    /// Items without a record never reach here; the registry resolves them
    /// to `None` and callers refuse them.
    pub fn can_eat(&self, metabolite: &Metabolite) -> bool {
        self.food + metabolite.food < self.max_food
            && self.hydration + metabolite.hydration < self.max_food
    }

    /// Passive drift: move heat one unit toward neutral, then warm by one.
    pub fn peaceful_warmth(&mut self) {
        if self.heat > 0.0 {
            self.heat = (self.heat - 1.0).max(0.0);
        } else if self.heat < 0.0 {
            self.heat = (self.heat + 1.0).min(0.0);
        }
        self.warm(1.0);
    }

    /// Resource drained per damage cycle at the current heat.
    pub fn calculate_drain(&self, drain_coefficient: f32) -> f32 {
        self.heat.abs() * drain_coefficient
    }

    /// Host ticks needed to drain one unit of food or hydration at the
    /// current heat. Infinite at thermal neutral.
    pub fn drain_duration(&self, config: &MetabolismConfig) -> f32 {
        let drain = self.calculate_drain(config.drain_coefficient);
        if drain <= 0.0 {
            return f32::INFINITY;
        }
        (config.base_tick_count * config.damage_cycles) as f32 / drain
    }

    /// Raw overwrite used by the presentation mirror. Values come from an
    /// authoritative state that already satisfied the invariants.
    pub(crate) fn overwrite(&mut self, heat: f32, warmth: f32, food: f32, hydration: f32) {
        self.heat = heat;
        self.warmth = warmth;
        self.food = food;
        self.hydration = hydration;
    }

    /// Durable record of the simulated values.
    pub fn write_state(&self) -> StateRecord {
        StateRecord {
            max_warmth: self.max_warmth,
            warmth: self.warmth,
            heat: self.heat,
            food: self.food,
            hydration: self.hydration,
            progress: self.progress,
        }
    }

    /// Restore from a record. Out-of-range values are clamped on the way in;
    /// a non-positive `max_warmth` keeps the current ceiling.
    pub fn read_state(&mut self, record: &StateRecord) {
        if record.max_warmth > 0.0 {
            self.max_warmth = record.max_warmth;
        }
        self.warmth = record.warmth;
        self.set_heat(record.heat);
        self.set_food(record.food);
        self.set_hydration(record.hydration);
        self.progress = wrap_progress(record.progress);
    }
}

/// Fold an incoming progress value into `[0, 1)`. Negative or non-finite
/// values restart at zero.
pub(crate) fn wrap_progress(progress: f32) -> f32 {
    if progress.is_finite() && progress > 0.0 {
        progress.fract()
    } else {
        0.0
    }
}

impl Default for ResourceState {
    fn default() -> Self {
        Self::new(&MetabolismConfig::default())
    }
}

/// Persisted shape of a player's state. No version field; an absent record
/// means construction defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateRecord {
    pub max_warmth: f32,
    pub warmth: f32,
    pub heat: f32,
    pub food: f32,
    pub hydration: f32,
    pub progress: f32,
}

impl From<&ResourceState> for StateRecord {
    fn from(state: &ResourceState) -> Self {
        state.write_state()
    }
}
