//! Tunable configuration for the metabolism simulation.
//!
//! `MetabolismConfig` carries every capacity, cadence and action cost the
//! simulation reads. Defaults come from [`crate::constants`]; a host can
//! override any subset from JSON, missing fields falling back to defaults.

use serde::{Deserialize, Serialize};

use crate::constants::{cadence, capacity, costs, thermal};
use crate::metabolite::Metabolite;

/// Per-action costs, grouped so movement logic can borrow them alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    pub food_jump: f32,
    pub energy_sprint_jump: f32,
    pub food_dmg: f32,
    pub food_atk: f32,
    pub energy_swim: f32,
    pub food_walk: f32,
    pub food_crouch: f32,
    pub energy_sprint: f32,
    pub food_climb: f32,
    pub energy_fly: f32,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            food_jump: costs::FOOD_JUMP,
            energy_sprint_jump: costs::ENERGY_SPRINT_JUMP,
            food_dmg: costs::FOOD_DMG,
            food_atk: costs::FOOD_ATK,
            energy_swim: costs::ENERGY_SWIM,
            food_walk: costs::FOOD_WALK,
            food_crouch: costs::FOOD_CROUCH,
            energy_sprint: costs::ENERGY_SPRINT,
            food_climb: costs::FOOD_CLIMB,
            energy_fly: costs::ENERGY_FLY,
        }
    }
}

/// Complete simulation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetabolismConfig {
    pub max_warmth: f32,
    pub max_food: f32,
    pub start_food: f32,
    pub start_hydration: f32,
    pub adaptation_ticks: u32,
    pub base_tick_count: u32,
    pub environment_cycles: u32,
    pub damage_cycles: u32,
    pub regen_cycles: u32,
    pub metabolism_cycles: u32,
    pub peaceful_interval: u32,
    pub drain_coefficient: f32,
    pub heat_snap_tolerance: f32,
    pub progress_deadband: f32,
    /// Use the second-order approach step instead of the linear one.
    pub precise_feedback: bool,
    pub costs: ActionCosts,
}

impl Default for MetabolismConfig {
    fn default() -> Self {
        Self {
            max_warmth: capacity::MAX_WARMTH,
            max_food: capacity::MAX_FOOD,
            start_food: capacity::START_FOOD,
            start_hydration: capacity::START_HYDRATION,
            adaptation_ticks: cadence::ADAPTATION_TICKS,
            base_tick_count: cadence::BASE_TICK_COUNT,
            environment_cycles: cadence::ENVIRONMENT_CYCLES,
            damage_cycles: cadence::DAMAGE_CYCLES,
            regen_cycles: cadence::REGEN_CYCLES,
            metabolism_cycles: cadence::METABOLISM_CYCLES,
            peaceful_interval: cadence::PEACEFUL_INTERVAL,
            drain_coefficient: thermal::DRAIN_COEFFICIENT,
            heat_snap_tolerance: thermal::HEAT_SNAP_TOLERANCE,
            progress_deadband: thermal::PROGRESS_DEADBAND,
            precise_feedback: false,
            costs: ActionCosts::default(),
        }
    }
}

impl MetabolismConfig {
    /// Parse a JSON config, filling gaps with defaults, then validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every denominator is positive and start values fit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cadences = [
            ("adaptation_ticks", self.adaptation_ticks),
            ("base_tick_count", self.base_tick_count),
            ("environment_cycles", self.environment_cycles),
            ("damage_cycles", self.damage_cycles),
            ("regen_cycles", self.regen_cycles),
            ("metabolism_cycles", self.metabolism_cycles),
            ("peaceful_interval", self.peaceful_interval),
        ];
        if let Some((field, _)) = cadences.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::ZeroCadence(*field));
        }

        if !(self.max_warmth > 0.0) {
            return Err(ConfigError::NonPositive("max_warmth", self.max_warmth));
        }
        if !(self.max_food > 0.0) {
            return Err(ConfigError::NonPositive("max_food", self.max_food));
        }
        if !(0.0..=self.max_food).contains(&self.start_food) {
            return Err(ConfigError::OutOfRange("start_food", self.start_food));
        }
        if !(0.0..=self.max_food).contains(&self.start_hydration) {
            return Err(ConfigError::OutOfRange(
                "start_hydration",
                self.start_hydration,
            ));
        }
        if self.drain_coefficient < 0.0 {
            return Err(ConfigError::OutOfRange(
                "drain_coefficient",
                self.drain_coefficient,
            ));
        }
        Ok(())
    }

    /// Exponential approach constant for `adaptation_ticks`.
    ///
    /// After `adaptation_ticks` host ticks the remaining gap to the heat
    /// target is ~10% of where it started, since `e^-ln(10) = 0.1`.
    pub fn heat_coefficient(&self, adaptation_ticks: u32) -> f32 {
        (std::f64::consts::LN_10
            * self.environment_cycles as f64
            * self.base_tick_count as f64
            / adaptation_ticks.max(1) as f64) as f32
    }

    /// Progress banked per host tick under a metabolism boost of `amplifier`.
    pub fn metabolism_step(&self, amplifier: u8) -> f32 {
        (amplifier as f32 + 1.0) / self.base_tick_count as f32 / self.metabolism_cycles as f32
    }

    /// Boost duration for a warming metabolite.
    ///
    /// An explicit `effect_ticks` wins; otherwise the duration is the number
    /// of boosted ticks needed to bank `warmth` units of progress.
    pub fn boost_duration(&self, metabolite: &Metabolite) -> u32 {
        if metabolite.effect_ticks > 0 {
            return metabolite.effect_ticks;
        }
        let step = self.metabolism_step(metabolite.amplifier);
        (metabolite.warmth.max(0.0) / step).ceil() as u32
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A cadence or tick count that is used as a divisor was zero.
    ZeroCadence(&'static str),
    NonPositive(&'static str, f32),
    OutOfRange(&'static str, f32),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroCadence(field) => write!(f, "{} must be at least 1", field),
            ConfigError::NonPositive(field, v) => {
                write!(f, "{} must be positive, got {}", field, v)
            }
            ConfigError::OutOfRange(field, v) => write!(f, "{} out of range: {}", field, v),
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
