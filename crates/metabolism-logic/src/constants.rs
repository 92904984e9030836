//! Default tuning constants: capacities, cadences, and per-action costs.
//!
//! These are the values `MetabolismConfig::default()` is built from. Both the
//! engine and the headless simtest read them through the config, never
//! directly, so a host can override any of them.

/// Resource capacities and starting values.
pub mod capacity {
    /// Ceiling for warmth before heat deviation is subtracted.
    pub const MAX_WARMTH: f32 = 20.0;
    /// Ceiling for both food and hydration.
    pub const MAX_FOOD: f32 = 20.0;
    pub const START_FOOD: f32 = 10.0;
    pub const START_HYDRATION: f32 = 10.0;
}

/// Tick cadences. Everything except `BASE_TICK_COUNT` is counted in base cycles.
pub mod cadence {
    /// Host ticks per base cycle (one second at 20 ticks/s).
    pub const BASE_TICK_COUNT: u32 = 20;
    pub const ENVIRONMENT_CYCLES: u32 = 2;
    pub const DAMAGE_CYCLES: u32 = 4;
    pub const REGEN_CYCLES: u32 = 10;
    /// Base cycles of amplifier-0 boost needed to bank one unit of progress.
    pub const METABOLISM_CYCLES: u32 = 30;
    /// Ticks for heat to close ~90% of the gap to its target.
    pub const ADAPTATION_TICKS: u32 = 1200;
    /// Host ticks between passive drifts on peaceful difficulty.
    pub const PEACEFUL_INTERVAL: u32 = 10;
}

/// Thermal tuning.
pub mod thermal {
    /// Resource drained per damage cycle, per unit of absolute heat.
    pub const DRAIN_COEFFICIENT: f32 = 0.05;
    /// Heat closer than this to its target snaps onto it.
    pub const HEAT_SNAP_TOLERANCE: f32 = 0.01;
    /// Minimum progress movement before a progress sync is sent.
    pub const PROGRESS_DEADBAND: f32 = 0.05;
}

/// Per-action costs. `FOOD_*` debit food, `ENERGY_*` debit energy (warmth).
/// Distance-based costs are per block moved.
pub mod costs {
    pub const FOOD_JUMP: f32 = 0.05;
    pub const ENERGY_SPRINT_JUMP: f32 = 0.2;
    pub const FOOD_DMG: f32 = 0.1;
    pub const FOOD_ATK: f32 = 0.1;
    pub const ENERGY_SWIM: f32 = 0.01;
    pub const FOOD_WALK: f32 = 0.001;
    pub const FOOD_CROUCH: f32 = 0.0005;
    pub const ENERGY_SPRINT: f32 = 0.01;
    pub const FOOD_CLIMB: f32 = 0.005;
    pub const ENERGY_FLY: f32 = 0.002;
}

/// Health thresholds used to decide whether starvation-class damage applies.
pub mod health {
    /// Above this, damage always applies.
    pub const ALWAYS_HURT_ABOVE: f32 = 10.0;
    /// On normal difficulty damage stops at this much health.
    pub const NORMAL_HURT_FLOOR: f32 = 1.0;
    /// Damage dealt per starvation/fire/freeze hit.
    pub const HIT_DAMAGE: f32 = 1.0;
    /// Health restored per regen cycle (and warmth spent for it).
    pub const REGEN_AMOUNT: f32 = 1.0;
}
