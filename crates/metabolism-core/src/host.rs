//! Host integration seams: what the engine needs from the game it runs in.
//!
//! The host supplies a [`PlayerContext`] for each call, the current
//! [`WorldRules`], and an [`EnvironmentSampler`] chosen once at startup for
//! its process role.

use metabolism_logic::health::{Difficulty, Vitals};
use serde::{Deserialize, Serialize};

use crate::components::PlayerId;

/// Which copy of the simulation this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Owns the real state, ticks it, and sends sync messages.
    Authoritative,
    /// Mirrors state; never debits resources itself.
    Presentation,
}

impl Side {
    pub fn is_authoritative(self) -> bool {
        self == Side::Authoritative
    }
}

/// World-level rule toggles, read every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldRules {
    /// When off, the heat target is forced to neutral.
    pub do_temperature: bool,
    pub natural_regeneration: bool,
    pub difficulty: Difficulty,
}

impl Default for WorldRules {
    fn default() -> Self {
        Self {
            do_temperature: true,
            natural_regeneration: true,
            difficulty: Difficulty::Normal,
        }
    }
}

/// Host-side view of one player.
pub trait PlayerContext: Vitals {
    fn id(&self) -> PlayerId;

    /// Amplifier of the active metabolism boost, if any.
    fn metabolism_boost(&self) -> Option<u8>;

    /// Start (or refresh) a metabolism boost on the player.
    fn add_metabolism_boost(&mut self, duration_ticks: u32, amplifier: u8);

    fn is_invulnerable(&self) -> bool {
        false
    }
}

/// Combined environment effect for one player over one environment cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentEffect {
    pub heat_target: f32,
    pub warmth_effect: f32,
}

/// Source of environment effects: biome, weather, nearby heat sources.
pub trait EnvironmentSampler: Send + Sync {
    fn sample(&self, rules: &WorldRules, player: &dyn PlayerContext) -> EnvironmentEffect;
}

/// Same effect everywhere. Useful for tests and headless runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FixedEnvironment(pub EnvironmentEffect);

impl FixedEnvironment {
    pub fn new(heat_target: f32, warmth_effect: f32) -> Self {
        Self(EnvironmentEffect {
            heat_target,
            warmth_effect,
        })
    }

    /// Thermal neutral with no warmth effect.
    pub fn neutral() -> Self {
        Self::default()
    }
}

impl EnvironmentSampler for FixedEnvironment {
    fn sample(&self, _rules: &WorldRules, _player: &dyn PlayerContext) -> EnvironmentEffect {
        self.0
    }
}

impl<F> EnvironmentSampler for F
where
    F: Fn(&WorldRules, &dyn PlayerContext) -> EnvironmentEffect + Send + Sync,
{
    fn sample(&self, rules: &WorldRules, player: &dyn PlayerContext) -> EnvironmentEffect {
        self(rules, player)
    }
}
