//! Damage and regeneration policy.
//!
//! The host owns health; this module only decides when to hurt or heal and
//! which resource pays for it. Hosts expose their player through [`Vitals`].

use serde::{Deserialize, Serialize};

use crate::config::MetabolismConfig;
use crate::constants::health::{ALWAYS_HURT_ABOVE, HIT_DAMAGE, NORMAL_HURT_FLOOR, REGEN_AMOUNT};
use crate::state::ResourceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Peaceful,
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Kind of damage dealt by the metabolism, so hosts can pick death messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageKind {
    /// Out of the resource that should have absorbed heat or cold.
    Starvation,
    /// Heat pinned at `+max_warmth`.
    Fire,
    /// Heat pinned at `-max_warmth`.
    Freeze,
}

/// Host-side view of a player's health.
pub trait Vitals {
    fn health(&self) -> f32;
    fn max_health(&self) -> f32;
    fn hurt(&mut self, kind: DamageKind, amount: f32);
    fn heal(&mut self, amount: f32);

    fn is_hurt(&self) -> bool {
        self.health() > 0.0 && self.health() < self.max_health()
    }
}

/// Whether starvation-class damage may be dealt at this health.
///
/// Easy and peaceful players stop taking it at 10 health, normal at 1;
/// hard never stops.
pub fn can_be_hurt(health: f32, difficulty: Difficulty) -> bool {
    health > ALWAYS_HURT_ABOVE
        || difficulty == Difficulty::Hard
        || (health > NORMAL_HURT_FLOOR && difficulty == Difficulty::Normal)
}

/// Run one damage cycle.
///
/// Hot bodies sweat out hydration, cold bodies burn food. When that resource
/// is empty the other one pays a flat unit and the player starves a little.
/// Heat pinned at either extreme burns or freezes on top. `can_be_hurt` is
/// re-checked before each hit since the first hit lowers health.
#[allow(clippy::float_cmp)]
pub fn apply_damage_policy<V: Vitals + ?Sized>(
    state: &mut ResourceState,
    config: &MetabolismConfig,
    difficulty: Difficulty,
    player: &mut V,
) {
    let heat = state.heat();
    if heat > 0.0 {
        if state.hydration() > 0.0 {
            state.consume_hydration(state.calculate_drain(config.drain_coefficient));
        } else {
            state.consume_food(1.0);
            if can_be_hurt(player.health(), difficulty) {
                player.hurt(DamageKind::Starvation, HIT_DAMAGE);
            }
        }
    } else if heat < 0.0 {
        if state.food() > 0.0 {
            state.consume_food(state.calculate_drain(config.drain_coefficient));
        } else {
            state.consume_hydration(1.0);
            if can_be_hurt(player.health(), difficulty) {
                player.hurt(DamageKind::Starvation, HIT_DAMAGE);
            }
        }
    }

    if can_be_hurt(player.health(), difficulty) {
        if heat == state.max_warmth() {
            player.hurt(DamageKind::Fire, HIT_DAMAGE);
        } else if heat == -state.max_warmth() {
            player.hurt(DamageKind::Freeze, HIT_DAMAGE);
        }
    }
}

/// Run one regen cycle: trade a unit of warmth for a unit of health.
pub fn apply_regen_policy<V: Vitals + ?Sized>(
    state: &mut ResourceState,
    natural_regeneration: bool,
    player: &mut V,
) {
    if natural_regeneration && player.is_hurt() && state.warmth() > 0.0 {
        player.heal(REGEN_AMOUNT);
        state.set_warmth((state.warmth() - REGEN_AMOUNT).max(0.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy {
        health: f32,
        hits: Vec<DamageKind>,
    }

    impl Dummy {
        fn new(health: f32) -> Self {
            Self {
                health,
                hits: Vec::new(),
            }
        }
    }

    impl Vitals for Dummy {
        fn health(&self) -> f32 {
            self.health
        }
        fn max_health(&self) -> f32 {
            20.0
        }
        fn hurt(&mut self, kind: DamageKind, amount: f32) {
            self.health -= amount;
            self.hits.push(kind);
        }
        fn heal(&mut self, amount: f32) {
            self.health = (self.health + amount).min(20.0);
        }
    }

    fn setup() -> (ResourceState, MetabolismConfig) {
        let config = MetabolismConfig::default();
        (ResourceState::new(&config), config)
    }

    #[test]
    fn test_can_be_hurt_table() {
        assert!(can_be_hurt(11.0, Difficulty::Peaceful));
        assert!(!can_be_hurt(10.0, Difficulty::Easy));
        assert!(can_be_hurt(2.0, Difficulty::Normal));
        assert!(!can_be_hurt(1.0, Difficulty::Normal));
        assert!(can_be_hurt(0.5, Difficulty::Hard));
    }

    #[test]
    fn test_hot_drains_hydration() {
        let (mut s, config) = setup();
        s.set_heat(10.0);
        let mut p = Dummy::new(20.0);
        apply_damage_policy(&mut s, &config, Difficulty::Normal, &mut p);
        assert!((s.hydration() - 9.5).abs() < 1e-6);
        assert_eq!(s.food(), 10.0);
        assert!(p.hits.is_empty());
    }

    #[test]
    fn test_cold_without_food_starves() {
        let (mut s, config) = setup();
        s.set_heat(-4.0);
        s.set_food(0.0);
        let mut p = Dummy::new(20.0);
        apply_damage_policy(&mut s, &config, Difficulty::Normal, &mut p);
        assert_eq!(s.hydration(), 9.0);
        assert_eq!(p.hits, vec![DamageKind::Starvation]);
    }

    #[test]
    fn test_max_heat_burns_and_drains() {
        let (mut s, config) = setup();
        s.set_heat(20.0);
        let mut p = Dummy::new(20.0);
        apply_damage_policy(&mut s, &config, Difficulty::Normal, &mut p);
        assert_eq!(p.hits, vec![DamageKind::Fire]);
        assert!((s.hydration() - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_min_heat_freezes() {
        let (mut s, config) = setup();
        s.set_heat(-20.0);
        let mut p = Dummy::new(15.0);
        apply_damage_policy(&mut s, &config, Difficulty::Hard, &mut p);
        assert_eq!(p.hits, vec![DamageKind::Freeze]);
        assert!((s.food() - 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_neutral_no_drain_no_damage() {
        let (mut s, config) = setup();
        s.set_food(0.0);
        s.set_hydration(0.0);
        let mut p = Dummy::new(20.0);
        apply_damage_policy(&mut s, &config, Difficulty::Hard, &mut p);
        assert_eq!(s.food(), 0.0);
        assert_eq!(s.hydration(), 0.0);
        assert!(p.hits.is_empty());
    }

    #[test]
    fn test_easy_low_health_exempt() {
        let (mut s, config) = setup();
        s.set_heat(20.0);
        s.set_hydration(0.0);
        let mut p = Dummy::new(8.0);
        apply_damage_policy(&mut s, &config, Difficulty::Easy, &mut p);
        assert!(p.hits.is_empty());
        // Food still pays for the missing hydration
        assert_eq!(s.food(), 9.0);
    }

    #[test]
    fn test_second_hit_rechecks_health() {
        let (mut s, config) = setup();
        s.set_heat(20.0);
        s.set_hydration(0.0);
        // 11 -> starvation hit -> 10, no longer hurtable on easy
        let mut p = Dummy::new(11.0);
        apply_damage_policy(&mut s, &config, Difficulty::Easy, &mut p);
        assert_eq!(p.hits, vec![DamageKind::Starvation]);
    }

    #[test]
    fn test_regen_spends_warmth() {
        let (mut s, _) = setup();
        s.set_warmth(0.5);
        let mut p = Dummy::new(15.0);
        apply_regen_policy(&mut s, true, &mut p);
        assert_eq!(p.health, 16.0);
        assert_eq!(s.warmth(), 0.0);
    }

    #[test]
    fn test_regen_requires_rule_hurt_and_warmth() {
        let (mut s, _) = setup();
        let mut full = Dummy::new(20.0);
        apply_regen_policy(&mut s, true, &mut full);
        assert_eq!(s.warmth(), 20.0);

        let mut hurt = Dummy::new(10.0);
        apply_regen_policy(&mut s, false, &mut hurt);
        assert_eq!(hurt.health, 10.0);

        s.set_warmth(0.0);
        apply_regen_policy(&mut s, true, &mut hurt);
        assert_eq!(hurt.health, 10.0);
    }
}
