//! Tick system: one host tick of one player's metabolism.
//!
//! Order within a tick is fixed: cadence counting, environment, damage,
//! regen, metabolize. Sync collection happens afterwards in the engine.

use metabolism_logic::config::MetabolismConfig;
use metabolism_logic::feedback::apply_heat_target;
use metabolism_logic::health::{apply_damage_policy, apply_regen_policy};
use metabolism_logic::metabolize::metabolize;
use metabolism_logic::state::ResourceState;

use crate::components::Cadence;
use crate::host::{EnvironmentSampler, PlayerContext, WorldRules};

/// Which steps ran during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub environment: bool,
    /// Damage cycle completed, whether or not it was suppressed.
    pub damage: bool,
    pub damage_suppressed: bool,
    pub regen: bool,
    pub metabolized: bool,
}

pub fn tick_player<P: PlayerContext>(
    state: &mut ResourceState,
    cadence: &mut Cadence,
    config: &MetabolismConfig,
    sampler: &dyn EnvironmentSampler,
    rules: &WorldRules,
    player: &mut P,
) -> TickReport {
    let mut report = TickReport::default();

    // A hurt player warmer than their health regens instead of taking damage
    let mut suppress_damage = false;
    if cadence.count_tick(config) {
        let warmer = state.warmth() > player.health();
        if warmer {
            suppress_damage = player.is_hurt();
        }
        cadence.complete_base_cycle(config, warmer);
    }

    if cadence.take_environment(config) {
        let effect = sampler.sample(rules, &*player);
        let target = if rules.do_temperature {
            effect.heat_target
        } else {
            0.0
        };
        apply_heat_target(state, target, config);
        state.warm(effect.warmth_effect);
        log::trace!(
            "{}: heat target {:.2} -> heat {:.2}, warmth {:.2}",
            player.id(),
            target,
            state.heat(),
            state.warmth()
        );
        report.environment = true;
    }

    if cadence.take_damage(config) {
        report.damage = true;
        if suppress_damage {
            report.damage_suppressed = true;
        } else {
            let before = player.health();
            apply_damage_policy(state, config, rules.difficulty, player);
            let dealt = before - player.health();
            if dealt > 0.0 {
                log::debug!("{}: took {:.1} metabolic damage (heat {:.2})", player.id(), dealt, state.heat());
            }
        }
    }

    if cadence.take_regen(config) {
        apply_regen_policy(state, rules.natural_regeneration, player);
        report.regen = true;
    }

    report.metabolized = metabolize(state, player.metabolism_boost(), config);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlayerId;
    use crate::host::FixedEnvironment;
    use metabolism_logic::health::{DamageKind, Vitals};

    struct Player {
        health: f32,
        boost: Option<u8>,
    }

    impl Vitals for Player {
        fn health(&self) -> f32 {
            self.health
        }
        fn max_health(&self) -> f32 {
            20.0
        }
        fn hurt(&mut self, _kind: DamageKind, amount: f32) {
            self.health = (self.health - amount).max(0.0);
        }
        fn heal(&mut self, amount: f32) {
            self.health = (self.health + amount).min(20.0);
        }
    }

    impl PlayerContext for Player {
        fn id(&self) -> PlayerId {
            PlayerId(1)
        }
        fn metabolism_boost(&self) -> Option<u8> {
            self.boost
        }
        fn add_metabolism_boost(&mut self, _duration_ticks: u32, amplifier: u8) {
            self.boost = Some(amplifier);
        }
    }

    fn run(ticks: u32, state: &mut ResourceState, player: &mut Player, env: FixedEnvironment, rules: WorldRules) -> Vec<TickReport> {
        let config = MetabolismConfig::default();
        let mut cadence = Cadence::default();
        (0..ticks)
            .map(|_| tick_player(state, &mut cadence, &config, &env, &rules, player))
            .collect()
    }

    #[test]
    fn test_environment_every_forty_ticks() {
        let mut state = ResourceState::default();
        let mut player = Player { health: 20.0, boost: None };
        let reports = run(120, &mut state, &mut player, FixedEnvironment::neutral(), WorldRules::default());
        let env_ticks: Vec<usize> = reports
            .iter()
            .enumerate()
            .filter(|(_, r)| r.environment)
            .map(|(i, _)| i + 1)
            .collect();
        assert_eq!(env_ticks, vec![40, 80, 120]);
    }

    #[test]
    fn test_temperature_rule_off_forces_neutral_target() {
        let mut state = ResourceState::default();
        let mut player = Player { health: 20.0, boost: None };
        let rules = WorldRules {
            do_temperature: false,
            ..WorldRules::default()
        };
        run(400, &mut state, &mut player, FixedEnvironment::new(15.0, 0.0), rules);
        assert_eq!(state.heat(), 0.0);
    }

    #[test]
    fn test_warmth_effect_applies_without_temperature() {
        let mut state = ResourceState::default();
        state.set_warmth(5.0);
        let mut player = Player { health: 20.0, boost: None };
        let rules = WorldRules {
            do_temperature: false,
            ..WorldRules::default()
        };
        run(40, &mut state, &mut player, FixedEnvironment::new(15.0, 2.0), rules);
        assert_eq!(state.warmth(), 7.0);
    }

    #[test]
    fn test_max_heat_burns_player() {
        let mut state = ResourceState::default();
        state.set_heat(20.0);
        let mut player = Player { health: 5.0, boost: None };
        // Warmth is zero at max heat, so nothing suppresses the hit
        let reports = run(80, &mut state, &mut player, FixedEnvironment::new(20.0, 0.0), WorldRules::default());
        assert!(reports.iter().any(|r| r.damage && !r.damage_suppressed));
        assert!(player.health < 5.0);
    }

    #[test]
    fn test_damage_suppressed_on_fast_regen_cycle() {
        let mut state = ResourceState::default();
        state.set_heat(-5.0);
        state.set_food(0.0);
        let mut player = Player { health: 4.0, boost: None };
        let reports = run(80, &mut state, &mut player, FixedEnvironment::new(-5.0, 0.0), WorldRules::default());
        let damage = reports.iter().find(|r| r.damage).copied().unwrap_or_default();
        assert!(damage.damage_suppressed);
        // Regen fired every base cycle instead
        assert_eq!(reports.iter().filter(|r| r.regen).count(), 4);
        assert_eq!(player.health, 8.0);
    }

    #[test]
    fn test_boost_converts_food_to_warmth() {
        let mut state = ResourceState::default();
        state.set_warmth(10.0);
        let mut player = Player { health: 20.0, boost: Some(0) };
        let reports = run(700, &mut state, &mut player, FixedEnvironment::neutral(), WorldRules::default());
        assert_eq!(reports.iter().filter(|r| r.metabolized).count(), 1);
        assert_eq!(state.food(), 9.0);
        assert_eq!(state.hydration(), 9.0);
        assert_eq!(state.warmth(), 11.0);
    }
}
