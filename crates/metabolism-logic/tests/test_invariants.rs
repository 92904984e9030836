//! Invariant sweeps over random operation sequences.
//!
//! Exercises: ResourceState setters/consumers → heat feedback → damage and
//! regen policy → metabolize, checking the resource bounds after every call.
//!
//! All tests are pure logic with no engine, no host.

use metabolism_logic::config::MetabolismConfig;
use metabolism_logic::feedback::apply_heat_target;
use metabolism_logic::health::{apply_damage_policy, apply_regen_policy, DamageKind, Difficulty, Vitals};
use metabolism_logic::metabolite::Metabolite;
use metabolism_logic::metabolize::metabolize;
use metabolism_logic::state::ResourceState;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Helpers ────────────────────────────────────────────────────────────

struct TestPlayer {
    health: f32,
}

impl Vitals for TestPlayer {
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

fn check(s: &ResourceState, step: usize, op: u32) {
    let ceiling = s.max_warmth() - s.heat().abs();
    assert!(
        s.warmth() >= 0.0 && s.warmth() <= ceiling + 1e-5,
        "step {} op {}: warmth {} outside [0, {}]",
        step,
        op,
        s.warmth(),
        ceiling
    );
    assert!(
        s.heat() >= -s.max_warmth() && s.heat() <= s.max_warmth(),
        "step {} op {}: heat {}",
        step,
        op,
        s.heat()
    );
    assert!(s.food() >= 0.0 && s.food() <= s.max_food(), "step {} op {}: food {}", step, op, s.food());
    assert!(
        s.hydration() >= 0.0 && s.hydration() <= s.max_food(),
        "step {} op {}: hydration {}",
        step,
        op,
        s.hydration()
    );
}

fn random_op(s: &mut ResourceState, config: &MetabolismConfig, player: &mut TestPlayer, rng: &mut StdRng) -> u32 {
    let op = rng.gen_range(0..12);
    match op {
        0 => s.set_heat(rng.gen_range(-40.0..40.0)),
        1 => s.set_warmth(rng.gen_range(-10.0..40.0)),
        2 => s.warm(rng.gen_range(-5.0..5.0)),
        3 => s.consume_food(rng.gen_range(0.0..30.0)),
        4 => s.consume_hydration(rng.gen_range(0.0..30.0)),
        5 => s.consume_energy(rng.gen_range(0.0..5.0)),
        6 => {
            let m = Metabolite::new(
                rng.gen_range(0.0..8.0),
                rng.gen_range(0.0..8.0),
                rng.gen_range(-6.0..6.0),
            );
            s.eat(&m);
        }
        7 => s.peaceful_warmth(),
        8 => apply_heat_target(s, rng.gen_range(-30.0..30.0), config),
        9 => {
            let difficulty = match rng.gen_range(0..4) {
                0 => Difficulty::Peaceful,
                1 => Difficulty::Easy,
                2 => Difficulty::Normal,
                _ => Difficulty::Hard,
            };
            apply_damage_policy(s, config, difficulty, player);
        }
        10 => apply_regen_policy(s, rng.gen_bool(0.8), player),
        _ => {
            let boost = rng.gen_bool(0.5).then(|| rng.gen_range(0..5));
            s.add_progress(rng.gen_range(0.0..0.5));
            metabolize(s, boost, config);
        }
    }
    op
}

// ── Invariant sweeps ───────────────────────────────────────────────────

#[test]
fn bounds_hold_for_random_sequences() {
    for seed in 0..20u64 {
        let config = MetabolismConfig {
            precise_feedback: seed % 2 == 0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = ResourceState::new(&config);
        let mut player = TestPlayer { health: 20.0 };
        for step in 0..2_000 {
            let op = random_op(&mut s, &config, &mut player, &mut rng);
            check(&s, step, op);
        }
    }
}

#[test]
fn progress_normalized_after_each_metabolize() {
    let config = MetabolismConfig::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut s = ResourceState::new(&config);
    for _ in 0..500 {
        s.add_progress(rng.gen_range(0.0..0.99));
        metabolize(&mut s, Some(rng.gen_range(0..3)), &config);
        assert!(s.progress() >= 0.0 && s.progress() < 1.0, "progress {}", s.progress());
    }
}

#[test]
fn record_roundtrip_for_random_valid_states() {
    let config = MetabolismConfig::default();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let mut s = ResourceState::new(&config);
        s.set_heat(rng.gen_range(-20.0..=20.0));
        s.set_warmth(rng.gen_range(0.0..20.0));
        s.set_food(rng.gen_range(0.0..=20.0));
        s.set_hydration(rng.gen_range(0.0..=20.0));
        s.set_progress(rng.gen_range(0.0..1.0));

        let mut restored = ResourceState::new(&config);
        restored.read_state(&s.write_state());
        assert_eq!(restored, s);
    }
}

// ── Scenarios ──────────────────────────────────────────────────────────

#[test]
fn heat_converges_on_target_over_adaptation_window() {
    let config = MetabolismConfig::default();
    let mut s = ResourceState::new(&config);
    s.set_heat(1.0);
    let cycles = config.adaptation_ticks / (config.environment_cycles * config.base_tick_count);
    for _ in 0..cycles {
        apply_heat_target(&mut s, 10.0, &config);
    }
    // Started 9 away; roughly 10% of the gap should remain
    let gap = 10.0 - s.heat();
    assert!(gap > 0.3 && gap < 1.5, "gap {}", gap);
}

#[test]
fn hot_environment_sweats_out_hydration() {
    let config = MetabolismConfig::default();
    let mut s = ResourceState::new(&config);
    let mut player = TestPlayer { health: 20.0 };
    s.set_heat(12.0);
    let before = s.hydration();
    for _ in 0..5 {
        apply_damage_policy(&mut s, &config, Difficulty::Normal, &mut player);
    }
    assert!(s.hydration() < before);
    assert_eq!(s.food(), config.start_food);
    assert_eq!(player.health, 20.0);
}
