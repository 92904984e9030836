//! Metabolism Headless Simulation Harness
//!
//! Validates the metabolism logic, data files and engine without a host game.
//! Runs entirely in-process: scripted players, fixed or closure-driven
//! environments, no networking.
//!
//! Usage:
//!   cargo run -p metabolism-simtest
//!   cargo run -p metabolism-simtest -- --verbose

use std::sync::Arc;

use metabolism_core::prelude::*;
use metabolism_logic::config::MetabolismConfig;
use metabolism_logic::feedback::apply_heat_target;
use metabolism_logic::health::{self, DamageKind, Difficulty, Vitals};
use metabolism_logic::locomotion::{Displacement, Locomotion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ── Data files (same JSON a host would ship) ────────────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/metabolism.json");
const METABOLITES_JSON: &str = include_str!("../../../data/metabolites.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Scripted player. Counts down its own metabolism boost like a host
/// status effect would.
struct SimPlayer {
    id: PlayerId,
    health: f32,
    boost: Option<(u8, u32)>,
    hits: Vec<DamageKind>,
}

impl SimPlayer {
    fn new(id: u64) -> Self {
        Self {
            id: PlayerId(id),
            health: 20.0,
            boost: None,
            hits: Vec::new(),
        }
    }

    fn end_tick(&mut self) {
        self.boost = match self.boost {
            Some((amp, left)) if left > 1 => Some((amp, left - 1)),
            _ => None,
        };
    }
}

impl Vitals for SimPlayer {
    fn health(&self) -> f32 {
        self.health
    }
    fn max_health(&self) -> f32 {
        20.0
    }
    fn hurt(&mut self, kind: DamageKind, amount: f32) {
        self.hits.push(kind);
        self.health = (self.health - amount).max(0.0);
    }
    fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(20.0);
    }
}

impl PlayerContext for SimPlayer {
    fn id(&self) -> PlayerId {
        self.id
    }
    fn metabolism_boost(&self) -> Option<u8> {
        self.boost.map(|(amp, _)| amp)
    }
    fn add_metabolism_boost(&mut self, duration_ticks: u32, amplifier: u8) {
        self.boost = Some((amplifier, duration_ticks));
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Metabolism Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Data files
    let (config, table) = match load_data(&mut results) {
        Some(data) => data,
        None => {
            report(&results, verbose);
            std::process::exit(1);
        }
    };
    let registry = Arc::new(MetaboliteRegistry::with_table(table));

    // 2. Heat feedback convergence
    results.extend(validate_heat_feedback(&config, verbose));

    // 3. Damage and starvation
    results.extend(validate_damage(&config, verbose));

    // 4. Exertion costs
    results.extend(validate_exertion(&config, &registry, verbose));

    // 5. Eating and metabolism boost
    results.extend(validate_eating(&config, &registry, verbose));

    // 6. Sync and mirror
    results.extend(validate_sync(&config, &registry, verbose));

    // 7. Randomized roster sweep
    results.extend(validate_random_sweep(&config, &registry, verbose));

    if !report(&results, verbose) {
        std::process::exit(1);
    }
}

/// Print the summary. Returns whether everything passed.
fn report(results: &[TestResult], verbose: bool) -> bool {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!("\n=== RESULT: {}/{} passed, {} failed ===", passed, total, failed);
    failed == 0
}

fn engine(config: &MetabolismConfig, registry: &Arc<MetaboliteRegistry>, heat_target: f32) -> MetabolismEngine {
    build_engine(config, FixedEnvironment::new(heat_target, 0.0), registry)
}

/// The config was validated at load, so a rejection here is a harness bug.
fn build_engine(
    config: &MetabolismConfig,
    sampler: impl EnvironmentSampler + 'static,
    registry: &Arc<MetaboliteRegistry>,
) -> MetabolismEngine {
    match MetabolismEngine::new(config.clone(), Side::Authoritative, sampler, Arc::clone(registry)) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("engine rejected config: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(engine: &mut MetabolismEngine, player: &mut SimPlayer, rules: &WorldRules, ticks: u32) {
    for _ in 0..ticks {
        engine.tick(rules, player);
        player.end_tick();
    }
}

// ── 1. Data Files ───────────────────────────────────────────────────────

fn load_data(results: &mut Vec<TestResult>) -> Option<(MetabolismConfig, MetaboliteTable)> {
    println!("--- Data Files ---");

    let config = match MetabolismConfig::from_json_str(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("metabolism.json: {}", e),
            });
            return None;
        }
    };
    results.push(TestResult {
        name: "config_matches_defaults".into(),
        passed: config == MetabolismConfig::default(),
        detail: "shipped config equals built-in defaults".into(),
    });

    let table = match MetaboliteTable::from_json_str(METABOLITES_JSON) {
        Ok(t) => t,
        Err(e) => {
            results.push(TestResult {
                name: "metabolites_parse".into(),
                passed: false,
                detail: format!("metabolites.json: {}", e),
            });
            return None;
        }
    };
    results.push(TestResult {
        name: "metabolites_not_empty".into(),
        passed: table.len() >= 10,
        detail: format!("{} metabolites loaded", table.len()),
    });

    let raw: std::collections::HashMap<String, serde_json::Value> =
        serde_json::from_str(METABOLITES_JSON).unwrap_or_default();
    results.push(TestResult {
        name: "metabolites_all_decoded".into(),
        passed: raw.len() == table.len(),
        detail: format!("{} of {} records decoded", table.len(), raw.len()),
    });

    let fresh = ResourceState::new(&config);
    let mut bad = Vec::new();
    for item in raw.keys() {
        let Some(m) = table.resolve(item, None) else {
            bad.push(format!("{} has no record", item));
            continue;
        };
        if m.food < 0.0 || m.hydration < 0.0 {
            bad.push(format!("{} has negative nutrition", item));
        }
        if m.is_warming() && config.boost_duration(&m) == 0 {
            bad.push(format!("{} warms with zero duration", item));
        }
        if !fresh.can_eat(&m) {
            bad.push(format!("{} inedible on a fresh player", item));
        }
    }
    results.push(TestResult {
        name: "metabolites_sane".into(),
        passed: bad.is_empty(),
        detail: if bad.is_empty() {
            "all records edible with positive durations".into()
        } else {
            bad.join("; ")
        },
    });

    Some((config, table))
}

// ── 2. Heat Feedback ────────────────────────────────────────────────────

fn validate_heat_feedback(config: &MetabolismConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Heat Feedback ---");
    let mut results = Vec::new();
    let cycles = config.adaptation_ticks / (config.environment_cycles * config.base_tick_count);

    for precise in [false, true] {
        let cfg = MetabolismConfig {
            precise_feedback: precise,
            ..config.clone()
        };
        for target in [-15.0f32, -5.0, 5.0, 15.0] {
            let mut state = ResourceState::new(&cfg);
            // Start one step in so the feedback branch is active
            state.set_heat(target.signum());
            for _ in 0..cycles {
                state.set_food(10.0);
                state.set_hydration(10.0);
                apply_heat_target(&mut state, target, &cfg);
            }
            let remaining = (target - state.heat()) / (target - target.signum());
            if verbose {
                println!("  precise={} target={:>5.1} heat={:>6.2} remaining={:.3}", precise, target, state.heat(), remaining);
            }
            results.push(TestResult {
                name: format!("heat_converges_{}_{}", if precise { "precise" } else { "simple" }, target),
                passed: remaining > 0.03 && remaining < 0.15,
                detail: format!("{:.1}% of gap remains after adaptation window", remaining * 100.0),
            });
        }
    }

    let mut state = ResourceState::new(config);
    state.set_heat(3.0);
    apply_heat_target(&mut state, 3.005, config);
    results.push(TestResult {
        name: "heat_snaps_within_tolerance".into(),
        passed: state.heat() == 3.005,
        detail: format!("heat {} after near-target step", state.heat()),
    });

    results
}

// ── 3. Damage ───────────────────────────────────────────────────────────

fn validate_damage(config: &MetabolismConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Damage & Starvation ---");
    let mut results = Vec::new();
    let registry = Arc::new(MetaboliteRegistry::with_table(MetaboliteTable::new()));
    let rules = WorldRules::default();

    // Hot with no water: food pays and the player starves
    let mut e = engine(config, &registry, 8.0);
    let mut p = SimPlayer::new(1);
    e.with_state_mut(p.id, |s| {
        s.set_heat(8.0);
        s.set_hydration(0.0);
    });
    run(&mut e, &mut p, &rules, 400);
    let s = e.state(p.id).unwrap_or_default();
    results.push(TestResult {
        name: "damage_hot_dehydrated_starves".into(),
        passed: s.food() < 10.0 && p.hits.iter().all(|k| *k == DamageKind::Starvation) && !p.hits.is_empty(),
        detail: format!("food {:.1}, {} starvation hits", s.food(), p.hits.len()),
    });

    // Pinned at -max: freeze every damage cycle
    let max = config.max_warmth;
    let mut e = engine(config, &registry, -max);
    let mut p = SimPlayer::new(2);
    e.with_state_mut(p.id, |s| s.set_heat(-max));
    run(&mut e, &mut p, &rules, 320);
    let freezes = p.hits.iter().filter(|k| **k == DamageKind::Freeze).count();
    results.push(TestResult {
        name: "damage_freeze_at_min_heat".into(),
        passed: freezes == 4,
        detail: format!("{} freeze hits over 4 damage cycles", freezes),
    });

    // Difficulty floors
    let floors = [
        (Difficulty::Peaceful, 10.0f32),
        (Difficulty::Easy, 10.0),
        (Difficulty::Normal, 1.0),
        (Difficulty::Hard, 0.0),
    ];
    for (difficulty, floor) in floors {
        let rules = WorldRules {
            difficulty,
            natural_regeneration: false,
            ..WorldRules::default()
        };
        let mut e = engine(config, &registry, max);
        let mut p = SimPlayer::new(3);
        e.with_state_mut(p.id, |s| {
            s.set_heat(max);
            s.set_hydration(0.0);
            s.set_food(0.0);
        });
        run(&mut e, &mut p, &rules, 20_000);
        results.push(TestResult {
            name: format!("damage_floor_{:?}", difficulty).to_lowercase(),
            passed: p.health == floor,
            detail: format!("health settles at {} (expected {})", p.health, floor),
        });
    }

    results.push(TestResult {
        name: "damage_can_be_hurt_table".into(),
        passed: health::can_be_hurt(11.0, Difficulty::Peaceful)
            && !health::can_be_hurt(10.0, Difficulty::Easy)
            && health::can_be_hurt(2.0, Difficulty::Normal)
            && !health::can_be_hurt(1.0, Difficulty::Normal)
            && health::can_be_hurt(0.5, Difficulty::Hard),
        detail: "difficulty thresholds".into(),
    });

    results
}

// ── 4. Exertion ─────────────────────────────────────────────────────────

fn validate_exertion(config: &MetabolismConfig, registry: &Arc<MetaboliteRegistry>, _verbose: bool) -> Vec<TestResult> {
    println!("--- Exertion ---");
    let mut results = Vec::new();

    let cases = [
        ("walk_1000_blocks", Locomotion::Walking, 1.0f32, false),
        ("crouch_1000_blocks", Locomotion::Crouching, 0.5, false),
        ("sprint_1000_blocks", Locomotion::Sprinting, 10.0, true),
        ("wade_1000_blocks", Locomotion::Wading, 1.0, false),
    ];
    for (name, mode, expected, energy) in cases {
        let mut e = engine(config, registry, 0.0);
        let p = SimPlayer::new(1);
        let mut handled = true;
        let mut spent = 0.0f32;
        for _ in 0..4000 {
            let before = e.state(p.id).unwrap_or_default();
            handled &= e
                .on_move(&p, mode, Displacement::new(0.2, 0.0, 0.15))
                .is_handled();
            let after = e.state(p.id).unwrap_or_default();
            spent += if energy {
                before.energy() - after.energy()
            } else {
                before.food() - after.food()
            };
            // Keep the sprinter topped up so energy never floors at zero
            e.with_state_mut(p.id, |s| s.set_warmth(20.0));
        }
        results.push(TestResult {
            name: format!("exertion_{}", name),
            passed: handled && (spent - expected).abs() < 0.01,
            detail: format!("spent {:.3} (expected {:.3})", spent, expected),
        });
    }

    let mut e = engine(config, registry, 0.0);
    let p = SimPlayer::new(2);
    e.consume_energy(&p, 20.0);
    let blocked = !e.on_glide_attempt(&p);
    let _ = e.on_move(&p, Locomotion::Gliding, Displacement::new(3.0, -1.0, 2.0));
    results.push(TestResult {
        name: "exertion_glide_needs_energy".into(),
        passed: blocked && !e.take_exhaustion_handled(p.id),
        detail: "no glide at zero energy; glide cost leaves host exhaustion alone".into(),
    });

    let mut e = engine(config, registry, 0.0);
    let _ = e.on_jump(&p, false);
    let _ = e.on_jump(&p, true);
    let s = e.state(p.id).unwrap_or_default();
    results.push(TestResult {
        name: "exertion_jumps".into(),
        passed: (s.food() - 9.95).abs() < 1e-4 && (s.energy() - 19.8).abs() < 1e-4,
        detail: format!("food {:.3}, energy {:.3}", s.food(), s.energy()),
    });

    results
}

// ── 5. Eating ───────────────────────────────────────────────────────────

fn validate_eating(config: &MetabolismConfig, registry: &Arc<MetaboliteRegistry>, verbose: bool) -> Vec<TestResult> {
    println!("--- Eating & Metabolism Boost ---");
    let mut results = Vec::new();
    let rules = WorldRules::default();

    for item in ["mushroom_stew", "rabbit_stew", "golden_carrot", "honey_bottle"] {
        let m = registry.lookup(item, None).ok().flatten().unwrap_or_default();
        let mut e = engine(config, registry, 0.0);
        let mut p = SimPlayer::new(1);
        e.with_state_mut(p.id, |s| s.set_warmth(5.0));
        let eaten = e.eat_item(&mut p, item, None).unwrap_or(false);
        let duration = p.boost.map(|(_, d)| d).unwrap_or(0);
        run(&mut e, &mut p, &rules, duration + 1);
        let gained = e.state(p.id).map(|s| s.warmth()).unwrap_or(0.0) - 5.0;
        let expected = if m.effect_ticks > 0 {
            (m.effect_ticks as f32 * config.metabolism_step(m.amplifier)).floor()
        } else {
            m.warmth
        };
        if verbose {
            println!("  {} boost x{} for {} ticks → +{:.0} warmth", item, m.amplifier + 1, duration, gained);
        }
        results.push(TestResult {
            name: format!("eat_{}", item),
            passed: eaten && p.boost.is_none() && (gained - expected).abs() <= 1.0,
            detail: format!("gained {:.0} warmth (expected ~{:.0})", gained, expected),
        });
    }

    let mut e = engine(config, registry, 0.0);
    let mut p = SimPlayer::new(2);
    let eaten = e.eat_item(&mut p, "ice_tea", None).unwrap_or(false);
    results.push(TestResult {
        name: "eat_cooling_is_instant".into(),
        passed: eaten && p.boost.is_none() && e.state(p.id).map(|s| s.warmth()) == Some(17.0),
        detail: "ice tea drops warmth by 3 immediately".into(),
    });

    let mut e = engine(config, registry, 0.0);
    let mut p = SimPlayer::new(3);
    let vanilla = e
        .eat_item(&mut p, "pumpkin_pie", Some(HostFood { nutrition: 8, saturation: 0.3 }))
        .unwrap_or(false);
    let s = e.state(p.id).unwrap_or_default();
    results.push(TestResult {
        name: "eat_host_food_fallback".into(),
        passed: vanilla && s.food() == 18.0 && (s.hydration() - 12.4).abs() < 1e-4,
        detail: format!("food {:.1}, hydration {:.1}", s.food(), s.hydration()),
    });

    let mut e = engine(config, registry, 0.0);
    let mut p = SimPlayer::new(4);
    e.with_state_mut(p.id, |s| s.set_food(15.0));
    let refused = !e.eat_item(&mut p, "cooked_beef", None).unwrap_or(true)
        && !e.eat_item(&mut p, "gravel", None).unwrap_or(true);
    results.push(TestResult {
        name: "eat_refuses_overfill_and_unknown".into(),
        passed: refused,
        detail: "overfilling and no-nutrition items are refused".into(),
    });

    results
}

// ── 6. Sync ─────────────────────────────────────────────────────────────

fn validate_sync(config: &MetabolismConfig, registry: &Arc<MetaboliteRegistry>, _verbose: bool) -> Vec<TestResult> {
    println!("--- Sync & Mirror ---");
    let mut results = Vec::new();
    let rules = WorldRules::default();

    let mut e = engine(config, registry, 11.0);
    let mut mirror = MetabolismMirror::new(config, Arc::clone(registry));
    let mut p = SimPlayer::new(1);
    let _ = e.eat_item(&mut p, "rabbit_stew", None);

    let ticks = 6_000u32;
    let mut sent = 0usize;
    let mut diverged = 0usize;
    for _ in 0..ticks {
        e.tick(&rules, &mut p);
        p.end_tick();
        for (_, msg) in e.drain_outbox() {
            mirror.apply(&msg);
            sent += 1;
        }
        let s = e.state(p.id).unwrap_or_default();
        if mirror.heat() != s.heat()
            || mirror.warmth() != s.warmth()
            || mirror.food() != s.food()
            || mirror.hydration() != s.hydration()
            || (mirror.progress() - s.progress()).abs() >= config.progress_deadband
        {
            diverged += 1;
        }
    }
    results.push(TestResult {
        name: "sync_mirror_never_diverges".into(),
        passed: diverged == 0,
        detail: format!("{} diverged ticks", diverged),
    });
    results.push(TestResult {
        name: "sync_is_sparse".into(),
        passed: sent > 0 && sent < ticks as usize / 5,
        detail: format!("{} messages over {} ticks", sent, ticks),
    });

    let mut buffer = Vec::new();
    let saved = e.save(&mut buffer).is_ok();
    let mut restored = engine(config, registry, 11.0);
    let loaded = restored.load(&buffer[..]).unwrap_or(0);
    results.push(TestResult {
        name: "persist_roundtrip".into(),
        passed: saved && loaded == 1 && restored.state(p.id) == e.state(p.id),
        detail: format!("{} bytes for {} player", buffer.len(), loaded),
    });

    results
}

// ── 7. Random Sweep ─────────────────────────────────────────────────────

fn validate_random_sweep(config: &MetabolismConfig, registry: &Arc<MetaboliteRegistry>, verbose: bool) -> Vec<TestResult> {
    println!("--- Randomized Roster Sweep ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let players = 40u64;
    let targets: Vec<f32> = (0..players).map(|_| rng.gen_range(-22.0..22.0)).collect();
    let sampler = move |_rules: &WorldRules, player: &dyn PlayerContext| EnvironmentEffect {
        heat_target: targets[(player.id().0 % players) as usize],
        warmth_effect: 0.0,
    };
    let mut engine = build_engine(config, sampler, registry);
    let mut roster: Vec<SimPlayer> = (0..players).map(SimPlayer::new).collect();
    let items = ["apple", "bread", "mushroom_stew", "melon_slice", "water_bottle", "snowball"];
    let modes = [
        Locomotion::Walking,
        Locomotion::Sprinting,
        Locomotion::Swimming,
        Locomotion::Climbing,
        Locomotion::Gliding,
    ];

    let mut violations = Vec::new();
    let mut meals = 0usize;
    for tick in 0..8_000u64 {
        let rules = WorldRules {
            difficulty: if tick < 4_000 { Difficulty::Normal } else { Difficulty::Peaceful },
            ..WorldRules::default()
        };
        for p in roster.iter_mut() {
            engine.tick(&rules, p);
            engine.on_ai_step(&*p, &rules, tick);
            if rng.gen_bool(0.1) {
                let mode = modes[rng.gen_range(0..modes.len())];
                let _ = engine.on_move(&*p, mode, Displacement::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.2..0.2), rng.gen_range(-0.3..0.3)));
            }
            if rng.gen_bool(0.002) {
                let item = items[rng.gen_range(0..items.len())];
                if engine.eat_item(p, item, None).unwrap_or(false) {
                    meals += 1;
                }
            }
            engine.take_exhaustion_handled(p.id);
            p.end_tick();

            if let Some(s) = engine.state(p.id) {
                let ok = s.warmth() >= 0.0
                    && s.warmth() <= s.warmth_ceiling() + 1e-5
                    && s.heat().abs() <= s.max_warmth()
                    && (0.0..=s.max_food()).contains(&s.food())
                    && (0.0..=s.max_food()).contains(&s.hydration())
                    && (0.0..1.0).contains(&s.progress());
                if !ok && violations.len() < 5 {
                    violations.push(format!("{} at tick {}: {:?}", p.id, tick, s));
                }
            }
        }
        engine.drain_outbox();
    }

    if verbose {
        let dead = roster.iter().filter(|p| p.health <= 1.0).count();
        println!("  {} players, {} meals, {} at the damage floor", players, meals, dead);
    }
    results.push(TestResult {
        name: "sweep_invariants_hold".into(),
        passed: violations.is_empty(),
        detail: if violations.is_empty() {
            format!("{} players x 8000 ticks", players)
        } else {
            violations.join("; ")
        },
    });
    results.push(TestResult {
        name: "sweep_roster_tracked".into(),
        passed: engine.player_count() == players as usize,
        detail: format!("{} tracked", engine.player_count()),
    });

    results
}
