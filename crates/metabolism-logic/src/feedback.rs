//! Heat feedback control: moves heat toward the environment's target.
//!
//! Each environment cycle closes a fixed fraction of the gap, which
//! approximates exponential decay toward the target. Hot bodies only get
//! the proportional pull back while hydrated; cold bodies only while fed.
//! Without that resource the step is sized from the raw target instead,
//! so an unfed body keeps drifting further from neutral.

use crate::config::MetabolismConfig;
use crate::state::ResourceState;

/// Heat delta for one environment cycle.
///
/// With `feedback` the step is proportional to the remaining gap
/// `target - heat`; without it, to the target itself. Precise mode adds the
/// second-order term of `1 - e^-c`.
pub fn heat_change(heat: f32, target: f32, feedback: bool, coefficient: f32, precise: bool) -> f32 {
    let diff = if feedback { target - heat } else { target };
    if precise {
        diff * coefficient + diff * coefficient * coefficient / 2.0
    } else {
        diff * coefficient
    }
}

/// Apply one environment cycle of heat feedback toward `target`.
pub fn apply_heat_target(state: &mut ResourceState, target: f32, config: &MetabolismConfig) {
    let heat = state.heat();
    let max = state.max_warmth();
    let c = state.heat_coefficient();
    let precise = config.precise_feedback;

    if (heat - target).abs() < config.heat_snap_tolerance {
        state.set_heat(target);
    } else if heat > 0.0 {
        let feedback = state.hydration() > 0.0;
        let next = heat + heat_change(heat, target, feedback, c, precise);
        state.set_heat(next.clamp(0.0, max));
    } else if heat < 0.0 {
        let feedback = state.food() > 0.0;
        let next = heat + heat_change(heat, target, feedback, c, precise);
        state.set_heat(next.clamp(-max, 0.0));
    } else if target != 0.0 {
        let next = heat_change(heat, target, false, c, precise);
        state.set_heat(next.clamp(-max, max));
    }
}
