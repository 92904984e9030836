//! Metabolize step: converts food and hydration into warmth.
//!
//! A metabolism boost banks progress every tick. Each whole unit of progress
//! converts one food plus one hydration into one warmth, if both are
//! available and warmth has room. The unit is spent either way, so progress
//! banked while starving or while already warm is lost.

use crate::config::MetabolismConfig;
use crate::state::ResourceState;

/// Run one tick of the metabolize step. `boost` is the amplifier of the
/// player's active metabolism boost, if any. Returns whether a conversion
/// happened.
pub fn metabolize(state: &mut ResourceState, boost: Option<u8>, config: &MetabolismConfig) -> bool {
    if let Some(amplifier) = boost {
        state.add_progress(config.metabolism_step(amplifier));
    }

    if state.progress() < 1.0 {
        return false;
    }

    let converted = state.food() > 0.0
        && state.hydration() > 0.0
        && state.warmth() < state.warmth_ceiling();
    if converted {
        state.consume_food(1.0);
        state.consume_hydration(1.0);
        state.warm(1.0);
    }
    state.set_progress(state.progress() - 1.0);
    converted
}
