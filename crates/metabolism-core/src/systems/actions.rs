//! Action system: charging player actions against food and energy.

use metabolism_logic::locomotion::{ActionCost, Debit};
use metabolism_logic::state::ResourceState;

use crate::components::ExhaustionLatch;

/// Tells the host whether to apply its own default exhaustion for an action.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// The action was charged here; skip the host's default cost.
    Handled,
    /// Apply the host's default cost as usual.
    Default,
}

impl Exhaustion {
    pub fn is_handled(self) -> bool {
        self == Exhaustion::Handled
    }
}

/// Apply an action's debit and latch its handled flag.
///
/// `may_debit` is false for invulnerable players and on the presentation
/// side; the latch is set either way.
pub fn apply_action_cost(
    state: &mut ResourceState,
    latch: &mut ExhaustionLatch,
    cost: ActionCost,
    may_debit: bool,
) -> Exhaustion {
    if may_debit {
        match cost.debit {
            Some(Debit::Food(amount)) => state.consume_food(amount),
            Some(Debit::Energy(amount)) => state.consume_energy(amount),
            None => {}
        }
    }
    if cost.handled {
        latch.set();
        Exhaustion::Handled
    } else {
        Exhaustion::Default
    }
}
