//! Costs of player actions: movement, jumping, attacking, taking damage.
//!
//! Each action maps to at most one [`Debit`] plus a flag saying whether the
//! action counts as handled, i.e. whether the host's own exhaustion cost for
//! it must be skipped.

use serde::{Deserialize, Serialize};

use crate::config::ActionCosts;

/// How the player moved this tick, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locomotion {
    /// Riding another entity. Free.
    Riding,
    /// Sprint-swimming. Costs energy over 3D distance.
    Swimming,
    /// Eyes under water, not sprint-swimming. Costs food over 3D distance.
    Submerged,
    /// Feet in water. Costs food over horizontal distance.
    Wading,
    /// On a ladder or vine. Costs food only while ascending.
    Climbing,
    Walking,
    Crouching,
    Sprinting,
    /// Elytra-style gliding. Costs energy over 3D distance.
    Gliding,
    /// Falling or jumping through the air. Free.
    Airborne,
}

/// Displacement over one tick, in blocks.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
    pub dz: f64,
}

impl Displacement {
    pub fn new(dx: f64, dy: f64, dz: f64) -> Self {
        Self { dx, dy, dz }
    }

    pub fn length(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy + self.dz * self.dz).sqrt()
    }

    pub fn horizontal(&self) -> f64 {
        (self.dx * self.dx + self.dz * self.dz).sqrt()
    }
}

/// What an action takes from the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Debit {
    Food(f32),
    Energy(f32),
}

impl Debit {
    pub fn amount(&self) -> f32 {
        match self {
            Debit::Food(a) | Debit::Energy(a) => *a,
        }
    }
}

/// Result of costing one action.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActionCost {
    pub debit: Option<Debit>,
    /// The host's default exhaustion for this action must be suppressed.
    pub handled: bool,
}

impl ActionCost {
    const FREE: ActionCost = ActionCost {
        debit: None,
        handled: false,
    };

    fn handled(debit: Debit) -> Self {
        Self {
            debit: Some(debit),
            handled: true,
        }
    }

    fn unhandled(debit: Debit) -> Self {
        Self {
            debit: Some(debit),
            handled: false,
        }
    }
}

/// Distance in whole centimetres, as the host's movement statistics count it.
fn centimetres(blocks: f64) -> u32 {
    (blocks as f32 * 100.0).round().max(0.0) as u32
}

fn per_cm(cm: u32, coefficient: f32) -> f32 {
    cm as f32 * 0.01 * coefficient
}

/// Cost of moving `delta` in the given mode.
pub fn movement_cost(mode: Locomotion, delta: Displacement, costs: &ActionCosts) -> ActionCost {
    match mode {
        Locomotion::Riding | Locomotion::Airborne => ActionCost::FREE,
        Locomotion::Swimming => match centimetres(delta.length()) {
            0 => ActionCost::FREE,
            cm => ActionCost::handled(Debit::Energy(per_cm(cm, costs.energy_swim))),
        },
        Locomotion::Submerged => match centimetres(delta.length()) {
            0 => ActionCost::FREE,
            cm => ActionCost::handled(Debit::Food(per_cm(cm, costs.energy_swim))),
        },
        Locomotion::Wading => match centimetres(delta.horizontal()) {
            0 => ActionCost::FREE,
            cm => ActionCost::handled(Debit::Food(per_cm(cm, costs.food_walk))),
        },
        Locomotion::Climbing => {
            if delta.dy > 0.0 {
                ActionCost::unhandled(Debit::Food(delta.dy as f32 * costs.food_climb))
            } else {
                ActionCost::FREE
            }
        }
        Locomotion::Walking | Locomotion::Crouching | Locomotion::Sprinting => {
            let cm = centimetres(delta.horizontal());
            if cm == 0 {
                return ActionCost::FREE;
            }
            let debit = match mode {
                Locomotion::Sprinting => Debit::Energy(per_cm(cm, costs.energy_sprint)),
                Locomotion::Crouching => Debit::Food(per_cm(cm, costs.food_crouch)),
                _ => Debit::Food(per_cm(cm, costs.food_walk)),
            };
            ActionCost::handled(debit)
        }
        Locomotion::Gliding => {
            let blocks = delta.length().round() as f32;
            ActionCost::unhandled(Debit::Energy(blocks * costs.energy_fly))
        }
    }
}

pub fn jump_cost(sprinting: bool, costs: &ActionCosts) -> ActionCost {
    if sprinting {
        ActionCost::handled(Debit::Energy(costs.energy_sprint_jump))
    } else {
        ActionCost::handled(Debit::Food(costs.food_jump))
    }
}

pub fn attack_cost(costs: &ActionCosts) -> ActionCost {
    ActionCost::handled(Debit::Food(costs.food_atk))
}

/// Damage only costs food when its source would have exhausted the player,
/// but the host's own exhaustion is suppressed regardless.
pub fn hurt_cost(source_exhausts: bool, costs: &ActionCosts) -> ActionCost {
    ActionCost {
        debit: source_exhausts.then_some(Debit::Food(costs.food_dmg)),
        handled: true,
    }
}
