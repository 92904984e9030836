//! Action hooks: host events that spend or restore a player's resources.
//!
//! Each hook costs the action through `metabolism_logic::locomotion` and
//! returns an [`Exhaustion`] telling the host whether its own default cost
//! still applies. Debits are skipped for invulnerable players and on the
//! presentation side; the handled latch is set regardless so both sides
//! agree on suppressing the host's cost.

use metabolism_logic::health::Difficulty;
use metabolism_logic::locomotion::{attack_cost, hurt_cost, jump_cost, movement_cost, ActionCost, Displacement, Locomotion};
use metabolism_logic::metabolite::Metabolite;

use crate::components::{ExhaustionLatch, PlayerId, ResourceState};
use crate::engine::MetabolismEngine;
use crate::host::{PlayerContext, WorldRules};
use crate::registry::{HostFood, MetaboliteError};
use crate::systems::{apply_action_cost, Exhaustion};

impl MetabolismEngine {
    fn may_debit<P: PlayerContext + ?Sized>(&self, player: &P) -> bool {
        self.side().is_authoritative() && !player.is_invulnerable()
    }

    fn charge<P: PlayerContext + ?Sized>(&mut self, player: &P, cost: ActionCost) -> Exhaustion {
        let may_debit = self.may_debit(player);
        let entity = self.entity(player.id());
        match self
            .world
            .query_one_mut::<(&mut ResourceState, &mut ExhaustionLatch)>(entity)
        {
            Ok((state, latch)) => apply_action_cost(state, latch, cost, may_debit),
            Err(_) => Exhaustion::Default,
        }
    }

    pub fn on_jump<P: PlayerContext + ?Sized>(&mut self, player: &P, sprinting: bool) -> Exhaustion {
        let cost = jump_cost(sprinting, &self.config().costs);
        self.charge(player, cost)
    }

    pub fn on_attack<P: PlayerContext + ?Sized>(&mut self, player: &P) -> Exhaustion {
        let cost = attack_cost(&self.config().costs);
        self.charge(player, cost)
    }

    /// `source_exhausts` is whether the damage source would normally cost
    /// the player exhaustion.
    pub fn on_hurt<P: PlayerContext + ?Sized>(&mut self, player: &P, source_exhausts: bool) -> Exhaustion {
        let cost = hurt_cost(source_exhausts, &self.config().costs);
        self.charge(player, cost)
    }

    pub fn on_move<P: PlayerContext + ?Sized>(
        &mut self,
        player: &P,
        mode: Locomotion,
        delta: Displacement,
    ) -> Exhaustion {
        let cost = movement_cost(mode, delta, &self.config().costs);
        self.charge(player, cost)
    }

    /// Whether the player has the energy to start gliding.
    pub fn on_glide_attempt<P: PlayerContext + ?Sized>(&mut self, player: &P) -> bool {
        self.with_state_mut(player.id(), |s| s.energy() > 0.0)
            .unwrap_or(false)
    }

    /// Read and clear the handled latch. `true` means the host must skip its
    /// default exhaustion for the action just performed.
    pub fn take_exhaustion_handled(&mut self, id: PlayerId) -> bool {
        let entity = self.entity(id);
        self.world
            .query_one_mut::<&mut ExhaustionLatch>(entity)
            .map(|latch| latch.take())
            .unwrap_or(false)
    }

    /// Per-tick AI step hook. On peaceful worlds with natural regeneration,
    /// every `peaceful_interval` ticks drifts heat toward neutral and adds a
    /// unit of warmth.
    pub fn on_ai_step<P: PlayerContext + ?Sized>(&mut self, player: &P, rules: &WorldRules, tick_count: u64) {
        if rules.difficulty != Difficulty::Peaceful || !rules.natural_regeneration {
            return;
        }
        let interval = u64::from(self.config().peaceful_interval.max(1));
        if tick_count % interval == 0 {
            self.peaceful_warmth(player);
        }
    }

    pub fn peaceful_warmth<P: PlayerContext + ?Sized>(&mut self, player: &P) {
        if self.may_debit(player) {
            self.with_state_mut(player.id(), |s| s.peaceful_warmth());
        }
    }

    pub fn consume_food<P: PlayerContext + ?Sized>(&mut self, player: &P, amount: f32) {
        if self.may_debit(player) {
            self.with_state_mut(player.id(), |s| s.consume_food(amount));
        }
    }

    pub fn consume_hydration<P: PlayerContext + ?Sized>(&mut self, player: &P, amount: f32) {
        if self.may_debit(player) {
            self.with_state_mut(player.id(), |s| s.consume_hydration(amount));
        }
    }

    pub fn consume_energy<P: PlayerContext + ?Sized>(&mut self, player: &P, amount: f32) {
        if self.may_debit(player) {
            self.with_state_mut(player.id(), |s| s.consume_energy(amount));
        }
    }

    pub fn can_eat(&mut self, id: PlayerId, metabolite: &Metabolite) -> bool {
        self.with_state_mut(id, |s| s.can_eat(metabolite))
            .unwrap_or(false)
    }

    /// Apply a metabolite. Food, hydration and cooling land now; warming is
    /// delivered through a metabolism boost started on the player.
    pub fn eat<P: PlayerContext + ?Sized>(&mut self, player: &mut P, metabolite: &Metabolite) {
        if !self.may_debit(&*player) {
            return;
        }
        let warming = self
            .with_state_mut(player.id(), |s| s.eat(metabolite))
            .unwrap_or(false);
        if warming {
            let duration = self.config().boost_duration(metabolite);
            log::debug!(
                "{}: metabolism boost {} for {} ticks",
                player.id(),
                metabolite.amplifier,
                duration
            );
            player.add_metabolism_boost(duration, metabolite.amplifier);
        }
    }

    /// Look up an item and eat it if it fits. Returns whether it was eaten.
    pub fn eat_item<P: PlayerContext + ?Sized>(
        &mut self,
        player: &mut P,
        item: &str,
        host_food: Option<HostFood>,
    ) -> Result<bool, MetaboliteError> {
        let Some(metabolite) = self.registry().lookup(item, host_food)? else {
            return Ok(false);
        };
        if !self.can_eat(player.id(), &metabolite) {
            return Ok(false);
        }
        self.eat(player, &metabolite);
        Ok(true)
    }
}
