//! Metabolism engine - owns every tracked player's state and drives it

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Arc;

use hecs::{Entity, World};
use metabolism_logic::config::{ConfigError, MetabolismConfig};
use metabolism_logic::state::StateRecord;
use metabolism_logic::sync::SyncMessage;

use crate::components::*;
use crate::host::{EnvironmentSampler, PlayerContext, Side, WorldRules};
use crate::persistence::{self, SaveError};
use crate::registry::MetaboliteRegistry;
use crate::systems::{tick_player, TickReport};

/// Per-player metabolism for one process.
///
/// Players are entities in an ECS world, found through a `PlayerId` index.
/// The host calls [`tick`](Self::tick) once per game tick for each player and
/// forwards the action hooks; the engine queues sync messages for the host
/// to deliver.
pub struct MetabolismEngine {
    /// ECS world with one entity per tracked player
    pub world: World,
    players: HashMap<PlayerId, Entity>,
    config: MetabolismConfig,
    side: Side,
    sampler: Box<dyn EnvironmentSampler>,
    registry: Arc<MetaboliteRegistry>,
    outbox: Vec<(PlayerId, SyncMessage)>,
}

impl MetabolismEngine {
    /// Fails when `config` does not pass [`MetabolismConfig::validate`], so
    /// the tick path never divides by a zero cadence.
    pub fn new(
        config: MetabolismConfig,
        side: Side,
        sampler: impl EnvironmentSampler + 'static,
        registry: Arc<MetaboliteRegistry>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, side, Box::new(sampler), registry))
    }

    /// Authoritative engine with default config.
    pub fn authoritative(sampler: impl EnvironmentSampler + 'static, registry: Arc<MetaboliteRegistry>) -> Self {
        // Defaults always validate
        Self::assemble(MetabolismConfig::default(), Side::Authoritative, Box::new(sampler), registry)
    }

    fn assemble(
        config: MetabolismConfig,
        side: Side,
        sampler: Box<dyn EnvironmentSampler>,
        registry: Arc<MetaboliteRegistry>,
    ) -> Self {
        Self {
            world: World::new(),
            players: HashMap::new(),
            config,
            side,
            sampler,
            registry,
            outbox: Vec::new(),
        }
    }

    pub fn config(&self) -> &MetabolismConfig {
        &self.config
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn registry(&self) -> &Arc<MetaboliteRegistry> {
        &self.registry
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_tracked(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// Tracked players in id order.
    pub fn players(&self) -> Vec<PlayerId> {
        let mut ids: Vec<PlayerId> = self.players.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Start tracking a player with default state. No-op if already tracked.
    pub fn track(&mut self, id: PlayerId) {
        if !self.players.contains_key(&id) {
            self.spawn(id);
            log::info!("Tracking {}", id);
        }
    }

    /// Stop tracking a player, returning the record to persist.
    pub fn untrack(&mut self, id: PlayerId) -> Option<StateRecord> {
        let entity = self.players.remove(&id)?;
        let record = self
            .world
            .get::<&ResourceState>(entity)
            .ok()
            .map(|state| state.write_state());
        let _ = self.world.despawn(entity);
        self.outbox.retain(|(p, _)| *p != id);
        log::info!("Untracked {}", id);
        record
    }

    /// Load a persisted record into a player, tracking them if needed.
    ///
    /// Cadence counters restart and the sync shadow is cleared so the next
    /// tick re-sends everything.
    pub fn restore(&mut self, id: PlayerId, record: &StateRecord) {
        let entity = self.entity(id);
        if let Ok((state, cadence, shadow)) = self
            .world
            .query_one_mut::<(&mut ResourceState, &mut Cadence, &mut SyncShadow)>(entity)
        {
            state.read_state(record);
            *cadence = Cadence::default();
            shadow.invalidate();
        }
    }

    /// Copy of a player's current state.
    pub fn state(&self, id: PlayerId) -> Option<ResourceState> {
        let entity = *self.players.get(&id)?;
        self.world.get::<&ResourceState>(entity).ok().map(|s| *s)
    }

    /// Mutate a player's state directly, e.g. for admin commands. Tracks the
    /// player if needed.
    pub fn with_state_mut<R>(&mut self, id: PlayerId, f: impl FnOnce(&mut ResourceState) -> R) -> Option<R> {
        let entity = self.entity(id);
        self.world.query_one_mut::<&mut ResourceState>(entity).ok().map(f)
    }

    pub fn set_adaptation_ticks(&mut self, id: PlayerId, ticks: u32) {
        let entity = self.entity(id);
        if let Ok(state) = self.world.query_one_mut::<&mut ResourceState>(entity) {
            state.set_adaptation_ticks(ticks, &self.config);
        }
    }

    /// Force a full re-send to a player on their next tick, e.g. after they
    /// reconnect.
    pub fn resync(&mut self, id: PlayerId) {
        let entity = self.entity(id);
        if let Ok(shadow) = self.world.query_one_mut::<&mut SyncShadow>(entity) {
            shadow.invalidate();
        }
    }

    /// Advance one host tick for one player.
    ///
    /// Runs the cadence, environment, damage, regen and metabolize steps,
    /// then queues whatever sync messages the new state calls for. Does
    /// nothing on the presentation side.
    pub fn tick<P: PlayerContext>(&mut self, rules: &WorldRules, player: &mut P) -> TickReport {
        if !self.side.is_authoritative() {
            return TickReport::default();
        }
        let id = player.id();
        let entity = self.entity(id);
        let Ok((state, cadence, shadow)) = self
            .world
            .query_one_mut::<(&mut ResourceState, &mut Cadence, &mut SyncShadow)>(entity)
        else {
            log::error!("{} has no metabolism components", id);
            return TickReport::default();
        };

        let report = tick_player(state, cadence, &self.config, self.sampler.as_ref(), rules, player);

        for msg in shadow.collect(state, self.config.progress_deadband) {
            log::debug!("Sync to {}: {:?}", id, msg);
            self.outbox.push((id, msg));
        }
        report
    }

    /// Take every queued sync message, oldest first.
    pub fn drain_outbox(&mut self) -> Vec<(PlayerId, SyncMessage)> {
        std::mem::take(&mut self.outbox)
    }

    /// Save every tracked player's record to a writer
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        let records: Vec<(PlayerId, StateRecord)> = self
            .players()
            .into_iter()
            .filter_map(|id| self.state(id).map(|s| (id, s.write_state())))
            .collect();
        persistence::save_roster(writer, &records)?;
        log::info!("Saved {} players", records.len());
        Ok(())
    }

    /// Replace the roster with one loaded from a reader
    pub fn load<R: Read>(&mut self, reader: R) -> Result<usize, SaveError> {
        let records = persistence::load_roster(reader)?;
        self.world.clear();
        self.players.clear();
        self.outbox.clear();
        for (id, record) in &records {
            if self.players.contains_key(id) {
                log::warn!("Duplicate {} in save file, keeping the later record", id);
            }
            self.restore(*id, record);
        }
        log::info!("Loaded {} players", self.players.len());
        Ok(self.players.len())
    }

    /// Entity for a player, tracking them with defaults on first access.
    pub(crate) fn entity(&mut self, id: PlayerId) -> Entity {
        if let Some(&entity) = self.players.get(&id) {
            return entity;
        }
        log::debug!("{} tracked on first access", id);
        self.spawn(id)
    }

    fn spawn(&mut self, id: PlayerId) -> Entity {
        let entity = self.world.spawn((
            id,
            ResourceState::new(&self.config),
            Cadence::default(),
            SyncShadow::new(),
            ExhaustionLatch::default(),
        ));
        self.players.insert(id, entity);
        entity
    }
}
