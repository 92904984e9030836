//! Metabolism Core - per-player survival metabolism engine
//!
//! Tracks heat, warmth, food and hydration for every player of a host game
//! and advances them once per host tick, with action hooks for movement,
//! combat and eating, state replication to a presentation mirror, and
//! whole-roster save files.
//!
//! # Architecture
//!
//! Player state lives in an ECS world via `hecs`:
//! - **Entities**: one per tracked player, indexed by [`PlayerId`](components::PlayerId)
//! - **Components**: `ResourceState`, `Cadence`, `SyncShadow`, `ExhaustionLatch`
//! - **Systems**: the tick pipeline and action costing in [`systems`]
//!
//! The rules themselves live in `metabolism_logic`; this crate wires them to
//! a host through the traits in [`host`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use metabolism_core::prelude::*;
//! # struct MyPlayer;
//! # impl metabolism_logic::health::Vitals for MyPlayer {
//! #     fn health(&self) -> f32 { 20.0 }
//! #     fn max_health(&self) -> f32 { 20.0 }
//! #     fn hurt(&mut self, _: metabolism_logic::health::DamageKind, _: f32) {}
//! #     fn heal(&mut self, _: f32) {}
//! # }
//! # impl PlayerContext for MyPlayer {
//! #     fn id(&self) -> PlayerId { PlayerId(1) }
//! #     fn metabolism_boost(&self) -> Option<u8> { None }
//! #     fn add_metabolism_boost(&mut self, _: u32, _: u8) {}
//! # }
//!
//! let registry = Arc::new(MetaboliteRegistry::with_table(MetaboliteTable::new()));
//! let mut engine = MetabolismEngine::authoritative(FixedEnvironment::new(8.0, 0.0), registry);
//! let mut player = MyPlayer;
//!
//! loop {
//!     engine.tick(&WorldRules::default(), &mut player);
//!     for (_id, _msg) in engine.drain_outbox() {
//!         // deliver to the player's client
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
mod hooks;
pub mod host;
pub mod mirror;
pub mod persistence;
pub mod registry;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::MetabolismEngine;
    pub use crate::host::{EnvironmentEffect, EnvironmentSampler, FixedEnvironment, PlayerContext, Side, WorldRules};
    pub use crate::mirror::MetabolismMirror;
    pub use crate::registry::{HostFood, MetaboliteRegistry, MetaboliteTable};
    pub use crate::systems::{Exhaustion, TickReport};
}
