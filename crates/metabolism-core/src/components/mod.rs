//! Component definitions for the per-player ECS world.
//!
//! Each tracked player is one entity carrying a [`PlayerId`], its
//! `ResourceState`, a `SyncShadow`, a [`Cadence`] and an [`ExhaustionLatch`].
//! Components are data only; the rules that change them live in
//! `metabolism_logic` and [`crate::systems`].

mod player;

pub use player::*;

pub use metabolism_logic::state::ResourceState;
pub use metabolism_logic::sync::SyncShadow;
