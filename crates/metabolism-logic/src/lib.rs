//! Pure survival-metabolism logic.
//!
//! This crate contains the per-player resource model and every rule that
//! mutates it, independent of any host game, ECS or network layer.
//! Functions take plain data and return results, making them unit-testable
//! and reusable by the authoritative engine and the headless simtest alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Tunable capacities, cadences and action costs |
//! | [`constants`] | Default values for the config |
//! | [`feedback`] | Heat approach toward the environment target |
//! | [`health`] | Damage and regen policy, difficulty gating |
//! | [`locomotion`] | Food/energy cost of movement, jumps, attacks, hits |
//! | [`metabolite`] | Per-item nutrition records |
//! | [`metabolize`] | Progress banking and food+hydration → warmth conversion |
//! | [`state`] | `ResourceState` and its persisted `StateRecord` |
//! | [`sync`] | Replication messages and last-sent shadows |

pub mod config;
pub mod constants;
pub mod feedback;
pub mod health;
pub mod locomotion;
pub mod metabolite;
pub mod metabolize;
pub mod state;
pub mod sync;
