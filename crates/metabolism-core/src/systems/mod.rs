//! Systems - per-player logic run by the engine over its components

mod actions;
mod tick;

pub use actions::*;
pub use tick::*;
