//! Presentation-side mirror of one player's metabolism.
//!
//! Holds its own `ResourceState`, replaced wholesale by incoming sync
//! messages. Never simulates. Reads go to the HUD; `can_eat` lets the
//! presentation side predict whether an item may be eaten.

use std::sync::Arc;

use metabolism_logic::config::MetabolismConfig;
use metabolism_logic::state::ResourceState;
use metabolism_logic::sync::SyncMessage;

use crate::registry::{HostFood, MetaboliteError, MetaboliteRegistry};

pub struct MetabolismMirror {
    state: ResourceState,
    registry: Arc<MetaboliteRegistry>,
}

impl MetabolismMirror {
    pub fn new(config: &MetabolismConfig, registry: Arc<MetaboliteRegistry>) -> Self {
        Self {
            state: ResourceState::new(config),
            registry,
        }
    }

    pub fn apply(&mut self, msg: &SyncMessage) {
        self.state.apply_sync(msg);
    }

    pub fn state(&self) -> &ResourceState {
        &self.state
    }

    pub fn heat(&self) -> f32 {
        self.state.heat()
    }

    pub fn warmth(&self) -> f32 {
        self.state.warmth()
    }

    pub fn food(&self) -> f32 {
        self.state.food()
    }

    pub fn hydration(&self) -> f32 {
        self.state.hydration()
    }

    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn can_eat(&self, item: &str, host_food: Option<HostFood>) -> Result<bool, MetaboliteError> {
        let metabolite = self.registry.lookup(item, host_food)?;
        Ok(metabolite.is_some_and(|m| self.state.can_eat(&m)))
    }

    /// Back to construction defaults, e.g. on disconnect.
    pub fn reset(&mut self, config: &MetabolismConfig) {
        self.state = ResourceState::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::MetaboliteTable;
    use metabolism_logic::metabolite::Metabolite;
    use metabolism_logic::sync::{ProgressSync, StateSync};

    fn mirror() -> MetabolismMirror {
        let mut table = MetaboliteTable::new();
        table.insert("broth", Metabolite::new(3.0, 3.0, 1.0));
        MetabolismMirror::new(
            &MetabolismConfig::default(),
            Arc::new(MetaboliteRegistry::with_table(table)),
        )
    }

    #[test]
    fn test_state_message_overwrites() {
        let mut m = mirror();
        m.apply(&SyncMessage::State(StateSync {
            heat: 4.0,
            warmth: 12.0,
            food: 7.5,
            hydration: 2.0,
        }));
        assert_eq!(m.heat(), 4.0);
        assert_eq!(m.warmth(), 12.0);
        assert_eq!(m.food(), 7.5);
        assert_eq!(m.hydration(), 2.0);
        assert_eq!(m.progress(), 0.0);

        m.apply(&SyncMessage::Progress(ProgressSync { progress: 0.3 }));
        assert_eq!(m.progress(), 0.3);
        assert_eq!(m.food(), 7.5);
    }

    #[test]
    fn test_can_eat_uses_mirrored_values() {
        let mut m = mirror();
        assert_eq!(m.can_eat("broth", None), Ok(true));
        assert_eq!(m.can_eat("gravel", None), Ok(false));
        m.apply(&SyncMessage::State(StateSync {
            heat: 0.0,
            warmth: 20.0,
            food: 17.0,
            hydration: 5.0,
        }));
        assert_eq!(m.can_eat("broth", None), Ok(false));
    }
}
