//! State replication messages and change detection.
//!
//! The authoritative side keeps a [`SyncShadow`] per player holding the last
//! values it sent. After each tick it asks the shadow for deltas: the four
//! main values go out together whenever any of them changed, progress goes
//! out on its own once it has moved past a deadband. The presentation side
//! overwrites its mirror wholesale on receipt.

use serde::{Deserialize, Serialize};

use crate::state::{wrap_progress, ResourceState};

/// Heat, warmth, food and hydration, always sent together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateSync {
    pub heat: f32,
    pub warmth: f32,
    pub food: f32,
    pub hydration: f32,
}

impl From<&ResourceState> for StateSync {
    fn from(state: &ResourceState) -> Self {
        Self {
            heat: state.heat(),
            warmth: state.warmth(),
            food: state.food(),
            hydration: state.hydration(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressSync {
    pub progress: f32,
}

/// Either of the two independent message kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SyncMessage {
    State(StateSync),
    Progress(ProgressSync),
}

/// Last values sent to one player's presentation side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncShadow {
    last_state: Option<StateSync>,
    last_progress: Option<f32>,
}

impl SyncShadow {
    /// A shadow matching a fresh mirror: nothing sent yet, progress at zero.
    pub fn new() -> Self {
        Self {
            last_state: None,
            last_progress: Some(0.0),
        }
    }

    /// Forget what was sent so the next check re-sends everything.
    pub fn invalidate(&mut self) {
        self.last_state = None;
        self.last_progress = None;
    }

    /// Combined message if any of the four values differs from the last send.
    pub fn state_delta(&mut self, state: &ResourceState) -> Option<StateSync> {
        let current = StateSync::from(state);
        if self.last_state == Some(current) {
            return None;
        }
        self.last_state = Some(current);
        Some(current)
    }

    /// Progress message once progress has moved at least `deadband`.
    pub fn progress_delta(&mut self, state: &ResourceState, deadband: f32) -> Option<ProgressSync> {
        let progress = state.progress();
        let moved = match self.last_progress {
            Some(last) => (progress - last).abs() >= deadband,
            None => true,
        };
        if !moved {
            return None;
        }
        self.last_progress = Some(progress);
        Some(ProgressSync { progress })
    }

    /// Both checks in wire order.
    pub fn collect(&mut self, state: &ResourceState, deadband: f32) -> Vec<SyncMessage> {
        let mut out = Vec::new();
        if let Some(msg) = self.state_delta(state) {
            out.push(SyncMessage::State(msg));
        }
        if let Some(msg) = self.progress_delta(state, deadband) {
            out.push(SyncMessage::Progress(msg));
        }
        out
    }
}

impl Default for SyncShadow {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceState {
    /// Overwrite the mirrored values from a state message.
    pub fn apply_state_sync(&mut self, msg: &StateSync) {
        self.overwrite(msg.heat, msg.warmth, msg.food, msg.hydration);
    }

    pub fn apply_progress_sync(&mut self, msg: &ProgressSync) {
        self.set_progress(wrap_progress(msg.progress));
    }

    pub fn apply_sync(&mut self, msg: &SyncMessage) {
        match msg {
            SyncMessage::State(s) => self.apply_state_sync(s),
            SyncMessage::Progress(p) => self.apply_progress_sync(p),
        }
    }
}
