//! Per-frame outputs of the engine.
//!
//! Field values are mutated in place on the objects; outputs only carry the
//! discrete playback signals raised while stepping, for drivers and tooling.

use serde::{Deserialize, Serialize};

use crate::ids::{AnimId, ObjectId};

/// Discrete signals emitted during `advance`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// First frame of playback (the scheduler left `Idle`).
    PlaybackStarted { records: usize },
    /// An object became renderable because `anim` targeted it.
    ObjectActivated { object: ObjectId, anim: AnimId },
    /// The active record reached its duration; the cursor moved on.
    RecordFinished { anim: AnimId, time: f32 },
    /// The last record finished.
    PlaybackCompleted { time: f32 },
}

/// Outputs returned by `Engine::advance()`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: CoreEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Objects that became visible this frame.
    pub fn activated(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.events.iter().filter_map(|e| match e {
            CoreEvent::ObjectActivated { object, .. } => Some(*object),
            _ => None,
        })
    }

    pub fn completed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, CoreEvent::PlaybackCompleted { .. }))
    }
}
