use serde::{Deserialize, Serialize};

use crate::game::engine::{MatchEngine, PendingRegistration};
use crate::game::match_state::MatchState;

/// The complete persisted form of a match in progress: the match state plus
/// any registration that was parked mid-flow, so a reloaded engine resumes
/// exactly where scoring stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    state: MatchState,
    pending: Option<PendingRegistration>,
}

impl MatchSnapshot {
    pub fn capture(engine: &MatchEngine) -> Self {
        Self {
            state: engine.state().clone(),
            pending: engine.pending(),
        }
    }

    pub fn restore(self) -> MatchEngine {
        MatchEngine::from_parts(self.state, self.pending)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
