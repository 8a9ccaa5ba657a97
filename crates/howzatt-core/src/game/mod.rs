pub(crate) mod ball;
pub mod engine;
pub mod input;
pub mod match_state;
pub(crate) mod overs;
pub(crate) mod result;
pub mod roster;
pub mod serialization;

pub use engine::{EngineError, EventOutcome, MatchEngine, PendingKind, PendingRegistration};
pub use input::{InputProvider, Reply, Scripted};
pub use match_state::{
    InningsNumber, MatchResult, MatchSetup, MatchState, MatchWinner, SetupError,
};
pub use serialization::MatchSnapshot;
