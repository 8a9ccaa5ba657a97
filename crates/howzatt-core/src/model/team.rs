use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub const fn other(self) -> TeamSide {
        match self {
            TeamSide::A => TeamSide::B,
            TeamSide::B => TeamSide::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TossDecision {
    Bat,
    Field,
}

impl TossDecision {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "bat" => Some(TossDecision::Bat),
            "field" | "bowl" => Some(TossDecision::Field),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            TossDecision::Bat => "Bat",
            TossDecision::Field => "Field",
        }
    }
}

impl fmt::Display for TossDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
