use serde::{Deserialize, Serialize};

/// Snapshot taken at the moment a wicket falls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub score: u32,
    pub wicket_number: u32,
    pub batter_name: String,
    pub batter_runs: u32,
    pub batter_balls: u32,
    pub over: u32,
    pub ball: u32,
}

impl FallOfWicket {
    /// The conventional `over.ball` marker, e.g. "4.2".
    pub fn at_over(&self) -> String {
        format!("{}.{}", self.over, self.ball)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}/{} ({}, {} ov)",
            self.score,
            self.wicket_number,
            self.batter_name,
            self.at_over()
        )
    }
}
