use serde::{Deserialize, Serialize};

use crate::model::figures;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerCard {
    name: String,
    legal_balls: u32,
    maidens: u32,
    runs_conceded: u32,
    wickets: u32,
}

impl BowlerCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            legal_balls: 0,
            maidens: 0,
            runs_conceded: 0,
            wickets: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn legal_balls(&self) -> u32 {
        self.legal_balls
    }

    pub fn maidens(&self) -> u32 {
        self.maidens
    }

    pub fn runs_conceded(&self) -> u32 {
        self.runs_conceded
    }

    /// Wickets credited to the bowler. Run-outs are never credited here.
    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name.eq_ignore_ascii_case(candidate)
    }

    pub fn concede(&mut self, runs: u32) {
        self.runs_conceded += runs;
    }

    pub fn ball_bowled(&mut self) {
        self.legal_balls += 1;
    }

    pub fn credit_wicket(&mut self) {
        self.wickets += 1;
    }

    pub fn credit_maiden(&mut self) {
        self.maidens += 1;
    }

    pub fn overs_display(&self) -> String {
        figures::format_overs(self.legal_balls)
    }

    pub fn economy(&self) -> f64 {
        figures::economy(self.runs_conceded, self.legal_balls)
    }
}

#[cfg(test)]
mod tests {
    use super::BowlerCard;

    #[test]
    fn new_bowler_has_blank_figures() {
        let bowler = BowlerCard::new("Bumrah");
        assert_eq!(bowler.legal_balls(), 0);
        assert_eq!(bowler.maidens(), 0);
        assert_eq!(bowler.runs_conceded(), 0);
        assert_eq!(bowler.wickets(), 0);
        assert_eq!(bowler.economy(), 0.0);
    }

    #[test]
    fn figures_accumulate_across_deliveries() {
        let mut bowler = BowlerCard::new("Bumrah");
        for _ in 0..6 {
            bowler.ball_bowled();
        }
        bowler.concede(7);
        bowler.credit_wicket();
        assert_eq!(bowler.overs_display(), "1.0");
        assert_eq!(format!("{:.2}", bowler.economy()), "7.00");
        assert_eq!(bowler.wickets(), 1);
    }

    #[test]
    fn name_matching_ignores_case() {
        let bowler = BowlerCard::new("Bumrah");
        assert!(bowler.matches_name("bumrah"));
        assert!(!bowler.matches_name("Shami"));
    }
}
