use serde::{Deserialize, Serialize};

use crate::model::figures;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterCard {
    name: String,
    runs: u32,
    balls: u32,
    fours: u32,
    sixes: u32,
    is_out: bool,
    out_method: String,
}

impl BatterCard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            out_method: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn runs(&self) -> u32 {
        self.runs
    }

    pub fn balls(&self) -> u32 {
        self.balls
    }

    pub fn fours(&self) -> u32 {
        self.fours
    }

    pub fn sixes(&self) -> u32 {
        self.sixes
    }

    pub fn is_out(&self) -> bool {
        self.is_out
    }

    /// Empty until the batter is dismissed.
    pub fn out_method(&self) -> &str {
        &self.out_method
    }

    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name.eq_ignore_ascii_case(candidate)
    }

    /// Credit runs scored off the bat; boundary counters move only on exactly
    /// four or six.
    pub fn add_runs(&mut self, runs: u32) {
        self.runs += runs;
        if runs == 4 {
            self.fours += 1;
        }
        if runs == 6 {
            self.sixes += 1;
        }
    }

    pub fn face_ball(&mut self) {
        self.balls += 1;
    }

    pub fn dismiss(&mut self, method: &str) {
        self.is_out = true;
        self.out_method = method.to_string();
    }

    pub fn strike_rate(&self) -> f64 {
        figures::strike_rate(self.runs, self.balls)
    }
}

#[cfg(test)]
mod tests {
    use super::BatterCard;

    #[test]
    fn new_batter_has_blank_figures() {
        let batter = BatterCard::new("Kohli");
        assert_eq!(batter.runs(), 0);
        assert_eq!(batter.balls(), 0);
        assert!(!batter.is_out());
        assert!(batter.out_method().is_empty());
    }

    #[test]
    fn boundaries_increment_their_counters_only() {
        let mut batter = BatterCard::new("Kohli");
        batter.add_runs(4);
        batter.add_runs(6);
        batter.add_runs(2);
        assert_eq!(batter.runs(), 12);
        assert_eq!(batter.fours(), 1);
        assert_eq!(batter.sixes(), 1);
    }

    #[test]
    fn dismissal_records_method() {
        let mut batter = BatterCard::new("Kohli");
        batter.dismiss("Caught");
        assert!(batter.is_out());
        assert_eq!(batter.out_method(), "Caught");
    }

    #[test]
    fn name_matching_ignores_case() {
        let batter = BatterCard::new("Kohli");
        assert!(batter.matches_name("KOHLI"));
        assert!(!batter.matches_name("Rohit"));
    }

    #[test]
    fn strike_rate_tracks_runs_per_hundred_balls() {
        let mut batter = BatterCard::new("Kohli");
        assert_eq!(batter.strike_rate(), 0.0);
        batter.add_runs(6);
        batter.face_ball();
        batter.face_ball();
        assert_eq!(format!("{:.2}", batter.strike_rate()), "300.00");
    }
}
