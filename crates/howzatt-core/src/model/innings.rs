use serde::{Deserialize, Serialize};

use crate::model::batter::BatterCard;
use crate::model::bowler::BowlerCard;
use crate::model::commentary::CommentaryLog;
use crate::model::extras::Extras;
use crate::model::figures::{self, BALLS_PER_OVER};
use crate::model::wicket::FallOfWicket;

pub const WICKETS_PER_INNINGS: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Innings {
    team_name: String,
    score: u32,
    wickets: u32,
    overs_completed: u32,
    balls_in_over: u32,
    over_runs: u32,
    over_wickets: u32,
    extras: Extras,
    batters: Vec<BatterCard>,
    bowlers: Vec<BowlerCard>,
    current_over_events: Vec<String>,
    fall_of_wickets: Vec<FallOfWicket>,
    commentary: CommentaryLog,
}

impl Innings {
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            score: 0,
            wickets: 0,
            overs_completed: 0,
            balls_in_over: 0,
            over_runs: 0,
            over_wickets: 0,
            extras: Extras::new(),
            batters: Vec::new(),
            bowlers: Vec::new(),
            current_over_events: Vec::new(),
            fall_of_wickets: Vec::new(),
            commentary: CommentaryLog::new(),
        }
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn wickets(&self) -> u32 {
        self.wickets
    }

    pub fn overs_completed(&self) -> u32 {
        self.overs_completed
    }

    pub fn balls_in_over(&self) -> u32 {
        self.balls_in_over
    }

    /// Runs conceded in the over in progress. Read by maiden detection.
    pub fn over_runs(&self) -> u32 {
        self.over_runs
    }

    pub fn over_wickets(&self) -> u32 {
        self.over_wickets
    }

    pub fn extras(&self) -> &Extras {
        &self.extras
    }

    pub fn extras_mut(&mut self) -> &mut Extras {
        &mut self.extras
    }

    pub fn batters(&self) -> &[BatterCard] {
        &self.batters
    }

    pub fn bowlers(&self) -> &[BowlerCard] {
        &self.bowlers
    }

    pub fn batter(&self, index: usize) -> Option<&BatterCard> {
        self.batters.get(index)
    }

    pub fn batter_mut(&mut self, index: usize) -> Option<&mut BatterCard> {
        self.batters.get_mut(index)
    }

    pub fn bowler(&self, index: usize) -> Option<&BowlerCard> {
        self.bowlers.get(index)
    }

    pub fn bowler_mut(&mut self, index: usize) -> Option<&mut BowlerCard> {
        self.bowlers.get_mut(index)
    }

    pub fn push_batter(&mut self, batter: BatterCard) -> usize {
        self.batters.push(batter);
        self.batters.len() - 1
    }

    pub fn push_bowler(&mut self, bowler: BowlerCard) -> usize {
        self.bowlers.push(bowler);
        self.bowlers.len() - 1
    }

    /// A bowler returning for a later spell keeps accumulating on the same
    /// card, looked up case-insensitively.
    pub fn find_bowler(&self, name: &str) -> Option<usize> {
        self.bowlers.iter().position(|b| b.matches_name(name))
    }

    pub fn current_over_events(&self) -> &[String] {
        &self.current_over_events
    }

    pub fn push_event(&mut self, label: String) {
        self.current_over_events.push(label);
    }

    pub fn fall_of_wickets(&self) -> &[FallOfWicket] {
        &self.fall_of_wickets
    }

    pub fn record_fall(&mut self, fall: FallOfWicket) {
        self.fall_of_wickets.push(fall);
    }

    pub fn commentary(&self) -> &CommentaryLog {
        &self.commentary
    }

    pub fn add_runs(&mut self, runs: u32) {
        self.score += runs;
        self.over_runs += runs;
    }

    pub fn legal_ball(&mut self) {
        self.balls_in_over += 1;
    }

    pub fn record_wicket(&mut self) {
        self.wickets += 1;
        self.over_wickets += 1;
    }

    pub fn all_out(&self) -> bool {
        self.wickets >= WICKETS_PER_INNINGS
    }

    pub fn over_is_complete(&self) -> bool {
        self.balls_in_over >= BALLS_PER_OVER
    }

    /// Close the over counter: bump completed overs, reset the ball count.
    /// The over tallies and event list stay until the next bowler takes over.
    pub fn close_over(&mut self) {
        self.overs_completed += 1;
        self.balls_in_over = 0;
    }

    /// Reset per-over tallies and the event list for a fresh over.
    pub fn start_fresh_over(&mut self) {
        self.over_runs = 0;
        self.over_wickets = 0;
        self.current_over_events.clear();
    }

    pub fn total_balls(&self) -> u32 {
        self.overs_completed * BALLS_PER_OVER + self.balls_in_over
    }

    pub fn overs_display(&self) -> String {
        figures::format_overs(self.total_balls())
    }

    pub fn run_rate(&self) -> f64 {
        figures::current_run_rate(self.score, self.total_balls())
    }

    /// Sum of individual batter scores; `score - batter_runs_total()` is the
    /// extras total by invariant.
    pub fn batter_runs_total(&self) -> u32 {
        self.batters.iter().map(BatterCard::runs).sum()
    }

    /// Ball number used to prefix commentary. Right after an over closes the
    /// counter reads 0 while the over's events are still listed, so the line
    /// belongs to ball 6 of the over just bowled; a bare 0 means a fresh over
    /// is about to start at ball 1.
    fn commentary_ball(&self) -> u32 {
        if self.balls_in_over == 0 {
            if self.current_over_events.is_empty() { 1 } else { 6 }
        } else {
            self.balls_in_over
        }
    }

    pub fn add_commentary(&mut self, text: &str) {
        let line = format!(
            "{}.{}: {text}",
            self.overs_completed,
            self.commentary_ball()
        );
        self.commentary.push(line);
    }
}
