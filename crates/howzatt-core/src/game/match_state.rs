use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::batter::BatterCard;
use crate::model::bowler::BowlerCard;
use crate::model::innings::Innings;
use crate::model::slot::{BatterEnd, Slot};
use crate::model::team::{TeamSide, TossDecision};

/// Everything the setup form collects before the first ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSetup {
    pub team_a: String,
    pub team_b: String,
    pub total_overs: u32,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("team names must not be empty")]
    EmptyTeamName,
    #[error("team names must be different")]
    DuplicateTeamNames,
    #[error("total overs must be at least 1")]
    ZeroOvers,
    #[error("toss winner `{0}` is not one of the competing teams")]
    UnknownTossWinner(String),
}

impl MatchSetup {
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.team_a.trim().is_empty() || self.team_b.trim().is_empty() {
            return Err(SetupError::EmptyTeamName);
        }
        if self.team_a.eq_ignore_ascii_case(&self.team_b) {
            return Err(SetupError::DuplicateTeamNames);
        }
        if self.total_overs == 0 {
            return Err(SetupError::ZeroOvers);
        }
        if !self.toss_winner.eq_ignore_ascii_case(&self.team_a)
            && !self.toss_winner.eq_ignore_ascii_case(&self.team_b)
        {
            return Err(SetupError::UnknownTossWinner(self.toss_winner.clone()));
        }
        Ok(())
    }

    /// Which side bats first, per the toss.
    fn first_batting_side(&self) -> TeamSide {
        let winner_side = if self.toss_winner.eq_ignore_ascii_case(&self.team_a) {
            TeamSide::A
        } else {
            TeamSide::B
        };
        match self.toss_decision {
            TossDecision::Bat => winner_side,
            TossDecision::Field => winner_side.other(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InningsNumber {
    First,
    Second,
}

impl InningsNumber {
    pub const fn index(self) -> usize {
        match self {
            InningsNumber::First => 0,
            InningsNumber::Second => 1,
        }
    }

    pub const fn ordinal(self) -> u32 {
        match self {
            InningsNumber::First => 1,
            InningsNumber::Second => 2,
        }
    }
}

impl fmt::Display for InningsNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ordinal())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchWinner {
    Team(TeamSide),
    Tie,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner: MatchWinner,
    pub description: String,
}

/// The authoritative state of one match. Mutated in place by every accepted
/// event; frozen once a result is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    team_a: String,
    team_b: String,
    total_overs: u32,
    toss_winner: String,
    toss_decision: TossDecision,
    current_innings: InningsNumber,
    batting_side: TeamSide,
    innings: [Innings; 2],
    target: Option<u32>,
    result: Option<MatchResult>,
    striker: Slot,
    non_striker: Slot,
    bowler: Slot,
}

impl MatchState {
    pub fn new(setup: MatchSetup) -> Result<Self, SetupError> {
        setup.validate()?;
        let batting_side = setup.first_batting_side();
        let (first, second) = match batting_side {
            TeamSide::A => (setup.team_a.clone(), setup.team_b.clone()),
            TeamSide::B => (setup.team_b.clone(), setup.team_a.clone()),
        };
        Ok(Self {
            team_a: setup.team_a,
            team_b: setup.team_b,
            total_overs: setup.total_overs,
            toss_winner: setup.toss_winner,
            toss_decision: setup.toss_decision,
            current_innings: InningsNumber::First,
            batting_side,
            innings: [Innings::new(first), Innings::new(second)],
            target: None,
            result: None,
            striker: Slot::UNSET,
            non_striker: Slot::UNSET,
            bowler: Slot::UNSET,
        })
    }

    pub fn team_name(&self, side: TeamSide) -> &str {
        match side {
            TeamSide::A => &self.team_a,
            TeamSide::B => &self.team_b,
        }
    }

    pub fn batting_side(&self) -> TeamSide {
        self.batting_side
    }

    pub fn batting_team(&self) -> &str {
        self.team_name(self.batting_side)
    }

    pub fn bowling_team(&self) -> &str {
        self.team_name(self.batting_side.other())
    }

    pub fn total_overs(&self) -> u32 {
        self.total_overs
    }

    pub fn toss_winner(&self) -> &str {
        &self.toss_winner
    }

    pub fn toss_decision(&self) -> TossDecision {
        self.toss_decision
    }

    pub fn current_innings(&self) -> InningsNumber {
        self.current_innings
    }

    pub fn innings(&self, number: InningsNumber) -> &Innings {
        &self.innings[number.index()]
    }

    pub fn current(&self) -> &Innings {
        &self.innings[self.current_innings.index()]
    }

    pub fn current_mut(&mut self) -> &mut Innings {
        &mut self.innings[self.current_innings.index()]
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    pub fn result(&self) -> Option<&MatchResult> {
        self.result.as_ref()
    }

    pub fn match_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn winner_name(&self) -> Option<&str> {
        self.result.as_ref().map(|r| match r.winner {
            MatchWinner::Team(side) => self.team_name(side),
            MatchWinner::Tie => "Tie",
        })
    }

    /// Terminal transition: no further scoring events are accepted after this.
    pub fn set_result(&mut self, result: MatchResult) {
        if self.result.is_none() {
            self.result = Some(result);
        }
    }

    pub fn striker_slot(&self) -> Slot {
        self.striker
    }

    pub fn non_striker_slot(&self) -> Slot {
        self.non_striker
    }

    pub fn bowler_slot(&self) -> Slot {
        self.bowler
    }

    pub fn slot_for(&self, end: BatterEnd) -> Slot {
        match end {
            BatterEnd::Striker => self.striker,
            BatterEnd::NonStriker => self.non_striker,
        }
    }

    pub fn striker(&self) -> Option<&BatterCard> {
        self.striker.index().and_then(|i| self.current().batter(i))
    }

    pub fn non_striker(&self) -> Option<&BatterCard> {
        self.non_striker
            .index()
            .and_then(|i| self.current().batter(i))
    }

    pub fn batter_at(&self, end: BatterEnd) -> Option<&BatterCard> {
        self.slot_for(end)
            .index()
            .and_then(|i| self.current().batter(i))
    }

    pub fn bowler(&self) -> Option<&BowlerCard> {
        self.bowler.index().and_then(|i| self.current().bowler(i))
    }

    pub fn striker_mut(&mut self) -> Option<&mut BatterCard> {
        let index = self.striker.index()?;
        self.current_mut().batter_mut(index)
    }

    pub fn bowler_mut(&mut self) -> Option<&mut BowlerCard> {
        let index = self.bowler.index()?;
        self.current_mut().bowler_mut(index)
    }

    pub fn bind_striker(&mut self, index: usize) {
        self.striker = Slot::bound(index);
    }

    pub fn bind_non_striker(&mut self, index: usize) {
        self.non_striker = Slot::bound(index);
    }

    pub fn bind_end(&mut self, end: BatterEnd, index: usize) {
        match end {
            BatterEnd::Striker => self.bind_striker(index),
            BatterEnd::NonStriker => self.bind_non_striker(index),
        }
    }

    pub fn bind_bowler(&mut self, index: usize) {
        self.bowler = Slot::bound(index);
    }

    pub fn swap_strike(&mut self) {
        core::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    pub fn players_bound(&self) -> bool {
        !self.striker.is_unset() && !self.non_striker.is_unset() && !self.bowler.is_unset()
    }

    /// Innings break: fix the target, swap the sides, unbind every slot.
    /// The second innings record was created empty at match start.
    pub fn begin_second_innings(&mut self) {
        self.target = Some(self.innings[0].score() + 1);
        self.current_innings = InningsNumber::Second;
        self.batting_side = self.batting_side.other();
        self.striker = Slot::UNSET;
        self.non_striker = Slot::UNSET;
        self.bowler = Slot::UNSET;
    }
}
