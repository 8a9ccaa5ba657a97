use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::ball::{self, Delivery};
use crate::game::input::InputProvider;
use crate::game::match_state::{MatchSetup, MatchState, SetupError};
use crate::game::overs;
use crate::game::roster::{self, Registered};
use crate::model::extras::ExtraKind;
use crate::model::slot::BatterEnd;

/// Internal control flow threaded through the ball processor, the over
/// controller and the result evaluator. The engine folds it into an
/// [`EventOutcome`] at the public boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    OverEnded,
    InningsEnded,
    MatchEnded,
    Awaiting(PendingRegistration),
}

/// A registration the input provider declined mid-flow. The match state up to
/// that point is already committed; the engine parks this and refuses scoring
/// events until [`MatchEngine::resume_registration`] completes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingRegistration {
    OpeningPair,
    OpeningBowler,
    Replacement { end: BatterEnd, completed_runs: u8 },
    NextBowler,
}

impl PendingRegistration {
    pub const fn kind(self) -> PendingKind {
        match self {
            PendingRegistration::OpeningPair => PendingKind::OpeningPair,
            PendingRegistration::OpeningBowler => PendingKind::OpeningBowler,
            PendingRegistration::Replacement { .. } => PendingKind::Replacement,
            PendingRegistration::NextBowler => PendingKind::NextBowler,
        }
    }
}

/// What a pending registration is waiting for, without its continuation data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingKind {
    OpeningPair,
    OpeningBowler,
    Replacement,
    NextBowler,
}

impl PendingKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            PendingKind::OpeningPair => "opening pair",
            PendingKind::OpeningBowler => "opening bowler",
            PendingKind::Replacement => "replacement batter",
            PendingKind::NextBowler => "next bowler",
        }
    }
}

impl core::fmt::Display for PendingKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("the match is over; no further events are accepted")]
    MatchOver,
    #[error("registration of the {0} is pending; complete it before scoring")]
    RegistrationPending(PendingKind),
    #[error("no striker is at the crease")]
    NoStriker,
    #[error("no non-striker is at the crease")]
    NoNonStriker,
    #[error("no bowler is marked for the current over")]
    NoBowler,
    #[error("runs off the bat must be 0-6, got {0}")]
    InvalidRuns(u8),
    #[error("`{0}` is already out")]
    BatterAlreadyOut(String),
}

/// What an accepted scoring event led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Continue,
    OverComplete,
    InningsComplete,
    MatchComplete,
    /// The provider declined input requested before anything was mutated;
    /// the event was abandoned with no effect.
    Cancelled,
    /// The event itself is committed but a follow-up registration was
    /// declined; scoring is locked until it is resumed.
    AwaitingRegistration(PendingKind),
}

/// The scoring engine for one match. Owns the match state and accepts one
/// event at a time; every mutation goes through here.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    state: MatchState,
    pending: Option<PendingRegistration>,
}

impl MatchEngine {
    /// A fresh engine starts with the opening pair still to be registered;
    /// call [`resume_registration`](Self::resume_registration) to bring the
    /// players in before the first ball.
    pub fn new(setup: MatchSetup) -> Result<Self, SetupError> {
        Ok(Self {
            state: MatchState::new(setup)?,
            pending: Some(PendingRegistration::OpeningPair),
        })
    }

    pub(crate) fn from_parts(state: MatchState, pending: Option<PendingRegistration>) -> Self {
        Self { state, pending }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn pending(&self) -> Option<PendingRegistration> {
        self.pending
    }

    /// True when the next scoring event would be accepted.
    pub fn is_ready(&self) -> bool {
        !self.state.match_over() && self.pending.is_none() && self.state.players_bound()
    }

    fn ensure_ready(&self) -> Result<(), EngineError> {
        if self.state.match_over() {
            return Err(EngineError::MatchOver);
        }
        if let Some(pending) = self.pending {
            return Err(EngineError::RegistrationPending(pending.kind()));
        }
        if self.state.striker().is_none() {
            return Err(EngineError::NoStriker);
        }
        if self.state.non_striker().is_none() {
            return Err(EngineError::NoNonStriker);
        }
        if self.state.bowler().is_none() {
            return Err(EngineError::NoBowler);
        }
        Ok(())
    }

    fn striker_name(&self) -> Result<String, EngineError> {
        self.state
            .striker()
            .map(|s| s.name().to_string())
            .ok_or(EngineError::NoStriker)
    }

    fn bowler_name(&self) -> Result<String, EngineError> {
        self.state
            .bowler()
            .map(|b| b.name().to_string())
            .ok_or(EngineError::NoBowler)
    }

    fn absorb(&mut self, flow: Flow) -> EventOutcome {
        match flow {
            Flow::Continue => EventOutcome::Continue,
            Flow::OverEnded => EventOutcome::OverComplete,
            Flow::InningsEnded => EventOutcome::InningsComplete,
            Flow::MatchEnded => EventOutcome::MatchComplete,
            Flow::Awaiting(pending) => {
                self.pending = Some(pending);
                tracing::warn!(kind = %pending.kind(), "registration parked");
                EventOutcome::AwaitingRegistration(pending.kind())
            }
        }
    }

    /// Complete (or retry) whatever registration is outstanding. A provider
    /// that declines again simply leaves the registration parked.
    pub fn resume_registration(
        &mut self,
        input: &mut dyn InputProvider,
    ) -> Result<EventOutcome, EngineError> {
        if self.state.match_over() {
            return Err(EngineError::MatchOver);
        }
        let Some(pending) = self.pending.take() else {
            return Ok(EventOutcome::Continue);
        };
        let flow = match pending {
            PendingRegistration::OpeningPair => overs::open_innings(&mut self.state, input),
            PendingRegistration::OpeningBowler => {
                overs::open_innings_bowler(&mut self.state, input)
            }
            PendingRegistration::Replacement {
                end,
                completed_runs,
            } => match roster::replacement(&mut self.state, input, end) {
                Registered::Done => ball::after_replacement(&mut self.state, input, completed_runs),
                Registered::Cancelled => Flow::Awaiting(pending),
            },
            PendingRegistration::NextBowler => match roster::next_bowler(&mut self.state, input) {
                Registered::Done => Flow::OverEnded,
                Registered::Cancelled => Flow::Awaiting(pending),
            },
        };
        Ok(self.absorb(flow))
    }

    /// Runs off the bat on a legal delivery, 0 through 6.
    pub fn score_runs(
        &mut self,
        input: &mut dyn InputProvider,
        runs: u8,
    ) -> Result<EventOutcome, EngineError> {
        self.ensure_ready()?;
        if runs > 6 {
            return Err(EngineError::InvalidRuns(runs));
        }
        let striker = self.striker_name()?;
        self.state
            .current_mut()
            .add_commentary(&format!("{runs} run(s) scored by {striker}."));
        let delivery = Delivery {
            legal: true,
            batter_runs: u32::from(runs),
            extra_runs: 0,
            rotate_runs: u32::from(runs),
            wicket: None,
            label: runs.to_string(),
        };
        let flow = ball::process_ball(&mut self.state, input, delivery);
        Ok(self.absorb(flow))
    }

    /// A wide, no-ball, bye or leg-bye. No-balls ask the provider for runs
    /// off the bat, byes and leg-byes for the runs taken; declining either
    /// abandons the event untouched.
    pub fn score_extra(
        &mut self,
        input: &mut dyn InputProvider,
        kind: ExtraKind,
    ) -> Result<EventOutcome, EngineError> {
        self.ensure_ready()?;
        let bowler = self.bowler_name()?;

        let delivery = match kind {
            ExtraKind::Wide => {
                self.state.current_mut().extras_mut().add_wide();
                self.state
                    .current_mut()
                    .add_commentary(&format!("Wide bowled by {bowler}."));
                Delivery {
                    legal: false,
                    batter_runs: 0,
                    extra_runs: 1,
                    rotate_runs: 0,
                    wicket: None,
                    label: "Wd".to_string(),
                }
            }
            ExtraKind::NoBall => {
                let Some(bat_runs) =
                    input.request_runs("Runs scored off the bat on the no ball (0-6)", 0, 6)
                else {
                    return Ok(EventOutcome::Cancelled);
                };
                let bat_runs = bat_runs.min(6);
                self.state.current_mut().extras_mut().add_no_ball();
                let mut commentary = format!("No Ball bowled by {bowler}.");
                let mut label = "Nb".to_string();
                if bat_runs > 0 {
                    commentary.push_str(&format!(" {bat_runs} run(s) scored."));
                    label.push_str(&format!("+{bat_runs}"));
                }
                commentary.push_str(" Free hit next ball!");
                self.state.current_mut().add_commentary(&commentary);
                Delivery {
                    legal: false,
                    batter_runs: u32::from(bat_runs),
                    extra_runs: 1,
                    rotate_runs: 0,
                    wicket: None,
                    label,
                }
            }
            ExtraKind::Bye | ExtraKind::LegBye => {
                let prompt = format!("How many {}s? (1-4)", kind.label());
                let Some(runs) = input.request_runs(&prompt, 1, 4) else {
                    return Ok(EventOutcome::Cancelled);
                };
                let runs = u32::from(runs.clamp(1, 4));
                let extras = self.state.current_mut().extras_mut();
                match kind {
                    ExtraKind::Bye => extras.add_byes(runs),
                    _ => extras.add_leg_byes(runs),
                }
                self.state
                    .current_mut()
                    .add_commentary(&format!("{runs} {}(s).", kind.label()));
                Delivery {
                    legal: true,
                    batter_runs: 0,
                    extra_runs: runs,
                    rotate_runs: runs,
                    wicket: None,
                    label: format!("{runs}{}", kind.code()),
                }
            }
        };
        let flow = ball::process_ball(&mut self.state, input, delivery);
        Ok(self.absorb(flow))
    }

    /// A bowler-credited dismissal of the striker. The provider supplies the
    /// method (caught, bowled, lbw, stumped); a blank or declined reply
    /// abandons the event.
    pub fn score_wicket(
        &mut self,
        input: &mut dyn InputProvider,
    ) -> Result<EventOutcome, EngineError> {
        self.ensure_ready()?;
        let Some(method) = input.request_name("Wicket method (Caught, Bowled, LBW, Stumped)")
        else {
            return Ok(EventOutcome::Cancelled);
        };
        let method = method.trim().to_string();
        if method.is_empty() {
            return Ok(EventOutcome::Cancelled);
        }
        let delivery = Delivery {
            legal: true,
            batter_runs: 0,
            extra_runs: 0,
            rotate_runs: 0,
            wicket: Some(method),
            label: "W".to_string(),
        };
        let flow = ball::process_ball(&mut self.state, input, delivery);
        Ok(self.absorb(flow))
    }

    /// A run out at either end, with the runs completed before the dismissal
    /// counted to the total.
    pub fn score_run_out(
        &mut self,
        input: &mut dyn InputProvider,
    ) -> Result<EventOutcome, EngineError> {
        self.ensure_ready()?;
        let Some(completed) = input.request_runs("Runs completed before the run out (0-4)", 0, 4)
        else {
            return Ok(EventOutcome::Cancelled);
        };
        let completed = completed.min(4);
        let Some(end) = input.request_out_batter("Who was run out? (striker/non-striker)") else {
            return Ok(EventOutcome::Cancelled);
        };
        if let Some(batter) = self.state.batter_at(end) {
            if batter.is_out() {
                return Err(EngineError::BatterAlreadyOut(batter.name().to_string()));
            }
        }
        let flow = ball::run_out(&mut self.state, input, completed, end);
        Ok(self.absorb(flow))
    }
}
