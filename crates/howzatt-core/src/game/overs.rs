use crate::game::engine::{Flow, PendingRegistration};
use crate::game::input::InputProvider;
use crate::game::match_state::{InningsNumber, MatchState};
use crate::game::result;
use crate::game::roster::{self, Registered};

/// Close out a completed over: maiden detection reads the over tally that the
/// ball processor finished updating, so this must run after all bookkeeping.
pub(crate) fn end_of_over(state: &mut MatchState, input: &mut dyn InputProvider) -> Flow {
    state.current_mut().close_over();

    let over_runs = state.current().over_runs();
    let line = if over_runs == 0 {
        if let Some(bowler) = state.bowler_mut() {
            bowler.credit_maiden();
        }
        let figures = state
            .bowler()
            .map(|b| {
                format!(
                    "{} {} - {}/{}",
                    b.name(),
                    b.overs_display(),
                    b.runs_conceded(),
                    b.wickets()
                )
            })
            .unwrap_or_default();
        format!(
            "End of Over {}: Maiden! {figures}",
            state.current().overs_completed()
        )
    } else {
        let innings = state.current();
        format!(
            "End of Over {}: {over_runs} run(s). {} {}/{}",
            innings.overs_completed(),
            innings.team_name(),
            innings.score(),
            innings.wickets()
        )
    };
    state.current_mut().add_commentary(&line);
    tracing::info!(
        over = state.current().overs_completed(),
        runs = over_runs,
        maiden = over_runs == 0,
        "over complete"
    );

    if state.current().overs_completed() >= state.total_overs() {
        return end_of_innings(state, input);
    }

    // End-of-over rotation happens regardless of what the last ball scored.
    state.swap_strike();
    match roster::next_bowler(state, input) {
        Registered::Done => Flow::OverEnded,
        Registered::Cancelled => Flow::Awaiting(PendingRegistration::NextBowler),
    }
}

pub(crate) fn end_of_innings(state: &mut MatchState, input: &mut dyn InputProvider) -> Flow {
    let number = state.current_innings();
    let line = {
        let innings = state.current();
        format!(
            "End of Innings {number}. {} finish at {}/{} after {} overs.",
            innings.team_name(),
            innings.score(),
            innings.wickets(),
            innings.overs_display()
        )
    };
    state.current_mut().add_commentary(&line);
    tracing::info!(
        innings = number.ordinal(),
        score = state.current().score(),
        wickets = state.current().wickets(),
        "innings complete"
    );

    match number {
        InningsNumber::First => {
            state.begin_second_innings();
            match open_innings(state, input) {
                Flow::Continue => Flow::InningsEnded,
                other => other,
            }
        }
        // A second-innings close must always produce a result.
        InningsNumber::Second => result::evaluate(state, true),
    }
}

/// Register openers and the first bowler, at match start and at the innings
/// break alike. Cancellation parks the flow at whichever step was declined.
pub(crate) fn open_innings(state: &mut MatchState, input: &mut dyn InputProvider) -> Flow {
    match roster::opening_pair(state, input) {
        Registered::Done => open_innings_bowler(state, input),
        Registered::Cancelled => Flow::Awaiting(PendingRegistration::OpeningPair),
    }
}

pub(crate) fn open_innings_bowler(
    state: &mut MatchState,
    input: &mut dyn InputProvider,
) -> Flow {
    match roster::opening_bowler(state, input) {
        Registered::Done => {}
        Registered::Cancelled => return Flow::Awaiting(PendingRegistration::OpeningBowler),
    }

    if state.current_innings() == InningsNumber::Second {
        if let Some(target) = state.target() {
            let line = format!(
                "{} require {target} runs to win from {} overs.",
                state.batting_team(),
                state.total_overs()
            );
            state.current_mut().add_commentary(&line);
        }
    }
    Flow::Continue
}
