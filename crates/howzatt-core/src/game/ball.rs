use crate::game::engine::{Flow, PendingRegistration};
use crate::game::input::InputProvider;
use crate::game::match_state::MatchState;
use crate::game::overs;
use crate::game::result;
use crate::game::roster::{self, Registered};
use crate::model::slot::BatterEnd;
use crate::model::wicket::FallOfWicket;

/// One delivery, normalized: the event handlers translate runs, extras and
/// wickets into this shape and `process_ball` applies it.
///
/// `rotate_runs` drives odd-run strike rotation and is kept separate from the
/// scoring fields: byes rotate on the bye count while crediting the batter
/// nothing, and a no-ball never rotates no matter what was run.
#[derive(Debug, Clone)]
pub(crate) struct Delivery {
    pub legal: bool,
    pub batter_runs: u32,
    pub extra_runs: u32,
    pub rotate_runs: u32,
    pub wicket: Option<String>,
    pub label: String,
}

/// Apply a delivery to the innings, the bowler and the striker, then run the
/// follow-ups in order: wicket, strike rotation, over completion, result.
pub(crate) fn process_ball(
    state: &mut MatchState,
    input: &mut dyn InputProvider,
    delivery: Delivery,
) -> Flow {
    let total = delivery.batter_runs + delivery.extra_runs;
    {
        let innings = state.current_mut();
        innings.push_event(delivery.label.clone());
        innings.add_runs(total);
        if delivery.legal {
            innings.legal_ball();
        }
    }
    if let Some(bowler) = state.bowler_mut() {
        bowler.concede(total);
        if delivery.legal {
            bowler.ball_bowled();
        }
    }
    if let Some(striker) = state.striker_mut() {
        if delivery.batter_runs > 0 {
            striker.add_runs(delivery.batter_runs);
        }
        if delivery.legal {
            striker.face_ball();
        }
    }
    tracing::debug!(
        label = %delivery.label,
        legal = delivery.legal,
        runs = total,
        "delivery applied"
    );

    if let Some(method) = delivery.wicket.as_deref() {
        match striker_out(state, input, method) {
            Flow::Continue => {}
            other => return other,
        }
    }

    if delivery.rotate_runs % 2 == 1 {
        state.swap_strike();
        state.current_mut().add_commentary("Strike rotated.");
    }

    if delivery.legal && state.current().over_is_complete() {
        return overs::end_of_over(state, input);
    }
    result::evaluate(state, false)
}

/// Bowler-credited dismissal of the striker (caught, bowled, lbw, stumped).
/// The ball itself was already booked by `process_ball`.
fn striker_out(state: &mut MatchState, input: &mut dyn InputProvider, method: &str) -> Flow {
    let bowler_name = state
        .bowler()
        .map(|b| b.name().to_string())
        .unwrap_or_default();
    let Some((name, runs, balls)) = state
        .striker()
        .map(|s| (s.name().to_string(), s.runs(), s.balls()))
    else {
        return Flow::Continue;
    };

    state.current_mut().record_wicket();
    if let Some(bowler) = state.bowler_mut() {
        bowler.credit_wicket();
    }
    if let Some(striker) = state.striker_mut() {
        striker.dismiss(method);
    }
    state
        .current_mut()
        .add_commentary(&format!("WICKET! {name} {method} b {bowler_name} {runs}({balls})"));
    record_fall(state, &name, runs, balls);
    tracing::info!(batter = %name, %method, bowler = %bowler_name, "wicket");

    if state.current().all_out() {
        state
            .current_mut()
            .add_commentary(&format!("All out! Last wicket: {name}."));
        return overs::end_of_innings(state, input);
    }
    match roster::replacement(state, input, BatterEnd::Striker) {
        Registered::Done => Flow::Continue,
        Registered::Cancelled => Flow::Awaiting(PendingRegistration::Replacement {
            end: BatterEnd::Striker,
            completed_runs: 0,
        }),
    }
}

/// A run out at either end. The delivery counts as legal and the striker is
/// charged a ball faced, but the bowler is charged neither the completed runs
/// nor the wicket.
pub(crate) fn run_out(
    state: &mut MatchState,
    input: &mut dyn InputProvider,
    completed_runs: u8,
    end: BatterEnd,
) -> Flow {
    let Some(index) = state.slot_for(end).index() else {
        return Flow::Continue;
    };
    let Some(name) = state
        .current()
        .batter(index)
        .map(|b| b.name().to_string())
    else {
        return Flow::Continue;
    };

    if let Some(batter) = state.current_mut().batter_mut(index) {
        batter.dismiss("Run Out");
    }
    state.current_mut().record_wicket();
    // Logged before the ball is counted, so the prefix still reads the
    // delivery in progress.
    state.current_mut().add_commentary(&format!(
        "RUN OUT! {name} is run out attempting run {}.",
        u32::from(completed_runs) + 1
    ));

    {
        let innings = state.current_mut();
        innings.add_runs(u32::from(completed_runs));
        innings.legal_ball();
    }
    if let Some(bowler) = state.bowler_mut() {
        bowler.ball_bowled();
    }
    if let Some(striker) = state.striker_mut() {
        striker.face_ball();
    }
    state
        .current_mut()
        .push_event(format!("{completed_runs}RO"));

    let (runs, balls) = state
        .current()
        .batter(index)
        .map(|b| (b.runs(), b.balls()))
        .unwrap_or_default();
    record_fall(state, &name, runs, balls);
    tracing::info!(batter = %name, completed_runs, ?end, "run out");

    if state.current().all_out() {
        state
            .current_mut()
            .add_commentary(&format!("All out! Last wicket: {name}."));
        return overs::end_of_innings(state, input);
    }
    match roster::replacement(state, input, end) {
        Registered::Done => after_replacement(state, input, completed_runs),
        Registered::Cancelled => Flow::Awaiting(PendingRegistration::Replacement {
            end,
            completed_runs,
        }),
    }
}

/// Follow-ups still owed once a replacement batter is in: rotation for the
/// runs completed before the dismissal, then over completion, then the
/// result check. Also the re-entry point when a parked replacement resumes.
pub(crate) fn after_replacement(
    state: &mut MatchState,
    input: &mut dyn InputProvider,
    completed_runs: u8,
) -> Flow {
    if completed_runs % 2 == 1 {
        state.swap_strike();
        state.current_mut().add_commentary("Strike rotated.");
    }
    if state.current().over_is_complete() {
        return overs::end_of_over(state, input);
    }
    result::evaluate(state, false)
}

fn record_fall(state: &mut MatchState, name: &str, runs: u32, balls: u32) {
    let innings = state.current();
    let fall = FallOfWicket {
        score: innings.score(),
        wicket_number: innings.wickets(),
        batter_name: name.to_string(),
        batter_runs: runs,
        batter_balls: balls,
        over: innings.overs_completed(),
        ball: innings.balls_in_over(),
    };
    state.current_mut().record_fall(fall);
}
