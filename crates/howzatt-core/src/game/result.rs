use crate::game::engine::Flow;
use crate::game::match_state::{InningsNumber, MatchResult, MatchState, MatchWinner};
use crate::model::figures::BALLS_PER_OVER;
use crate::model::innings::WICKETS_PER_INNINGS;

/// Decide whether the match just ended. A no-op during the first innings
/// unless forced, and always a no-op once a result is on the board, so
/// re-evaluating after the match is over changes nothing.
pub(crate) fn evaluate(state: &mut MatchState, force: bool) -> Flow {
    if state.match_over() {
        return Flow::Continue;
    }
    if state.current_innings() == InningsNumber::First && !force {
        return Flow::Continue;
    }
    // Forced from the innings-1 close: no target exists yet, nothing to check.
    let Some(target) = state.target() else {
        return Flow::Continue;
    };

    let innings = state.current();
    let score = innings.score();
    let runs_needed = i64::from(target) - i64::from(score);
    let balls_remaining =
        (state.total_overs() * BALLS_PER_OVER).saturating_sub(innings.total_balls());
    let overs_finished = innings.overs_completed() >= state.total_overs();
    let all_out = innings.all_out();

    let (winner, description) = if score >= target {
        let winner = state.batting_side();
        let wickets_remaining = WICKETS_PER_INNINGS - innings.wickets();
        let mut description = format!(
            "{} won by {wickets_remaining} wicket(s)",
            state.batting_team()
        );
        if balls_remaining > 0 {
            description.push_str(&format!(" (with {balls_remaining} ball(s) remaining)"));
        }
        (MatchWinner::Team(winner), description)
    } else if overs_finished || all_out {
        if score == target - 1 {
            (MatchWinner::Tie, "Match Tied!".to_string())
        } else {
            // The side that batted first defended its total.
            let winner = state.batting_side().other();
            let description = format!(
                "{} won by {} run(s)",
                state.team_name(winner),
                runs_needed - 1
            );
            (MatchWinner::Team(winner), description)
        }
    } else {
        return Flow::Continue;
    };

    state
        .current_mut()
        .add_commentary(&format!("MATCH OVER: {description}"));
    tracing::info!(%description, "match decided");
    state.set_result(MatchResult {
        winner,
        description,
    });
    Flow::MatchEnded
}
