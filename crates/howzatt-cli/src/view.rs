use std::fmt::Write;

use howzatt_core::game::match_state::{InningsNumber, MatchState};
use howzatt_core::model::figures::{BALLS_PER_OVER, required_run_rate};
use howzatt_core::model::innings::Innings;

/// The between-balls view: score header, the pair at the crease, the bowler,
/// the over in progress and the last few commentary lines.
pub fn live(state: &MatchState) -> String {
    let innings = state.current();
    let mut out = String::new();

    let _ = write!(
        out,
        "{} {}/{} ({})",
        state.batting_team(),
        innings.score(),
        innings.wickets(),
        innings.overs_display()
    );
    match state.target() {
        None => {
            let _ = writeln!(out, " vs {}", state.bowling_team());
        }
        Some(target) => {
            let runs_needed = i64::from(target) - i64::from(innings.score());
            let balls_remaining =
                (state.total_overs() * BALLS_PER_OVER).saturating_sub(innings.total_balls());
            let _ = writeln!(
                out,
                " | Target {target} | CRR {:.2} | RRR {}",
                innings.run_rate(),
                required_run_rate(runs_needed, balls_remaining)
            );
        }
    }

    if let Some(striker) = state.striker() {
        let _ = writeln!(
            out,
            "  {}* {} ({}) SR {:.2}",
            striker.name(),
            striker.runs(),
            striker.balls(),
            striker.strike_rate()
        );
    }
    if let Some(non_striker) = state.non_striker() {
        let _ = writeln!(
            out,
            "  {} {} ({}) SR {:.2}",
            non_striker.name(),
            non_striker.runs(),
            non_striker.balls(),
            non_striker.strike_rate()
        );
    }
    if let Some(bowler) = state.bowler() {
        let _ = writeln!(
            out,
            "  {} {} - {}/{} Econ {:.2}",
            bowler.name(),
            bowler.overs_display(),
            bowler.runs_conceded(),
            bowler.wickets(),
            bowler.economy()
        );
    }
    if !innings.current_over_events().is_empty() {
        let _ = writeln!(
            out,
            "This over: {}",
            innings.current_over_events().join(" ")
        );
    }
    for line in innings.commentary().tail(5) {
        let _ = writeln!(out, "  {line}");
    }
    out
}

/// The full scorecard for both innings.
pub fn scorecard(state: &MatchState) -> String {
    let mut out = String::new();
    for number in [InningsNumber::First, InningsNumber::Second] {
        innings_card(&mut out, state.innings(number));
    }
    if let Some(result) = state.result() {
        let _ = writeln!(out, "Result: {}", result.description);
    }
    out
}

fn innings_card(out: &mut String, innings: &Innings) {
    let _ = writeln!(
        out,
        "{} - {}/{} ({} ov)",
        innings.team_name(),
        innings.score(),
        innings.wickets(),
        innings.overs_display()
    );
    if innings.batters().is_empty() {
        let _ = writeln!(out, "  Yet to bat.");
        let _ = writeln!(out);
        return;
    }

    for batter in innings.batters() {
        let dismissal = if batter.is_out() {
            batter.out_method()
        } else {
            "not out"
        };
        let _ = writeln!(
            out,
            "  {} {} {} ({}) SR {:.2}",
            batter.name(),
            dismissal,
            batter.runs(),
            batter.balls(),
            batter.strike_rate()
        );
    }
    let _ = writeln!(out, "  Extras: {}", innings.extras());
    let _ = writeln!(
        out,
        "  Total: {}/{} in {} overs (RR {:.2})",
        innings.score(),
        innings.wickets(),
        innings.overs_display(),
        innings.run_rate()
    );

    let bowled: Vec<_> = innings
        .bowlers()
        .iter()
        .filter(|b| b.legal_balls() > 0)
        .collect();
    if !bowled.is_empty() {
        let _ = writeln!(out, "  Bowling:");
        for bowler in bowled {
            let _ = writeln!(
                out,
                "    {} {} - {}/{} (M {}) Econ {:.2}",
                bowler.name(),
                bowler.overs_display(),
                bowler.runs_conceded(),
                bowler.wickets(),
                bowler.maidens(),
                bowler.economy()
            );
        }
    }

    if innings.fall_of_wickets().is_empty() {
        let _ = writeln!(out, "  No wickets fell.");
    } else {
        let falls: Vec<String> = innings
            .fall_of_wickets()
            .iter()
            .map(|fall| fall.summary())
            .collect();
        let _ = writeln!(out, "  Fall of wickets: {}", falls.join(", "));
    }
    let _ = writeln!(out);
}

/// One-paragraph match summary.
pub fn summary(state: &MatchState) -> String {
    let mut out = String::new();
    let first = state.innings(InningsNumber::First);
    let second = state.innings(InningsNumber::Second);
    let _ = writeln!(
        out,
        "{} {}/{} ({} ov) vs {} {}/{} ({} ov)",
        first.team_name(),
        first.score(),
        first.wickets(),
        first.overs_display(),
        second.team_name(),
        second.score(),
        second.wickets(),
        second.overs_display()
    );
    let _ = writeln!(
        out,
        "Toss: {} chose to {}",
        state.toss_winner(),
        state.toss_decision()
    );
    match state.result() {
        Some(result) => {
            let _ = writeln!(out, "Result: {}", result.description);
        }
        None => {
            let _ = writeln!(out, "Match in progress.");
        }
    }
    out
}
