use thiserror::Error;

use crate::game::input::InputProvider;
use crate::game::match_state::MatchState;
use crate::model::batter::BatterCard;
use crate::model::bowler::BowlerCard;
use crate::model::slot::BatterEnd;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("player name must not be empty")]
    EmptyName,
    #[error("`{0}` is already at the crease")]
    NameAtCrease(String),
    #[error("`{0}` cannot bowl consecutive overs")]
    ConsecutiveOvers(String),
}

/// Whether a registration flow ran to completion or the provider declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Registered {
    Done,
    Cancelled,
}

fn validate_batter_name(candidate: &str, at_crease: Option<&str>) -> Result<(), ValidationError> {
    if candidate.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if let Some(other) = at_crease {
        if other.eq_ignore_ascii_case(candidate) {
            return Err(ValidationError::NameAtCrease(other.to_string()));
        }
    }
    Ok(())
}

fn validate_bowler_name(candidate: &str, previous: Option<&str>) -> Result<(), ValidationError> {
    if candidate.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if let Some(prev) = previous {
        if prev.eq_ignore_ascii_case(candidate) {
            return Err(ValidationError::ConsecutiveOvers(prev.to_string()));
        }
    }
    Ok(())
}

/// Keep asking until the provider yields a name that passes `validate`, or
/// declines. Rejections are surfaced through `notify`, never kept.
fn prompt_until_valid(
    input: &mut dyn InputProvider,
    prompt: &str,
    validate: impl Fn(&str) -> Result<(), ValidationError>,
) -> Option<String> {
    loop {
        let name = input.request_name(prompt)?.trim().to_string();
        match validate(&name) {
            Ok(()) => return Some(name),
            Err(reason) => {
                tracing::warn!(%reason, candidate = %name, "rejected player name");
                input.notify(&reason.to_string());
            }
        }
    }
}

/// Register both openers and put them on slots 0/1. Nothing is mutated until
/// both names are in hand, so a cancellation anywhere leaves no trace.
pub(crate) fn opening_pair(state: &mut MatchState, input: &mut dyn InputProvider) -> Registered {
    let team = state.current().team_name().to_string();

    let prompt = format!("Opening batter 1 (striker) for {team}");
    let Some(striker) = prompt_until_valid(input, &prompt, |name| validate_batter_name(name, None))
    else {
        return Registered::Cancelled;
    };

    let prompt = format!("Opening batter 2 (non-striker) for {team}");
    let Some(non_striker) =
        prompt_until_valid(input, &prompt, |name| validate_batter_name(name, Some(&striker)))
    else {
        return Registered::Cancelled;
    };

    let innings = state.current_mut();
    let striker_index = innings.push_batter(BatterCard::new(striker.clone()));
    let non_striker_index = innings.push_batter(BatterCard::new(non_striker.clone()));
    innings.add_commentary(&format!(
        "{striker} and {non_striker} are opening the innings for {team}. {striker} is on strike."
    ));
    state.bind_striker(striker_index);
    state.bind_non_striker(non_striker_index);
    tracing::info!(%striker, %non_striker, %team, "opening pair registered");
    Registered::Done
}

/// Replacement after a dismissal. The new batter takes over whichever end the
/// dismissed batter held. Callers must have ruled out an all-out innings
/// before asking for a replacement.
pub(crate) fn replacement(
    state: &mut MatchState,
    input: &mut dyn InputProvider,
    end: BatterEnd,
) -> Registered {
    let team = state.current().team_name().to_string();
    let dismissed = state
        .batter_at(end)
        .map(|b| b.name().to_string())
        .unwrap_or_default();
    let surviving = state
        .batter_at(match end {
            BatterEnd::Striker => BatterEnd::NonStriker,
            BatterEnd::NonStriker => BatterEnd::Striker,
        })
        .map(|b| b.name().to_string());

    let prompt = format!("Next batter (replacing {dismissed}) for {team}");
    let Some(name) = prompt_until_valid(input, &prompt, |candidate| {
        validate_batter_name(candidate, surviving.as_deref())
    }) else {
        return Registered::Cancelled;
    };

    let innings = state.current_mut();
    let index = innings.push_batter(BatterCard::new(name.clone()));
    innings.add_commentary(&format!("{name} comes to the crease."));
    state.bind_end(end, index);
    tracing::info!(batter = %name, ?end, "replacement batter registered");
    Registered::Done
}

/// First bowler of an innings. No consecutive-over restriction applies yet.
pub(crate) fn opening_bowler(state: &mut MatchState, input: &mut dyn InputProvider) -> Registered {
    let team = state.bowling_team().to_string();
    let prompt = format!("Opening bowler for {team}");
    let Some(name) = prompt_until_valid(input, &prompt, |candidate| {
        validate_bowler_name(candidate, None)
    }) else {
        return Registered::Cancelled;
    };

    let index = bind_bowler_card(state, &name);
    state
        .current_mut()
        .add_commentary(&format!("{name} will open the bowling."));
    state.current_mut().start_fresh_over();
    tracing::info!(bowler = %name, %team, index, "opening bowler registered");
    Registered::Done
}

/// Bowler for the over about to start. Rejects the bowler who just finished;
/// any earlier name is reused so figures accumulate across spells.
pub(crate) fn next_bowler(state: &mut MatchState, input: &mut dyn InputProvider) -> Registered {
    let team = state.bowling_team().to_string();
    let previous = state.bowler().map(|b| b.name().to_string());

    let prompt = format!("Over complete. Next bowler for {team}");
    let Some(name) = prompt_until_valid(input, &prompt, |candidate| {
        validate_bowler_name(candidate, previous.as_deref())
    }) else {
        return Registered::Cancelled;
    };

    let index = bind_bowler_card(state, &name);
    state
        .current_mut()
        .add_commentary(&format!("{name} starts the new over."));
    state.current_mut().start_fresh_over();
    tracing::info!(bowler = %name, index, "new over bowler registered");
    Registered::Done
}

fn bind_bowler_card(state: &mut MatchState, name: &str) -> usize {
    let innings = state.current_mut();
    let index = innings
        .find_bowler(name)
        .unwrap_or_else(|| innings.push_bowler(BowlerCard::new(name)));
    state.bind_bowler(index);
    index
}

#[cfg(test)]
mod tests {
    use super::{Registered, ValidationError, validate_batter_name, validate_bowler_name};
    use crate::game::input::{Reply, Scripted};
    use crate::game::match_state::{MatchSetup, MatchState};
    use crate::model::slot::{BatterEnd, Slot};
    use crate::model::team::TossDecision;

    fn state() -> MatchState {
        MatchState::new(MatchSetup {
            team_a: "India".to_string(),
            team_b: "Australia".to_string(),
            total_overs: 2,
            toss_winner: "India".to_string(),
            toss_decision: TossDecision::Bat,
        })
        .unwrap()
    }

    #[test]
    fn batter_name_validation() {
        assert_eq!(validate_batter_name("", None), Err(ValidationError::EmptyName));
        assert_eq!(
            validate_batter_name("rohit", Some("Rohit")),
            Err(ValidationError::NameAtCrease("Rohit".to_string()))
        );
        assert_eq!(validate_batter_name("Gill", Some("Rohit")), Ok(()));
    }

    #[test]
    fn bowler_name_validation() {
        assert_eq!(
            validate_bowler_name("BUMRAH", Some("Bumrah")),
            Err(ValidationError::ConsecutiveOvers("Bumrah".to_string()))
        );
        assert_eq!(validate_bowler_name("Shami", Some("Bumrah")), Ok(()));
    }

    #[test]
    fn opening_pair_binds_slots_zero_and_one() {
        let mut state = state();
        let mut script = Scripted::new([Scripted::name("Rohit"), Scripted::name("Gill")]);
        assert_eq!(super::opening_pair(&mut state, &mut script), Registered::Done);
        assert_eq!(state.striker_slot(), Slot::bound(0));
        assert_eq!(state.non_striker_slot(), Slot::bound(1));
        assert_eq!(state.striker().unwrap().name(), "Rohit");
        assert!(
            state
                .current()
                .commentary()
                .last()
                .unwrap()
                .contains("Rohit is on strike")
        );
    }

    #[test]
    fn opening_pair_reprompts_on_duplicate_then_accepts() {
        let mut state = state();
        let mut script = Scripted::new([
            Scripted::name("Rohit"),
            Scripted::name("ROHIT"),
            Scripted::name("Gill"),
        ]);
        assert_eq!(super::opening_pair(&mut state, &mut script), Registered::Done);
        assert_eq!(state.current().batters().len(), 2);
        assert_eq!(script.notices().len(), 1);
    }

    #[test]
    fn cancelled_opening_pair_leaves_state_untouched() {
        let mut state = state();
        let mut script = Scripted::new([Scripted::name("Rohit"), Reply::Cancel]);
        assert_eq!(
            super::opening_pair(&mut state, &mut script),
            Registered::Cancelled
        );
        assert!(state.current().batters().is_empty());
        assert_eq!(state.striker_slot(), Slot::UNSET);
        assert!(state.current().commentary().is_empty());
    }

    #[test]
    fn next_bowler_rejects_consecutive_overs() {
        let mut state = state();
        let mut script = Scripted::new([Scripted::name("Bumrah")]);
        super::opening_bowler(&mut state, &mut script);

        let mut script = Scripted::new([Scripted::name("bumrah"), Scripted::name("Shami")]);
        assert_eq!(super::next_bowler(&mut state, &mut script), Registered::Done);
        assert_eq!(state.bowler().unwrap().name(), "Shami");
        assert_eq!(script.notices().len(), 1);
    }

    #[test]
    fn returning_bowler_reuses_their_card() {
        let mut state = state();
        let mut script = Scripted::new([Scripted::name("Bumrah")]);
        super::opening_bowler(&mut state, &mut script);
        state.bowler_mut().unwrap().concede(7);

        let mut script = Scripted::new([Scripted::name("Shami")]);
        super::next_bowler(&mut state, &mut script);
        let mut script = Scripted::new([Scripted::name("BUMRAH")]);
        super::next_bowler(&mut state, &mut script);

        assert_eq!(state.current().bowlers().len(), 2);
        assert_eq!(state.bowler().unwrap().name(), "Bumrah");
        assert_eq!(state.bowler().unwrap().runs_conceded(), 7);
    }

    #[test]
    fn replacement_rebinds_the_dismissed_end() {
        let mut state = state();
        let mut script = Scripted::new([Scripted::name("Rohit"), Scripted::name("Gill")]);
        super::opening_pair(&mut state, &mut script);
        state.striker_mut().unwrap().dismiss("Bowled");

        let mut script = Scripted::new([Scripted::name("Kohli")]);
        assert_eq!(
            super::replacement(&mut state, &mut script, BatterEnd::Striker),
            Registered::Done
        );
        assert_eq!(state.striker().unwrap().name(), "Kohli");
        assert_eq!(state.non_striker().unwrap().name(), "Gill");
        assert_eq!(state.current().batters().len(), 3);
    }

    #[test]
    fn replacement_rejects_the_surviving_batter_name() {
        let mut state = state();
        let mut script = Scripted::new([Scripted::name("Rohit"), Scripted::name("Gill")]);
        super::opening_pair(&mut state, &mut script);
        state.striker_mut().unwrap().dismiss("Bowled");

        let mut script = Scripted::new([Scripted::name("GILL"), Scripted::name("Kohli")]);
        super::replacement(&mut state, &mut script, BatterEnd::Striker);
        assert_eq!(state.striker().unwrap().name(), "Kohli");
        assert_eq!(script.notices().len(), 1);
    }
}
