use howzatt_core::game::engine::{EngineError, EventOutcome, MatchEngine};
use howzatt_core::game::input::{Reply, Scripted};
use howzatt_core::game::match_state::{InningsNumber, MatchSetup, MatchWinner};
use howzatt_core::game::serialization::MatchSnapshot;
use howzatt_core::model::extras::ExtraKind;
use howzatt_core::model::innings::Innings;
use howzatt_core::model::slot::BatterEnd;
use howzatt_core::model::team::{TeamSide, TossDecision};

fn setup(total_overs: u32) -> MatchSetup {
    MatchSetup {
        team_a: "India".to_string(),
        team_b: "Australia".to_string(),
        total_overs,
        toss_winner: "India".to_string(),
        toss_decision: TossDecision::Bat,
    }
}

fn engine_with_openers(total_overs: u32) -> MatchEngine {
    let mut engine = MatchEngine::new(setup(total_overs)).unwrap();
    let mut script = Scripted::new([
        Scripted::name("Rohit"),
        Scripted::name("Gill"),
        Scripted::name("Bumrah"),
    ]);
    assert_eq!(
        engine.resume_registration(&mut script).unwrap(),
        EventOutcome::Continue
    );
    engine
}

fn dot_ball(engine: &mut MatchEngine) -> EventOutcome {
    let mut script = Scripted::default();
    engine.score_runs(&mut script, 0).unwrap()
}

fn tallied_runs(innings: &Innings) -> u32 {
    innings.batter_runs_total() + innings.extras().total()
}

#[test]
fn two_over_match_with_a_successful_chase() {
    let mut engine = engine_with_openers(2);
    let mut quiet = Scripted::default();

    // First over: 1, 4, 1, 6, W, 1.
    engine.score_runs(&mut quiet, 1).unwrap();
    engine.score_runs(&mut quiet, 4).unwrap();
    engine.score_runs(&mut quiet, 1).unwrap();
    engine.score_runs(&mut quiet, 6).unwrap();
    let mut script = Scripted::new([Scripted::name("Caught"), Scripted::name("Kohli")]);
    assert_eq!(
        engine.score_wicket(&mut script).unwrap(),
        EventOutcome::Continue
    );
    let mut script = Scripted::new([Scripted::name("Shami")]);
    assert_eq!(
        engine.score_runs(&mut script, 1).unwrap(),
        EventOutcome::OverComplete
    );

    {
        let innings = engine.state().current();
        assert_eq!(innings.score(), 13);
        assert_eq!(innings.wickets(), 1);
        assert_eq!(innings.overs_completed(), 1);
        assert_eq!(
            innings.fall_of_wickets()[0].summary(),
            "12/1 (Rohit, 0.5 ov)"
        );
        assert!(
            innings
                .commentary()
                .iter()
                .any(|line| line.contains("WICKET! Rohit Caught b Bumrah 7(3)"))
        );
        // Rohit faced balls 1, 4 and 5 of the over.
        let rohit = &innings.batters()[0];
        assert_eq!((rohit.runs(), rohit.balls()), (7, 3));
        assert_eq!(tallied_runs(innings), innings.score());
    }

    // Second over: a Shami maiden closes the innings.
    for _ in 0..5 {
        assert_eq!(dot_ball(&mut engine), EventOutcome::Continue);
    }
    let mut script = Scripted::new([
        Scripted::name("Warner"),
        Scripted::name("Smith"),
        Scripted::name("Starc"),
    ]);
    assert_eq!(
        engine.score_runs(&mut script, 0).unwrap(),
        EventOutcome::InningsComplete
    );

    assert_eq!(engine.state().current_innings(), InningsNumber::Second);
    assert_eq!(engine.state().target(), Some(14));
    assert_eq!(engine.state().batting_team(), "Australia");
    {
        let first = engine.state().innings(InningsNumber::First);
        assert_eq!(first.overs_display(), "2.0");
        assert!(
            first
                .bowlers()
                .iter()
                .any(|b| b.name() == "Shami" && b.maidens() == 1)
        );
        assert!(
            first
                .commentary()
                .iter()
                .any(|line| line.contains("End of Innings 1. India finish at 13/1 after 2.0 overs."))
        );
    }
    assert!(
        engine
            .state()
            .current()
            .commentary()
            .iter()
            .any(|line| line.contains("Australia require 14 runs to win from 2 overs."))
    );

    // The chase: two sixes, then the winning runs come with a run out.
    engine.score_runs(&mut quiet, 6).unwrap();
    engine.score_runs(&mut quiet, 6).unwrap();
    let mut script = Scripted::new([
        Reply::Runs(2),
        Reply::OutBatter(BatterEnd::Striker),
        Scripted::name("Labuschagne"),
    ]);
    assert_eq!(
        engine.score_run_out(&mut script).unwrap(),
        EventOutcome::MatchComplete
    );

    let result = engine.state().result().unwrap();
    assert_eq!(result.winner, MatchWinner::Team(TeamSide::B));
    assert_eq!(
        result.description,
        "Australia won by 9 wicket(s) (with 9 ball(s) remaining)"
    );
    assert_eq!(engine.state().winner_name(), Some("Australia"));
    assert!(
        engine
            .state()
            .current()
            .commentary()
            .iter()
            .any(|line| line
                .contains("MATCH OVER: Australia won by 9 wicket(s) (with 9 ball(s) remaining)"))
    );

    // Nothing is accepted after the result.
    assert_eq!(
        engine.score_runs(&mut quiet, 1),
        Err(EngineError::MatchOver)
    );
}

#[test]
fn chase_falling_one_short_ties_the_match() {
    let mut engine = engine_with_openers(1);
    let mut quiet = Scripted::default();

    for _ in 0..5 {
        engine.score_runs(&mut quiet, 1).unwrap();
    }
    let mut script = Scripted::new([
        Scripted::name("Warner"),
        Scripted::name("Smith"),
        Scripted::name("Starc"),
    ]);
    assert_eq!(
        engine.score_runs(&mut script, 1).unwrap(),
        EventOutcome::InningsComplete
    );
    assert_eq!(engine.state().target(), Some(7));

    for _ in 0..5 {
        engine.score_runs(&mut quiet, 1).unwrap();
    }
    assert_eq!(
        engine.score_runs(&mut quiet, 1).unwrap(),
        EventOutcome::MatchComplete
    );

    let result = engine.state().result().unwrap();
    assert_eq!(result.winner, MatchWinner::Tie);
    assert_eq!(result.description, "Match Tied!");
    assert_eq!(engine.state().winner_name(), Some("Tie"));
    for number in [InningsNumber::First, InningsNumber::Second] {
        let innings = engine.state().innings(number);
        assert_eq!(tallied_runs(innings), innings.score());
    }
}

#[test]
fn defending_side_wins_by_runs() {
    let mut engine = engine_with_openers(1);
    let mut quiet = Scripted::default();

    engine.score_runs(&mut quiet, 6).unwrap();
    for _ in 0..4 {
        dot_ball(&mut engine);
    }
    let mut script = Scripted::new([
        Scripted::name("Warner"),
        Scripted::name("Smith"),
        Scripted::name("Starc"),
    ]);
    engine.score_runs(&mut script, 0).unwrap();

    engine.score_runs(&mut quiet, 1).unwrap();
    for _ in 0..4 {
        dot_ball(&mut engine);
    }
    assert_eq!(dot_ball(&mut engine), EventOutcome::MatchComplete);

    let result = engine.state().result().unwrap();
    assert_eq!(result.winner, MatchWinner::Team(TeamSide::A));
    assert_eq!(result.description, "India won by 5 run(s)");
}

#[test]
fn all_out_mid_over_closes_the_innings_without_a_replacement() {
    let mut engine = engine_with_openers(2);

    // Six wickets in the first over, the sixth followed by the over change.
    for wicket in 0..6 {
        let mut replies = vec![
            Scripted::name("Bowled"),
            Scripted::name(&format!("Batter{wicket}")),
        ];
        if wicket == 5 {
            replies.push(Scripted::name("Shami"));
        }
        let mut script = Scripted::new(replies);
        let expected = if wicket == 5 {
            EventOutcome::OverComplete
        } else {
            EventOutcome::Continue
        };
        assert_eq!(engine.score_wicket(&mut script).unwrap(), expected);
    }

    // Three more with replacements, then the tenth ends it: no replacement
    // prompt, straight into the second innings.
    for wicket in 6..9 {
        let mut script = Scripted::new([
            Scripted::name("Bowled"),
            Scripted::name(&format!("Batter{wicket}")),
        ]);
        assert_eq!(
            engine.score_wicket(&mut script).unwrap(),
            EventOutcome::Continue
        );
    }
    let mut script = Scripted::new([
        Scripted::name("Bowled"),
        Scripted::name("Warner"),
        Scripted::name("Smith"),
        Scripted::name("Starc"),
    ]);
    assert_eq!(
        engine.score_wicket(&mut script).unwrap(),
        EventOutcome::InningsComplete
    );

    let first = engine.state().innings(InningsNumber::First);
    assert_eq!(first.wickets(), 10);
    assert_eq!(first.batters().len(), 11);
    assert_eq!(first.fall_of_wickets().len(), 10);
    assert_eq!(first.fall_of_wickets()[9].at_over(), "1.4");
    assert_eq!(first.overs_display(), "1.4");
    assert!(
        first
            .commentary()
            .iter()
            .any(|line| line.contains("All out!"))
    );
    assert_eq!(engine.state().target(), Some(1));
    assert_eq!(engine.state().current_innings(), InningsNumber::Second);
}

#[test]
fn illegal_deliveries_do_not_consume_balls() {
    let mut engine = engine_with_openers(2);

    let mut quiet = Scripted::default();
    engine.score_extra(&mut quiet, ExtraKind::Wide).unwrap();
    let mut script = Scripted::new([Reply::Runs(2)]);
    engine.score_extra(&mut script, ExtraKind::NoBall).unwrap();
    let mut script = Scripted::new([Reply::Runs(2)]);
    engine.score_extra(&mut script, ExtraKind::Bye).unwrap();

    {
        let innings = engine.state().current();
        // Wide 1 + no-ball penalty 1 + bat runs 2 + byes 2.
        assert_eq!(innings.score(), 6);
        assert_eq!(innings.balls_in_over(), 1);
        assert_eq!(innings.extras().total(), 4);
        assert_eq!(innings.current_over_events(), ["Wd", "Nb+2", "2B"]);
    }

    // Five more legal balls finish the over despite the two illegal ones.
    for _ in 0..4 {
        assert_eq!(dot_ball(&mut engine), EventOutcome::Continue);
    }
    let mut script = Scripted::new([Scripted::name("Shami")]);
    assert_eq!(
        engine.score_runs(&mut script, 0).unwrap(),
        EventOutcome::OverComplete
    );
    let innings = engine.state().current();
    assert_eq!(innings.overs_completed(), 1);
    assert_eq!(tallied_runs(innings), innings.score());
    assert_eq!(
        innings.bowlers()[0].runs_conceded(),
        6,
        "extras are charged to the bowler"
    );
}

#[test]
fn strike_rotation_parity_over_a_sequence() {
    let mut engine = engine_with_openers(2);
    let mut quiet = Scripted::default();

    // Three odd scores in 1, 1, 4, 2, 1 mean three swaps: Rohit, Gill and
    // back, ending with Gill on strike.
    for runs in [1, 1, 4, 2] {
        engine.score_runs(&mut quiet, runs).unwrap();
    }
    assert_eq!(engine.state().striker().unwrap().name(), "Rohit");
    engine.score_runs(&mut quiet, 1).unwrap();
    assert_eq!(engine.state().striker().unwrap().name(), "Gill");
}

#[test]
fn snapshot_resumes_an_interrupted_match() {
    let mut engine = engine_with_openers(2);
    let mut quiet = Scripted::default();
    engine.score_runs(&mut quiet, 4).unwrap();
    engine.score_runs(&mut quiet, 1).unwrap();

    let json = MatchSnapshot::capture(&engine).to_json().unwrap();
    let mut revived = MatchSnapshot::from_json(&json).unwrap().restore();

    assert_eq!(revived.state(), engine.state());
    assert!(revived.is_ready());
    revived.score_runs(&mut quiet, 6).unwrap();
    assert_eq!(revived.state().current().score(), 11);
    assert_eq!(revived.state().striker().unwrap().name(), "Gill");
}
