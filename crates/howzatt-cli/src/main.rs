use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};

use howzatt_core::game::engine::{EventOutcome, MatchEngine};
use howzatt_core::game::input::InputProvider;
use howzatt_core::game::match_state::MatchSetup;
use howzatt_core::model::extras::ExtraKind;
use howzatt_core::model::team::TossDecision;

mod input;
mod logging;
mod store;
mod view;

use input::StdinInput;

/// Ball-by-ball scorer for limited-overs matches.
#[derive(Debug, Parser)]
#[command(name = "howzatt", author, version, about = "Ball-by-ball limited-overs match scorer")]
struct Cli {
    /// Path of the saved match file.
    #[arg(long, value_name = "FILE", default_value = "howzatt_match.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start a new match and register the opening players.
    New {
        team_a: String,
        team_b: String,
        /// Overs per innings.
        #[arg(long, default_value_t = 20)]
        overs: u32,
        /// Toss winner; defaults to the first team.
        #[arg(long, value_name = "TEAM")]
        toss_winner: Option<String>,
        /// What the toss winner chose: bat, field or bowl.
        #[arg(long, value_name = "CHOICE", default_value = "bat")]
        toss: String,
    },
    /// Record one delivery: 0-6 for runs, wd, nb, b, lb, w or ro.
    Score { event: String },
    /// Print the full scorecard.
    Scorecard,
    /// Print the match summary.
    Summary,
    /// Delete the saved match.
    Reset,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();
    match cli.command {
        Command::New {
            team_a,
            team_b,
            overs,
            toss_winner,
            toss,
        } => cmd_new(&cli.state, team_a, team_b, overs, toss_winner, &toss),
        Command::Score { event } => cmd_score(&cli.state, &event),
        Command::Scorecard => cmd_scorecard(&cli.state),
        Command::Summary => cmd_summary(&cli.state),
        Command::Reset => cmd_reset(&cli.state),
    }
}

fn cmd_new(
    path: &Path,
    team_a: String,
    team_b: String,
    overs: u32,
    toss_winner: Option<String>,
    toss: &str,
) -> anyhow::Result<()> {
    let toss_decision = TossDecision::from_str(toss)
        .with_context(|| format!("unknown toss choice `{toss}` (use bat, field or bowl)"))?;
    let setup = MatchSetup {
        toss_winner: toss_winner.unwrap_or_else(|| team_a.clone()),
        team_a,
        team_b,
        total_overs: overs,
        toss_decision,
    };
    let mut engine = MatchEngine::new(setup)?;

    let mut input = StdinInput;
    let outcome = engine.resume_registration(&mut input)?;
    store::save(path, &engine);
    report_outcome(&engine, outcome);
    print!("{}", view::live(engine.state()));
    Ok(())
}

fn cmd_score(path: &Path, event: &str) -> anyhow::Result<()> {
    let mut engine = load_match(path)?;
    let mut input = StdinInput;

    // A registration left over from a previous session (or a declined prompt)
    // must be completed before any delivery is accepted.
    if engine.pending().is_some() {
        let outcome = engine.resume_registration(&mut input)?;
        store::save(path, &engine);
        if let EventOutcome::AwaitingRegistration(kind) = outcome {
            bail!("registration of the {kind} is still required");
        }
    }

    let outcome = apply_event(&mut engine, &mut input, event)?;
    store::save(path, &engine);
    report_outcome(&engine, outcome);
    print!("{}", view::live(engine.state()));
    if let Some(result) = engine.state().result() {
        println!("Match over: {}", result.description);
    }
    Ok(())
}

fn apply_event(
    engine: &mut MatchEngine,
    input: &mut dyn InputProvider,
    event: &str,
) -> anyhow::Result<EventOutcome> {
    let event = event.trim().to_ascii_lowercase();
    if let Ok(runs) = event.parse::<u8>() {
        return Ok(engine.score_runs(input, runs)?);
    }
    if let Some(kind) = ExtraKind::from_code(&event) {
        return Ok(engine.score_extra(input, kind)?);
    }
    match event.as_str() {
        "w" => Ok(engine.score_wicket(input)?),
        "ro" => Ok(engine.score_run_out(input)?),
        other => bail!("unknown event `{other}` (use 0-6, wd, nb, b, lb, w or ro)"),
    }
}

fn report_outcome(engine: &MatchEngine, outcome: EventOutcome) {
    match outcome {
        EventOutcome::Cancelled => println!("Event cancelled; nothing recorded."),
        EventOutcome::AwaitingRegistration(kind) => {
            println!("Waiting on the {kind}; run `score` again to provide it.");
        }
        EventOutcome::OverComplete => {
            println!("Over complete. {} to bowl.", bowler_name(engine));
        }
        EventOutcome::InningsComplete => println!("Innings complete."),
        EventOutcome::Continue | EventOutcome::MatchComplete => {}
    }
}

fn bowler_name(engine: &MatchEngine) -> String {
    engine
        .state()
        .bowler()
        .map(|b| b.name().to_string())
        .unwrap_or_default()
}

fn cmd_scorecard(path: &Path) -> anyhow::Result<()> {
    let engine = load_match(path)?;
    print!("{}", view::scorecard(engine.state()));
    Ok(())
}

fn cmd_summary(path: &Path) -> anyhow::Result<()> {
    let engine = load_match(path)?;
    print!("{}", view::summary(engine.state()));
    Ok(())
}

fn cmd_reset(path: &Path) -> anyhow::Result<()> {
    if store::reset(path)? {
        println!("Saved match deleted.");
    } else {
        println!("No saved match to delete.");
    }
    Ok(())
}

fn load_match(path: &Path) -> anyhow::Result<MatchEngine> {
    store::load(path)?
        .with_context(|| format!("no saved match at {}; run `howzatt new` first", path.display()))
}
