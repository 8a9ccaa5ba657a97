use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use howzatt_core::game::engine::MatchEngine;
use howzatt_core::game::serialization::MatchSnapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading saved match at {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
}

/// Load the saved match, if any. A file that no longer parses is treated the
/// same as no file at all: the broken save is logged and discarded rather
/// than blocking every future command.
pub fn load(path: &Path) -> Result<Option<MatchEngine>, StoreError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    match MatchSnapshot::from_json(&json) {
        Ok(snapshot) => Ok(Some(snapshot.restore())),
        Err(err) => {
            tracing::warn!(%err, path = %path.display(), "discarding unreadable saved match");
            Ok(None)
        }
    }
}

/// Persist the match after an event. A failed write must not lose the
/// in-memory state mid-session, so it is logged and play continues.
pub fn save(path: &Path, engine: &MatchEngine) {
    let written = MatchSnapshot::capture(engine)
        .to_json()
        .map_err(io::Error::other)
        .and_then(|json| std::fs::write(path, json));
    if let Err(err) = written {
        tracing::warn!(%err, path = %path.display(), "failed to save match");
    }
}

pub fn reset(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::{load, reset, save};
    use howzatt_core::game::engine::MatchEngine;
    use howzatt_core::game::input::Scripted;
    use howzatt_core::game::match_state::MatchSetup;
    use howzatt_core::model::team::TossDecision;

    fn engine() -> MatchEngine {
        let mut engine = MatchEngine::new(MatchSetup {
            team_a: "India".to_string(),
            team_b: "Australia".to_string(),
            total_overs: 2,
            toss_winner: "India".to_string(),
            toss_decision: TossDecision::Bat,
        })
        .unwrap();
        let mut script = Scripted::new([
            Scripted::name("Rohit"),
            Scripted::name("Gill"),
            Scripted::name("Bumrah"),
        ]);
        engine.resume_registration(&mut script).unwrap();
        let mut script = Scripted::default();
        engine.score_runs(&mut script, 4).unwrap();
        engine
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        let engine = engine();
        save(&path, &engine);

        let loaded = load(&path).unwrap().unwrap();
        assert_eq!(loaded.state(), engine.state());
        assert_eq!(loaded.pending(), engine.pending());
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(&dir.path().join("absent.json")).unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        std::fs::write(&path, "{ not valid").unwrap();
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn failed_write_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("match.json");
        save(&path, &engine());
        assert!(load(&path).unwrap().is_none());
    }

    #[test]
    fn reset_reports_whether_a_save_existed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        assert!(!reset(&path).unwrap());
        save(&path, &engine());
        assert!(reset(&path).unwrap());
        assert!(load(&path).unwrap().is_none());
    }
}
