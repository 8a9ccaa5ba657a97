use std::collections::VecDeque;

use crate::model::slot::BatterEnd;

/// Collaborator the engine asks for names and counts it cannot derive itself
/// (replacement batters, bowlers, runs on a no-ball, run-out details).
///
/// `None` means the provider declined. For input requested before any state
/// is mutated the triggering event is simply abandoned; for a registration
/// requested after a ball was booked, the engine parks the registration and
/// rejects scoring until it is retried.
pub trait InputProvider {
    fn request_name(&mut self, prompt: &str) -> Option<String>;

    /// A count in `min..=max`. Implementations may clamp; the engine clamps
    /// again before use.
    fn request_runs(&mut self, prompt: &str, min: u8, max: u8) -> Option<u8>;

    fn request_out_batter(&mut self, prompt: &str) -> Option<BatterEnd>;

    /// Rejection messages surfaced to whoever is entering names.
    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Name(String),
    Runs(u8),
    OutBatter(BatterEnd),
    Cancel,
}

/// Queue-backed provider for drivers that know the answers up front: replays,
/// scripted scoring sessions, and tests. A missing or mismatched reply counts
/// as a cancellation.
#[derive(Debug, Default)]
pub struct Scripted {
    replies: VecDeque<Reply>,
    notices: Vec<String>,
}

impl Scripted {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            notices: Vec::new(),
        }
    }

    pub fn name(value: &str) -> Reply {
        Reply::Name(value.to_string())
    }

    pub fn push(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    pub fn is_exhausted(&self) -> bool {
        self.replies.is_empty()
    }

    pub fn notices(&self) -> &[String] {
        &self.notices
    }
}

impl InputProvider for Scripted {
    fn request_name(&mut self, _prompt: &str) -> Option<String> {
        match self.replies.pop_front() {
            Some(Reply::Name(name)) => Some(name),
            _ => None,
        }
    }

    fn request_runs(&mut self, _prompt: &str, min: u8, max: u8) -> Option<u8> {
        match self.replies.pop_front() {
            Some(Reply::Runs(runs)) => Some(runs.clamp(min, max)),
            _ => None,
        }
    }

    fn request_out_batter(&mut self, _prompt: &str) -> Option<BatterEnd> {
        match self.replies.pop_front() {
            Some(Reply::OutBatter(end)) => Some(end),
            _ => None,
        }
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}
