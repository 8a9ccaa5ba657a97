use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

const MAX_LINES: usize = 100;

/// Append-only per-innings trace. Oldest lines are evicted once the cap is
/// reached so a long innings cannot grow the log without bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentaryLog {
    lines: VecDeque<String>,
}

impl CommentaryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: String) {
        self.lines.push_back(line);
        while self.lines.len() > MAX_LINES {
            self.lines.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// The most recent `count` lines, oldest first.
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.lines.len().saturating_sub(count);
        self.lines.iter().skip(skip).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.lines.back().map(String::as_str)
    }
}
