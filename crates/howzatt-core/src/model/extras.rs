use core::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extras {
    wides: u32,
    no_balls: u32,
    byes: u32,
    leg_byes: u32,
}

impl Extras {
    pub const fn new() -> Self {
        Self {
            wides: 0,
            no_balls: 0,
            byes: 0,
            leg_byes: 0,
        }
    }

    pub fn wides(&self) -> u32 {
        self.wides
    }

    pub fn no_balls(&self) -> u32 {
        self.no_balls
    }

    pub fn byes(&self) -> u32 {
        self.byes
    }

    pub fn leg_byes(&self) -> u32 {
        self.leg_byes
    }

    /// Always the sum of the four categories; never stored separately.
    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes
    }

    pub fn add_wide(&mut self) {
        self.wides += 1;
    }

    pub fn add_no_ball(&mut self) {
        self.no_balls += 1;
    }

    pub fn add_byes(&mut self, runs: u32) {
        self.byes += runs;
    }

    pub fn add_leg_byes(&mut self, runs: u32) {
        self.leg_byes += runs;
    }
}

impl fmt::Display for Extras {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Wd {}, Nb {}, B {}, Lb {})",
            self.total(),
            self.wides,
            self.no_balls,
            self.byes,
            self.leg_byes
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraKind {
    Wide,
    NoBall,
    Bye,
    LegBye,
}

impl ExtraKind {
    pub const fn label(self) -> &'static str {
        match self {
            ExtraKind::Wide => "Wide",
            ExtraKind::NoBall => "No Ball",
            ExtraKind::Bye => "Bye",
            ExtraKind::LegBye => "Leg Bye",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            ExtraKind::Wide => "Wd",
            ExtraKind::NoBall => "Nb",
            ExtraKind::Bye => "B",
            ExtraKind::LegBye => "Lb",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "wd" => Some(ExtraKind::Wide),
            "nb" => Some(ExtraKind::NoBall),
            "b" => Some(ExtraKind::Bye),
            "lb" => Some(ExtraKind::LegBye),
            _ => None,
        }
    }
}
