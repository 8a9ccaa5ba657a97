use core::fmt;

pub const BALLS_PER_OVER: u32 = 6;

/// Overs display in the conventional `overs.balls` form, e.g. 14 balls → "2.2".
pub fn format_overs(total_balls: u32) -> String {
    format!(
        "{}.{}",
        total_balls / BALLS_PER_OVER,
        total_balls % BALLS_PER_OVER
    )
}

pub fn economy(runs_conceded: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    f64::from(runs_conceded) / f64::from(legal_balls) * 6.0
}

pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    f64::from(runs) / f64::from(balls) * 100.0
}

pub fn current_run_rate(score: u32, total_balls: u32) -> f64 {
    if total_balls == 0 {
        return 0.0;
    }
    f64::from(score) / (f64::from(total_balls) / 6.0)
}

/// Required run rate during a chase. `Unbounded` marks the degenerate case
/// where runs are still needed but no balls remain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequiredRate {
    Rate(f64),
    Unbounded,
}

impl fmt::Display for RequiredRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredRate::Rate(rate) => write!(f, "{rate:.2}"),
            RequiredRate::Unbounded => f.write_str("∞"),
        }
    }
}

pub fn required_run_rate(runs_needed: i64, balls_remaining: u32) -> RequiredRate {
    if runs_needed <= 0 {
        return RequiredRate::Rate(0.0);
    }
    if balls_remaining == 0 {
        return RequiredRate::Unbounded;
    }
    RequiredRate::Rate(runs_needed as f64 / f64::from(balls_remaining) * 6.0)
}
