//! Time-to-goal scoring with break/wrap cross-compensation.
//!
//! Break and wrap-up share one overhead budget: an agent who ran over
//! on wrap but left break allowance unused (or vice versa) has the
//! overage offset against the slack before any penalty is charged.
//! All arithmetic stays at full f64 precision; rounding belongs to the
//! display layer so aggregated sums stay exact.

use serde::{Deserialize, Serialize};

use crate::policy::PolicyThresholds;

/// Signed distance from the connected-time goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Positive = ahead of goal, negative = behind.
    pub time_to_goal: f64,
    /// True when a mismatch penalty moved the score.
    pub adjusted: bool,
}

/// Combined break+wrap penalty after cross-compensation.
///
/// Never exceeds the raw `excess_break + excess_wrap`; the offsets only
/// ever shrink it.
pub fn overhead_penalty(break_time: f64, wrap_time: f64, thresholds: &PolicyThresholds) -> f64 {
    let excess_break = (break_time - thresholds.break_limit).max(0.0);
    let excess_wrap = (wrap_time - thresholds.wrap_limit).max(0.0);
    let slack_break = (thresholds.break_limit - break_time).max(0.0);
    let slack_wrap = (thresholds.wrap_limit - wrap_time).max(0.0);

    // One offset in each direction, applied once.
    let wrap_offset = excess_wrap.min(slack_break);
    let break_offset = excess_break.min(slack_wrap);

    (excess_break - break_offset) + (excess_wrap - wrap_offset)
}

/// Score one shift against its thresholds.
///
/// `connected` here is plain hours: callers substitute 0.0 for a
/// missing connected duration (the missingness has already been
/// surfaced by the consistency check by then).
pub fn score(
    connected: f64,
    break_time: f64,
    wrap_time: f64,
    mismatch_penalty: f64,
    thresholds: &PolicyThresholds,
) -> ScoreResult {
    let total_penalty = overhead_penalty(break_time, wrap_time, thresholds);
    ScoreResult {
        time_to_goal: connected - thresholds.connected_goal - total_penalty - mismatch_penalty,
        adjusted: mismatch_penalty > 0.0,
    }
}
