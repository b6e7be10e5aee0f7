//! Cross-validation of reported connected time against the shift span.
//!
//! The dialer reports connected time on its own clock; the first-call
//! and shift-end stamps bound what was physically possible. Connected
//! time exceeding the wall-clock span by any amount is flagged —
//! zero tolerance, no grace band.
//!
//! A malformed row must never abort the batch: every failure path
//! degrades to a missing-data result with a trace string.

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::duration::{format_hms, DurationValue};

/// Outcome class of the consistency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MismatchStatus {
    /// Connected time fits inside the shift span.
    #[serde(rename = "ok")]
    Ok,
    /// An endpoint or the connected duration was absent/unparseable.
    /// Needs attention; not the same as a clean pass.
    #[serde(rename = "missing-data")]
    MissingData,
    /// Connected time exceeds the physically possible span.
    #[serde(rename = "flagged")]
    Flagged,
}

/// Result of checking one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MismatchResult {
    pub status: MismatchStatus,
    /// Hours of excess, >= 0. Feeds straight into the score penalty.
    pub penalty: f64,
    /// Unsigned HH:MM:SS of the excess, present only when flagged.
    /// Display layers prepend the "+".
    pub excess_hms: Option<String>,
    /// Operator-facing trace line (agent, reported vs possible).
    pub detail: String,
}

impl MismatchResult {
    fn ok(detail: String) -> Self {
        Self {
            status: MismatchStatus::Ok,
            penalty: 0.0,
            excess_hms: None,
            detail,
        }
    }

    fn missing(detail: String) -> Self {
        Self {
            status: MismatchStatus::MissingData,
            penalty: 0.0,
            excess_hms: None,
            detail,
        }
    }

    fn flagged(excess: f64, detail: String) -> Self {
        Self {
            status: MismatchStatus::Flagged,
            penalty: excess,
            excess_hms: Some(format_hms(excess)),
            detail,
        }
    }
}

/// Parse a wall-clock cell like "Apr 3 6:45AM" into a time-of-day.
///
/// Takes the last whitespace token, so date prefixes are tolerated.
pub fn parse_wall_clock(cell: &str) -> Option<NaiveTime> {
    let token = cell.split_whitespace().next_back()?;
    NaiveTime::parse_from_str(&token.to_uppercase(), "%I:%M%p").ok()
}

/// Rebuild a summed total row's result from an already-summed penalty.
pub fn from_penalty(penalty: f64, agent: &str) -> MismatchResult {
    if penalty > 0.0 {
        MismatchResult::flagged(penalty, format!("{agent} | summed excess {penalty:.2}h"))
    } else {
        MismatchResult::ok(format!("{agent} | totals consistent"))
    }
}

/// Check one record's reported connected time against its shift span.
///
/// Shift-end earlier in the day than first-call means the shift crossed
/// midnight; the span wraps forward a day.
pub fn check_shift(
    first_call: Option<&str>,
    shift_end: Option<&str>,
    connected: DurationValue,
    agent: &str,
) -> MismatchResult {
    let start = first_call.and_then(parse_wall_clock);
    let end = shift_end.and_then(parse_wall_clock);

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) => (s, e),
        (None, _) => {
            return MismatchResult::missing(format!(
                "{agent} | first-call missing or unparseable: {:?}",
                first_call.unwrap_or("")
            ));
        }
        (_, None) => {
            return MismatchResult::missing(format!(
                "{agent} | shift-end missing or unparseable: {:?}",
                shift_end.unwrap_or("")
            ));
        }
    };

    let mut span = end.signed_duration_since(start);
    if span < Duration::zero() {
        span = span + Duration::hours(24);
    }
    let max_possible = span.num_seconds() as f64 / 3600.0;

    let Some(connected) = connected.hours() else {
        return MismatchResult::missing(format!("{agent} | connected time not reported"));
    };

    let excess = connected - max_possible;
    let detail = format!(
        "{agent} | TC: {connected:.2} | Max: {max_possible:.2} | Diff: {excess:.2}"
    );

    if excess > 0.0 {
        MismatchResult::flagged(excess, detail)
    } else {
        MismatchResult::ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_clock_parsing() {
        let t = parse_wall_clock("Apr 3 6:45AM").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(6, 45, 0).unwrap());
        let t = parse_wall_clock("2:00PM").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(14, 0, 0).unwrap());
        let t = parse_wall_clock("11:05pm").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(23, 5, 0).unwrap());
        assert!(parse_wall_clock("not a time").is_none());
        assert!(parse_wall_clock("").is_none());
    }

    #[test]
    fn test_flagged_excess() {
        // 8h span, 8.5h reported -> 0.5h over.
        let r = check_shift(
            Some("6:00AM"),
            Some("2:00PM"),
            DurationValue::Hours(8.5),
            "n lopez",
        );
        assert_eq!(r.status, MismatchStatus::Flagged);
        assert!((r.penalty - 0.5).abs() < 1e-9);
        assert_eq!(r.excess_hms.as_deref(), Some("00:30:00"));
    }

    #[test]
    fn test_ok_within_span() {
        let r = check_shift(
            Some("6:00AM"),
            Some("2:00PM"),
            DurationValue::Hours(7.9),
            "n lopez",
        );
        assert_eq!(r.status, MismatchStatus::Ok);
        assert_eq!(r.penalty, 0.0);
        assert_eq!(r.excess_hms, None);
    }

    #[test]
    fn test_zero_tolerance() {
        // Even a one-minute overage flags; there is no grace band.
        let r = check_shift(
            Some("6:00AM"),
            Some("2:00PM"),
            DurationValue::Hours(8.0 + 1.0 / 60.0),
            "n lopez",
        );
        assert_eq!(r.status, MismatchStatus::Flagged);
        assert_eq!(r.excess_hms.as_deref(), Some("00:01:00"));
    }

    #[test]
    fn test_overnight_wraparound() {
        // 11PM -> 7AM is an 8h span, not negative.
        let r = check_shift(
            Some("11:00PM"),
            Some("7:00AM"),
            DurationValue::Hours(8.0),
            "g okafor",
        );
        assert_eq!(r.status, MismatchStatus::Ok);

        let r = check_shift(
            Some("11:00PM"),
            Some("7:00AM"),
            DurationValue::Hours(9.0),
            "g okafor",
        );
        assert_eq!(r.status, MismatchStatus::Flagged);
        assert_eq!(r.excess_hms.as_deref(), Some("01:00:00"));
    }

    #[test]
    fn test_missing_endpoints_fail_open() {
        let r = check_shift(None, Some("2:00PM"), DurationValue::Hours(8.0), "x");
        assert_eq!(r.status, MismatchStatus::MissingData);
        assert_eq!(r.penalty, 0.0);
        assert!(r.detail.contains("first-call"));

        let r = check_shift(Some("6:00AM"), Some("garbage"), DurationValue::Hours(8.0), "x");
        assert_eq!(r.status, MismatchStatus::MissingData);
        assert!(r.detail.contains("shift-end"));
    }

    #[test]
    fn test_missing_connected_is_an_anomaly() {
        let r = check_shift(Some("6:00AM"), Some("2:00PM"), DurationValue::Missing, "x");
        assert_eq!(r.status, MismatchStatus::MissingData);
        assert_eq!(r.penalty, 0.0);
        assert!(r.detail.contains("connected time not reported"));
    }

    #[test]
    fn test_from_penalty() {
        let r = from_penalty(0.75, "n lopez");
        assert_eq!(r.status, MismatchStatus::Flagged);
        assert_eq!(r.excess_hms.as_deref(), Some("00:45:00"));

        let r = from_penalty(0.0, "n lopez");
        assert_eq!(r.status, MismatchStatus::Ok);
    }
}
