//! Per-day goal thresholds and the modifiers layered on top of them.
//!
//! Thresholds are a pure function of (weekday, office, agent id): a base
//! tuple per day bucket, then office / allow-list / premium-prefix
//! modifiers in a fixed order. Nothing is cached — resolution is cheap
//! and recomputed per record.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::office::{classify, OfficeGroup};

/// Day-of-week bucket driving the base threshold lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayBucket {
    /// Mon-Thu full schedule.
    Weekday,
    Friday,
    Saturday,
    Sunday,
}

impl DayBucket {
    pub fn from_date(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Mon | Weekday::Tue | Weekday::Wed | Weekday::Thu => DayBucket::Weekday,
            Weekday::Fri => DayBucket::Friday,
            Weekday::Sat => DayBucket::Saturday,
            Weekday::Sun => DayBucket::Sunday,
        }
    }
}

/// Resolved goal thresholds for one (date, agent) pair.
///
/// All durations in decimal hours. `talk_goal` is `None` when the day
/// carries no talk-time requirement at all (Sunday) — callers must not
/// read that as a zero goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyThresholds {
    pub bucket: DayBucket,
    pub connected_goal: f64,
    pub break_limit: f64,
    pub wrap_limit: f64,
    pub talk_goal: Option<f64>,
    pub expected_start: NaiveTime,
}

/// Connected-goal bump for the premium ("pr ") cohort on full days.
const PREMIUM_CONNECTED_BONUS: f64 = 0.75;

/// Extra wrap-up allowance granted to the Nigeria office.
const NIGERIA_WRAP_BONUS: f64 = 0.25;

/// Agents outside the Friday-as-weekday offices who nonetheless run the
/// full weekday schedule on Fridays (known individual exceptions).
const FRIDAY_FULL_SCHEDULE_AGENTS: &[&str] = &["a zambo", "w judith", "sp galloway"];

fn base_thresholds(bucket: DayBucket) -> PolicyThresholds {
    let start = |h| NaiveTime::from_hms_opt(h, 0, 0).expect("in-range time");
    match bucket {
        DayBucket::Weekday => PolicyThresholds {
            bucket,
            connected_goal: 9.25,
            break_limit: 2.333,
            wrap_limit: 1.0,
            talk_goal: Some(6.0),
            expected_start: start(6),
        },
        DayBucket::Friday => PolicyThresholds {
            bucket,
            connected_goal: 7.5,
            break_limit: 2.0,
            wrap_limit: 0.75,
            talk_goal: Some(4.5),
            expected_start: start(6),
        },
        DayBucket::Saturday => PolicyThresholds {
            bucket,
            connected_goal: 6.0,
            break_limit: 1.5,
            wrap_limit: 0.75,
            talk_goal: Some(3.5),
            expected_start: start(7),
        },
        DayBucket::Sunday => PolicyThresholds {
            bucket,
            connected_goal: 5.0,
            break_limit: 1.0,
            wrap_limit: 0.75,
            talk_goal: None,
            expected_start: start(8),
        },
    }
}

/// Offices whose Friday runs the full weekday schedule.
fn friday_is_weekday(office: OfficeGroup) -> bool {
    matches!(office, OfficeGroup::Egypt | OfficeGroup::Nigeria)
}

/// Resolve the goal thresholds for one agent on one report date.
///
/// The agent id is a mandatory explicit argument; there is no ambient
/// "current agent" anywhere in this crate. Ids are matched lowercase,
/// so ingest must normalize casing first.
pub fn resolve(report_date: NaiveDate, agent: &str) -> PolicyThresholds {
    let normalized = agent.trim().to_lowercase();
    let office = classify(&normalized);

    let mut bucket = DayBucket::from_date(report_date);

    // Modifier 1: office-level Friday substitution.
    if bucket == DayBucket::Friday && friday_is_weekday(office) {
        bucket = DayBucket::Weekday;
    }

    // Modifier 2: individual schedule exceptions.
    if bucket == DayBucket::Friday
        && FRIDAY_FULL_SCHEDULE_AGENTS.iter().any(|a| *a == normalized)
    {
        bucket = DayBucket::Weekday;
    }

    let mut thresholds = base_thresholds(bucket);

    if office == OfficeGroup::Nigeria {
        thresholds.wrap_limit += NIGERIA_WRAP_BONUS;
    }

    // Modifier 3: premium cohort carries a longer connected goal on
    // full days.
    if normalized.starts_with("pr ")
        && matches!(bucket, DayBucket::Weekday | DayBucket::Friday)
    {
        thresholds.connected_goal += PREMIUM_CONNECTED_BONUS;
    }

    thresholds
}
