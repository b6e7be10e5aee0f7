//! Duration text parsing and HH:MM:SS formatting.
//!
//! Source exports report durations in three shapes: decimal hours
//! ("2.725"), clock-style "2:43:30", or worded "2 hours 43 min 30 s".
//! All collapse to decimal hours here. An empty cell or the "-"
//! placeholder means "no data", which is NOT the same as zero hours —
//! the consistency checker needs to tell them apart.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A duration in decimal hours, or an explicit missing marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum DurationValue {
    /// The source cell was empty or the "-" placeholder.
    Missing,
    /// Non-negative decimal hours.
    Hours(f64),
}

impl DurationValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, DurationValue::Missing)
    }

    /// Decimal hours, if present.
    pub fn hours(&self) -> Option<f64> {
        match self {
            DurationValue::Missing => None,
            DurationValue::Hours(h) => Some(*h),
        }
    }

    /// Decimal hours with Missing collapsed to 0.0.
    ///
    /// Only for arithmetic that has already surfaced missingness some
    /// other way (the score calculator's documented contract).
    pub fn or_zero(&self) -> f64 {
        self.hours().unwrap_or(0.0)
    }
}

impl From<Option<f64>> for DurationValue {
    fn from(v: Option<f64>) -> Self {
        match v {
            None => DurationValue::Missing,
            Some(h) => DurationValue::Hours(h),
        }
    }
}

impl From<DurationValue> for Option<f64> {
    fn from(v: DurationValue) -> Self {
        v.hours()
    }
}

/// How to treat a duration string in which no component matched at all.
///
/// The legacy behavior silently yields 0.0 for e.g. "n/a"; strict mode
/// reports Missing instead. Lenient is the default because downstream
/// reports were built around the legacy behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

fn clock_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{1,2}):(\d{2}):(\d{2})$").expect("hardcoded pattern")
    })
}

fn word_res() -> &'static (Regex, Regex, Regex) {
    static RES: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    RES.get_or_init(|| {
        (
            Regex::new(r"(\d+)\s*hours?").expect("hardcoded pattern"),
            Regex::new(r"(\d+)\s*min").expect("hardcoded pattern"),
            Regex::new(r"(\d+)\s*s").expect("hardcoded pattern"),
        )
    })
}

fn round3(h: f64) -> f64 {
    (h * 1000.0).round() / 1000.0
}

/// Parse a duration cell into decimal hours (lenient mode).
pub fn parse_duration(text: &str) -> DurationValue {
    parse_duration_with(text, Strictness::Lenient)
}

/// Parse a duration cell into decimal hours.
///
/// Interpretation order: missing sentinel, strict H:MM:SS clock form,
/// plain decimal, then independent word-component extraction
/// ("2 hours 43 min 30 s", each component optional, absent = 0).
/// Never fails; see [`Strictness`] for the no-component-at-all case.
pub fn parse_duration_with(text: &str, strictness: Strictness) -> DurationValue {
    let trimmed = text.trim();
    if trimmed.is_empty() || trimmed == "-" {
        return DurationValue::Missing;
    }

    if let Some(caps) = clock_re().captures(trimmed) {
        let h: f64 = caps[1].parse().unwrap_or(0.0);
        let m: f64 = caps[2].parse().unwrap_or(0.0);
        let s: f64 = caps[3].parse().unwrap_or(0.0);
        return DurationValue::Hours(round3(h + m / 60.0 + s / 3600.0));
    }

    if let Ok(h) = trimmed.parse::<f64>() {
        // Durations are never negative; a negative or non-finite cell
        // is bad data, not hours.
        if !h.is_finite() || h < 0.0 {
            return DurationValue::Missing;
        }
        return DurationValue::Hours(h);
    }

    let (h_re, m_re, s_re) = word_res();
    let grab = |re: &Regex| -> Option<f64> {
        re.captures(trimmed)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    };

    let hours = grab(h_re);
    let minutes = grab(m_re);
    let seconds = grab(s_re);

    if strictness == Strictness::Strict
        && hours.is_none()
        && minutes.is_none()
        && seconds.is_none()
    {
        return DurationValue::Missing;
    }

    let total = hours.unwrap_or(0.0)
        + minutes.unwrap_or(0.0) / 60.0
        + seconds.unwrap_or(0.0) / 3600.0;
    DurationValue::Hours(round3(total))
}

/// Format decimal hours as HH:MM:SS with a leading + or - sign.
///
/// Used for time-to-goal, where the sign is the whole point.
pub fn format_hms_signed(decimal_hours: f64) -> String {
    let total_seconds = (decimal_hours * 3600.0).round() as i64;
    let sign = if total_seconds < 0 { "-" } else { "+" };
    let total_seconds = total_seconds.abs();
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

/// Format decimal hours as HH:MM:SS, sign dropped.
pub fn format_hms(decimal_hours: f64) -> String {
    let total_seconds = (decimal_hours.abs() * 3600.0).round() as i64;
    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}
