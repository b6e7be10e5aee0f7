//! Rollup of agents who appear more than once in a batch.
//!
//! An agent logged into two source systems (or split across shifts)
//! gets one synthesized total row after their originals: numeric fields
//! summed, earliest first-call, latest shift-end, and the score
//! re-derived from the summed inputs rather than summed per-row — a sum
//! of scores would charge cross-compensation twice.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::duration::DurationValue;
use crate::mismatch::{self, parse_wall_clock};
use crate::policy;
use crate::record::ScoredRecord;
use crate::score;

/// Source label stamped on synthesized total rows.
pub const TOTAL_SOURCE_LABEL: &str = "Total";

fn sum_durations<'a>(values: impl Iterator<Item = &'a DurationValue>) -> DurationValue {
    let mut acc: Option<f64> = None;
    for v in values {
        if let Some(h) = v.hours() {
            acc = Some(acc.unwrap_or(0.0) + h);
        }
    }
    match acc {
        // All members missing: the sum is missing too, not zero.
        None => DurationValue::Missing,
        Some(h) => DurationValue::Hours(h),
    }
}

fn clock_of(cell: &Option<String>) -> Option<NaiveTime> {
    cell.as_deref().and_then(parse_wall_clock)
}

/// Pick the group endpoint by parsed time-of-day; rows without a
/// parseable stamp fall back to the first raw value present.
fn pick_endpoint<'a>(
    rows: impl Iterator<Item = &'a Option<String>> + Clone,
    earliest: bool,
) -> Option<String> {
    let parsed = rows.clone().filter_map(|c| clock_of(c).map(|t| (t, c)));
    let best = if earliest {
        parsed.min_by_key(|(t, _)| *t)
    } else {
        parsed.max_by_key(|(t, _)| *t)
    };
    match best {
        Some((_, cell)) => cell.clone(),
        None => rows.filter_map(|c| c.clone()).next(),
    }
}

fn synthesize_total(group: &[ScoredRecord]) -> ScoredRecord {
    // Groups are keyed by agent, so every member shares these.
    let first = &group[0];
    let agent = first.agent.clone();
    let report_date = first.report_date;

    let connected = sum_durations(group.iter().map(|r| &r.connected));
    let break_time = sum_durations(group.iter().map(|r| &r.break_time));
    let talk_time = sum_durations(group.iter().map(|r| &r.talk_time));
    let wrap_up = sum_durations(group.iter().map(|r| &r.wrap_up));
    let sales = group.iter().map(|r| r.sales).sum();
    let penalty: f64 = group.iter().map(|r| r.mismatch.penalty).sum();

    let mismatch = mismatch::from_penalty(penalty, &agent);
    let thresholds = policy::resolve(report_date, &agent);
    let score = score::score(
        connected.or_zero(),
        break_time.or_zero(),
        wrap_up.or_zero(),
        penalty,
        &thresholds,
    );

    ScoredRecord {
        agent,
        office: first.office,
        source: TOTAL_SOURCE_LABEL.to_string(),
        first_call: pick_endpoint(group.iter().map(|r| &r.first_call), true),
        shift_end: pick_endpoint(group.iter().map(|r| &r.shift_end), false),
        connected,
        break_time,
        talk_time,
        wrap_up,
        sales,
        mismatch,
        score,
        report_date,
        is_total: true,
    }
}

/// Append a total row after each multi-entry agent group.
///
/// Groups follow first-appearance order; singleton groups pass through
/// untouched. Rows already tagged `is_total` are discarded before
/// grouping, so feeding the output back in reproduces it exactly —
/// a double-run can no longer double-count.
pub fn append_totals(rows: Vec<ScoredRecord>) -> Vec<ScoredRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ScoredRecord>> = HashMap::new();

    for row in rows {
        if row.is_total {
            continue;
        }
        let key = row.agent.clone();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    let mut out = Vec::new();
    for key in order {
        let group = groups.remove(&key).unwrap_or_default();
        let total = (group.len() > 1).then(|| synthesize_total(&group));
        out.extend(group);
        if let Some(total) = total {
            out.push(total);
        }
    }
    out
}
