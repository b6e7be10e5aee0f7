//! Raw export rows onto the canonical shift-record shape.
//!
//! One function handles every source system; the per-source variation
//! lives entirely in the [`SourceSchema`] column map. Agent ids are
//! trimmed and lowercased here because everything downstream (office
//! prefixes, policy allow-lists) matches lowercase.

use std::collections::HashMap;

use chrono::NaiveDate;
use shiftpulse_core::{parse_duration_with, ShiftRecord, Strictness};

use crate::schema::SourceSchema;

/// One raw export row: column name to cell text.
pub type RawRow = HashMap<String, String>;

fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Footer rows ("Total", "Totals") that exports append and which must
/// never be scored as agents.
fn is_footer(agent: &str) -> bool {
    matches!(agent, "total" | "totals")
}

/// Map a batch of raw rows onto shift records (lenient duration
/// parsing).
pub fn normalize_batch(
    schema: &SourceSchema,
    label: &str,
    rows: &[RawRow],
    report_date: NaiveDate,
) -> Vec<ShiftRecord> {
    normalize_batch_with(schema, label, rows, report_date, Strictness::Lenient)
}

/// Map a batch of raw rows onto shift records.
///
/// Rows with no agent id and export footer rows are dropped; every
/// other row produces a record, however degraded. The report date is
/// supplied by the caller — this layer never reads the clock.
pub fn normalize_batch_with(
    schema: &SourceSchema,
    label: &str,
    rows: &[RawRow],
    report_date: NaiveDate,
    strictness: Strictness,
) -> Vec<ShiftRecord> {
    let cols = &schema.columns;
    let mut out = Vec::new();

    for row in rows {
        let Some(raw_agent) = cell(row, cols.agent) else {
            continue;
        };
        let agent = raw_agent.to_lowercase();
        if is_footer(&agent) {
            continue;
        }

        let duration = |column: &str| {
            parse_duration_with(row.get(column).map(String::as_str).unwrap_or(""), strictness)
        };

        out.push(ShiftRecord {
            agent,
            first_call: cell(row, cols.first_call).map(str::to_string),
            shift_end: cell(row, cols.shift_end).map(str::to_string),
            connected: duration(cols.connected),
            break_time: duration(cols.break_time),
            talk_time: duration(cols.talk_time),
            wrap_up: duration(cols.wrap_time),
            sales: cell(row, cols.sales)
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            report_date,
            source: label.to_string(),
        });
    }

    out
}
