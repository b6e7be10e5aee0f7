//! Per-record scoring pipeline: classify, resolve, check, score.
//!
//! Pure and batch-oriented: the same input batch always produces the
//! same output, and nothing here touches the system clock or any state
//! outside its arguments. Rows never abort the batch — malformed input
//! degrades to flagged/missing output rows instead of being dropped.

use crate::aggregate;
use crate::mismatch::check_shift;
use crate::office::classify;
use crate::policy;
use crate::record::{ScoredRecord, ShiftRecord};
use crate::score;

/// Score one shift record.
pub fn score_record(rec: &ShiftRecord) -> ScoredRecord {
    let office = classify(&rec.agent);
    let thresholds = policy::resolve(rec.report_date, &rec.agent);
    let mismatch = check_shift(
        rec.first_call.as_deref(),
        rec.shift_end.as_deref(),
        rec.connected,
        &rec.agent,
    );
    // Missing connected has already been surfaced by the checker;
    // scoring sees it as zero per the calculator's contract.
    let score = score::score(
        rec.connected.or_zero(),
        rec.break_time.or_zero(),
        rec.wrap_up.or_zero(),
        mismatch.penalty,
        &thresholds,
    );

    ScoredRecord {
        agent: rec.agent.clone(),
        office,
        source: rec.source.clone(),
        first_call: rec.first_call.clone(),
        shift_end: rec.shift_end.clone(),
        connected: rec.connected,
        break_time: rec.break_time,
        talk_time: rec.talk_time,
        wrap_up: rec.wrap_up,
        sales: rec.sales,
        mismatch,
        score,
        report_date: rec.report_date,
        is_total: false,
    }
}

/// Score a whole batch, preserving row order.
pub fn score_batch(records: &[ShiftRecord]) -> Vec<ScoredRecord> {
    records.iter().map(score_record).collect()
}

/// Score a batch and append per-agent total rows.
pub fn score_batch_with_totals(records: &[ShiftRecord]) -> Vec<ScoredRecord> {
    aggregate::append_totals(score_batch(records))
}
