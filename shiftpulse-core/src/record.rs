//! Canonical record types flowing through the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::duration::DurationValue;
use crate::mismatch::MismatchResult;
use crate::office::OfficeGroup;
use crate::score::ScoreResult;

/// One agent's activity for one reporting date from one source system.
///
/// Produced by ingest with the agent id already trimmed and lowercased
/// (policy and classification match lowercase). Wall-clock cells are
/// kept as raw local strings; the consistency checker parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    pub agent: String,
    /// Raw first-call cell, e.g. "Apr 3 6:45AM". None when the export
    /// had no value.
    pub first_call: Option<String>,
    pub shift_end: Option<String>,
    pub connected: DurationValue,
    pub break_time: DurationValue,
    pub talk_time: DurationValue,
    pub wrap_up: DurationValue,
    pub sales: u32,
    pub report_date: NaiveDate,
    /// Batch label from the ingestion path ("Server 1", file stem...).
    pub source: String,
}

/// Canonical scored output row: one per agent-shift, plus synthesized
/// total rows after aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    pub agent: String,
    pub office: OfficeGroup,
    pub source: String,
    pub first_call: Option<String>,
    pub shift_end: Option<String>,
    pub connected: DurationValue,
    pub break_time: DurationValue,
    pub talk_time: DurationValue,
    pub wrap_up: DurationValue,
    pub sales: u32,
    pub mismatch: MismatchResult,
    pub score: ScoreResult,
    pub report_date: NaiveDate,
    /// True only on rows synthesized by the aggregator.
    pub is_total: bool,
}
