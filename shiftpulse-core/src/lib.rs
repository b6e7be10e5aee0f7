//! shiftpulse-core: pure shift-metric normalization and policy scoring.
//!
//! Everything here is a deterministic in-memory transform: raw shift
//! records in, canonical scored records out. No I/O, no clock reads,
//! no cross-batch state.

pub mod aggregate;
pub mod duration;
pub mod mismatch;
pub mod office;
pub mod pipeline;
pub mod policy;
pub mod record;
pub mod score;

pub use aggregate::{append_totals, TOTAL_SOURCE_LABEL};
pub use duration::{
    format_hms, format_hms_signed, parse_duration, parse_duration_with, DurationValue, Strictness,
};
pub use mismatch::{check_shift, parse_wall_clock, MismatchResult, MismatchStatus};
pub use office::{classify, OfficeGroup};
pub use pipeline::{score_batch, score_batch_with_totals, score_record};
pub use policy::{resolve, DayBucket, PolicyThresholds};
pub use record::{ScoredRecord, ShiftRecord};
pub use score::{overhead_penalty, score, ScoreResult};
