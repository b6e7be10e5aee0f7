//! shiftpulse-ingest: source-system schema detection and normalization
//! onto the canonical shift-record shape.

pub mod normalize;
pub mod schema;

pub use normalize::{normalize_batch, normalize_batch_with, RawRow};
pub use schema::{detect, SourceKind, SourceSchema, DIALER, SWITCHBOARD};
