//! Recognized source-system export schemas.
//!
//! Each source system names its columns differently; a schema is an
//! explicit, immutable column map selected by detection, never a table
//! mutated per pipeline version. Detection keys on a signature column
//! unique to one system's export.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Closed set of ingestion paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// Predictive dialer export ("Login ID", "Logged Time", ...).
    Dialer,
    /// Switchboard activity export ("Agent Name", "Pause Time", ...).
    Switchboard,
}

/// Source-specific column names for the canonical fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub agent: &'static str,
    pub first_call: &'static str,
    pub shift_end: &'static str,
    pub connected: &'static str,
    pub break_time: &'static str,
    pub talk_time: &'static str,
    pub wrap_time: &'static str,
    pub sales: &'static str,
}

/// One recognized export schema: its kind, the column unique to it,
/// and the full rename map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSchema {
    pub kind: SourceKind,
    /// Header that identifies this export and no other.
    pub signature: &'static str,
    pub columns: ColumnMap,
}

pub const DIALER: SourceSchema = SourceSchema {
    kind: SourceKind::Dialer,
    signature: "Login ID",
    columns: ColumnMap {
        agent: "Login ID",
        first_call: "Shift Start",
        shift_end: "Shift End",
        connected: "Logged Time",
        break_time: "Break (t)",
        talk_time: "Ready:Talk Time",
        wrap_time: "Ready:Wrap Time",
        sales: "Appointments (#)",
    },
};

pub const SWITCHBOARD: SourceSchema = SourceSchema {
    kind: SourceKind::Switchboard,
    signature: "Agent Name",
    columns: ColumnMap {
        agent: "Agent Name",
        first_call: "First Call",
        shift_end: "Last Hangup",
        connected: "Connected Time",
        break_time: "Pause Time",
        talk_time: "Talk Time",
        wrap_time: "Wrap Time",
        sales: "Leads",
    },
};

const SCHEMAS: &[&SourceSchema] = &[&SWITCHBOARD, &DIALER];

/// Detect which source system produced an export from its header row.
///
/// The Switchboard signature is checked first since the Dialer export
/// never carries an "Agent Name" column.
pub fn detect(headers: &[String]) -> Result<&'static SourceSchema> {
    for schema in SCHEMAS {
        if headers.iter().any(|h| h.trim() == schema.signature) {
            return Ok(schema);
        }
    }
    bail!(
        "unrecognized export schema: no signature column among {:?}",
        headers
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detect_dialer() {
        let h = headers(&["Login ID", "Shift Start", "Logged Time", "Break (t)"]);
        assert_eq!(detect(&h).unwrap().kind, SourceKind::Dialer);
    }

    #[test]
    fn test_detect_switchboard() {
        let h = headers(&["Agent Name", "First Call", "Connected Time"]);
        assert_eq!(detect(&h).unwrap().kind, SourceKind::Switchboard);
    }

    #[test]
    fn test_detect_tolerates_header_whitespace() {
        let h = headers(&[" Login ID ", "Shift Start"]);
        assert_eq!(detect(&h).unwrap().kind, SourceKind::Dialer);
    }

    #[test]
    fn test_unrecognized_schema_errors() {
        let h = headers(&["Employee", "Hours"]);
        assert!(detect(&h).is_err());
    }
}
