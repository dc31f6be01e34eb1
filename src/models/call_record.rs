use serde::{Deserialize, Serialize};

/// Canonical output format for `call_time` (the console's own rendering).
pub const CALL_TIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// One call-detail record as synced into the remote store.
///
/// Instances are built once by the row parser and never mutated afterwards;
/// a report row either yields a complete record or is dropped whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Natural key: uniquely identifies the call in the remote store.
    pub call_id: String,
    /// Digits extracted from the parenthesized caller-id token, or the raw
    /// trimmed cell text when no parenthesized group is present.
    pub call_from: String,
    pub call_to: String,
    /// Call start time, re-serialized with [`CALL_TIME_FORMAT`].
    pub call_time: String,
    pub call_type: String,
    pub call_status: String,
    /// Ringing time in hours, ceiling-rounded to whole minutes.
    pub call_ringing_time: f64,
    /// Talking time in hours, same rounding rule.
    pub call_talking_time: f64,
    pub call_cost: String,
    pub call_activity_details: String,
}

/// The cell texts of one report table row, in document order.
///
/// Transient: lives only between DOM extraction and row parsing.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}
