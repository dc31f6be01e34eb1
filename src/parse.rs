//! Row parsing: one raw table row in, one canonical record (or a reason) out.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::duration::hms_to_ceil_hours;
use crate::models::{CallRecord, RawRow, CALL_TIME_FORMAT};

/// The report table renders 11 columns; column 6 is a reserved column the
/// console leaves unused.
pub const MIN_COLUMNS: usize = 11;

static CALLER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)").expect("caller-id regex is valid"));

/// Outcome of parsing one table row.
///
/// Skips are expected report shapes (the empty-report sentinel, rows older
/// than the run date); rejections are malformed rows worth surfacing in
/// logs and the extraction report.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Accepted(CallRecord),
    Skipped(SkipReason),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// First cell reads "no data": the console's empty-report sentinel.
    NoData,
    /// Row is dated strictly before the run date.
    BeforeRunDate,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RejectReason {
    #[error("insufficient columns (got {got}, need 11)")]
    InsufficientColumns { got: usize },
    #[error("empty call id")]
    EmptyCallId,
    #[error("unparseable timestamp {text:?}")]
    UnparseableTimestamp { text: String },
    #[error("failed to read row cells: {0}")]
    CellRead(String),
}

/// Parse one raw row into a [`CallRecord`].
///
/// Rows dated before `today` are skipped: each run only surfaces calls from
/// the run date onward (re-runs pick up the morning's calls, and the sync
/// writer already dedupes anything seen twice).
pub fn parse_row(row: &RawRow, today: NaiveDate) -> RowOutcome {
    let first = row.cell(0).trim();
    if first.eq_ignore_ascii_case("no data") {
        return RowOutcome::Skipped(SkipReason::NoData);
    }

    if row.cells.len() < MIN_COLUMNS {
        return RowOutcome::Rejected(RejectReason::InsufficientColumns {
            got: row.cells.len(),
        });
    }

    let call_time = match NaiveDateTime::parse_from_str(first, CALL_TIME_FORMAT) {
        Ok(ts) => ts,
        Err(_) => {
            return RowOutcome::Rejected(RejectReason::UnparseableTimestamp {
                text: first.to_string(),
            })
        }
    };
    if call_time.date() < today {
        return RowOutcome::Skipped(SkipReason::BeforeRunDate);
    }

    let call_id = row.cell(1).trim();
    if call_id.is_empty() {
        return RowOutcome::Rejected(RejectReason::EmptyCallId);
    }

    let raw_from = row.cell(2).trim();
    let call_from = match CALLER_ID_RE.captures(raw_from) {
        Some(captures) => captures[1].to_string(),
        None => raw_from.to_string(),
    };

    RowOutcome::Accepted(CallRecord {
        call_id: call_id.to_string(),
        call_from,
        call_to: row.cell(3).trim().to_string(),
        call_time: call_time.format(CALL_TIME_FORMAT).to_string(),
        call_type: row.cell(4).trim().to_lowercase(),
        call_status: row.cell(5).trim().to_lowercase(),
        call_ringing_time: hms_to_ceil_hours(row.cell(7).trim()),
        call_talking_time: hms_to_ceil_hours(row.cell(8).trim()),
        call_cost: row.cell(9).trim().to_string(),
        call_activity_details: row.cell(10).trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
    }

    fn valid_row() -> RawRow {
        RawRow::new(
            [
                "08/31/2026 09:15:00 AM",
                "00042",
                "Jane Doe (5551234)",
                "104",
                "Inbound",
                "Answered",
                "",
                "00:00:12",
                "00:03:30",
                "0.00",
                "Queue: support",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        )
    }

    fn expect_accepted(outcome: RowOutcome) -> CallRecord {
        match outcome {
            RowOutcome::Accepted(record) => record,
            other => panic!("expected accepted row, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_row_parses_fully() {
        let record = expect_accepted(parse_row(&valid_row(), today()));
        assert_eq!(record.call_id, "00042");
        assert_eq!(record.call_from, "5551234");
        assert_eq!(record.call_to, "104");
        assert_eq!(record.call_time, "08/31/2026 09:15:00 AM");
        assert_eq!(record.call_type, "inbound");
        assert_eq!(record.call_status, "answered");
        assert_eq!(record.call_ringing_time, 1.0 / 60.0);
        assert_eq!(record.call_talking_time, 4.0 / 60.0);
        assert_eq!(record.call_cost, "0.00");
        assert_eq!(record.call_activity_details, "Queue: support");
    }

    #[test]
    fn test_no_data_sentinel_is_skipped_any_case() {
        for sentinel in ["No Data", "NO DATA", "no data"] {
            let row = RawRow::new(vec![sentinel.to_string()]);
            assert_eq!(
                parse_row(&row, today()),
                RowOutcome::Skipped(SkipReason::NoData)
            );
        }
    }

    #[test]
    fn test_short_row_is_rejected() {
        let mut row = valid_row();
        row.cells.truncate(9);
        assert_eq!(
            parse_row(&row, today()),
            RowOutcome::Rejected(RejectReason::InsufficientColumns { got: 9 })
        );
    }

    #[test]
    fn test_empty_call_id_is_rejected() {
        let mut row = valid_row();
        row.cells[1] = "  ".to_string();
        assert_eq!(
            parse_row(&row, today()),
            RowOutcome::Rejected(RejectReason::EmptyCallId)
        );
    }

    #[test]
    fn test_unparseable_timestamp_is_rejected() {
        let mut row = valid_row();
        row.cells[0] = "yesterday at nine".to_string();
        assert!(matches!(
            parse_row(&row, today()),
            RowOutcome::Rejected(RejectReason::UnparseableTimestamp { .. })
        ));
    }

    #[test]
    fn test_row_before_run_date_is_skipped() {
        let mut row = valid_row();
        row.cells[0] = "08/30/2026 11:59:00 PM".to_string();
        assert_eq!(
            parse_row(&row, today()),
            RowOutcome::Skipped(SkipReason::BeforeRunDate)
        );
    }

    #[test]
    fn test_row_on_run_date_is_kept() {
        let mut row = valid_row();
        row.cells[0] = "08/31/2026 12:00:01 AM".to_string();
        assert!(matches!(parse_row(&row, today()), RowOutcome::Accepted(_)));
    }

    #[test]
    fn test_caller_id_without_parentheses_keeps_raw_text() {
        let mut row = valid_row();
        row.cells[2] = "5559999".to_string();
        let record = expect_accepted(parse_row(&row, today()));
        assert_eq!(record.call_from, "5559999");
    }

    #[test]
    fn test_timestamp_reserialized_canonically() {
        let mut row = valid_row();
        row.cells[0] = "8/31/2026 9:05:07 AM".to_string();
        let record = expect_accepted(parse_row(&row, today()));
        assert_eq!(record.call_time, "08/31/2026 09:05:07 AM");
    }

    #[test]
    fn test_malformed_duration_degrades_to_zero_hours() {
        let mut row = valid_row();
        row.cells[7] = "n/a".to_string();
        let record = expect_accepted(parse_row(&row, today()));
        assert_eq!(record.call_ringing_time, 0.0);
        assert_eq!(record.call_talking_time, 4.0 / 60.0);
    }
}
