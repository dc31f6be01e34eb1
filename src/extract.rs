//! Report extraction: navigate to the call report, wait for the table,
//! and parse every row, degrading per-row failures to skipped rows.

use std::time::Duration;

use chrono::NaiveDate;

use crate::browser::{Element, Page};
use crate::models::RawRow;
use crate::parse::{parse_row, RejectReason, RowOutcome, SkipReason};
use crate::selector::Locator;

/// The console hides rows behind a spinner while the report loads.
pub const LOADING_INDICATOR_CSS: &str = "[class*='loading']";
pub const TABLE_ROWS_CSS: &str = "table tbody tr";

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// What one extraction pass produced: accepted records in document order,
/// plus every rejected row with its reason, for logs and assertions.
#[derive(Debug, Default)]
pub struct ExtractReport {
    pub records: Vec<crate::models::CallRecord>,
    pub rejections: Vec<RowRejection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub row_index: usize,
    pub reason: RejectReason,
}

/// Extract the call report at `report_url`.
///
/// Never fails: navigation errors and a table that never becomes ready are
/// logged and yield an empty report, and a malformed row only costs that
/// row. Document order of the table is preserved in `records`.
pub async fn extract_report(
    page: &dyn Page,
    report_url: &str,
    today: NaiveDate,
    table_wait: Duration,
) -> ExtractReport {
    let mut report = ExtractReport::default();

    if let Err(error) = page.goto(report_url).await {
        tracing::error!(url = %report_url, error = %error, "Failed to open call report");
        return report;
    }

    let rows = match wait_for_rows(page, table_wait).await {
        Some(rows) => rows,
        None => {
            tracing::warn!(url = %report_url, "Extraction failed: table not ready");
            return report;
        }
    };

    tracing::info!(rows = rows.len(), "Call report table loaded");

    for (row_index, row) in rows.iter().enumerate() {
        match read_row(row.as_ref()).await {
            Ok(raw) => match parse_row(&raw, today) {
                RowOutcome::Accepted(record) => report.records.push(record),
                RowOutcome::Skipped(SkipReason::NoData) => {
                    tracing::debug!("Report is empty (no-data sentinel row)");
                }
                RowOutcome::Skipped(SkipReason::BeforeRunDate) => {
                    tracing::debug!(row_index, "Skipping row dated before the run date");
                }
                RowOutcome::Rejected(reason) => {
                    tracing::warn!(row_index, %reason, "Rejecting report row");
                    report.rejections.push(RowRejection { row_index, reason });
                }
            },
            Err(error) => {
                let reason = RejectReason::CellRead(error.to_string());
                tracing::warn!(row_index, %reason, "Rejecting report row");
                report.rejections.push(RowRejection { row_index, reason });
            }
        }
    }

    report
}

/// Poll until the loading indicator is gone and at least one row exists.
async fn wait_for_rows(page: &dyn Page, wait: Duration) -> Option<Vec<Box<dyn Element>>> {
    let rows_locator = Locator::css(TABLE_ROWS_CSS);
    let loading_locator = Locator::css(LOADING_INDICATOR_CSS);
    let deadline = tokio::time::Instant::now() + wait;

    loop {
        let loading = page
            .query(&loading_locator)
            .await
            .ok()
            .flatten()
            .is_some();
        if !loading {
            let rows = page.query_all(&rows_locator).await.unwrap_or_default();
            if !rows.is_empty() {
                return Some(rows);
            }
        }

        if tokio::time::Instant::now() >= deadline {
            return None;
        }
        tokio::time::sleep(POLL_INTERVAL.min(wait)).await;
    }
}

async fn read_row(row: &dyn Element) -> anyhow::Result<RawRow> {
    let cells = row.query_all("td").await?;
    let mut texts = Vec::with_capacity(cells.len());
    for cell in &cells {
        texts.push(cell.text().await?);
    }
    Ok(RawRow::new(texts))
}
