//! End-to-end run: log in, extract the report, sync the records.

use anyhow::Result;

use crate::auth::{authenticate, Credentials};
use crate::browser::{launch_browser, CdpPage};
use crate::clock::Clock;
use crate::config::ResolvedConfig;
use crate::extract::{extract_report, ExtractReport};
use crate::store::CallLogStore;
use crate::sync::{sync_records, SyncReport};

/// One full pipeline invocation.
///
/// Scraping failures never escape this function: whatever records were
/// gathered before the failure, possibly none, are still handed to the
/// sync writer, and the returned report says what actually happened.
pub async fn run(
    config: &ResolvedConfig,
    store: &dyn CallLogStore,
    clock: &dyn Clock,
) -> SyncReport {
    let extraction = match scrape(config, clock).await {
        Ok(extraction) => extraction,
        Err(error) => {
            tracing::error!(error = %error, "Scraping failed");
            ExtractReport::default()
        }
    };

    tracing::info!(
        records = extraction.records.len(),
        rejected = extraction.rejections.len(),
        "Extraction finished"
    );

    let report = sync_records(store, &extraction.records).await;
    tracing::info!(
        created = report.created,
        skipped = report.skipped_existing,
        failed = report.failed,
        "Sync finished"
    );
    report
}

/// Authenticate and pull the call report. The browser lives exactly as
/// long as this call; teardown runs before the result is inspected.
async fn scrape(config: &ResolvedConfig, clock: &dyn Clock) -> Result<ExtractReport> {
    let (browser, handler_task) =
        launch_browser(config.console.headless, config.timeouts.navigation).await?;

    let result: Result<ExtractReport> = async {
        let page = CdpPage::new(browser.new_page("about:blank").await?);

        let credentials = Credentials {
            username: config.console.username.clone(),
            password: config.console.password.clone(),
        };
        authenticate(
            &page,
            &config.console.login_url(),
            &credentials,
            config.timeouts.element_wait,
            config.timeouts.login_settle,
        )
        .await?;

        Ok(extract_report(
            &page,
            &config.console.report_url(),
            clock.today(),
            config.timeouts.table_wait,
        )
        .await)
    }
    .await;

    drop(browser);
    handler_task.abort();

    result
}
