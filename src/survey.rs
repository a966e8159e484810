use tracing::info;

use crate::browser::Session;
use crate::collect::CollectionLoop;
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::fetch::{self, SpoofedUserAgent, UserAgentProvider};
use crate::page::Tab;
use crate::{navigate, report};

/// Run one full survey: navigate to the sorted listing, collect OS
/// versions until the target is reached, write the dataset and report,
/// and return the distribution.
///
/// The browser session is the one shared resource; it is closed on every
/// exit path before any error propagates.
pub async fn run(mut config: SurveyConfig) -> Result<Vec<(String, usize)>> {
    config.validate()?;

    let mut ua = SpoofedUserAgent;
    fetch::warm_up(&config.warmup_url, &mut ua).await?;

    if config.user_agent.is_none() {
        config.user_agent = Some(ua.next_user_agent());
    }

    let session = Session::launch(&config).await?;
    let outcome = drive(&session, &config).await;
    let close_outcome = session.close().await;

    let values = outcome?;
    close_outcome?;

    let entries = report::distribution(&values);
    report::write_records(&config.records_path, &values)?;
    report::write_report(&config.report_path, &entries)?;
    info!(
        distinct = entries.len(),
        total = values.len(),
        report = %config.report_path,
        "survey finished"
    );

    Ok(entries)
}

/// Everything between session launch and session close.
async fn drive(session: &Session, config: &SurveyConfig) -> Result<Vec<String>> {
    let listing = open_listing(session, config).await?;
    navigate::reach_sorted_listing(&listing, config).await?;

    let (values, reason) = CollectionLoop::new(config).run(session, &listing).await?;
    info!(hits = values.len(), ?reason, "collection loop finished");
    Ok(values)
}

/// Load the landing page in the tab that anchors the whole run.
async fn open_listing(session: &Session, config: &SurveyConfig) -> Result<Tab> {
    let listing = session.new_tab(&config.base_url).await?;
    tokio::time::sleep(config.pause).await;
    Ok(listing)
}
