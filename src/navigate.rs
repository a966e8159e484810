use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::config::SurveyConfig;
use crate::error::{Error, Result};
use crate::page::Tab;

/// Drive the browser from the landing page to the sorted smartphone
/// listing. Every step waits for its element, clicks it, then pauses to
/// let asynchronous page content settle. Any wait timeout here is fatal:
/// without the listing there is nothing to survey.
pub async fn reach_sorted_listing(tab: &Tab, config: &SurveyConfig) -> Result<()> {
    info!(url = %config.base_url, "navigating to sorted listing");

    click_button_by_text(tab, &config.selectors.consent_text, config.pause).await?;
    click_anchor_by_text(tab, &config.selectors.category_text, config.pause).await?;
    click_anchor_by_text(tab, &config.selectors.subcategory_text, config.pause).await?;
    apply_sort_order(tab, &config.sort_query, config.pause).await?;

    info!("listing reached");
    Ok(())
}

/// Wait for a button containing the given visible text and click it.
async fn click_button_by_text(tab: &Tab, text: &str, pause: Duration) -> Result<()> {
    debug!(text, "clicking button");
    let xpath = format!("//button[contains(text(), \"{text}\")]");
    let button = tab.wait_for_xpath(&xpath).await?;
    button.click().await?;
    tokio::time::sleep(pause).await;
    Ok(())
}

/// Wait for an anchor containing the given visible text, force it to
/// navigate in the current tab, and click it.
async fn click_anchor_by_text(tab: &Tab, text: &str, pause: Duration) -> Result<()> {
    debug!(text, "clicking anchor");
    let xpath = format!("//a[contains(text(), \"{text}\")]");
    let anchor = tab.wait_for_xpath(&xpath).await?;
    anchor.force_same_tab().await?;
    anchor.click().await?;
    tokio::time::sleep(pause).await;
    Ok(())
}

/// Overwrite the listing URL's query string with the sort parameter and
/// navigate to the rewritten URL. The sort controls on the page are not
/// reliably clickable, so the sort order goes in via the URL.
async fn apply_sort_order(tab: &Tab, sort_query: &str, pause: Duration) -> Result<()> {
    let current = tab.url().await?;
    let sorted = rewrite_query(&current, sort_query)?;
    debug!(url = %sorted, "applying sort order");
    tab.goto(&sorted).await?;
    tokio::time::sleep(pause).await;
    Ok(())
}

/// Replace the query string of `url` with `query`, leaving the rest of the
/// URL untouched.
fn rewrite_query(url: &str, query: &str) -> Result<String> {
    let mut parsed =
        Url::parse(url).map_err(|e| Error::Navigation(format!("bad listing URL {url}: {e}")))?;
    parsed.set_query(Some(query));
    Ok(parsed.into())
}

#[cfg(test)]
mod tests {
    use super::rewrite_query;

    #[test]
    fn rewrite_replaces_existing_query() {
        let out = rewrite_query(
            "https://shop.example/category/smartphones?page=2&from=nav",
            "sorting=rating",
        )
        .unwrap();
        assert_eq!(
            out,
            "https://shop.example/category/smartphones?sorting=rating"
        );
    }

    #[test]
    fn rewrite_adds_query_when_absent() {
        let out =
            rewrite_query("https://shop.example/category/smartphones", "sorting=rating").unwrap();
        assert_eq!(
            out,
            "https://shop.example/category/smartphones?sorting=rating"
        );
    }

    #[test]
    fn rewrite_rejects_garbage() {
        assert!(rewrite_query("not a url", "sorting=rating").is_err());
    }
}
