use std::time::Duration;

use chromiumoxide::page::Page as CrPage;

use crate::element::Element;
use crate::error::{Error, Result};

/// Wrapper around a chromiumoxide Page with the lookup-and-wait surface
/// the survey needs.
pub struct Tab {
    inner: CrPage,
    wait_timeout: Duration,
}

impl Tab {
    pub(crate) fn new(inner: CrPage, wait_timeout: Duration) -> Self {
        Self { inner, wait_timeout }
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Navigate to the given URL and wait for the page to load.
    pub async fn goto(&self, url: &str) -> Result<()> {
        self.inner
            .goto(url)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        Ok(())
    }

    /// Get the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.inner
            .url()
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?
            .ok_or_else(|| Error::Navigation("No URL found".into()))
    }

    /// Make this tab the focused one.
    pub async fn bring_to_front(&self) -> Result<()> {
        self.inner
            .bring_to_front()
            .await
            .map_err(Error::Cdp)?;
        Ok(())
    }

    /// Close this tab.
    pub async fn close(self) -> Result<()> {
        self.inner.close().await.map_err(Error::Cdp)?;
        Ok(())
    }

    // ── Element Queries ─────────────────────────────────────────────

    /// Find an element matching the given CSS selector. No waiting.
    pub async fn find_one(&self, selector: &str) -> Result<Element> {
        let el = self
            .inner
            .find_element(selector)
            .await
            .map_err(|e| Error::ElementNotFound(e.to_string()))?;
        Ok(Element::new(el))
    }

    /// Snapshot of all elements matching the given CSS selector. May be empty.
    pub async fn find_all(&self, selector: &str) -> Result<Vec<Element>> {
        let els = self
            .inner
            .find_elements(selector)
            .await
            .map_err(|e| Error::ElementNotFound(e.to_string()))?;
        Ok(els.into_iter().map(Element::new).collect())
    }

    /// Find an element matching the given XPath expression. No waiting.
    pub async fn find_xpath(&self, xpath: &str) -> Result<Element> {
        let el = self
            .inner
            .find_xpath(xpath)
            .await
            .map_err(|e| Error::ElementNotFound(e.to_string()))?;
        Ok(Element::new(el))
    }

    /// Wait for an element matching the given CSS selector to appear.
    /// Polls every 100ms up to the configured wait timeout.
    pub async fn wait_for(&self, selector: &str) -> Result<Element> {
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            match self.find_one(selector).await {
                Ok(el) => return Ok(el),
                Err(_) if start.elapsed() < self.wait_timeout => {
                    tokio::time::sleep(interval).await;
                }
                Err(_) => {
                    return Err(Error::Timeout(format!(
                        "Timed out waiting for selector: {}",
                        selector
                    )));
                }
            }
        }
    }

    /// Wait for an element matching the given XPath expression to appear.
    pub async fn wait_for_xpath(&self, xpath: &str) -> Result<Element> {
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            match self.find_xpath(xpath).await {
                Ok(el) => return Ok(el),
                Err(_) if start.elapsed() < self.wait_timeout => {
                    tokio::time::sleep(interval).await;
                }
                Err(_) => {
                    return Err(Error::Timeout(format!(
                        "Timed out waiting for xpath: {}",
                        xpath
                    )));
                }
            }
        }
    }

    // ── Observations ────────────────────────────────────────────────

    /// Get the text content of an element matching the given CSS selector.
    pub async fn text_content(&self, selector: &str) -> Result<String> {
        let el = self.find_one(selector).await?;
        el.inner_text().await
    }
}
