use chromiumoxide::element::Element as CrElement;

use crate::error::{Error, Result};

/// Wrapper around a chromiumoxide Element, providing the actions the
/// survey performs on located elements.
pub struct Element {
    inner: CrElement,
}

impl Element {
    pub(crate) fn new(inner: CrElement) -> Self {
        Self { inner }
    }

    /// Click this element (scrolls into view first).
    pub async fn click(&self) -> Result<()> {
        self.inner.click().await.map_err(Error::Cdp)?;
        Ok(())
    }

    /// Get the inner text of this element.
    pub async fn inner_text(&self) -> Result<String> {
        self.inner
            .inner_text()
            .await
            .map_err(Error::Cdp)?
            .ok_or_else(|| Error::ElementNotFound("inner text is empty".into()))
    }

    /// Get the value of an attribute on this element.
    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.inner.attribute(name).await.map_err(Error::Cdp)
    }

    /// Force an anchor to navigate in the current tab, overriding any
    /// `target="_blank"`. Must run before the click or the navigation
    /// context is lost to a tab we do not track.
    pub async fn force_same_tab(&self) -> Result<()> {
        self.inner
            .call_js_fn("function() { this.target = '_self'; }", false)
            .await
            .map_err(|e| Error::Js(e.to_string()))?;
        Ok(())
    }
}
