use crate::browser::Session;
use crate::error::Result;
use crate::page::Tab;

/// Opens detail pages in their own tabs and restores focus to the listing
/// tab afterwards.
///
/// The listing tab is the anchor of the whole run: it is never closed here,
/// and after every `close_and_return` it is the focused tab again.
pub struct TabManager<'a> {
    session: &'a Session,
    listing: &'a Tab,
}

impl<'a> TabManager<'a> {
    pub fn new(session: &'a Session, listing: &'a Tab) -> Self {
        Self { session, listing }
    }

    /// Open the URL in a new tab and leave focus on it.
    pub async fn open_in_new_tab(&self, url: &str) -> Result<Tab> {
        let tab = self.session.new_tab(url).await?;
        tab.bring_to_front().await?;
        Ok(tab)
    }

    /// Close the given detail tab and bring the listing tab back to front.
    ///
    /// The tab is closed even when the page in it was malformed; focus
    /// restoration happens regardless of what the detail page did.
    pub async fn close_and_return(&self, tab: Tab) -> Result<()> {
        tab.close().await?;
        self.listing.bring_to_front().await?;
        Ok(())
    }
}
