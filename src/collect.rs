use tracing::{debug, info, warn};

use crate::browser::Session;
use crate::config::SurveyConfig;
use crate::error::Result;
use crate::extract::{self, ExtractionResult};
use crate::page::Tab;
use crate::tabs::TabManager;

/// The one piece of mutable run state: how many detail pages yielded an
/// OS version so far. Owned by the collection loop, never shared.
pub struct RunState {
    hits: usize,
    target: usize,
}

impl RunState {
    pub fn new(target: usize) -> Self {
        Self { hits: 0, target }
    }

    /// Record one successful extraction. Called exactly once per `Found`.
    pub fn record_hit(&mut self) {
        debug_assert!(self.hits < self.target);
        self.hits += 1;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn remaining(&self) -> usize {
        self.target - self.hits
    }

    pub fn target_reached(&self) -> bool {
        self.hits == self.target
    }
}

/// Why the collection loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The target number of hits was collected.
    TargetReached,
    /// The page cap was hit before the target.
    PageCapReached,
    /// No next-page affordance was left to follow.
    PaginationExhausted,
}

/// Walks listing pages, opens each product in its own tab, extracts the
/// OS version, and stops once the target count of hits is collected.
pub struct CollectionLoop<'a> {
    config: &'a SurveyConfig,
    state: RunState,
    values: Vec<String>,
}

impl<'a> CollectionLoop<'a> {
    pub fn new(config: &'a SurveyConfig) -> Self {
        Self {
            config,
            state: RunState::new(config.target_count),
            values: Vec::with_capacity(config.target_count),
        }
    }

    /// Run the loop to completion and return the extracted values in
    /// encounter order.
    pub async fn run(mut self, session: &Session, listing: &Tab) -> Result<(Vec<String>, StopReason)> {
        let tabs = TabManager::new(session, listing);
        let mut pages_visited = 0usize;

        let reason = 'pages: loop {
            pages_visited += 1;
            // Re-read the DOM every page; element references from a
            // previous listing page are stale after pagination.
            let links = self.collect_product_links(listing).await?;
            info!(page = pages_visited, links = links.len(), "scanning listing page");

            for link in links {
                if self.state.target_reached() {
                    break 'pages StopReason::TargetReached;
                }
                self.visit_product(&tabs, &link).await?;
            }

            if self.state.target_reached() {
                break StopReason::TargetReached;
            }
            if pages_visited >= self.config.max_pages {
                warn!(
                    pages = pages_visited,
                    hits = self.state.hits(),
                    "page cap reached before target; stopping with partial results"
                );
                break StopReason::PageCapReached;
            }
            if !self.next_page(listing).await? {
                warn!(
                    hits = self.state.hits(),
                    "no next page left; stopping with partial results"
                );
                break StopReason::PaginationExhausted;
            }
        };

        Ok((self.values, reason))
    }

    /// Hrefs of every product link on the current listing page.
    async fn collect_product_links(&self, listing: &Tab) -> Result<Vec<String>> {
        let anchors = listing
            .find_all(&self.config.selectors.product_links)
            .await?;
        let mut links = Vec::with_capacity(anchors.len());
        for anchor in anchors {
            if let Some(href) = anchor.attribute("href").await? {
                links.push(href);
            }
        }
        Ok(links)
    }

    /// One full item cycle: open the detail page in a new tab, extract,
    /// record, close the tab, and restore focus to the listing.
    async fn visit_product(&mut self, tabs: &TabManager<'_>, url: &str) -> Result<()> {
        let detail = tabs.open_in_new_tab(url).await?;
        tokio::time::sleep(self.config.pause).await;

        match extract::extract_os(&detail, &self.config.selectors).await? {
            ExtractionResult::Found(version) => {
                self.state.record_hit();
                info!(
                    version,
                    remaining = self.state.remaining(),
                    "operating system found for this product"
                );
                self.values.push(version);
            }
            ExtractionResult::NotFound => {
                debug!(url, "operating system not found for this product, skipping");
            }
        }

        tabs.close_and_return(detail).await?;
        tokio::time::sleep(self.config.pause).await;
        Ok(())
    }

    /// Advance to the next listing page. Returns false when the affordance
    /// is gone, which ends the run cleanly rather than fatally.
    async fn next_page(&self, listing: &Tab) -> Result<bool> {
        let next = match listing.find_one(&self.config.selectors.next_page).await {
            Ok(el) => el,
            Err(_) => return Ok(false),
        };
        next.click().await?;
        tokio::time::sleep(self.config.pause).await;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ExtractionResult::{Found, NotFound};
    use crate::report;

    /// Drive the loop's bookkeeping with a scripted supply of extraction
    /// results, mirroring what `run` does per item and per page.
    fn drive(target: usize, pages: Vec<Vec<ExtractionResult>>) -> (RunState, Vec<String>, usize) {
        let mut state = RunState::new(target);
        let mut values = Vec::new();
        let mut opened = 0usize;

        'pages: for page in pages {
            for result in page {
                if state.target_reached() {
                    break 'pages;
                }
                opened += 1;
                if let Found(v) = result {
                    state.record_hit();
                    values.push(v);
                }
                assert!(state.hits() <= target);
            }
            if state.target_reached() {
                break;
            }
        }
        (state, values, opened)
    }

    #[test]
    fn stops_mid_supply_once_target_reached() {
        // Page 1: two qualifying, one not. Page 2: two qualifying.
        let pages = vec![
            vec![
                Found("Android 12".into()),
                Found("iOS 16".into()),
                NotFound,
            ],
            vec![Found("Android 12".into()), Found("Android 13".into())],
        ];
        let (state, values, opened) = drive(3, pages);

        assert!(state.target_reached());
        assert_eq!(state.hits(), 3);
        // The second link on page 2 is never opened.
        assert_eq!(opened, 4);
        assert_eq!(values, vec!["Android 12", "iOS 16", "Android 12"]);

        let dist = report::distribution(&values);
        assert_eq!(dist.len(), 2);
        assert_eq!(dist[0], ("Android 12".to_string(), 2));
    }

    #[test]
    fn exhausted_supply_leaves_target_unreached() {
        let pages = vec![vec![Found("Android 11".into()), NotFound, NotFound]];
        let (state, values, opened) = drive(3, pages);

        assert!(!state.target_reached());
        assert_eq!(state.hits(), 1);
        assert_eq!(opened, 3);
        assert_eq!(values, vec!["Android 11"]);
    }

    #[test]
    fn hits_never_exceed_target() {
        let pages = vec![vec![Found("A".into()); 10]];
        let (state, _, opened) = drive(4, pages);
        assert_eq!(state.hits(), 4);
        assert_eq!(opened, 4);
    }

    #[test]
    fn zero_remaining_at_target() {
        let mut state = RunState::new(2);
        assert_eq!(state.remaining(), 2);
        state.record_hit();
        state.record_hit();
        assert_eq!(state.remaining(), 0);
        assert!(state.target_reached());
    }
}
