use std::time::Duration;

use crate::error::{Error, Result};

/// Selectors and visible-text labels the survey uses to find its way
/// around the catalog. The defaults match the target site's current markup.
#[derive(Clone)]
pub struct Selectors {
    /// Product link anchors on a listing page.
    pub product_links: String,
    /// The "next page" affordance on a listing page.
    pub next_page: String,
    /// The characteristics block on a detail page.
    pub characteristics: String,
    /// Visible text of the consent/refresh button on the landing page.
    pub consent_text: String,
    /// Visible text of the top-level category link.
    pub category_text: String,
    /// Visible text of the subcategory link.
    pub subcategory_text: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            product_links: "#paginatorContent > div > div > div > div > div > a".into(),
            next_page: "#paginatorContent a[aria-label='Next page']".into(),
            characteristics: "#section-characteristics".into(),
            consent_text: "Refresh".into(),
            category_text: "Electronics".into(),
            subcategory_text: "Smartphones".into(),
        }
    }
}

pub struct SurveyConfig {
    /// Stop once this many detail pages yielded an OS version.
    pub target_count: usize,
    /// Upper bound for every wait-until-present poll.
    pub wait_timeout: Duration,
    /// Fixed pause after every navigation, click, and tab operation.
    pub pause: Duration,
    /// Hard cap on listing pages visited before giving up on the target.
    pub max_pages: usize,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub chrome_path: Option<String>,
    /// User-agent passed to the browser at launch; picked by the rotation
    /// strategy when None.
    pub user_agent: Option<String>,
    /// Catalog landing page.
    pub base_url: String,
    /// Query string injected into the listing URL to force sort order.
    pub sort_query: String,
    /// URL hit by the warm-up fetch before the browser run.
    pub warmup_url: String,
    pub report_path: String,
    pub records_path: String,
    pub selectors: Selectors,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            target_count: 100,
            wait_timeout: Duration::from_secs(15),
            pause: Duration::from_secs(3),
            max_pages: 50,
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            chrome_path: None,
            user_agent: None,
            base_url: "https://www.ozon.ru".into(),
            sort_query: "sorting=rating".into(),
            warmup_url: "https://google.com".into(),
            report_path: "os_distribution.txt".into(),
            records_path: "results.json".into(),
            selectors: Selectors::default(),
        }
    }
}

impl SurveyConfig {
    pub fn builder() -> SurveyBuilder {
        SurveyBuilder::new()
    }

    /// The numeric knobs only make sense when positive.
    pub fn validate(&self) -> Result<()> {
        if self.target_count == 0 {
            return Err(Error::Config("target_count must be positive".into()));
        }
        if self.wait_timeout.is_zero() {
            return Err(Error::Config("wait_timeout must be positive".into()));
        }
        if self.pause.is_zero() {
            return Err(Error::Config("pause must be positive".into()));
        }
        if self.max_pages == 0 {
            return Err(Error::Config("max_pages must be positive".into()));
        }
        Ok(())
    }
}

pub struct SurveyBuilder {
    config: SurveyConfig,
}

impl SurveyBuilder {
    pub fn new() -> Self {
        Self {
            config: SurveyConfig::default(),
        }
    }

    pub fn target_count(mut self, count: usize) -> Self {
        self.config.target_count = count;
        self
    }

    pub fn wait_timeout(mut self, timeout: Duration) -> Self {
        self.config.wait_timeout = timeout;
        self
    }

    pub fn pause(mut self, pause: Duration) -> Self {
        self.config.pause = pause;
        self
    }

    pub fn max_pages(mut self, pages: usize) -> Self {
        self.config.max_pages = pages;
        self
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.config.viewport_width = width;
        self.config.viewport_height = height;
        self
    }

    pub fn chrome_path(mut self, path: impl Into<String>) -> Self {
        self.config.chrome_path = Some(path.into());
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = Some(ua.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn sort_query(mut self, query: impl Into<String>) -> Self {
        self.config.sort_query = query.into();
        self
    }

    pub fn report_path(mut self, path: impl Into<String>) -> Self {
        self.config.report_path = path.into();
        self
    }

    pub fn records_path(mut self, path: impl Into<String>) -> Self {
        self.config.records_path = path.into();
        self
    }

    pub fn selectors(mut self, selectors: Selectors) -> Self {
        self.config.selectors = selectors;
        self
    }

    pub fn build(self) -> SurveyConfig {
        self.config
    }
}

impl Default for SurveyBuilder {
    fn default() -> Self {
        Self::new()
    }
}
