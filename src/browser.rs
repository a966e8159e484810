use std::time::Duration;

use chromiumoxide::browser::{Browser as CrBrowser, BrowserConfig as CrBrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures::StreamExt;

use crate::config::SurveyConfig;
use crate::error::{Error, Result};
use crate::page::Tab;

/// Chrome flags that improve performance without affecting functionality.
const PERF_ARGS: &[&str] = &[
    "disable-gpu",
    "disable-extensions",
    "metrics-recording-only",
    "mute-audio",
    "no-default-browser-check",
    "disable-client-side-phishing-detection",
    "disable-popup-blocking",
    "disable-prompt-on-repost",
];

/// One browser instance for the lifetime of a survey run.
///
/// The session owns the CDP connection and the event-handler task. It must
/// be released with [`Session::close`] on every exit path; the collection
/// loop never closes the listing tab itself.
pub struct Session {
    browser: CrBrowser,
    wait_timeout: Duration,
    handler_task: tokio::task::JoinHandle<()>,
}

impl Session {
    /// Launch a browser configured for the survey.
    pub async fn launch(config: &SurveyConfig) -> Result<Self> {
        let mut builder = CrBrowserConfig::builder();

        if config.headless {
            builder = builder.new_headless_mode().no_sandbox();
        } else {
            builder = builder.with_head().no_sandbox();
        }

        for arg in PERF_ARGS {
            builder = builder.arg(*arg);
        }

        // chromiumoxide adds the `--` prefix itself, so keys must not include it
        if let Some(ref ua) = config.user_agent {
            builder = builder.arg(("user-agent", ua.as_str()));
        }

        if let Some(ref path) = config.chrome_path {
            builder = builder.chrome_executable(path);
        }

        builder = builder.viewport(Viewport {
            width: config.viewport_width,
            height: config.viewport_height,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        });

        let cr_config = builder
            .build()
            .map_err(|e| Error::Launch(e.to_string()))?;

        let (browser, mut handler) = CrBrowser::launch(cr_config)
            .await
            .map_err(|e| Error::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self {
            browser,
            wait_timeout: config.wait_timeout,
            handler_task,
        })
    }

    /// Open a new tab navigated to the given URL and leave focus on it.
    pub async fn new_tab(&self, url: &str) -> Result<Tab> {
        let cr_page = self
            .browser
            .new_page(url)
            .await
            .map_err(|e| Error::Navigation(e.to_string()))?;
        Ok(Tab::new(cr_page, self.wait_timeout))
    }

    /// Number of tabs currently open in the session.
    pub async fn open_tabs(&self) -> Result<usize> {
        let pages = self.browser.pages().await.map_err(Error::Cdp)?;
        Ok(pages.len())
    }

    /// Shut the browser down and reap the event-handler task.
    ///
    /// Consumes the session so nothing can touch the browser afterwards.
    pub async fn close(mut self) -> Result<()> {
        let closed = self.browser.close().await.map_err(Error::Cdp);
        // Only reap the process after a successful shutdown request;
        // waiting on a browser that refused to close can hang forever.
        if closed.is_ok() {
            let _ = self.browser.wait().await;
        }
        self.handler_task.abort();
        closed.map(|_| ())
    }
}
