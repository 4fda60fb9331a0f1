//! Browser session abstraction consumed by the pipelines.
//!
//! The pipelines only ever talk to a [`Browser`]; how a link is followed
//! (a real click in a WebDriver session, or resolving an `href` over a
//! fetched document) is up to the implementation.
//!
//! - [`StaticBrowser`]: history-keeping browser over plain documents
//! - `WebDriverBrowser` (feature `webdriver`): a real browser via `fantoccini`

mod static_browser;
#[cfg(feature = "webdriver")]
mod webdriver;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BrowserConfig, DriverKind};

pub use static_browser::{HttpSource, MemorySource, PageSource, StaticBrowser};
#[cfg(feature = "webdriver")]
pub use webdriver::WebDriverBrowser;

/// Start the session selected by `config.driver`.
///
/// The static session fetches pages with `client`.
pub async fn open(config: &BrowserConfig, client: &reqwest::Client) -> Result<Box<dyn Browser>> {
    match config.driver {
        DriverKind::Static => {
            log::debug!("Using static browser session");
            Ok(Box::new(StaticBrowser::new(HttpSource::new(client.clone()))))
        }
        #[cfg(feature = "webdriver")]
        DriverKind::Webdriver => Ok(Box::new(WebDriverBrowser::connect(config).await?)),
        #[cfg(not(feature = "webdriver"))]
        DriverKind::Webdriver => Err(crate::error::AppError::config(
            "webdriver sessions need the `webdriver` feature",
        )),
    }
}

/// Capability a pipeline needs from a browser session.
#[async_trait]
pub trait Browser: Send {
    /// Load `url` as the current page.
    async fn navigate(&mut self, url: &str) -> Result<()>;

    /// Markup of the current page.
    async fn content(&self) -> Result<String>;

    /// URL of the current page.
    async fn current_url(&self) -> Result<String>;

    /// Follow the `nth` link whose text contains `text`.
    async fn click_link_by_partial_text(&mut self, text: &str, nth: usize) -> Result<()>;

    /// Follow the first link whose `href` contains `fragment`.
    async fn click_link_by_partial_href(&mut self, fragment: &str) -> Result<()>;

    /// Wait up to `timeout` for `selector` to match; `false` when it never does.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> bool;

    /// Return to the previous page.
    async fn go_back(&mut self) -> Result<()>;

    /// End the session.
    async fn close(&mut self) -> Result<()>;
}
