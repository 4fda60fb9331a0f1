// src/browser/static_browser.rs

//! A browser over plain documents.
//!
//! Clicking a link resolves the matching anchor's `href` against the current
//! URL and loads that document. Pages never change after loading, so a wait
//! is a single check.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::Html;

use crate::browser::Browser;
use crate::error::{AppError, Result};
use crate::utils::html::{has_match, parse_selector, text_of};
use crate::utils::http::fetch_text;
use crate::utils::resolve;

/// Where a [`StaticBrowser`] gets its documents from.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Documents fetched over HTTP.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        fetch_text(&self.client, url).await
    }
}

/// Documents served from memory, e.g. saved pages replayed offline.
#[derive(Debug, Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page, builder style.
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Every URL requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl PageSource for MemorySource {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::fetch(url, "no such page"))
    }
}

#[derive(Debug, Clone)]
struct Page {
    url: String,
    html: String,
}

/// History-keeping browser over a [`PageSource`].
pub struct StaticBrowser<S> {
    source: S,
    current: Option<Page>,
    history: Vec<Page>,
}

impl<S: PageSource> StaticBrowser<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn page(&self) -> Result<&Page> {
        self.current
            .as_ref()
            .ok_or_else(|| AppError::navigation("browser", "no page loaded"))
    }

    /// Absolute URL of the `nth` anchor whose text contains `text`.
    fn link_by_text(page: &Page, text: &str, nth: usize) -> Result<String> {
        let document = Html::parse_document(&page.html);
        let anchors = parse_selector("a[href]")?;
        let href = document
            .select(&anchors)
            .filter(|a| text_of(*a).contains(text))
            .filter_map(|a| a.value().attr("href"))
            .nth(nth)
            .ok_or_else(|| {
                AppError::navigation(
                    format!("link text '{text}'"),
                    format!("no match #{nth} on {}", page.url),
                )
            })?;
        Ok(resolve(&page.url, href))
    }

    /// Absolute URL of the first anchor whose `href` contains `fragment`.
    fn link_by_href(page: &Page, fragment: &str) -> Result<String> {
        let document = Html::parse_document(&page.html);
        let anchors = parse_selector("a[href]")?;
        let href = document
            .select(&anchors)
            .filter_map(|a| a.value().attr("href"))
            .find(|href| href.contains(fragment))
            .ok_or_else(|| {
                AppError::navigation(
                    format!("link href '{fragment}'"),
                    format!("no match on {}", page.url),
                )
            })?;
        Ok(resolve(&page.url, href))
    }
}

#[async_trait]
impl<S: PageSource> Browser for StaticBrowser<S> {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        let html = self.source.fetch(url).await?;
        log::debug!("Loaded {}", url);
        if let Some(previous) = self.current.take() {
            self.history.push(previous);
        }
        self.current = Some(Page {
            url: url.to_string(),
            html,
        });
        Ok(())
    }

    async fn content(&self) -> Result<String> {
        Ok(self.page()?.html.clone())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.page()?.url.clone())
    }

    async fn click_link_by_partial_text(&mut self, text: &str, nth: usize) -> Result<()> {
        let target = Self::link_by_text(self.page()?, text, nth)?;
        self.navigate(&target).await
    }

    async fn click_link_by_partial_href(&mut self, fragment: &str) -> Result<()> {
        let target = Self::link_by_href(self.page()?, fragment)?;
        self.navigate(&target).await
    }

    async fn wait_for_selector(&self, selector: &str, _timeout: Duration) -> bool {
        match &self.current {
            Some(page) => has_match(&Html::parse_document(&page.html), selector),
            None => false,
        }
    }

    async fn go_back(&mut self) -> Result<()> {
        let previous = self
            .history
            .pop()
            .ok_or_else(|| AppError::navigation("back", "history is empty"))?;
        self.current = Some(previous);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.current = None;
        self.history.clear();
        Ok(())
    }
}
