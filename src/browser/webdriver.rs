// src/browser/webdriver.rs

//! WebDriver-backed browser session.

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;

use crate::browser::Browser;
use crate::error::{AppError, Result};
use crate::models::BrowserConfig;

/// Thin wrapper around a `fantoccini` WebDriver client.
pub struct WebDriverBrowser {
    client: Client,
}

impl WebDriverBrowser {
    /// Connect to a running WebDriver service (chromedriver by default).
    pub async fn connect(config: &BrowserConfig) -> Result<Self> {
        let mut args = vec![json!(format!("--user-agent={}", config.user_agent))];
        if config.headless {
            args.push(json!("--headless"));
            args.push(json!("--disable-gpu"));
        }

        let mut caps = serde_json::Map::new();
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(AppError::driver)?;

        log::info!("Connected to WebDriver at {}", config.webdriver_url);
        Ok(Self { client })
    }
}

/// Quote `s` as an XPath string literal.
fn xpath_literal(s: &str) -> String {
    if !s.contains('\'') {
        format!("'{s}'")
    } else if !s.contains('"') {
        format!("\"{s}\"")
    } else {
        let parts: Vec<String> = s.split('\'').map(|p| format!("'{p}'")).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

/// Quote `s` for use inside a double-quoted CSS attribute value.
fn css_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait]
impl Browser for WebDriverBrowser {
    async fn navigate(&mut self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| AppError::navigation(url, e))
    }

    async fn content(&self) -> Result<String> {
        self.client.source().await.map_err(AppError::driver)
    }

    async fn current_url(&self) -> Result<String> {
        self.client
            .current_url()
            .await
            .map(|u| u.to_string())
            .map_err(AppError::driver)
    }

    async fn click_link_by_partial_text(&mut self, text: &str, nth: usize) -> Result<()> {
        let xpath = format!(
            "//a[contains(normalize-space(.), {})]",
            xpath_literal(text)
        );
        let links = self
            .client
            .find_all(Locator::XPath(&xpath))
            .await
            .map_err(|e| AppError::navigation(format!("link text '{text}'"), e))?;
        let link = links.into_iter().nth(nth).ok_or_else(|| {
            AppError::navigation(format!("link text '{text}'"), format!("no match #{nth}"))
        })?;
        link.click()
            .await
            .map_err(|e| AppError::navigation(format!("link text '{text}'"), e))
    }

    async fn click_link_by_partial_href(&mut self, fragment: &str) -> Result<()> {
        let css = format!("a[href*=\"{}\"]", css_string(fragment));
        let link = self
            .client
            .find(Locator::Css(&css))
            .await
            .map_err(|e| AppError::navigation(format!("link href '{fragment}'"), e))?;
        link.click()
            .await
            .map_err(|e| AppError::navigation(format!("link href '{fragment}'"), e))
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> bool {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .is_ok()
    }

    async fn go_back(&mut self) -> Result<()> {
        self.client
            .back()
            .await
            .map_err(|e| AppError::navigation("back", e))
    }

    async fn close(&mut self) -> Result<()> {
        self.client.clone().close().await.map_err(AppError::driver)
    }
}
