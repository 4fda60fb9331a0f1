//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Browser session settings
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Book catalog walk settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Mars sources and rendering
    #[serde(default)]
    pub mars: MarsConfig,

    /// Snapshot persistence
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.browser.user_agent.trim().is_empty() {
            return Err(AppError::validation("browser.user_agent is empty"));
        }
        if self.browser.timeout_secs == 0 {
            return Err(AppError::validation("browser.timeout_secs must be > 0"));
        }
        if self.browser.wait_timeout_ms == 0 {
            return Err(AppError::validation("browser.wait_timeout_ms must be > 0"));
        }
        if self.mars.n_articles == 0 {
            return Err(AppError::validation("mars.n_articles must be > 0"));
        }
        if self.mars.table_classes.trim().is_empty() {
            return Err(AppError::validation("mars.table_classes is empty"));
        }
        if self.catalog.next_link_text.trim().is_empty() {
            return Err(AppError::validation("catalog.next_link_text is empty"));
        }

        let urls = [
            ("browser.webdriver_url", &self.browser.webdriver_url),
            ("catalog.start_url", &self.catalog.start_url),
            ("mars.news_url", &self.mars.news_url),
            ("mars.hemisphere_url", &self.mars.hemisphere_url),
            ("mars.image_url", &self.mars.image_url),
            ("mars.image_origin", &self.mars.image_origin),
            ("mars.facts_url", &self.mars.facts_url),
        ];
        for (name, value) in urls {
            url::Url::parse(value)
                .map_err(|e| AppError::validation(format!("{name} is not a valid URL: {e}")))?;
        }
        Ok(())
    }
}

/// Which browser session backs a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Plain HTTP fetches with link following over parsed documents
    #[default]
    Static,
    /// A real browser behind a WebDriver endpoint
    Webdriver,
}

/// Browser session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub driver: DriverKind,

    /// WebDriver endpoint (chromedriver listens on 9515)
    #[serde(default = "defaults::webdriver_url")]
    pub webdriver_url: String,

    #[serde(default = "defaults::headless")]
    pub headless: bool,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Budget for a single element wait in milliseconds
    #[serde(default = "defaults::wait_timeout")]
    pub wait_timeout_ms: u64,
}

impl BrowserConfig {
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            webdriver_url: defaults::webdriver_url(),
            headless: defaults::headless(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            wait_timeout_ms: defaults::wait_timeout(),
        }
    }
}

/// How the catalog output file is opened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OpenMode {
    #[default]
    Append,
    Truncate,
}

/// Book catalog walk settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// First listing page
    #[serde(default = "defaults::catalog_url")]
    pub start_url: String,

    /// Delimited output file
    #[serde(default = "defaults::catalog_output")]
    pub output_path: String,

    #[serde(default)]
    pub open_mode: OpenMode,

    /// Link text of the pagination control
    #[serde(default = "defaults::next_link_text")]
    pub next_link_text: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            start_url: defaults::catalog_url(),
            output_path: defaults::catalog_output(),
            open_mode: OpenMode::default(),
            next_link_text: defaults::next_link_text(),
        }
    }
}

/// Mars sources and rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarsConfig {
    #[serde(default = "defaults::news_url")]
    pub news_url: String,

    /// Number of news articles to keep
    #[serde(default = "defaults::n_articles")]
    pub n_articles: usize,

    #[serde(default = "defaults::hemisphere_url")]
    pub hemisphere_url: String,

    #[serde(default = "defaults::image_url")]
    pub image_url: String,

    /// Origin prefixed to the featured image path
    #[serde(default = "defaults::image_origin")]
    pub image_origin: String,

    /// Base URL; the tables live under `mars/` and `earth/`
    #[serde(default = "defaults::facts_url")]
    pub facts_url: String,

    /// Classes that replace the default table class token
    #[serde(default = "defaults::table_classes")]
    pub table_classes: String,
}

impl Default for MarsConfig {
    fn default() -> Self {
        Self {
            news_url: defaults::news_url(),
            n_articles: defaults::n_articles(),
            hemisphere_url: defaults::hemisphere_url(),
            image_url: defaults::image_url(),
            image_origin: defaults::image_origin(),
            facts_url: defaults::facts_url(),
            table_classes: defaults::table_classes(),
        }
    }
}

/// How a new snapshot relates to the stored ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PersistencePolicy {
    /// Overwrite the single current document
    #[default]
    Replace,
    /// Keep every snapshot; the newest one is current
    History,
}

/// Snapshot persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "defaults::store_dir")]
    pub dir: String,

    #[serde(default)]
    pub policy: PersistencePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: defaults::store_dir(),
            policy: PersistencePolicy::default(),
        }
    }
}

mod defaults {
    // Browser defaults
    pub fn webdriver_url() -> String {
        "http://localhost:9515".into()
    }
    pub fn headless() -> bool {
        true
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; walkscrape/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn wait_timeout() -> u64 {
        1000
    }

    // Catalog defaults
    pub fn catalog_url() -> String {
        "https://books.toscrape.com/".into()
    }
    pub fn catalog_output() -> String {
        "book_data.csv".into()
    }
    pub fn next_link_text() -> String {
        "next".into()
    }

    // Mars defaults
    pub fn news_url() -> String {
        "https://mars.nasa.gov/news/".into()
    }
    pub fn n_articles() -> usize {
        3
    }
    pub fn hemisphere_url() -> String {
        "https://astrogeology.usgs.gov/search/results?q=hemisphere+enhanced&k1=target&v1=Mars"
            .into()
    }
    pub fn image_url() -> String {
        "https://www.jpl.nasa.gov/images?search=&category=Mars".into()
    }
    pub fn image_origin() -> String {
        "https://www.jpl.nasa.gov".into()
    }
    pub fn facts_url() -> String {
        "https://space-facts.com/".into()
    }
    pub fn table_classes() -> String {
        "table table-striped table-bordered".into()
    }

    // Store defaults
    pub fn store_dir() -> String {
        "storage".into()
    }
}
