// src/services/news.rs

//! Latest news from the Mars news index.

use std::time::Duration;

use scraper::Html;

use crate::browser::Browser;
use crate::error::Result;
use crate::models::{Field, NewsItem};
use crate::services::expect_selector;
use crate::utils::html::{parse_selector, select_attr, select_text};
use crate::utils::url::resolve_beside;

const ARTICLE: &str = "ul.item_list li.slide";
const TITLE: &str = "div.content_title";
const TEASER: &str = "div.article_teaser_body";
const LINK: &str = "div.content_title a";

/// Up to `n` articles from the news index at `url`.
///
/// `Failed` when the article list never shows up within `wait`.
pub async fn scrape_news<B: Browser + ?Sized>(
    browser: &mut B,
    url: &str,
    n: usize,
    wait: Duration,
) -> Field<Vec<NewsItem>> {
    let html = match load_index(browser, url, wait).await {
        Ok(html) => html,
        Err(e) => {
            log::warn!("News index {} unavailable: {}", url, e);
            return Field::Failed(e.to_string());
        }
    };

    let items = parse_news(&html, url, n);
    if items.len() < n {
        log::warn!("Only {} of {} articles found on {}", items.len(), n, url);
    }
    Field::Found(items)
}

async fn load_index<B: Browser + ?Sized>(browser: &mut B, url: &str, wait: Duration) -> Result<String> {
    browser.navigate(url).await?;
    expect_selector(browser, ARTICLE, wait).await?;
    browser.content().await
}

/// Articles in page order, at most `n`; the list ends at the first incomplete article.
pub fn parse_news(html: &str, index_url: &str, n: usize) -> Vec<NewsItem> {
    let document = Html::parse_document(html);
    let Ok(articles) = parse_selector(ARTICLE) else {
        return Vec::new();
    };

    let mut items = Vec::new();
    for (i, article) in document.select(&articles).take(n).enumerate() {
        let parsed = select_text(article, TITLE).and_then(|title| {
            let summary = select_text(article, TEASER)?;
            let href = select_attr(article, LINK, "href")?;
            Ok(NewsItem {
                title,
                summary,
                link: resolve_beside(index_url, "/news/", &href),
            })
        });

        match parsed {
            Ok(item) => items.push(item),
            Err(e) => {
                log::warn!("Article {} incomplete, stopping: {}", i + 1, e);
                break;
            }
        }
    }
    items
}
