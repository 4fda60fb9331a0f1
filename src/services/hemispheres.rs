// src/services/hemispheres.rs

//! Full-resolution images of the four Mars hemispheres.

use std::time::Duration;

use scraper::Html;

use crate::browser::Browser;
use crate::error::{AppError, Result};
use crate::models::Hemisphere;
use crate::services::expect_selector;
use crate::utils::html::{select_attr, select_text};
use crate::utils::resolve;

/// Number of hemispheres the search page is expected to list.
pub const HEMISPHERE_COUNT: usize = 4;

const RESULT_LINK: &str = "div.description a.product-item";
const LINK_TEXT: &str = "Hemisphere Enhanced";
const TITLE: &str = "section.metadata h2.title";
const DOWNLOAD: &str = "div.downloads a";

/// Walk each hemisphere's detail page from the search results at `search_url`.
///
/// All four entries, in search order, or `None` if any step fails.
pub async fn scrape_hemispheres<B: Browser + ?Sized>(
    browser: &mut B,
    search_url: &str,
    wait: Duration,
) -> Option<Vec<Hemisphere>> {
    let mut hemispheres = Vec::with_capacity(HEMISPHERE_COUNT);

    for i in 0..HEMISPHERE_COUNT {
        match visit(browser, search_url, i, wait).await {
            Ok(hemisphere) => {
                log::debug!("Hemisphere {}: {}", i + 1, hemisphere.name);
                hemispheres.push(hemisphere);
            }
            Err(e) => {
                log::warn!("Hemisphere {} failed: {}", i + 1, e);
                return None;
            }
        }
    }

    Some(hemispheres)
}

/// Re-open the search page, follow the `index`th result and read its detail page.
async fn visit<B: Browser + ?Sized>(
    browser: &mut B,
    search_url: &str,
    index: usize,
    wait: Duration,
) -> Result<Hemisphere> {
    browser.navigate(search_url).await?;
    expect_selector(browser, RESULT_LINK, wait).await?;
    browser.click_link_by_partial_text(LINK_TEXT, index).await?;
    expect_selector(browser, DOWNLOAD, wait).await?;

    let url = browser.current_url().await?;
    parse_detail(&browser.content().await?, &url)
}

fn parse_detail(html: &str, page_url: &str) -> Result<Hemisphere> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let title = select_text(root, TITLE)?;
    let name = title
        .split_once(" Hemisphere")
        .map(|(name, _)| name.to_string())
        .unwrap_or(title);
    if name.is_empty() {
        return Err(AppError::parse(TITLE, "empty hemisphere name"));
    }

    let href = select_attr(root, DOWNLOAD, "href")?;
    Ok(Hemisphere {
        name,
        image_url: resolve(page_url, &href),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::MemorySource;
    use crate::testing::{self, HEMI_URL, hemisphere_names, with_hemispheres};

    const WAIT: Duration = Duration::from_millis(10);

    #[test]
    fn test_parse_detail_strips_suffix() {
        let html = r#"<div class="downloads"><a href="https://img.test/full.jpg">Sample</a></div>
            <section class="block metadata"><h2 class="title">Syrtis Major Hemisphere Enhanced</h2></section>"#;
        let hemisphere = parse_detail(html, "https://hemi.test/x").unwrap();
        assert_eq!(hemisphere.name, "Syrtis Major");
        assert_eq!(hemisphere.image_url, "https://img.test/full.jpg");
    }

    #[tokio::test]
    async fn test_four_aligned_entries() {
        let mut browser = testing::browser(with_hemispheres(MemorySource::new(), 4));

        let hemispheres = scrape_hemispheres(&mut browser, HEMI_URL, WAIT).await.unwrap();
        assert_eq!(hemispheres.len(), HEMISPHERE_COUNT);

        let names: Vec<_> = hemispheres.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, hemisphere_names());
        assert_eq!(
            hemispheres[3].image_url,
            "https://hemi.test/cache/images/valles_marineris_enhanced.tif_full.jpg"
        );

        // Search page is re-visited before every click
        let visits = browser
            .source()
            .requests()
            .iter()
            .filter(|u| u.as_str() == HEMI_URL)
            .count();
        assert_eq!(visits, 4);
    }

    #[tokio::test]
    async fn test_fewer_results_yield_none() {
        let mut browser = testing::browser(with_hemispheres(MemorySource::new(), 3));
        assert!(scrape_hemispheres(&mut browser, HEMI_URL, WAIT).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_detail_yields_none() {
        let source = with_hemispheres(MemorySource::new(), 4).with_page(
            "https://hemi.test/search/map/Mars/Viking/cerberus_enhanced",
            "<html><body>gone</body></html>",
        );
        let mut browser = testing::browser(source);
        assert!(scrape_hemispheres(&mut browser, HEMI_URL, WAIT).await.is_none());
    }
}
