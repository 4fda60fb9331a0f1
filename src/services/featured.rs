// src/services/featured.rs

//! Featured image resolution with a single fallback.

use std::time::Duration;

use scraper::Html;

use crate::browser::Browser;
use crate::error::Result;
use crate::services::expect_selector;
use crate::utils::html::select_attr;
use crate::utils::url::with_origin;

const FULL_IMAGE_BUTTON: &str = "a#full_image";
const FULL_IMAGE_TEXT: &str = "FULL IMAGE";
const MORE_INFO_BUTTON: &str = "div.buttons a.button";
const MORE_INFO_TEXT: &str = "more info";
const FIGURE_IMAGE: &str = "figure.lede a img";

const FIRST_RESULT: &str = "section a.group";
const RESULT_HREF: &str = "images/";
const BASE_IMAGE: &str = "img.BaseImage";

/// Absolute URL of the featured image on the gallery at `url`.
///
/// Tries the slideshow path first; if any step fails, reads the first
/// search result instead. `None` when both fail.
pub async fn scrape_featured_image<B: Browser + ?Sized>(
    browser: &mut B,
    url: &str,
    origin: &str,
    wait: Duration,
) -> Option<String> {
    match via_slideshow(browser, url, origin, wait).await {
        Ok(image) => return Some(image),
        Err(e) => log::warn!("Featured image path failed, using first result: {}", e),
    }

    match via_first_result(browser, url, wait).await {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("First image result failed: {}", e);
            None
        }
    }
}

/// Full image button, then "more info", then the figure image.
async fn via_slideshow<B: Browser + ?Sized>(
    browser: &mut B,
    url: &str,
    origin: &str,
    wait: Duration,
) -> Result<String> {
    browser.navigate(url).await?;
    expect_selector(browser, FULL_IMAGE_BUTTON, wait).await?;
    browser.click_link_by_partial_text(FULL_IMAGE_TEXT, 0).await?;

    expect_selector(browser, MORE_INFO_BUTTON, wait).await?;
    browser.click_link_by_partial_text(MORE_INFO_TEXT, 0).await?;

    expect_selector(browser, FIGURE_IMAGE, wait).await?;
    let src = image_src(&browser.content().await?, FIGURE_IMAGE)?;
    Ok(with_origin(origin, &src))
}

/// First image search result; its `src` is already absolute.
async fn via_first_result<B: Browser + ?Sized>(
    browser: &mut B,
    url: &str,
    wait: Duration,
) -> Result<String> {
    browser.navigate(url).await?;
    expect_selector(browser, FIRST_RESULT, wait).await?;
    browser.click_link_by_partial_href(RESULT_HREF).await?;

    expect_selector(browser, BASE_IMAGE, wait).await?;
    image_src(&browser.content().await?, BASE_IMAGE)
}

fn image_src(html: &str, selector: &str) -> Result<String> {
    let document = Html::parse_document(html);
    select_attr(document.root_element(), selector, "src")
}
