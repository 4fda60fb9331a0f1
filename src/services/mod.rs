//! Service layer: the extraction routines behind both pipelines.
//!
//! - Catalog walking (`CatalogScraper`)
//! - Mars news (`scrape_news`)
//! - Hemisphere images (`scrape_hemispheres`)
//! - Featured image with fallback (`scrape_featured_image`)
//! - Mars/Earth facts merge (`scrape_facts`)

mod catalog;
mod facts;
mod featured;
mod hemispheres;
mod news;

use std::time::Duration;

use crate::browser::Browser;
use crate::error::{AppError, Result};

pub use catalog::{
    CatalogScraper, CatalogSummary, DetailExtraction, MainSection, ProductInfo, extract_detail,
    listing_titles,
};
pub use facts::{merge_tables, parse_two_column_table, scrape_facts};
pub use featured::scrape_featured_image;
pub use hemispheres::{HEMISPHERE_COUNT, scrape_hemispheres};
pub use news::{parse_news, scrape_news};

/// Wait for `selector` on the current page, turning a timeout into a navigation error.
async fn expect_selector<B: Browser + ?Sized>(
    browser: &B,
    selector: &str,
    timeout: Duration,
) -> Result<()> {
    if browser.wait_for_selector(selector, timeout).await {
        Ok(())
    } else {
        Err(AppError::navigation(
            selector,
            format!("not present after {}ms", timeout.as_millis()),
        ))
    }
}
