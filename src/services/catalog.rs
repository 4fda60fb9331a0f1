// src/services/catalog.rs

//! Book catalog walker.
//!
//! Visits every listing page, follows each item's detail link by its display
//! name, extracts a [`CatalogRecord`] and streams it to a sink.

use scraper::Html;

use crate::browser::Browser;
use crate::error::{AppError, Result};
use crate::models::{Availability, CatalogRecord, Field, Rating};
use crate::storage::RecordSink;
use crate::utils::html::{parse_selector, select_first, select_text, text_of};
use crate::utils::url::is_page_indexed;

const LISTING_TITLE: &str = "article.product_pod h3 a";
const BREADCRUMB: &str = "ul.breadcrumb li";
const PRODUCT_MAIN: &str = "div.product_main";
const AVAILABILITY: &str = "div.product_main p.availability";
const INFO_TABLE: &str = "table";
const INFO_CELL: &str = "td";
const LINK: &str = "a[href]";

/// Title, price and rating from the main product section.
#[derive(Debug, Clone, PartialEq)]
pub struct MainSection {
    pub title: String,
    pub price: f64,
    pub rating: Rating,
}

/// Identifier and review count from the product information table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInfo {
    pub identifier: String,
    pub review_count: u32,
}

/// Independently extracted field groups of one detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailExtraction {
    pub category: Field<String>,
    pub main: Field<MainSection>,
    pub stock: Field<Availability>,
    pub info: Field<ProductInfo>,
}

impl DetailExtraction {
    /// Names and reasons of the groups that failed.
    pub fn failures(&self) -> Vec<(&'static str, &str)> {
        let groups: [(&'static str, Option<&str>); 4] = [
            ("category", failure(&self.category)),
            ("main", failure(&self.main)),
            ("stock", failure(&self.stock)),
            ("info", failure(&self.info)),
        ];
        let quantity = self.stock.value().and_then(|s| failure(&s.quantity));
        groups
            .into_iter()
            .chain([("quantity", quantity)])
            .filter_map(|(name, reason)| reason.map(|r| (name, r)))
            .collect()
    }

    pub fn into_record(self, url: impl Into<String>) -> CatalogRecord {
        let main = self.main.into_option();
        let stock = self.stock.into_option();
        let info = self.info.into_option();

        CatalogRecord {
            identifier: info.as_ref().map(|i| i.identifier.clone()),
            title: main.as_ref().map(|m| m.title.clone()),
            category: self.category.into_option(),
            price: main.as_ref().map(|m| m.price),
            rating: main.as_ref().map(|m| m.rating),
            review_count: info.as_ref().map(|i| i.review_count),
            availability: stock.as_ref().map(|s| s.status.clone()),
            available_qty: stock.and_then(|s| s.quantity.into_option()),
            url: url.into(),
        }
    }
}

fn failure<T>(field: &Field<T>) -> Option<&str> {
    match field {
        Field::Failed(reason) => Some(reason.as_str()),
        _ => None,
    }
}

/// Display names of the items on a listing page, in page order.
pub fn listing_titles(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = parse_selector(LISTING_TITLE) else {
        return Vec::new();
    };
    document
        .select(&selector)
        .map(text_of)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Whether the page has a link whose text contains `text`.
fn has_link_text(html: &str, text: &str) -> bool {
    let document = Html::parse_document(html);
    let Ok(selector) = parse_selector(LINK) else {
        return false;
    };
    document.select(&selector).any(|a| text_of(a).contains(text))
}

/// Extract every field group of a detail page; groups never affect each other.
pub fn extract_detail(html: &str) -> DetailExtraction {
    let document = Html::parse_document(html);
    DetailExtraction {
        category: extract_category(&document).into(),
        main: extract_main(&document).into(),
        stock: extract_stock(&document).into(),
        info: extract_info(&document).into(),
    }
}

fn extract_category(document: &Html) -> Result<String> {
    let crumbs = parse_selector(BREADCRUMB)?;
    let third = document
        .select(&crumbs)
        .nth(2)
        .ok_or_else(|| AppError::parse(BREADCRUMB, "fewer than 3 entries"))?;
    select_text(third, "a")
}

fn extract_main(document: &Html) -> Result<MainSection> {
    let main = select_first(document.root_element(), PRODUCT_MAIN)?;

    let title = select_text(main, "h1")?;
    let price = parse_price(&select_text(main, "p.price_color")?)?;

    let rating_el = select_first(main, "p.star-rating")?;
    let token = rating_el
        .value()
        .classes()
        .find(|c| *c != "star-rating")
        .ok_or_else(|| AppError::parse("p.star-rating", "no rating class"))?;

    Ok(MainSection {
        title,
        price,
        rating: token.parse()?,
    })
}

fn extract_stock(document: &Html) -> Result<Availability> {
    let text = select_text(document.root_element(), AVAILABILITY)?;
    Ok(Availability::parse(&text))
}

fn extract_info(document: &Html) -> Result<ProductInfo> {
    let table = select_first(document.root_element(), INFO_TABLE)?;
    let cells = parse_selector(INFO_CELL)?;
    let values: Vec<String> = table.select(&cells).map(text_of).collect();
    let (first, last) = values
        .first()
        .zip(values.last())
        .ok_or_else(|| AppError::parse(INFO_CELL, "no cells"))?;

    let review_count = last
        .parse()
        .map_err(|e| AppError::parse("review count", format!("'{last}': {e}")))?;

    Ok(ProductInfo {
        identifier: first.clone(),
        review_count,
    })
}

/// Strip the leading currency symbol and parse the amount.
fn parse_price(text: &str) -> Result<f64> {
    let amount = text.trim_start_matches(|c: char| !c.is_ascii_digit());
    amount
        .parse()
        .map_err(|e| AppError::parse("price", format!("'{text}': {e}")))
}

/// Summary of a catalog walk.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub pages: usize,
    pub items_seen: usize,
    pub records_written: usize,
    pub items_skipped: usize,
    pub failed_groups: usize,
}

/// Walks the catalog through a browser session.
pub struct CatalogScraper<'a, B: Browser + ?Sized> {
    browser: &'a mut B,
    next_link_text: String,
}

impl<'a, B: Browser + ?Sized> CatalogScraper<'a, B> {
    pub fn new(browser: &'a mut B, next_link_text: impl Into<String>) -> Self {
        Self {
            browser,
            next_link_text: next_link_text.into(),
        }
    }

    /// Walk every listing page from `start_url`, writing records as they are built.
    pub async fn run(&mut self, start_url: &str, sink: &mut dyn RecordSink) -> Result<CatalogSummary> {
        let mut summary = CatalogSummary::default();
        self.browser.navigate(start_url).await?;

        loop {
            summary.pages += 1;
            let listing_url = self.browser.current_url().await?;
            let titles = listing_titles(&self.browser.content().await?);
            log::info!(
                "Page {} ({}): {} items",
                summary.pages,
                listing_url,
                titles.len()
            );

            for title in &titles {
                summary.items_seen += 1;
                self.visit_item(summary.items_seen, title, &listing_url, sink, &mut summary)
                    .await?;
            }

            if !has_link_text(&self.browser.content().await?, &self.next_link_text) {
                log::debug!("No further pages after {}", listing_url);
                break;
            }
            if let Err(e) = self
                .browser
                .click_link_by_partial_text(&self.next_link_text, 0)
                .await
            {
                log::warn!("Next page after {} could not be loaded: {}", listing_url, e);
                break;
            }
        }

        Ok(summary)
    }

    async fn visit_item(
        &mut self,
        index: usize,
        title: &str,
        listing_url: &str,
        sink: &mut dyn RecordSink,
        summary: &mut CatalogSummary,
    ) -> Result<()> {
        log::info!("{} {}", index, title);

        if let Err(e) = self.browser.click_link_by_partial_text(title, 0).await {
            log::warn!("Item {} '{}' not found: {}", index, title, e);
            summary.items_skipped += 1;
            return Ok(());
        }

        let url = self.browser.current_url().await?;
        let detail = extract_detail(&self.browser.content().await?);
        for (group, reason) in detail.failures() {
            log::warn!("Item {} '{}': {} group failed: {}", index, title, group, reason);
            summary.failed_groups += 1;
        }

        sink.write_record(&detail.into_record(url.clone()))?;
        summary.records_written += 1;

        if !is_page_indexed(&url) {
            if let Err(e) = self.browser.go_back().await {
                log::warn!("Back from item {} failed, reloading {}: {}", index, listing_url, e);
                self.browser.navigate(listing_url).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{MemorySource, StaticBrowser};
    use async_trait::async_trait;
    use std::time::Duration;
    use crate::testing::{self, CATALOG_START, attic, velvet, detail_page, listing_page};

    #[test]
    fn test_listing_titles_in_page_order() {
        let html = listing_page(&[testing::attic(), testing::velvet()], Some("page-2.html"));
        assert_eq!(
            listing_titles(&html),
            vec!["A Light in the ...", "Tipping the Velvet"]
        );
    }

    #[test]
    fn test_extract_detail_all_groups() {
        let detail = extract_detail(&detail_page(&attic()));
        assert!(detail.failures().is_empty());

        let record = detail.into_record("https://books.test/a/index.html");
        assert_eq!(record.identifier.as_deref(), Some("a897fe39b1053632"));
        assert_eq!(record.title.as_deref(), Some("A Light in the Attic"));
        assert_eq!(record.category.as_deref(), Some("Poetry"));
        assert_eq!(record.price, Some(51.77));
        assert_eq!(record.rating, Some(Rating::Three));
        assert_eq!(record.review_count, Some(0));
        assert_eq!(record.availability.as_deref(), Some("In stock"));
        assert_eq!(record.available_qty, Some(22));
    }

    #[test]
    fn test_missing_breadcrumb_keeps_other_groups() {
        let html = detail_page(&attic()).replace("breadcrumb", "crumbs");
        let detail = extract_detail(&html);

        assert!(detail.category.is_failed());
        assert!(detail.main.value().is_some());
        assert!(detail.stock.value().is_some());
        assert!(detail.info.value().is_some());
        assert_eq!(detail.failures().len(), 1);
        assert_eq!(detail.failures()[0].0, "category");
    }

    #[test]
    fn test_bad_rating_fails_main_only() {
        let html = detail_page(&attic()).replace("star-rating Three", "star-rating Lots");
        let detail = extract_detail(&html);

        assert!(detail.main.is_failed());
        assert_eq!(detail.category, Field::Found("Poetry".to_string()));
        assert!(detail.stock.value().is_some());

        let record = detail.into_record("u");
        assert_eq!(record.title, None);
        assert_eq!(record.price, None);
        assert_eq!(record.available_qty, Some(22));
    }

    #[test]
    fn test_stock_without_quantity() {
        let detail = extract_detail(&detail_page(&testing::velvet()));
        let stock = detail.stock.value().unwrap();
        assert_eq!(stock.status, "In stock");
        assert_eq!(stock.quantity, Field::Absent);
        assert!(detail.failures().is_empty());
    }

    #[test]
    fn test_malformed_quantity_is_a_failed_group() {
        let book = testing::Book {
            availability: "In stock (many available)",
            ..attic()
        };
        let detail = extract_detail(&detail_page(&book));

        let stock = detail.stock.value().unwrap();
        assert_eq!(stock.status, "In stock");
        assert!(stock.quantity.is_failed());

        let failures = detail.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, "quantity");

        let record = detail.into_record("u");
        assert_eq!(record.availability.as_deref(), Some("In stock"));
        assert_eq!(record.available_qty, None);
    }

    #[test]
    fn test_info_reads_first_table_only() {
        let html = detail_page(&attic()).replace(
            "</body>",
            "<table><tr><th>Shipping</th><td>Free</td></tr></table></body>",
        );
        let detail = extract_detail(&html);

        assert_eq!(
            detail.info,
            Field::Found(ProductInfo {
                identifier: "a897fe39b1053632".to_string(),
                review_count: 0,
            })
        );
        assert!(detail.failures().is_empty());
    }

    #[tokio::test]
    async fn test_walk_emits_matched_items_across_pages() {
        let mut browser = testing::browser(testing::catalog_source());
        let mut records: Vec<CatalogRecord> = Vec::new();

        let summary = CatalogScraper::new(&mut browser, "next")
            .run(CATALOG_START, &mut records)
            .await
            .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.items_seen, 4);
        assert_eq!(summary.records_written, 3);
        assert_eq!(summary.items_skipped, 1);
        assert_eq!(summary.failed_groups, 0);

        let titles: Vec<_> = records.iter().filter_map(|r| r.title.clone()).collect();
        assert_eq!(
            titles,
            vec![
                "A Light in the Attic",
                "Tipping the Velvet",
                "Sharp Objects, Vol. 1"
            ]
        );
        assert_eq!(
            records[2].url,
            "https://books.test/catalogue/sharp-objects_997/index.html"
        );
    }

    #[tokio::test]
    async fn test_single_page_without_next_stops() {
        let source = MemorySource::new()
            .with_page(CATALOG_START, listing_page(&[attic()], None))
            .with_page(
                "https://books.test/catalogue/a-light-in-the-attic_1000/index.html",
                detail_page(&attic()),
            );
        let mut browser = testing::browser(source);
        let mut records: Vec<CatalogRecord> = Vec::new();

        let summary = CatalogScraper::new(&mut browser, "next")
            .run(CATALOG_START, &mut records)
            .await
            .unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(
            browser.source().requests(),
            vec![
                CATALOG_START.to_string(),
                "https://books.test/catalogue/a-light-in-the-attic_1000/index.html".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_next_page_ends_walk() {
        let source = MemorySource::new()
            .with_page(
                CATALOG_START,
                listing_page(&[attic()], Some("catalogue/page-2.html")),
            )
            .with_page(
                "https://books.test/catalogue/a-light-in-the-attic_1000/index.html",
                detail_page(&attic()),
            );
        let mut browser = testing::browser(source);
        let mut records: Vec<CatalogRecord> = Vec::new();

        let summary = CatalogScraper::new(&mut browser, "next")
            .run(CATALOG_START, &mut records)
            .await
            .unwrap();

        assert_eq!(summary.pages, 1);
        assert_eq!(records.len(), 1);
        assert_eq!(
            browser.source().requests().last().map(String::as_str),
            Some("https://books.test/catalogue/page-2.html")
        );
    }

    /// Static session whose back navigation always fails.
    struct NoHistory(StaticBrowser<MemorySource>);

    #[async_trait]
    impl Browser for NoHistory {
        async fn navigate(&mut self, url: &str) -> Result<()> {
            self.0.navigate(url).await
        }

        async fn content(&self) -> Result<String> {
            self.0.content().await
        }

        async fn current_url(&self) -> Result<String> {
            self.0.current_url().await
        }

        async fn click_link_by_partial_text(&mut self, text: &str, nth: usize) -> Result<()> {
            self.0.click_link_by_partial_text(text, nth).await
        }

        async fn click_link_by_partial_href(&mut self, fragment: &str) -> Result<()> {
            self.0.click_link_by_partial_href(fragment).await
        }

        async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> bool {
            self.0.wait_for_selector(selector, timeout).await
        }

        async fn go_back(&mut self) -> Result<()> {
            Err(AppError::navigation("back", "session lost its history"))
        }

        async fn close(&mut self) -> Result<()> {
            self.0.close().await
        }
    }

    #[tokio::test]
    async fn test_failed_back_reloads_listing() {
        let source = MemorySource::new()
            .with_page(CATALOG_START, listing_page(&[attic(), velvet()], None))
            .with_page(
                "https://books.test/catalogue/a-light-in-the-attic_1000/index.html",
                detail_page(&attic()),
            )
            .with_page(
                "https://books.test/catalogue/tipping-the-velvet_999/index.html",
                detail_page(&velvet()),
            );
        let mut browser = NoHistory(testing::browser(source));
        let mut records: Vec<CatalogRecord> = Vec::new();

        let summary = CatalogScraper::new(&mut browser, "next")
            .run(CATALOG_START, &mut records)
            .await
            .unwrap();

        assert_eq!(summary.records_written, 2);
        assert_eq!(summary.items_skipped, 0);
        assert_eq!(
            browser.0.source().requests(),
            vec![
                CATALOG_START.to_string(),
                "https://books.test/catalogue/a-light-in-the-attic_1000/index.html".to_string(),
                CATALOG_START.to_string(),
                "https://books.test/catalogue/tipping-the-velvet_999/index.html".to_string(),
                CATALOG_START.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_page_indexed_detail_skips_back_navigation() {
        let first = testing::Book {
            href: "catalogue/page-9.html",
            ..attic()
        };
        let second = testing::velvet();
        let source = MemorySource::new()
            .with_page(CATALOG_START, listing_page(&[first, second], None))
            .with_page("https://books.test/catalogue/page-9.html", detail_page(&attic()));
        let mut browser = testing::browser(source);
        let mut records: Vec<CatalogRecord> = Vec::new();

        let summary = CatalogScraper::new(&mut browser, "next")
            .run(CATALOG_START, &mut records)
            .await
            .unwrap();

        // Still on the detail page, so the second title cannot be found.
        assert_eq!(summary.records_written, 1);
        assert_eq!(summary.items_skipped, 1);
        assert_eq!(
            browser.current_url().await.unwrap(),
            "https://books.test/catalogue/page-9.html"
        );
    }
}
