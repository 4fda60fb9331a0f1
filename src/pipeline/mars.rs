// src/pipeline/mars.rs

//! Mars snapshot pipeline.
//!
//! The four routines run one after another against one browser session;
//! each one degrades to an empty value on failure instead of ending the run.

use chrono::Utc;
use reqwest::Client;

use crate::browser::Browser;
use crate::error::Result;
use crate::models::{Config, MarsDocument, MarsSnapshot};
use crate::services::{scrape_facts, scrape_featured_image, scrape_hemispheres, scrape_news};
use crate::storage::{SnapshotStore, WriteMetadata};

/// Gather a snapshot of every Mars source.
pub async fn scrape_all(browser: &mut dyn Browser, client: &Client, config: &Config) -> MarsSnapshot {
    let mars = &config.mars;
    let wait = config.browser.wait_timeout();
    let last_modified = Utc::now();

    log::info!("Scraping news from {}", mars.news_url);
    let news = scrape_news(browser, &mars.news_url, mars.n_articles, wait)
        .await
        .into_option()
        .unwrap_or_default();

    log::info!("Scraping hemispheres from {}", mars.hemisphere_url);
    let hemispheres = scrape_hemispheres(browser, &mars.hemisphere_url, wait).await;

    log::info!("Scraping featured image from {}", mars.image_url);
    let featured_image =
        scrape_featured_image(browser, &mars.image_url, &mars.image_origin, wait).await;

    log::info!("Scraping facts from {}", mars.facts_url);
    let facts = scrape_facts(client, &mars.facts_url, &mars.table_classes).await;

    log::info!("Scraping complete at {}", last_modified.to_rfc3339());

    MarsSnapshot {
        news,
        hemispheres,
        featured_image,
        facts,
        last_modified,
    }
}

/// Gather a snapshot and persist it through `store`.
pub async fn run_mars(
    config: &Config,
    browser: &mut dyn Browser,
    client: &Client,
    store: &dyn SnapshotStore,
) -> Result<WriteMetadata> {
    let snapshot = scrape_all(browser, client, config).await;
    log::info!(
        "Snapshot: {} articles, {} hemispheres, featured image {}, facts {}",
        snapshot.news.len(),
        snapshot.hemispheres.as_ref().map_or(0, Vec::len),
        if snapshot.featured_image.is_some() { "found" } else { "missing" },
        if snapshot.facts.is_some() { "found" } else { "missing" },
    );

    let metadata = store.save(&MarsDocument::from(&snapshot)).await?;
    log::info!("Stored snapshot at {} ({:?})", metadata.location, metadata.policy);

    Ok(metadata)
}
