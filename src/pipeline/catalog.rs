// src/pipeline/catalog.rs

//! Catalog walking pipeline.

use chrono::Utc;

use crate::browser::Browser;
use crate::error::Result;
use crate::models::Config;
use crate::services::{CatalogScraper, CatalogSummary};
use crate::storage::CsvSink;

/// Walk the catalog from the configured start page into the configured CSV file.
pub async fn run_catalog(config: &Config, browser: &mut dyn Browser) -> Result<CatalogSummary> {
    let start_time = Utc::now();
    let catalog = &config.catalog;
    log::info!("Catalog walk starting at {}", catalog.start_url);

    let mut sink = CsvSink::open(&catalog.output_path, catalog.open_mode)?;
    let summary = CatalogScraper::new(browser, catalog.next_link_text.as_str())
        .run(&catalog.start_url, &mut sink)
        .await?;

    let elapsed = Utc::now() - start_time;
    log::info!(
        "Catalog complete: {} records from {} pages written to {} ({} skipped, {} failed groups, {}s)",
        summary.records_written,
        summary.pages,
        catalog.output_path,
        summary.items_skipped,
        summary.failed_groups,
        elapsed.num_seconds()
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OpenMode;
    use crate::testing::{self, CATALOG_START};
    use tempfile::TempDir;

    fn config(output: &std::path::Path, open_mode: OpenMode) -> Config {
        let mut config = Config::default();
        config.catalog.start_url = CATALOG_START.to_string();
        config.catalog.output_path = output.to_string_lossy().to_string();
        config.catalog.open_mode = open_mode;
        config
    }

    #[tokio::test]
    async fn test_catalog_run_writes_csv() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("book_data.csv");
        let config = config(&output, OpenMode::Truncate);
        let mut browser = testing::browser(testing::catalog_source());

        let summary = run_catalog(&config, &mut browser).await.unwrap();
        assert_eq!(summary.records_written, 3);

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("identifier,title,"));
        assert_eq!(
            lines[1],
            "a897fe39b1053632,A Light in the Attic,Poetry,51.77,Three,0,In stock,22,https://books.test/catalogue/a-light-in-the-attic_1000/index.html"
        );
        assert!(lines[3].contains("\"Sharp Objects, Vol. 1\""));
    }

    #[tokio::test]
    async fn test_rerun_produces_identical_rows() {
        let tmp = TempDir::new().unwrap();
        let output = tmp.path().join("book_data.csv");
        let config = config(&output, OpenMode::Append);

        for _ in 0..2 {
            let mut browser = testing::browser(testing::catalog_source());
            run_catalog(&config, &mut browser).await.unwrap();
        }

        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[1..4], lines[4..7]);
    }
}
