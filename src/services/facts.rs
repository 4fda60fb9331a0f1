// src/services/facts.rs

//! Mars and Earth facts, joined on their description label.

use reqwest::Client;
use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{FactRow, FactsTable};
use crate::utils::html::{parse_selector, select_first, text_of};
use crate::utils::http::fetch_text;
use crate::utils::resolve;

const ROW: &str = "tbody tr";
const CELL: &str = "th, td";

/// Fetch both planets' tables under `base_url` and render the joined table
/// with `classes` as its class list.
///
/// Any fetch or parse failure yields `None`; no partial table is produced.
pub async fn scrape_facts(client: &Client, base_url: &str, classes: &str) -> Option<String> {
    match fetch_facts(client, base_url).await {
        Ok(table) => {
            log::debug!("Facts table has {} rows", table.rows.len());
            Some(table.to_themed_html(classes))
        }
        Err(e) => {
            log::warn!("Facts merge aborted: {}", e);
            None
        }
    }
}

async fn fetch_facts(client: &Client, base_url: &str) -> Result<FactsTable> {
    let mars_url = resolve(base_url, "mars/");
    let mars = parse_two_column_table(&fetch_text(client, &mars_url).await?)
        .map_err(|e| AppError::parse(mars_url.as_str(), e))?;

    let earth_url = resolve(base_url, "earth/");
    let earth = parse_two_column_table(&fetch_text(client, &earth_url).await?)
        .map_err(|e| AppError::parse(earth_url.as_str(), e))?;

    Ok(merge_tables(&mars, &earth))
}

/// `(label, value)` rows of the first table in `html`.
pub fn parse_two_column_table(html: &str) -> Result<Vec<(String, String)>> {
    let document = Html::parse_document(html);
    let table = select_first(document.root_element(), "table")?;
    let rows = parse_selector(ROW)?;
    let cells = parse_selector(CELL)?;

    let mut pairs = Vec::new();
    for (i, row) in table.select(&rows).enumerate() {
        let values: Vec<String> = row.select(&cells).map(text_of).collect();
        match values.as_slice() {
            [] => continue,
            [label, value] => pairs.push((label.clone(), value.clone())),
            other => {
                return Err(AppError::parse(
                    format!("table row {}", i + 1),
                    format!("expected 2 cells, found {}", other.len()),
                ));
            }
        }
    }
    Ok(pairs)
}

/// Inner join on the label, in Mars order; labels found in only one table are dropped.
pub fn merge_tables(mars: &[(String, String)], earth: &[(String, String)]) -> FactsTable {
    let rows = mars
        .iter()
        .flat_map(|(label, mars_value)| {
            earth
                .iter()
                .filter(move |(other, _)| other == label)
                .map(move |(_, earth_value)| FactRow {
                    description: label.clone(),
                    mars: mars_value.clone(),
                    earth: earth_value.clone(),
                })
        })
        .collect();
    FactsTable { rows }
}
