//! Mars snapshot data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Class token emitted on a freshly rendered facts table.
pub const DEFAULT_TABLE_CLASS: &str = "dataframe";

/// A news article teaser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
    /// Absolute link to the article
    pub link: String,
}

/// A hemisphere name with its full-resolution image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hemisphere {
    pub name: String,
    pub image_url: String,
}

/// One joined facts row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactRow {
    pub description: String,
    pub mars: String,
    pub earth: String,
}

/// Mars and Earth facts keyed by description label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactsTable {
    pub rows: Vec<FactRow>,
}

impl FactsTable {
    /// Render as an HTML table with the description as an unnamed index column.
    pub fn to_html(&self) -> String {
        let mut html = format!("<table border=\"1\" class=\"{DEFAULT_TABLE_CLASS}\">\n");
        html.push_str("  <thead>\n");
        html.push_str("    <tr style=\"text-align: right;\">\n");
        html.push_str("      <th></th>\n");
        html.push_str("      <th>Mars</th>\n");
        html.push_str("      <th>Earth</th>\n");
        html.push_str("    </tr>\n");
        html.push_str("  </thead>\n");
        html.push_str("  <tbody>\n");
        for row in &self.rows {
            html.push_str("    <tr>\n");
            html.push_str(&format!(
                "      <th>{}</th>\n",
                html_escape::encode_text(&row.description)
            ));
            html.push_str(&format!(
                "      <td>{}</td>\n",
                html_escape::encode_text(&row.mars)
            ));
            html.push_str(&format!(
                "      <td>{}</td>\n",
                html_escape::encode_text(&row.earth)
            ));
            html.push_str("    </tr>\n");
        }
        html.push_str("  </tbody>\n");
        html.push_str("</table>");
        html
    }

    /// Render and swap the default class token for `classes`.
    pub fn to_themed_html(&self, classes: &str) -> String {
        let classes = html_escape::encode_double_quoted_attribute(classes);
        self.to_html().replacen(
            &format!("class=\"{DEFAULT_TABLE_CLASS}\""),
            &format!("class=\"{classes}\""),
            1,
        )
    }
}

/// Everything gathered by one Mars run.
#[derive(Debug, Clone, PartialEq)]
pub struct MarsSnapshot {
    pub news: Vec<NewsItem>,
    /// Exactly four entries, or `None` when the walk failed
    pub hemispheres: Option<Vec<Hemisphere>>,
    pub featured_image: Option<String>,
    /// Display-ready facts table markup
    pub facts: Option<String>,
    pub last_modified: DateTime<Utc>,
}

/// Flat document shape used for persistence and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarsDocument {
    pub news_titles: Vec<String>,
    pub news_summaries: Vec<String>,
    pub news_links: Vec<String>,
    pub hemisphere_names: Option<Vec<String>>,
    pub hemisphere_images: Option<Vec<String>>,
    pub featured_image: Option<String>,
    pub facts: Option<String>,
    pub last_modified: DateTime<Utc>,
}

impl From<&MarsSnapshot> for MarsDocument {
    fn from(snapshot: &MarsSnapshot) -> Self {
        let news = &snapshot.news;
        let hemispheres = snapshot.hemispheres.as_ref();

        Self {
            news_titles: news.iter().map(|n| n.title.clone()).collect(),
            news_summaries: news.iter().map(|n| n.summary.clone()).collect(),
            news_links: news.iter().map(|n| n.link.clone()).collect(),
            hemisphere_names: hemispheres.map(|h| h.iter().map(|h| h.name.clone()).collect()),
            hemisphere_images: hemispheres
                .map(|h| h.iter().map(|h| h.image_url.clone()).collect()),
            featured_image: snapshot.featured_image.clone(),
            facts: snapshot.facts.clone(),
            last_modified: snapshot.last_modified,
        }
    }
}
