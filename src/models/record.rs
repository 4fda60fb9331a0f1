//! Catalog record data structure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::Field;

/// Column order of the catalog output file.
pub const CATALOG_HEADER: [&str; 9] = [
    "identifier",
    "title",
    "category",
    "price",
    "rating",
    "review_count",
    "availability",
    "available_qty",
    "url",
];

/// Star rating as encoded by the catalog's word-class token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::One => "One",
            Rating::Two => "Two",
            Rating::Three => "Three",
            Rating::Four => "Four",
            Rating::Five => "Five",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "One" => Ok(Rating::One),
            "Two" => Ok(Rating::Two),
            "Three" => Ok(Rating::Three),
            "Four" => Ok(Rating::Four),
            "Five" => Ok(Rating::Five),
            other => Err(AppError::parse("rating", format!("unknown token '{other}'"))),
        }
    }
}

/// Stock status with the quantity in parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub status: String,
    /// `Absent` without a parenthesis segment, `Failed` when it holds no number
    pub quantity: Field<u32>,
}

impl Availability {
    /// Parse text of the form `Status (N available)`.
    ///
    /// Out-of-stock text has no parenthesis segment, so its quantity is
    /// `Absent`. A segment that does not start with a number is `Failed`.
    pub fn parse(text: &str) -> Self {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        match text.split_once('(') {
            Some((status, rest)) => {
                let token = rest.split_whitespace().next().unwrap_or_default();
                Self {
                    status: status.trim().to_string(),
                    quantity: token
                        .parse::<u32>()
                        .map_err(|e| AppError::parse("available quantity", format!("'{token}': {e}")))
                        .into(),
                }
            }
            None => Self {
                status: text.trim().to_string(),
                quantity: Field::Absent,
            },
        }
    }
}

/// One catalog item, built once per detail page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogRecord {
    /// Unique product code
    pub identifier: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    /// Price with the currency symbol stripped
    pub price: Option<f64>,
    pub rating: Option<Rating>,
    pub review_count: Option<u32>,
    pub availability: Option<String>,
    /// Absent when the status carries no quantity
    pub available_qty: Option<u32>,
    /// Absolute URL of the detail page
    pub url: String,
}

impl CatalogRecord {
    /// Render the record as output cells in `CATALOG_HEADER` order.
    pub fn to_row(&self) -> [String; 9] {
        fn opt<T: ToString>(v: &Option<T>) -> String {
            v.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        [
            opt(&self.identifier),
            opt(&self.title),
            opt(&self.category),
            self.price.map(|p| format!("{p:.2}")).unwrap_or_default(),
            opt(&self.rating),
            opt(&self.review_count),
            opt(&self.availability),
            opt(&self.available_qty),
            self.url.clone(),
        ]
    }
}
