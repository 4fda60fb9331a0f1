// src/utils/html.rs

//! HTML query helpers shared by the extractors.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};

/// Parse a CSS selector, mapping failures into `AppError::Selector`.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Collected text of an element with whitespace runs collapsed.
pub fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First element under `root` matching `selector`, or a parse error naming it.
pub fn select_first<'a>(root: ElementRef<'a>, selector: &str) -> Result<ElementRef<'a>> {
    let sel = parse_selector(selector)?;
    root.select(&sel)
        .next()
        .ok_or_else(|| AppError::parse(selector, "element not found"))
}

/// Collapsed text of the first element matching `selector`.
pub fn select_text(root: ElementRef<'_>, selector: &str) -> Result<String> {
    select_first(root, selector).map(text_of)
}

/// Attribute value of the first element matching `selector`.
pub fn select_attr(root: ElementRef<'_>, selector: &str, attr: &str) -> Result<String> {
    let element = select_first(root, selector)?;
    element
        .value()
        .attr(attr)
        .map(str::to_string)
        .ok_or_else(|| AppError::parse(selector, format!("missing attribute '{attr}'")))
}

/// Whether any element in the document matches `selector`.
pub fn has_match(document: &Html, selector: &str) -> bool {
    parse_selector(selector)
        .map(|sel| document.select(&sel).next().is_some())
        .unwrap_or(false)
}
