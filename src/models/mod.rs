// src/models/mod.rs

//! Domain models for the scraper application.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod field;
mod record;
mod snapshot;

// Re-export all public types
pub use config::{
    BrowserConfig, CatalogConfig, Config, DriverKind, MarsConfig, OpenMode, PersistencePolicy,
    StoreConfig,
};
pub use field::Field;
pub use record::{Availability, CATALOG_HEADER, CatalogRecord, Rating};
pub use snapshot::{
    DEFAULT_TABLE_CLASS, FactRow, FactsTable, Hemisphere, MarsDocument, MarsSnapshot, NewsItem,
};
