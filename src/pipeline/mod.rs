//! Pipeline entry points.
//!
//! - `run_catalog`: Walk the book catalog into a CSV file
//! - `run_mars`: Gather one Mars snapshot and persist it

pub mod catalog;
pub mod mars;

pub use catalog::run_catalog;
pub use mars::{run_mars, scrape_all};
