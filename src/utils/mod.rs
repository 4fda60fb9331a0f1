//! Utility functions and helpers.

pub mod html;
pub mod http;
pub mod url;

pub use url::resolve;
