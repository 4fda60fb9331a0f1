// src/lib.rs

//! walkscrape: browser-driven catalog and Mars snapshot scrapers

pub mod browser;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;

#[cfg(test)]
mod testing;
