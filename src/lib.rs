//! maeto-crawler - Product scraper CLI for Loja Maeto
//!
//! Walks paginated search results, extracts product listings and their
//! specification tables, and streams normalized records to the consumer.

pub mod commands;
pub mod config;
pub mod db;
pub mod format;
pub mod maeto;

pub use config::Config;
pub use maeto::models::{Listing, Product, Specifications};
pub use maeto::scraper::Scraper;
