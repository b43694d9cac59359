//! Loja Maeto-specific modules for HTTP client, parsing, and data models.

pub mod client;
pub mod models;
pub mod parser;
pub mod scraper;
pub mod selectors;
pub mod text;

pub use client::{MaetoClient, MaetoSearch};
pub use models::{Listing, Product, Specifications};
pub use parser::Parser;
pub use scraper::Scraper;
