//! HTML parser for search-results pages and product detail pages.

use crate::maeto::models::{Listing, Specifications};
use crate::maeto::selectors::{detail, listing};
use crate::maeto::text::{parse_installment_count, parse_locale_price};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Parser for Loja Maeto HTML pages.
pub struct Parser {
    base_url: String,
}

impl Parser {
    /// Creates a new parser; relative detail links resolve against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    /// Parses a search-results page into listing candidates, in document
    /// order. Blocks missing a SKU or title are dropped and logged; one bad
    /// block never aborts the page.
    pub fn parse_search(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);

        let mut listings = Vec::new();
        for element in document.select(&listing::ITEM) {
            if let Some(candidate) = self.parse_listing(element) {
                listings.push(candidate);
            }
        }

        debug!("parsed {} listings from page", listings.len());
        listings
    }

    /// Parses a single listing block.
    fn parse_listing(&self, element: ElementRef) -> Option<Listing> {
        let sku = element
            .select(&listing::PRODUCT)
            .next()
            .and_then(|e| e.value().attr(listing::SKU_ATTR))
            .map(str::to_string);

        let Some(sku) = sku.filter(|s| !s.is_empty()) else {
            warn!("listing block without a SKU attribute, dropping");
            return None;
        };

        let title = element
            .select(&listing::TITLE_LINK)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string());

        let Some(title) = title.filter(|t| !t.is_empty()) else {
            warn!("listing {} without a title, dropping", sku);
            return None;
        };

        let url = element
            .select(&listing::TITLE_LINK)
            .next()
            .and_then(|e| e.value().attr("href"))
            .map(|href| self.absolute_url(href));

        Some(Listing {
            sku,
            title,
            price: self.select_price(element, &listing::PRICE),
            price_pix: self.select_price(element, &listing::PRICE_PIX),
            price_installments: self.select_price(element, &listing::INSTALLMENTS_AMOUNT),
            installments_count: self.select_installments(element),
            url,
        })
    }

    /// Extracts and normalizes a price text node; missing markup reads as 0.0.
    fn select_price(&self, element: ElementRef, selector: &Selector) -> f64 {
        element
            .select(selector)
            .next()
            .map(|e| parse_locale_price(&e.text().collect::<String>()))
            .unwrap_or(0.0)
    }

    fn select_installments(&self, element: ElementRef) -> u32 {
        element
            .select(&listing::INSTALLMENTS_NUMBER)
            .next()
            .map(|e| parse_installment_count(&e.text().collect::<String>()))
            .unwrap_or(0)
    }

    /// Resolves a site-relative path against the base origin.
    fn absolute_url(&self, href: &str) -> String {
        if href.starts_with('/') {
            format!("{}{}", self.base_url, href)
        } else {
            href.to_string()
        }
    }

    /// Parses a detail page's specification table into an ordered mapping.
    ///
    /// A missing table yields an empty mapping; rows missing either cell, or
    /// with an empty trimmed text on either side, are skipped.
    pub fn parse_specifications(&self, html: &str) -> Specifications {
        let document = Html::parse_document(html);

        let mut specs = Specifications::new();
        let Some(table) = document.select(&detail::SPECS_TABLE).next() else {
            debug!("detail page has no specification table");
            return specs;
        };

        for row in table.select(&detail::ROW) {
            let Some(name_cell) = row.select(&detail::NAME_CELL).next() else {
                continue;
            };
            let Some(value_cell) = row.select(&detail::VALUE_CELL).next() else {
                continue;
            };

            let name = name_cell.text().collect::<String>().trim().to_string();
            let value = value_cell.text().collect::<String>().trim().to_string();
            if !name.is_empty() && !value.is_empty() {
                specs.insert(name, value);
            }
        }

        specs
    }
}
