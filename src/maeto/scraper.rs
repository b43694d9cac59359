//! Pagination driver: walks search pages and yields products as a lazy stream.

use crate::maeto::client::MaetoSearch;
use crate::maeto::models::{Product, Specifications};
use crate::maeto::parser::Parser;
use async_stream::stream;
use futures::Stream;
use tracing::{debug, warn};

/// Drives paginated scraping over an injected transport.
pub struct Scraper<C> {
    client: C,
    parser: Parser,
}

impl<C: MaetoSearch> Scraper<C> {
    /// Creates a scraper over the given client.
    pub fn new(client: C) -> Self {
        let parser = Parser::new(client.base_url());
        Self { client, parser }
    }

    /// Returns a lazy stream of products for the query.
    ///
    /// Pages are fetched in order starting at 1; each valid listing is
    /// hydrated with its detail-page specifications before being yielded.
    /// The stream ends when a page yields no listing blocks or when a
    /// search-page fetch fails (logged, not surfaced). Dropping the stream
    /// early fetches no further pages.
    pub fn products<'a>(&'a self, query: &'a str) -> impl Stream<Item = Product> + 'a {
        stream! {
            let mut page: u32 = 1;
            loop {
                let html = match self.client.search(query, page).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!("search page {} failed, stopping: {:#}", page, e);
                        break;
                    }
                };

                let listings = self.parser.parse_search(&html);
                if listings.is_empty() {
                    debug!("page {} has no listings, pagination complete", page);
                    break;
                }

                for listing in listings {
                    let specifications = match &listing.url {
                        Some(url) => self.fetch_specifications(url).await,
                        None => Specifications::new(),
                    };
                    yield listing.into_product(specifications);
                }

                page += 1;
            }
        }
    }

    /// Fetches and parses a detail page; a failed fetch reads as an empty
    /// table and never aborts the pass.
    async fn fetch_specifications(&self, url: &str) -> Specifications {
        match self.client.page(url).await {
            Ok(html) => self.parser.parse_specifications(&html),
            Err(e) => {
                warn!("failed to fetch specifications from {}: {:#}", url, e);
                Specifications::new()
            }
        }
    }
}
