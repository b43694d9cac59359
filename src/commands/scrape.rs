//! Scrape command implementation.

use crate::config::Config;
use crate::db::{ProductSink, SqliteStore};
use crate::format::Formatter;
use crate::maeto::{MaetoClient, MaetoSearch, Product, Scraper};
use anyhow::{Context, Result};
use futures::{pin_mut, StreamExt};
use tracing::{debug, info};

/// Executes a product scrape for a search query.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the scrape and returns formatted output.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let client = MaetoClient::new(&self.config).context("Failed to create HTTP client")?;

        let store = match &self.config.database {
            Some(path) => {
                Some(SqliteStore::open(path).await.context("Failed to open product database")?)
            }
            None => None,
        };

        self.execute_with_client(&client, store.as_ref().map(|s| s as &dyn ProductSink), query)
            .await
    }

    /// Runs the scrape with a provided client and sink (for testing).
    pub async fn execute_with_client(
        &self,
        client: &impl MaetoSearch,
        sink: Option<&dyn ProductSink>,
        query: &str,
    ) -> Result<String> {
        info!("Scraping products for: {}", query);

        let scraper = Scraper::new(client);
        let stream = scraper.products(query);
        pin_mut!(stream);

        let mut products: Vec<Product> = Vec::new();
        while let Some(product) = stream.next().await {
            debug!("Collected product {} ({})", product.sku, product.title);

            if let Some(sink) = sink {
                sink.upsert(&product)
                    .await
                    .with_context(|| format!("Failed to persist product {}", product.sku))?;
            }

            products.push(product);
            if self.config.max_products > 0 && products.len() >= self.config.max_products {
                debug!("Reached limit of {} products, stopping", self.config.max_products);
                break;
            }
        }

        info!("Collected {} products", products.len());

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}
