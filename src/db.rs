//! SQLite persistence for scraped products.

use crate::maeto::models::Product;
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::Path;
use tracing::debug;

/// Capability consumed by the orchestration layer: store one product,
/// keyed by SKU. Test doubles implement this alongside [`SqliteStore`].
#[async_trait]
pub trait ProductSink: Send + Sync {
    /// Inserts the product, or overwrites the row with the same SKU.
    async fn upsert(&self, product: &Product) -> Result<()>;
}

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS products (
        sku TEXT PRIMARY KEY,
        product_title TEXT NOT NULL,
        price REAL NOT NULL,
        price_pix REAL NOT NULL,
        price_installments REAL NOT NULL,
        installments_count INTEGER NOT NULL,
        specifications TEXT NOT NULL
    )
";

/// Product store backed by a local SQLite file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (and creates, if needed) the database file and its schema.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening product database: {}", path.display());

        let options = SqliteConnectOptions::new().filename(path).create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        sqlx::query(SCHEMA)
            .execute(&pool)
            .await
            .context("Failed to create products table")?;

        Ok(Self { pool })
    }

    /// Loads one product by SKU. The detail URL is not persisted and reads
    /// back as `None`.
    pub async fn get(&self, sku: &str) -> Result<Option<Product>> {
        let row = sqlx::query(
            r"
            SELECT sku, product_title, price, price_pix, price_installments,
                   installments_count, specifications
            FROM products WHERE sku = ?
            ",
        )
        .bind(sku)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Failed to load product {}", sku))?;

        row.map(|row| {
            let specifications = serde_json::from_str(&row.try_get::<String, _>("specifications")?)
                .context("Malformed specifications column")?;
            Ok(Product {
                sku: row.try_get("sku")?,
                title: row.try_get("product_title")?,
                price: row.try_get("price")?,
                price_pix: row.try_get("price_pix")?,
                price_installments: row.try_get("price_installments")?,
                installments_count: row.try_get::<i64, _>("installments_count")? as u32,
                specifications,
                url: None,
            })
        })
        .transpose()
    }

    /// Number of stored products.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM products")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count products")?;
        Ok(row.try_get("n")?)
    }
}

#[async_trait]
impl ProductSink for SqliteStore {
    async fn upsert(&self, product: &Product) -> Result<()> {
        let specifications = serde_json::to_string(&product.specifications)
            .context("Failed to serialize specifications")?;

        sqlx::query(
            r"
            INSERT OR REPLACE INTO products
            (sku, product_title, price, price_pix, price_installments,
             installments_count, specifications)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(&product.sku)
        .bind(&product.title)
        .bind(product.price)
        .bind(product.price_pix)
        .bind(product.price_installments)
        .bind(product.installments_count as i64)
        .bind(specifications)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Failed to upsert product {}", product.sku))?;

        Ok(())
    }
}
