//! Show command: look up one persisted product by SKU.

use crate::config::Config;
use crate::db::SqliteStore;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::info;

/// Loads a stored product and formats it.
pub struct ShowCommand {
    config: Config,
}

impl ShowCommand {
    /// Creates a new show command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Looks up the SKU in the configured database.
    pub async fn execute(&self, sku: &str) -> Result<String> {
        let path = self
            .config
            .database
            .as_ref()
            .context("No database configured; pass --database or set MAETO_DATABASE")?;

        info!("Loading product {} from {}", sku, path.display());

        let store = SqliteStore::open(path).await.context("Failed to open product database")?;

        let product = store
            .get(sku)
            .await?
            .with_context(|| format!("No product with SKU {}", sku))?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(&product))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ProductSink;
    use crate::maeto::{Product, Specifications};
    use tempfile::TempDir;

    fn make_config(database: std::path::PathBuf) -> Config {
        Config { database: Some(database), ..Config::default() }
    }

    #[tokio::test]
    async fn test_show_existing_product() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("products.db");

        let store = SqliteStore::open(&db_path).await.unwrap();
        let mut specs = Specifications::new();
        specs.insert("Potência", "750 W");
        store
            .upsert(&Product {
                sku: "MAE-1001".to_string(),
                title: "Furadeira de Impacto 750W".to_string(),
                price: 1234.56,
                price_pix: 1172.83,
                price_installments: 123.46,
                installments_count: 10,
                specifications: specs,
                url: None,
            })
            .await
            .unwrap();

        let cmd = ShowCommand::new(make_config(db_path));
        let output = cmd.execute("MAE-1001").await.unwrap();

        assert!(output.contains("MAE-1001"));
        assert!(output.contains("Furadeira"));
        assert!(output.contains("Potência: 750 W"));
    }

    #[tokio::test]
    async fn test_show_missing_product() {
        let dir = TempDir::new().unwrap();
        let db_path = dir.path().join("products.db");

        // Create an empty database
        SqliteStore::open(&db_path).await.unwrap();

        let cmd = ShowCommand::new(make_config(db_path));
        let err = cmd.execute("MAE-NONE").await.unwrap_err().to_string();
        assert!(err.contains("MAE-NONE"));
    }

    #[tokio::test]
    async fn test_show_without_database() {
        let cmd = ShowCommand::new(Config::default());
        let err = cmd.execute("MAE-1").await.unwrap_err().to_string();
        assert!(err.contains("No database configured"));
    }
}
