//! Output formatting for products (table, JSON, CSV).

use crate::config::OutputFormat;
use crate::maeto::Product;

/// Formats products for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(product),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                OutputFormat::Table => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_products(products),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    // JSON formatting

    fn json_single(&self, product: &Product) -> String {
        serde_json::to_string_pretty(product).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_products(&self, products: &[Product]) -> String {
        serde_json::to_string_pretty(products).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("SKU:          {}", product.sku));
        lines.push(format!("Title:        {}", product.title));

        if let Some(url) = &product.url {
            lines.push(format!("URL:          {}", url));
        }

        lines.push(format!("Price:        R$ {:.2}", product.price));
        lines.push(format!("Pix:          R$ {:.2}", product.price_pix));
        lines.push(format!(
            "Installments: {}x R$ {:.2}",
            product.installments_count, product.price_installments
        ));

        if !product.specifications.is_empty() {
            lines.push("Specifications:".to_string());
            for (name, value) in product.specifications.iter() {
                lines.push(format!("  {}: {}", name, value));
            }
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let sku_width = 12;
        let price_width = 10;
        let parcel_width = 14;
        let title_width = 50;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<sku_width$}  {:<price_width$}  {:<price_width$}  {:<parcel_width$}  {}",
            "SKU", "Price", "Pix", "Installments", "Title"
        ));
        lines.push(format!(
            "{:-<sku_width$}  {:-<price_width$}  {:-<price_width$}  {:-<parcel_width$}  {:-<title_width$}",
            "", "", "", "", ""
        ));

        // Rows
        for product in products {
            let parcel_str = if product.installments_count > 0 {
                format!("{}x {:.2}", product.installments_count, product.price_installments)
            } else {
                "-".to_string()
            };

            let title = if product.title.len() > title_width {
                format!("{}...", &product.title[..title_width - 3])
            } else {
                product.title.clone()
            };

            lines.push(format!(
                "{:<sku_width$}  {:>price_width$.2}  {:>price_width$.2}  {:<parcel_width$}  {}",
                product.sku, product.price, product.price_pix, parcel_str, title
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "sku,title,price,price_pix,price_installments,installments_count,url".to_string()
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for product in products {
            let title = Self::csv_escape(&product.title);
            let url = product.url.as_deref().unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{},{},{}",
                product.sku,
                title,
                product.price,
                product.price_pix,
                product.price_installments,
                product.installments_count,
                url
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
