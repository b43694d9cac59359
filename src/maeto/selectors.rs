//! CSS selectors for Loja Maeto HTML parsing.
//!
//! All selectors used for parsing the site live here. Update this file when
//! the site changes its markup.

use scraper::Selector;
use std::sync::LazyLock;

/// Selectors for search-results pages.
pub mod listing {
    use super::*;

    /// One listing block per product.
    pub static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.item").unwrap());

    /// Container carrying the SKU attribute.
    pub static PRODUCT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.product").unwrap());

    /// SKU attribute on the product container.
    pub static SKU_ATTR: &str = "data-sku";

    /// Title link; its text is the title, its href the detail page.
    pub static TITLE_LINK: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("h4.product-list-name a").unwrap());

    /// Regular price text.
    pub static PRICE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.price span.to-price").unwrap());

    /// Pix payment price text.
    pub static PRICE_PIX: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.cash-payment-container span.to-price").unwrap());

    /// Per-installment amount text.
    pub static INSTALLMENTS_AMOUNT: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.product-parcel span.installments-amount").unwrap());

    /// Installment count text.
    pub static INSTALLMENTS_NUMBER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("div.product-parcel span.installments-number").unwrap());
}

/// Selectors for product detail pages.
pub mod detail {
    use super::*;

    /// Specification table.
    pub static SPECS_TABLE: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("table#product-description-table-attributes").unwrap());

    /// Specification table row.
    pub static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());

    /// Attribute name cell.
    pub static NAME_CELL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.attribute-name").unwrap());

    /// Attribute value cell.
    pub static VALUE_CELL: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("td.attribute-value span").unwrap());
}
