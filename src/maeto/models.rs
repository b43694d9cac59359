//! Data models for Loja Maeto products and their specification tables.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A product collected from the search results, optionally enriched with
/// the specification table from its detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product code (persistence key)
    pub sku: String,
    /// Product title
    pub title: String,
    /// Regular price
    pub price: f64,
    /// Price for Pix payment
    pub price_pix: f64,
    /// Per-installment price
    pub price_installments: f64,
    /// Number of installments offered
    pub installments_count: u32,
    /// Attribute table from the detail page, in document order
    pub specifications: Specifications,
    /// Absolute detail-page URL if the listing carried one
    pub url: Option<String>,
}

/// A candidate record parsed from one listing block on a search page.
///
/// Carries everything except the specification table, which requires a
/// separate detail-page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub sku: String,
    pub title: String,
    pub price: f64,
    pub price_pix: f64,
    pub price_installments: f64,
    pub installments_count: u32,
    pub url: Option<String>,
}

impl Listing {
    /// Builds the final product record from this listing and its
    /// (possibly empty) specification table.
    pub fn into_product(self, specifications: Specifications) -> Product {
        Product {
            sku: self.sku,
            title: self.title,
            price: self.price,
            price_pix: self.price_pix,
            price_installments: self.price_installments,
            installments_count: self.installments_count,
            specifications,
            url: self.url,
        }
    }
}

/// Ordered attribute name/value mapping from a product's specification table.
///
/// Keys are unique; inserting an existing key overwrites its value.
/// Serializes as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Specifications(Vec<(String, String)>);

impl Specifications {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an attribute; an existing key keeps its position but takes
    /// the new value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    /// Looks up an attribute value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no attributes were extracted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Specifications {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut specs = Self::new();
        for (name, value) in iter {
            specs.insert(name, value);
        }
        specs
    }
}

impl Serialize for Specifications {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Specifications {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecsVisitor;

        impl<'de> Visitor<'de> for SpecsVisitor {
            type Value = Specifications;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of specification names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut specs = Specifications::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    specs.insert(name, value);
                }
                Ok(specs)
            }
        }

        deserializer.deserialize_map(SpecsVisitor)
    }
}
