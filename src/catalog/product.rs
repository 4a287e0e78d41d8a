//! Catalog record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned product identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single catalog entry.
///
/// The identifier is optional on input: clients creating a product leave it
/// out and the store assigns one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "productID", alias = "productId", default)]
    pub id: ProductId,

    #[serde(rename = "productCode")]
    pub code: String,

    pub name: String,

    pub quantity: i32,

    /// Unit price. A JSON number on the wire, read and written digit for digit.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

impl Product {
    /// Build an unsaved product (identifier left at zero).
    pub fn new(code: impl Into<String>, name: impl Into<String>, quantity: i32, price: Decimal) -> Self {
        Self {
            id: ProductId::default(),
            code: code.into(),
            name: name.into(),
            quantity,
            price,
        }
    }

    /// The record every fresh catalog starts with.
    pub fn default_seed() -> Self {
        Self::new("Product Code 1", "Product Item 1", 1, Decimal::new(11050, 2))
    }

    /// Overwrite the mutable fields with those of `other`, keeping the identifier.
    pub fn apply(&mut self, other: Product) {
        self.code = other.code;
        self.name = other.name;
        self.quantity = other.quantity;
        self.price = other.price;
    }
}
