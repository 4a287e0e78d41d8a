//! Product storage.
//!
//! # Responsibilities
//! - Assign identifiers on create (monotonic, never reused)
//! - Keep each operation atomic on its own
//! - Report absence instead of failing
//!
//! # Design Decisions
//! - `ProductStore` is the seam handlers depend on; `InMemoryStore` is the
//!   only backend and is volatile by design of the service
//! - Concurrent updates to one identifier are last-write-wins

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::catalog::product::{Product, ProductId};
use crate::observability::metrics;

/// Create/read/update/delete access to catalog records.
pub trait ProductStore: Send + Sync {
    /// Every record currently held.
    fn list(&self) -> Vec<Product>;

    /// The record with this identifier, if any.
    fn find(&self, id: ProductId) -> Option<Product>;

    /// Insert `product` under a freshly assigned identifier and return the stored copy.
    fn create(&self, product: Product) -> Product;

    /// Replace the mutable fields of the record at `id`.
    fn update(&self, id: ProductId, product: Product) -> Option<Product>;

    /// Remove and return the record at `id`.
    fn delete(&self, id: ProductId) -> Option<Product>;
}

/// Volatile store backed by a sharded concurrent map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    products: Arc<DashMap<ProductId, Product>>,
    last_id: Arc<AtomicU64>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the default seed record.
    pub fn seeded() -> Self {
        let store = Self::new();
        store.seed_if_empty();
        store
    }

    /// Insert the default record when nothing is stored yet.
    ///
    /// Returns the seeded record, or `None` if the store already had data.
    pub fn seed_if_empty(&self) -> Option<Product> {
        if !self.products.is_empty() {
            return None;
        }
        let product = self.create(Product::default_seed());
        tracing::info!(product_id = %product.id, code = %product.code, "Seeded default product");
        Some(product)
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn next_id(&self) -> ProductId {
        ProductId(self.last_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl ProductStore for InMemoryStore {
    fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .iter()
            .map(|r| r.value().clone())
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }

    fn find(&self, id: ProductId) -> Option<Product> {
        self.products.get(&id).map(|r| r.value().clone())
    }

    fn create(&self, mut product: Product) -> Product {
        product.id = self.next_id();
        self.products.insert(product.id, product.clone());
        metrics::record_product_count(self.products.len());
        product
    }

    fn update(&self, id: ProductId, product: Product) -> Option<Product> {
        let mut entry = self.products.get_mut(&id)?;
        entry.apply(product);
        Some(entry.clone())
    }

    fn delete(&self, id: ProductId) -> Option<Product> {
        let removed = self.products.remove(&id).map(|(_, product)| product);
        if removed.is_some() {
            metrics::record_product_count(self.products.len());
        }
        removed
    }
}
