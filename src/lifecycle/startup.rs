//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the product store once, before any request is served
//! - Seed it with the default product when configured
//!
//! # Design Decisions
//! - Seeding happens here and nowhere else; handlers never seed
//! - Fail fast: any startup error is fatal

use crate::catalog::InMemoryStore;
use crate::config::schema::StoreConfig;

/// Construct the process-wide store.
pub fn init_store(config: &StoreConfig) -> InMemoryStore {
    let store = InMemoryStore::new();
    if config.seed_default {
        store.seed_if_empty();
    }
    tracing::info!(products = store.len(), "Product store ready");
    store
}
