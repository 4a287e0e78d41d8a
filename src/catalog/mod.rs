//! Catalog domain subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → store.rs (ProductStore trait, InMemoryStore)
//!     → product.rs (Product record, ProductId)
//! ```

pub mod product;
pub mod store;

pub use product::{Product, ProductId};
pub use store::{InMemoryStore, ProductStore};
