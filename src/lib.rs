//! Product Catalog Service Library
//!
//! CRUD over `Product` records held in a volatile in-memory store, served by
//! Axum. Single-item fetches carry hypermedia links; bodies are JSON by default
//! with XML available through content negotiation.

pub mod catalog;
pub mod client;
pub mod config;
pub mod hateoas;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use catalog::{InMemoryStore, Product, ProductId, ProductStore};
pub use config::schema::CatalogConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
