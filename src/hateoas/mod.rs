//! Hypermedia links for catalog representations.
//!
//! Single-item fetches return the product inside a [`Resource`] with its
//! `self`, `update-product` and `delete-product` links. Lists, creates,
//! updates and deletes carry no links.

pub mod link;
pub mod resolver;

pub use link::{Link, Resource};
pub use resolver::{product_resource, LinkResolver, PRODUCTS_PATH};
