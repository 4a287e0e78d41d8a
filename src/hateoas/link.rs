//! Link descriptors and the resource wrapper that carries them.

use axum::http::Method;
use serde::{Deserialize, Serialize};

/// Relation name for the canonical single-item route.
pub const REL_SELF: &str = "self";
/// Relation name for the update route.
pub const REL_UPDATE_PRODUCT: &str = "update-product";
/// Relation name for the delete route.
pub const REL_DELETE_PRODUCT: &str = "delete-product";

/// A hyperlink a client can follow from a representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    pub method: String,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: Method) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.as_str().to_string(),
        }
    }
}

/// A value together with its ordered links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<T> {
    pub value: T,
    pub links: Vec<Link>,
}

impl<T> Resource<T> {
    /// Wrap a value with no links yet.
    pub fn new(value: T) -> Self {
        Self {
            value,
            links: Vec::new(),
        }
    }

    /// Append a link, keeping insertion order.
    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }
}
