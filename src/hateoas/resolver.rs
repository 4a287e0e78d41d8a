//! Externally reachable URLs for catalog routes.

use axum::http::{header, HeaderMap, Method, Uri};

use crate::catalog::{Product, ProductId};
use crate::hateoas::link::{Link, Resource, REL_DELETE_PRODUCT, REL_SELF, REL_UPDATE_PRODUCT};

/// Collection route for products.
pub const PRODUCTS_PATH: &str = "/api/products";

/// Builds hrefs for catalog routes against a base URL.
///
/// An empty base yields route-relative hrefs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkResolver {
    base: String,
}

impl LinkResolver {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    /// Pick the base for one request.
    ///
    /// A configured public URL wins. Otherwise the request's own origin is
    /// used: its URI scheme if it has one, else `default_scheme`, and the
    /// `Host` header, else the URI authority (HTTP/2 `:authority`). Without
    /// an authority the links stay relative.
    pub fn for_request(
        public_base_url: Option<&str>,
        default_scheme: &str,
        uri: &Uri,
        headers: &HeaderMap,
    ) -> Self {
        if let Some(url) = public_base_url {
            return Self::new(url);
        }
        let authority = headers
            .get(header::HOST)
            .and_then(|h| h.to_str().ok())
            .filter(|h| !h.is_empty())
            .or_else(|| uri.authority().map(|a| a.as_str()));
        match authority {
            Some(authority) => {
                let scheme = uri.scheme_str().unwrap_or(default_scheme);
                Self::new(format!("{}://{}", scheme, authority))
            }
            None => Self::new(""),
        }
    }

    /// The collection route.
    pub fn products(&self) -> String {
        format!("{}{}", self.base, PRODUCTS_PATH)
    }

    /// The single-item route for `id`; also the update and delete target.
    pub fn product(&self, id: ProductId) -> String {
        format!("{}/{}", self.products(), id)
    }
}

/// Wrap a product with its self, update and delete links, in that order.
pub fn product_resource(product: Product, resolver: &LinkResolver) -> Resource<Product> {
    let href = resolver.product(product.id);
    Resource::new(product)
        .with_link(Link::new(href.clone(), REL_SELF, Method::GET))
        .with_link(Link::new(href.clone(), REL_UPDATE_PRODUCT, Method::PUT))
        .with_link(Link::new(href, REL_DELETE_PRODUCT, Method::DELETE))
}
