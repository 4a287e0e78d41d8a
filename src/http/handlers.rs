//! Product CRUD handlers.
//!
//! Each handler validates its input fully before touching the store, so a
//! rejected request never changes state.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use serde::Serialize;

use crate::catalog::Product;
use crate::hateoas::{product_resource, LinkResolver};
use crate::http::error::ApiError;
use crate::http::negotiate::{Payload, Representation, ResponseFormat};
use crate::http::request::ProductPath;
use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

impl Representation for SystemStatus {
    const XML_ROOT: &'static str = "SystemStatus";
}

pub async fn health(ResponseFormat(format): ResponseFormat) -> Result<Response, ApiError> {
    format.respond(
        StatusCode::OK,
        &SystemStatus {
            version: env!("CARGO_PKG_VERSION"),
            status: "operational",
        },
    )
}

/// `GET /api/products`
pub async fn list_products(
    State(state): State<AppState>,
    ResponseFormat(format): ResponseFormat,
) -> Result<Response, ApiError> {
    let products = state.store.list();
    tracing::debug!(count = products.len(), "Listing products");
    format.respond(StatusCode::OK, &products)
}

/// `GET /api/products/{id}`, wrapped with its links.
pub async fn get_product(
    State(state): State<AppState>,
    ResponseFormat(format): ResponseFormat,
    ProductPath(id): ProductPath,
    links: LinkResolver,
) -> Result<Response, ApiError> {
    let product = state.store.find(id).ok_or(ApiError::NotFound)?;
    let resource = product_resource(product, &links);
    format.respond(StatusCode::OK, &resource)
}

/// `POST /api/products`
///
/// Any identifier in the body is ignored; the store assigns one.
pub async fn create_product(
    State(state): State<AppState>,
    ResponseFormat(format): ResponseFormat,
    links: LinkResolver,
    Payload(product): Payload<Product>,
) -> Result<Response, ApiError> {
    let created = state.store.create(product);
    let location = links.product(created.id);
    tracing::info!(product_id = %created.id, code = %created.code, "Product created");

    let location = HeaderValue::from_str(&location)
        .map_err(|e| ApiError::Internal(format!("invalid Location {location:?}: {e}")))?;
    let mut response = format.respond(StatusCode::CREATED, &created)?;
    response.headers_mut().insert(header::LOCATION, location);
    Ok(response)
}

/// `PUT /api/products/{id}`
pub async fn update_product(
    State(state): State<AppState>,
    ProductPath(id): ProductPath,
    Payload(product): Payload<Product>,
) -> Result<StatusCode, ApiError> {
    if product.id != id {
        return Err(ApiError::BadRequest(format!(
            "body productID {} does not match path id {}",
            product.id, id
        )));
    }

    state.store.update(id, product).ok_or(ApiError::NotFound)?;
    tracing::info!(product_id = %id, "Product updated");
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/products/{id}`
pub async fn delete_product(
    State(state): State<AppState>,
    ProductPath(id): ProductPath,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).ok_or(ApiError::NotFound)?;
    tracing::info!(product_id = %id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
