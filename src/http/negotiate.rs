//! Content negotiation between JSON and XML.
//!
//! # Responsibilities
//! - Pick the response format from `Accept`
//! - Pick the request body format from `Content-Type`
//! - Encode and decode representations in the chosen format
//!
//! # Design Decisions
//! - JSON is the default on both sides; XML is opt-in per request
//! - Unknown `Accept` values fall back to JSON instead of 406
//! - A body with an explicit, unknown `Content-Type` is rejected with 415
//! - The catalog and hateoas modules never see the format

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{header, request::Parts, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Serialize};
use std::convert::Infallible;
use thiserror::Error;

use crate::catalog::Product;
use crate::hateoas::Resource;
use crate::http::error::ApiError;
use crate::http::xml;

const JSON: &str = "application/json";
const XML: &str = "application/xml";

/// Encoding or decoding failure.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML: {0}")]
    Xml(String),
}

/// Wire format of a request or response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    /// Media type written to `Content-Type`.
    pub fn content_type(self) -> &'static str {
        match self {
            Format::Json => JSON,
            Format::Xml => XML,
        }
    }

    /// Map a media type (parameters allowed) to a format.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            JSON => Some(Format::Json),
            XML | "text/xml" => Some(Format::Xml),
            other if other.ends_with("+json") => Some(Format::Json),
            other if other.ends_with("+xml") => Some(Format::Xml),
            _ => None,
        }
    }

    /// Format of a request body. No `Content-Type` means JSON.
    pub fn from_content_type(headers: &HeaderMap) -> Result<Self, ApiError> {
        let Some(value) = headers.get(header::CONTENT_TYPE) else {
            return Ok(Format::Json);
        };
        let value = value
            .to_str()
            .map_err(|_| ApiError::UnsupportedMediaType("non-ASCII content type".to_string()))?;
        Self::from_media_type(value).ok_or_else(|| ApiError::UnsupportedMediaType(value.to_string()))
    }

    /// Preferred response format according to `Accept`.
    ///
    /// The highest `q` wins; on a tie the earlier entry wins. Wildcards count
    /// as JSON.
    pub fn from_accept(headers: &HeaderMap) -> Self {
        let mut best: Option<(Format, f32)> = None;

        for value in headers.get_all(header::ACCEPT) {
            let Ok(value) = value.to_str() else { continue };
            for entry in value.split(',') {
                let mut parts = entry.split(';');
                let media_type = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
                let quality = parts
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|q| q.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                if quality <= 0.0 {
                    continue;
                }

                let format = match media_type.as_str() {
                    "*/*" | "application/*" => Some(Format::Json),
                    other => Self::from_media_type(other),
                };
                if let Some(format) = format {
                    if best.map_or(true, |(_, q)| quality > q) {
                        best = Some((format, quality));
                    }
                }
            }
        }

        best.map(|(format, _)| format).unwrap_or_default()
    }

    /// Serialize a representation.
    pub fn encode<T: Representation>(self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Format::Json => Ok(serde_json::to_vec(value)?),
            Format::Xml => Ok(value.to_xml()?.into_bytes()),
        }
    }

    /// Deserialize a request body.
    pub fn decode<T: Submission>(self, bytes: &[u8]) -> Result<T, CodecError> {
        match self {
            Format::Json => Ok(serde_json::from_slice(bytes)?),
            Format::Xml => {
                let text = std::str::from_utf8(bytes).map_err(|e| CodecError::Xml(e.to_string()))?;
                T::from_xml(text)
            }
        }
    }

    /// Build a response with an encoded body and matching `Content-Type`.
    pub fn respond<T: Representation>(
        self,
        status: StatusCode,
        value: &T,
    ) -> Result<Response, ApiError> {
        let body = self.encode(value)?;
        Ok((
            status,
            [(header::CONTENT_TYPE, HeaderValue::from_static(self.content_type()))],
            body,
        )
            .into_response())
    }
}

/// A value that can be written in either wire format.
pub trait Representation: Serialize + Sized {
    /// Root element name in XML output.
    const XML_ROOT: &'static str;

    fn to_xml(&self) -> Result<String, CodecError> {
        quick_xml::se::to_string_with_root(Self::XML_ROOT, self).map_err(|e| CodecError::Xml(e.to_string()))
    }
}

impl Representation for Product {
    const XML_ROOT: &'static str = xml::PRODUCT_ROOT;

    fn to_xml(&self) -> Result<String, CodecError> {
        xml::product_to_xml(self)
    }
}

impl Representation for Resource<Product> {
    const XML_ROOT: &'static str = xml::RESOURCE_ROOT;

    fn to_xml(&self) -> Result<String, CodecError> {
        xml::resource_to_xml(self)
    }
}

impl Representation for Vec<Product> {
    const XML_ROOT: &'static str = xml::PRODUCT_LIST_ROOT;

    fn to_xml(&self) -> Result<String, CodecError> {
        xml::products_to_xml(self)
    }
}

/// A value a client may send as a request body.
pub trait Submission: DeserializeOwned {
    fn from_xml(text: &str) -> Result<Self, CodecError>;
}

impl Submission for Product {
    fn from_xml(text: &str) -> Result<Self, CodecError> {
        xml::product_from_xml(text)
    }
}

/// Response format chosen from the request's `Accept` header.
#[derive(Debug, Clone, Copy)]
pub struct ResponseFormat(pub Format);

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(Format::from_accept(&parts.headers)))
    }
}

/// A request body decoded according to its `Content-Type`.
///
/// Missing, empty or undecodable bodies are rejected as bad requests.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: Submission,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = Format::from_content_type(req.headers())?;
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge
            } else {
                ApiError::BadRequest(rejection.body_text())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(ApiError::BadRequest("missing request body".to_string()));
        }

        format
            .decode(&bytes)
            .map(Payload)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ProductId;
    use crate::hateoas::{product_resource, LinkResolver};
    use rust_decimal::Decimal;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(value));
        headers
    }

    fn seed() -> Product {
        let mut product = Product::default_seed();
        product.id = ProductId(1);
        product
    }

    #[test]
    fn test_accept_negotiation() {
        assert_eq!(Format::from_accept(&HeaderMap::new()), Format::Json);
        assert_eq!(Format::from_accept(&accept("application/xml")), Format::Xml);
        assert_eq!(Format::from_accept(&accept("text/xml; charset=utf-8")), Format::Xml);
        assert_eq!(Format::from_accept(&accept("*/*")), Format::Json);
        assert_eq!(Format::from_accept(&accept("text/html")), Format::Json);
        assert_eq!(
            Format::from_accept(&accept("application/json;q=0.5, application/xml")),
            Format::Xml
        );
        assert_eq!(
            Format::from_accept(&accept("application/xml;q=0.9, */*;q=0.1")),
            Format::Xml
        );
        assert_eq!(
            Format::from_accept(&accept("application/json, application/xml")),
            Format::Json
        );
        assert_eq!(Format::from_accept(&accept("application/xml;q=0")), Format::Json);
    }

    #[test]
    fn test_content_type_selection() {
        let mut headers = HeaderMap::new();
        assert_eq!(Format::from_content_type(&headers).unwrap(), Format::Json);

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/xml"));
        assert_eq!(Format::from_content_type(&headers).unwrap(), Format::Xml);

        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json; charset=utf-8"),
        );
        assert_eq!(Format::from_content_type(&headers).unwrap(), Format::Json);

        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(matches!(
            Format::from_content_type(&headers),
            Err(ApiError::UnsupportedMediaType(_))
        ));
    }

    #[test]
    fn test_product_xml() {
        let xml = String::from_utf8(Format::Xml.encode(&seed()).unwrap()).unwrap();
        assert!(xml.starts_with("<Product>"));
        assert!(xml.contains("<ProductID>1</ProductID>"));
        assert!(xml.contains("<ProductCode>Product Code 1</ProductCode>"));
        assert!(xml.contains("<Price>110.50</Price>"));

        let decoded: Product = Format::Xml.decode(xml.as_bytes()).unwrap();
        assert_eq!(decoded, seed());
    }

    #[test]
    fn test_list_xml() {
        let mut second = seed();
        second.id = ProductId(2);
        let xml = String::from_utf8(Format::Xml.encode(&vec![seed(), second]).unwrap()).unwrap();

        assert!(xml.starts_with("<ArrayOfProduct>"));
        assert_eq!(xml.matches("<Product>").count(), 2);
        assert!(xml.contains("<ProductID>2</ProductID>"));
    }

    #[test]
    fn test_empty_list_encodes() {
        let json = Format::Json.encode(&Vec::<Product>::new()).unwrap();
        assert_eq!(json, b"[]");
        assert!(Format::Xml.encode(&Vec::<Product>::new()).is_ok());
    }

    #[test]
    fn test_resource_xml() {
        let resource = product_resource(seed(), &LinkResolver::new("http://localhost"));
        let xml = String::from_utf8(Format::Xml.encode(&resource).unwrap()).unwrap();

        assert!(xml.starts_with("<LinkHelperOfProduct>"));
        assert_eq!(xml.matches("<Link>").count(), 3);
        assert!(xml.contains("<Rel>update-product</Rel>"));
    }

    #[test]
    fn test_decode_xml_input() {
        let body = "<Product><ProductCode>X1</ProductCode><Name>Widget</Name>\
                    <Quantity>5</Quantity><Price>9.99</Price></Product>";
        let product: Product = Format::Xml.decode(body.as_bytes()).unwrap();
        assert_eq!(product.id, ProductId(0));
        assert_eq!(product.code, "X1");
        assert_eq!(product.price, Decimal::new(999, 2));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(Format::Json.decode::<Product>(b"{not json").is_err());
        assert!(Format::Xml.decode::<Product>(b"<Product><Name>only</Name></Product>").is_err());
    }

    #[tokio::test]
    async fn test_respond_sets_content_type() {
        let response = Format::Xml.respond(StatusCode::OK, &seed()).unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");

        let response = Format::Json.respond(StatusCode::CREATED, &seed()).unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }
}
