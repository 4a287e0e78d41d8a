//! Typed HTTP client for the catalog API.

use reqwest::{Client, Response, StatusCode};
use thiserror::Error;

use crate::catalog::{Product, ProductId};
use crate::hateoas::{Resource, PRODUCTS_PATH};

/// Errors returned by [`CatalogClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// A created product and where it lives.
#[derive(Debug, Clone)]
pub struct Created {
    pub product: Product,
    pub location: Option<String>,
}

pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn products_url(&self) -> String {
        format!("{}{}", self.base_url, PRODUCTS_PATH)
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}{}/{}", self.base_url, PRODUCTS_PATH, id)
    }

    /// Service status as reported by `/health`.
    pub async fn health(&self) -> Result<serde_json::Value, ClientError> {
        let resp = self.client.get(format!("{}/health", self.base_url)).send().await?;
        Ok(expect(resp, StatusCode::OK).await?.json().await?)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let resp = self.client.get(self.products_url()).send().await?;
        Ok(expect(resp, StatusCode::OK).await?.json().await?)
    }

    /// Fetch one product with its links; `None` when it does not exist.
    pub async fn get(&self, id: ProductId) -> Result<Option<Resource<Product>>, ClientError> {
        let resp = self.client.get(self.product_url(id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(expect(resp, StatusCode::OK).await?.json().await?))
    }

    pub async fn create(&self, product: &Product) -> Result<Created, ClientError> {
        let resp = self.client.post(self.products_url()).json(product).send().await?;
        let resp = expect(resp, StatusCode::CREATED).await?;
        let location = resp
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(Created {
            product: resp.json().await?,
            location,
        })
    }

    /// Replace a product's fields. Returns `false` when it does not exist.
    pub async fn update(&self, id: ProductId, product: &Product) -> Result<bool, ClientError> {
        let resp = self.client.put(self.product_url(id)).json(product).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        expect(resp, StatusCode::NO_CONTENT).await?;
        Ok(true)
    }

    /// Delete a product. Returns `false` when it does not exist.
    pub async fn delete(&self, id: ProductId) -> Result<bool, ClientError> {
        let resp = self.client.delete(self.product_url(id)).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        expect(resp, StatusCode::NO_CONTENT).await?;
        Ok(true)
    }
}

async fn expect(resp: Response, status: StatusCode) -> Result<Response, ClientError> {
    if resp.status() == status {
        return Ok(resp);
    }
    let actual = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status: actual, body })
}
