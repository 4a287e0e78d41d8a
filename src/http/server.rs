//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, body limit, metrics)
//! - Serve plain TCP or TLS until shutdown is triggered

use axum::{
    http::{HeaderMap, Uri},
    middleware,
    routing::get,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::catalog::ProductStore;
use crate::config::{CatalogConfig, LinkConfig};
use crate::hateoas::{LinkResolver, PRODUCTS_PATH};
use crate::http::handlers::{
    create_product, delete_product, get_product, health, list_products, update_product,
};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::{shutdown, startup};
use crate::observability::metrics;

/// How long TLS connections may drain after shutdown is triggered.
const TLS_DRAIN_SECS: u64 = 10;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProductStore>,
    pub links: LinkConfig,
    /// Scheme the listener serves, used when a request URI carries none.
    pub scheme: &'static str,
}

impl AppState {
    pub fn new(store: Arc<dyn ProductStore>, links: LinkConfig, tls: bool) -> Self {
        let scheme = if tls { "https" } else { "http" };
        Self { store, links, scheme }
    }

    /// Link resolver for one request.
    pub fn resolver(&self, uri: &Uri, headers: &HeaderMap) -> LinkResolver {
        LinkResolver::for_request(self.links.public_base_url.as_deref(), self.scheme, uri, headers)
    }
}

/// HTTP server for the product catalog.
pub struct HttpServer {
    router: Router,
    config: CatalogConfig,
}

impl HttpServer {
    /// Create a server with a freshly built (and possibly seeded) store.
    pub fn new(config: CatalogConfig) -> Self {
        let store = startup::init_store(&config.store);
        Self::with_store(config, Arc::new(store))
    }

    /// Create a server over an existing store.
    pub fn with_store(config: CatalogConfig, store: Arc<dyn ProductStore>) -> Self {
        let state = AppState::new(store, config.links.clone(), config.listener.tls.is_some());
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &CatalogConfig, state: AppState) -> Router {
        let item_path = format!("{}/{{id}}", PRODUCTS_PATH);

        Router::new()
            .route("/health", get(health))
            .route(PRODUCTS_PATH, get(list_products).post(create_product))
            .route(
                &item_path,
                get(get_product).put(update_product).delete(delete_product),
            )
            .route_layer(middleware::from_fn(metrics::track_requests))
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(set_request_id_layer())
    }

    /// The fully layered router, e.g. for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run the server over TLS on `addr`.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            shutdown::wait(shutdown_rx).await;
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        tracing::info!(address = %addr, "HTTPS server starting");
        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }
}
