//! Shared utilities for integration and load testing.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;

use product_catalog::config::CatalogConfig;
use product_catalog::http::HttpServer;
use product_catalog::lifecycle::Shutdown;

/// A catalog server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn products_url(&self) -> String {
        format!("http://{}/api/products", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server with default configuration (seeded store).
pub async fn start_server() -> TestServer {
    start_server_with(CatalogConfig::default()).await
}

/// Start a server with the given configuration; the bind address is ignored.
#[allow(dead_code)]
pub async fn start_server_with(config: CatalogConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    wait_until_ready(addr).await;
    TestServer { addr, shutdown }
}

async fn wait_until_ready(addr: SocketAddr) {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    for _ in 0..50 {
        if client.get(format!("http://{}/health", addr)).send().await.is_ok() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {} did not become ready", addr);
}

/// HTTP client that bypasses any environment proxy.
#[allow(dead_code)]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
