//! Product Catalog Service (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ request id → trace span → timeout → body limit
//!                                                              │
//!                                                              ▼
//!                         negotiate (Accept / Content-Type) ─▶ handlers
//!                                                              │
//!                                       ┌──────────────────────┤
//!                                       ▼                      ▼
//!                               catalog::store          hateoas::resolver
//!                              (InMemoryStore)         (self/update/delete)
//!                                       │                      │
//!     Client Response                   └──────────┬───────────┘
//!     ◀────────────── JSON or XML ◀────────────────┘
//! ```

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;

use product_catalog::config::{load_config, CatalogConfig};
use product_catalog::http::HttpServer;
use product_catalog::lifecycle::{signals, Shutdown};
use product_catalog::net::tls::load_tls_config;
use product_catalog::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "product-catalog")]
#[command(about = "Product catalog HTTP service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CatalogConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("product-catalog v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        public_base_url = ?config.links.public_base_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(&shutdown);

    let tls = config.listener.tls.clone();
    let server = HttpServer::new(config);

    match tls {
        Some(tls) => {
            let addr: SocketAddr = server.config().listener.bind_address.parse()?;
            let rustls = load_tls_config(&tls).await?;
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(&server.config().listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, shutdown.subscribe()).await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
