//! HTTP boundary of the catalog.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID, span, path id)
//!     → negotiate.rs (Accept / Content-Type → Format, body decode)
//!     → xml.rs (XML element layout)
//!     → handlers.rs (store call, link wrapping)
//!     → negotiate.rs (encode in chosen Format)
//!     → error.rs (failures as bare status codes)
//! ```

pub mod error;
pub mod handlers;
pub mod negotiate;
pub mod request;
pub mod server;
pub mod xml;

pub use error::ApiError;
pub use negotiate::{Format, Payload, Representation, ResponseFormat, Submission};
pub use request::{ProductPath, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
