//! Network layer subsystem.
//!
//! Plain TCP listening is handled by `tokio::net::TcpListener` in the binary;
//! this module only covers the optional TLS setup.

pub mod tls;
