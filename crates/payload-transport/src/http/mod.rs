//! HTTP transport implementation
//!
//! Provides an HTTP client that implements the `PayloadTransport` trait.

pub mod client;
pub mod config;

pub use client::HttpPayloadTransport;
pub use config::HttpTransportConfig;
