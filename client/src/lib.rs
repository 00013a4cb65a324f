//! Async product fetch service for the offer widget.
//!
//! # Overview
//! Drives the sans-IO `offers-core` client over a real network: issues the
//! widget request through a `Transport`, enforces the request deadline with
//! `tokio::time::timeout`, and returns validated `Product`s or a single
//! `ApiError`.

pub mod service;
pub mod transport;

pub use offers_core::{ApiError, Merchant, Product, DEFAULT_LIMIT};
pub use service::{fetch_products, ProductService};
pub use transport::{ReqwestTransport, Transport};
