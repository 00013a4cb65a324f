//! Sans-IO core for the price-comparison offer widget.
//!
//! # Overview
//! Builds the widget `HttpRequest` and parses the `HttpResponse` without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round-trip and enforces the request deadline, so the core stays
//! deterministic and testable.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only `base_url`.
//! - The one operation is split into `build_fetch_products` and
//!   `parse_fetch_products`, so the I/O boundary is explicit.
//! - The upstream payload is untrusted. Only `widget.data.offers` is read,
//!   malformed records are dropped one by one, and every other failure is an
//!   `ApiError`.
//! - Output types use owned `String` fields for the FFI mapping.

pub mod client;
mod envelope;
pub mod error;
pub mod http;
pub mod types;

pub use client::{ProductClient, DEFAULT_LIMIT, REQUEST_TIMEOUT};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{Merchant, Product};
