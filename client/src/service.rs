//! The product fetch service.
//!
//! # Design
//! One call is one linear sequence: build the request, race the transport
//! against the deadline, parse. `tokio::time::timeout` owns both the timer
//! and the in-flight request future, so whichever loses the race is dropped
//! on every exit path. Nothing is shared between calls except the
//! transport's connection pool.

use std::time::Duration;

use offers_core::client::DEFAULT_BASE_URL;
use offers_core::{ApiError, Product, ProductClient, DEFAULT_LIMIT, REQUEST_TIMEOUT};

use crate::transport::{ReqwestTransport, Transport};

/// Fetches products from the offer widget over an async `Transport`.
#[derive(Debug, Clone)]
pub struct ProductService<T = ReqwestTransport> {
    client: ProductClient,
    transport: T,
    timeout: Duration,
}

impl ProductService<ReqwestTransport> {
    /// Service talking to `base_url` through reqwest.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(ProductClient::new(base_url), ReqwestTransport::new())
    }
}

impl Default for ProductService<ReqwestTransport> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<T: Transport> ProductService<T> {
    pub fn with_transport(client: ProductClient, transport: T) -> Self {
        Self {
            client,
            transport,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Override the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch at most `limit` products.
    ///
    /// Returns at least one product on success. Every failure, including the
    /// deadline expiring, is an `ApiError`; nothing is retried.
    pub async fn fetch_products(&self, limit: usize) -> Result<Vec<Product>, ApiError> {
        let request = self.client.build_fetch_products();
        tracing::debug!(url = %request.url, limit, "fetching offers");

        let response = match tokio::time::timeout(self.timeout, self.transport.execute(request)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "offer request timed out");
                return Err(ApiError::Timeout);
            }
        };

        self.client.parse_fetch_products(response, limit)
    }

    /// `fetch_products` with `DEFAULT_LIMIT`.
    pub async fn fetch_default_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch_products(DEFAULT_LIMIT).await
    }
}

/// Fetch at most `limit` products from the production widget with a fresh
/// client.
pub async fn fetch_products(limit: usize) -> Result<Vec<Product>, ApiError> {
    ProductService::default().fetch_products(limit).await
}
