//! Stateless request builder and response parser for the offer widget.
//!
//! # Design
//! `ProductClient` holds only a `base_url` and carries no mutable state
//! between calls. The single operation is split into `build_fetch_products`,
//! which produces an `HttpRequest`, and `parse_fetch_products`, which turns
//! the host's `HttpResponse` into products. The widget path and query are
//! fixed; only the scheme and host can be pointed elsewhere.

use std::collections::HashSet;
use std::time::Duration;

use crate::envelope::{self, RawOfferRecord};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Product;

/// Production host of the price-comparison widget API.
pub const DEFAULT_BASE_URL: &str = "https://search-api.fie.future.net.uk";
pub const WIDGET_PATH: &str = "/widget.php";
pub const WIDGET_ID: &str = "review";
pub const MODEL_NAME: &str = "xbox_series_x";
pub const AREA: &str = "GB";

/// Wall-clock bound for one fetch, measured by the host.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of products returned when the caller does not pick a limit.
pub const DEFAULT_LIMIT: usize = 4;

/// Synchronous, stateless client for the offer widget.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl Default for ProductClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full widget URL including the fixed query.
    pub fn endpoint(&self) -> String {
        format!(
            "{}{WIDGET_PATH}?id={WIDGET_ID}&model_name={MODEL_NAME}&area={AREA}",
            self.base_url
        )
    }

    pub fn build_fetch_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.endpoint(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            timeout_ms: REQUEST_TIMEOUT.as_millis() as u64,
        }
    }

    /// Validate the widget response and return at most `limit` products in
    /// source order.
    ///
    /// Records missing an id, name, price, link or merchant name are dropped,
    /// as are records repeating an id already kept. An empty result is an
    /// error, so a successful return always holds at least one product.
    pub fn parse_fetch_products(
        &self,
        response: HttpResponse,
        limit: usize,
    ) -> Result<Vec<Product>, ApiError> {
        check_status(&response)?;

        let records = envelope::offer_records(&response.body)?;
        let total = records.len();

        let mut seen = HashSet::new();
        let mut products: Vec<Product> = records
            .into_iter()
            .filter_map(RawOfferRecord::from_value)
            .filter_map(RawOfferRecord::into_product)
            .filter(|product| seen.insert(product.id))
            .collect();

        tracing::debug!(
            total,
            valid = products.len(),
            dropped = total - products.len(),
            "filtered offer records"
        );

        products.truncate(limit);
        if products.is_empty() {
            return Err(ApiError::NoValidProducts);
        }
        Ok(products)
    }
}

/// Map a non-2xx status to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
    })
}
