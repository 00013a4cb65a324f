//! Normalized product model handed to the presentation layer.
//!
//! # Design
//! `Product` is the only type downstream code consumes. Every value is built
//! fresh from one widget response; there is no identity beyond that. Fields
//! are owned `String`s so the same values can be copied across the FFI
//! boundary.

use serde::{Deserialize, Serialize};

/// Fallback ISO code used when an offer carries none.
pub const DEFAULT_CURRENCY_ISO: &str = "GBP";

/// Fallback symbol used when an offer carries none.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// A validated offer ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Decimal string exactly as the API sent it; rounding happens at render time.
    pub price: String,
    pub currency_iso: String,
    pub currency_symbol: String,
    pub link: String,
    pub image: Option<String>,
    pub merchant: Merchant,
    pub in_stock: bool,
}

/// The merchant selling an offer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Merchant {
    pub name: String,
    #[serde(default)]
    pub logo_url: String,
}

impl Product {
    /// Price as shown on a product card, e.g. `£449.99`.
    ///
    /// HTML entities in the symbol are decoded (the API sends `&pound;`) and
    /// the amount is rounded to two decimals. A price that is not a number
    /// is shown as-is.
    pub fn display_price(&self) -> String {
        let symbol = html_escape::decode_html_entities(&self.currency_symbol);
        match self.price.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() => format!("{symbol}{amount:.2}"),
            _ => format!("{symbol}{}", self.price),
        }
    }
}
