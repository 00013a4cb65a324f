//! Lenient decoding of the untrusted widget envelope.
//!
//! Only `widget.data.offers` is read. The envelope path is strict: anything
//! other than an array there is a structural failure. Individual records are
//! decoded field by field, and a field holding the wrong JSON type is treated
//! as missing so one bad value never fails the whole response.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Number, Value};

use crate::error::ApiError;
use crate::types::{Merchant, Product, DEFAULT_CURRENCY_ISO, DEFAULT_CURRENCY_SYMBOL};

/// Parse `body` and detach the raw `widget.data.offers` array.
pub(crate) fn offer_records(body: &str) -> Result<Vec<Value>, ApiError> {
    let mut root: Value = serde_json::from_str(body)?;
    match root.pointer_mut("/widget/data/offers").map(Value::take) {
        Some(Value::Array(offers)) => Ok(offers),
        _ => Err(ApiError::InvalidStructure),
    }
}

/// Deserialize a field, mapping a type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Like `lenient`, but only JSON objects are accepted. Serde would otherwise
/// decode a struct from an array positionally.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOfferRecord {
    #[serde(default, deserialize_with = "lenient")]
    id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_object")]
    offer: Option<RawOffer>,
    #[serde(default, deserialize_with = "lenient")]
    image: Option<String>,
    #[serde(default, deserialize_with = "lenient_object")]
    merchant: Option<RawMerchant>,
}

#[derive(Debug, Deserialize)]
struct RawOffer {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    price: Option<RawPrice>,
    #[serde(default, deserialize_with = "lenient")]
    currency_iso: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    currency_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    in_stock: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawMerchant {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    logo_url: Option<String>,
}

/// The API sends prices as strings, but a bare number is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(Number),
}

impl RawPrice {
    fn into_text(self) -> Option<String> {
        match self {
            RawPrice::Text(text) => non_empty(Some(text)),
            RawPrice::Number(n) if n.as_f64() == Some(0.0) => None,
            RawPrice::Number(n) => Some(n.to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl RawOfferRecord {
    /// Decode one array element. Non-objects are rejected.
    pub(crate) fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Map to a `Product`, or `None` when a required field is missing or empty.
    pub(crate) fn into_product(self) -> Option<Product> {
        let id = self.id.filter(|id| *id != 0)?;
        let offer = self.offer?;
        let merchant = self.merchant?;

        let name = non_empty(offer.name)?;
        let price = offer.price.and_then(RawPrice::into_text)?;
        let link = non_empty(offer.link)?;
        let merchant_name = non_empty(merchant.name)?;

        Some(Product {
            id,
            name,
            price,
            currency_iso: non_empty(offer.currency_iso)
                .unwrap_or_else(|| DEFAULT_CURRENCY_ISO.to_string()),
            currency_symbol: non_empty(offer.currency_symbol)
                .unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()),
            link,
            image: non_empty(self.image),
            merchant: Merchant {
                name: merchant_name,
                logo_url: merchant.logo_url.unwrap_or_default(),
            },
            in_stock: offer.in_stock.unwrap_or(true),
        })
    }
}
