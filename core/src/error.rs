//! Error type for the offer widget client.
//!
//! # Design
//! Every failure path of a fetch collapses into one `ApiError`. Callers that
//! only need to show a message use `Display`; callers that want nicer
//! messaging can match on the variant. Only `Http` carries a status code,
//! exposed through `ApiError::status`.

/// Errors returned by `ProductClient::parse_fetch_products` and by the async
/// fetch service built on top of it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status. The body is never parsed.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The body is JSON but has no `widget.data.offers` array.
    #[error("Invalid API response structure")]
    InvalidStructure,

    /// Every offer record was filtered out, or there were none.
    #[error("No valid products found")]
    NoValidProducts,

    /// No response arrived within the request deadline.
    #[error("Request timeout")]
    Timeout,

    /// The transport failed before a response arrived. Carries the
    /// transport's own message.
    #[error("{0}")]
    Network(String),

    /// The body could not be parsed as JSON.
    #[error("{0}")]
    Deserialization(String),

    /// A failure with no usable description, e.g. a panic caught at the FFI
    /// boundary.
    #[error("An unexpected error occurred")]
    Unexpected,
}

impl ApiError {
    /// HTTP status code, present only for `ApiError::Http`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message suitable for showing next to a retry action.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Deserialization(err.to_string())
    }
}
