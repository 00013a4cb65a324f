//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe the widget request and its response as plain data.
//! The core crate builds an `HttpRequest` and parses an `HttpResponse`
//! without touching the network; the host (the async client crate, a test,
//! or a native app through the FFI) executes the round-trip.
//!
//! The request carries its own deadline in `timeout_ms` so every host
//! enforces the same bound. All fields are owned so values can cross the FFI
//! boundary without lifetime concerns.

/// HTTP method for a request. The widget API is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `ProductClient::build_fetch_products`. The host must cancel the
/// request if no response has arrived after `timeout_ms` milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout_ms: u64,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`. Hosts may leave
/// `body` empty for non-2xx responses since it is never parsed.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
