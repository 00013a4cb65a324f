//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer plus length instead of
//! `Vec`, and enums with explicit discriminants. Conversion functions live
//! here to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use offers_core::error::ApiError;
use offers_core::http::HttpMethod;
use offers_core::Product;

/// Opaque handle to a `ProductClient`.
pub struct FfiOffersClient {
    pub(crate) inner: offers_core::ProductClient,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs are
/// removed since C cannot represent them.
pub(crate) fn to_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Free a string produced by `to_c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// The widget request as C-compatible plain data.
///
/// The host executes it, cancels it after `timeout_ms`, and passes the
/// outcome back through `offers_parse_fetch_products` or
/// `offers_transport_error`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub timeout_ms: u64,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: offers_core::HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(req.url),
            headers,
            headers_len,
            timeout_ms: req.timeout_ms,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this after executing the request and passes a pointer
/// to `offers_parse_fetch_products`. The FFI layer reads but does not free
/// these fields. `body` may be null for non-2xx responses.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiOffersResult`. One per `ApiError` variant plus
/// the FFI-only `NullArg`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    Http = 1,
    InvalidStructure = 2,
    NoValidProducts = 3,
    Timeout = 4,
    Network = 5,
    Deserialization = 6,
    Unexpected = 7,
    NullArg = 8,
}

/// The merchant of a product exposed to C.
#[repr(C)]
pub struct FfiMerchant {
    pub name: *mut c_char,
    pub logo_url: *mut c_char,
}

/// A normalized product exposed to C. `image` is null when the offer has none.
#[repr(C)]
pub struct FfiProduct {
    pub id: i64,
    pub name: *mut c_char,
    pub price: *mut c_char,
    pub currency_iso: *mut c_char,
    pub currency_symbol: *mut c_char,
    pub link: *mut c_char,
    pub image: *mut c_char,
    pub merchant: FfiMerchant,
    pub in_stock: bool,
}

impl FfiProduct {
    fn from_core(p: Product) -> Self {
        FfiProduct {
            id: p.id,
            name: to_c_string(p.name),
            price: to_c_string(p.price),
            currency_iso: to_c_string(p.currency_iso),
            currency_symbol: to_c_string(p.currency_symbol),
            link: to_c_string(p.link),
            image: p.image.map(to_c_string).unwrap_or(std::ptr::null_mut()),
            merchant: FfiMerchant {
                name: to_c_string(p.merchant.name),
                logo_url: to_c_string(p.merchant.logo_url),
            },
            in_stock: p.in_stock,
        }
    }

    /// Free the C-string fields (but not the struct itself).
    pub(crate) fn free_fields(&self) {
        free_c_string(self.name);
        free_c_string(self.price);
        free_c_string(self.currency_iso);
        free_c_string(self.currency_symbol);
        free_c_string(self.link);
        free_c_string(self.image);
        free_c_string(self.merchant.name);
        free_c_string(self.merchant.logo_url);
    }
}

/// A list of products exposed to C.
#[repr(C)]
pub struct FfiProductList {
    pub items: *mut FfiProduct,
    pub len: u32,
}

/// Result envelope for a fetch.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `products`
/// points to a non-empty list. On failure `error_code` names the category,
/// `error_message` is the message to show the user, `http_status` is set for
/// `Http` only, and `products` is null.
#[repr(C)]
pub struct FfiOffersResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub products: *mut FfiProductList,
}

impl FfiOffersResult {
    /// Build a success result carrying the product list.
    pub(crate) fn ok_products(products: Vec<Product>) -> *mut Self {
        let len = products.len() as u32;
        let items: Box<[FfiProduct]> = products.into_iter().map(FfiProduct::from_core).collect();
        let items = if items.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(items) as *mut FfiProduct
        };

        let list = Box::new(FfiProductList { items, len });
        Box::into_raw(Box::new(FfiOffersResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            products: Box::into_raw(list),
        }))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let error_code = match &err {
            ApiError::Http { .. } => FfiErrorCode::Http,
            ApiError::InvalidStructure => FfiErrorCode::InvalidStructure,
            ApiError::NoValidProducts => FfiErrorCode::NoValidProducts,
            ApiError::Timeout => FfiErrorCode::Timeout,
            ApiError::Network(_) => FfiErrorCode::Network,
            ApiError::Deserialization(_) => FfiErrorCode::Deserialization,
            ApiError::Unexpected => FfiErrorCode::Unexpected,
        };
        Self::error(error_code, err.status().unwrap_or(0), err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic() -> *mut Self {
        Self::from_error(ApiError::Unexpected)
    }

    fn error(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiOffersResult {
            error_code,
            error_message: to_c_string(msg),
            http_status,
            products: std::ptr::null_mut(),
        }))
    }
}
