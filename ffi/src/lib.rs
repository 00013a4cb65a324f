//! C-ABI wrapper around `offers-core`.
//!
//! # Overview
//! Lets a native app build the widget request, execute it with its own HTTP
//! stack, and hand the response back for validation without linking Rust's
//! async runtime.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary. A caught panic becomes an `Unexpected`
//!   result.
//! - `offers_build_fetch_products` / `offers_parse_fetch_products` mirror the
//!   core API 1:1. Failures the host sees before any response (timeout,
//!   transport error) go through `offers_transport_error` so every outcome
//!   arrives as the same `FfiOffersResult`.
//! - The caller owns all returned pointers and must call the matching
//!   `offers_*_free` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use offers_core::{ApiError, HttpResponse};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_url` (scheme and host only).
///
/// Returns null if `base_url` is null or not UTF-8.
/// The caller must free the returned pointer with `offers_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn offers_client_new(base_url: *const c_char) -> *mut FfiOffersClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = unsafe { CStr::from_ptr(base_url) }.to_str() else {
            return std::ptr::null_mut();
        };
        let client = offers_core::ProductClient::new(url);
        Box::into_raw(Box::new(FfiOffersClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a client bound to the production widget host.
#[unsafe(no_mangle)]
pub extern "C" fn offers_client_default() -> *mut FfiOffersClient {
    catch_unwind(|| {
        let client = offers_core::ProductClient::default();
        Box::into_raw(Box::new(FfiOffersClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn offers_client_free(client: *mut FfiOffersClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// Build the widget request.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `offers_request_free`.
#[unsafe(no_mangle)]
pub extern "C" fn offers_build_fetch_products(
    client: *const FfiOffersClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_fetch_products())
    })
    .unwrap_or(std::ptr::null_mut())
}

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_string_lossy()
            .into_owned()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Validate a widget response and return at most `limit` products.
///
/// The caller must free the returned pointer with `offers_result_free`.
#[unsafe(no_mangle)]
pub extern "C" fn offers_parse_fetch_products(
    client: *const FfiOffersClient,
    response: *const FfiHttpResponse,
    limit: u32,
) -> *mut FfiOffersResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiOffersResult::null_arg("client");
        }
        if response.is_null() {
            return FfiOffersResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match client
            .inner
            .parse_fetch_products(ffi_response_to_core(resp), limit as usize)
        {
            Ok(products) => FfiOffersResult::ok_products(products),
            Err(e) => FfiOffersResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiOffersResult::panic())
}

/// Report a failure the host observed before any response arrived.
///
/// `timed_out` selects the timeout error; otherwise `message` is forwarded
/// as a network error, or the generic unexpected error if `message` is null.
/// The caller must free the returned pointer with `offers_result_free`.
#[unsafe(no_mangle)]
pub extern "C" fn offers_transport_error(
    message: *const c_char,
    timed_out: bool,
) -> *mut FfiOffersResult {
    catch_unwind(|| {
        let err = if timed_out {
            ApiError::Timeout
        } else if message.is_null() {
            ApiError::Unexpected
        } else {
            let msg = unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned();
            ApiError::Network(msg)
        };
        FfiOffersResult::from_error(err)
    })
    .unwrap_or_else(|_| FfiOffersResult::panic())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by `offers_build_fetch_products`. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn offers_request_free(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free a result returned by `offers_parse_fetch_products` or
/// `offers_transport_error`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn offers_result_free(result: *mut FfiOffersResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if !result.products.is_null() {
            let list = unsafe { Box::from_raw(result.products) };
            if !list.items.is_null() && list.len > 0 {
                let items = unsafe {
                    Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize))
                };
                for item in items.iter() {
                    item.free_fields();
                }
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
