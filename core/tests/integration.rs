//! End-to-end fetch against the live mock widget server.
//!
//! # Design
//! Starts the mock server on a random port with a chosen scenario, then runs
//! the core's build/parse pair over real HTTP using ureq as the host. The
//! host honours `timeout_ms` from the request and maps transport failures to
//! `ApiError` itself, the same job a native app does through the FFI.

use std::time::Duration;

use mock_server::Scenario;
use offers_core::{ApiError, HttpRequest, HttpResponse, Product, ProductClient, DEFAULT_LIMIT};
use serde_json::json;

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data, letting the core interpret the status.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(Duration::from_millis(req.timeout_ms)))
        .build()
        .new_agent();

    let mut call = agent.get(&req.url);
    for (key, value) in &req.headers {
        call = call.header(key.as_str(), value.as_str());
    }

    let mut response = call.call().map_err(|err| match err {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        other => ApiError::Network(other.to_string()),
    })?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}

/// Start the mock server on a random port and return its base URL.
fn spawn_server(scenario: Scenario) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with(listener, scenario).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn fetch(client: &ProductClient, limit: usize) -> Result<Vec<Product>, ApiError> {
    let response = execute(client.build_fetch_products())?;
    client.parse_fetch_products(response, limit)
}

#[test]
fn fixture_round_trip() {
    let client = ProductClient::new(&spawn_server(Scenario::default()));

    let products = fetch(&client, DEFAULT_LIMIT).unwrap();
    let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![783697937, 744155058, 2507086, 643835681]);

    let first = &products[0];
    assert_eq!(first.name, "Microsoft Xbox Series X Digital Robot White");
    assert_eq!(first.image, None);
    assert_eq!(first.merchant.name, "O2 Mobiles");
    assert_eq!(first.display_price(), "£449.99");

    let products = fetch(&client, 2).unwrap();
    assert_eq!(products.len(), 2);
}

#[test]
fn server_error_surfaces_status() {
    let client = ProductClient::new(&spawn_server(Scenario::Status(500)));
    let err = fetch(&client, DEFAULT_LIMIT).unwrap_err();
    assert_eq!(err, ApiError::Http { status: 500 });
}

#[test]
fn empty_envelope_is_invalid_structure() {
    let client = ProductClient::new(&spawn_server(Scenario::Raw("{}".to_string())));
    let err = fetch(&client, DEFAULT_LIMIT).unwrap_err();
    assert_eq!(err.to_string(), "Invalid API response structure");
}

#[test]
fn empty_offers_is_no_valid_products() {
    let envelope = json!({ "widget": { "data": { "offers": [] } } });
    let client = ProductClient::new(&spawn_server(Scenario::Envelope(envelope)));
    let err = fetch(&client, DEFAULT_LIMIT).unwrap_err();
    assert_eq!(err.to_string(), "No valid products found");
}

#[test]
fn slow_server_hits_host_deadline() {
    let envelope = json!({ "widget": { "data": { "offers": [] } } });
    let base = spawn_server(Scenario::Delayed(Duration::from_secs(5), envelope));
    let client = ProductClient::new(&base);

    let mut req = client.build_fetch_products();
    req.timeout_ms = 200;
    let err = execute(req).unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[test]
fn refused_connection_is_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let client = ProductClient::new(&format!("http://{addr}"));
    let err = fetch(&client, DEFAULT_LIMIT).unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}
