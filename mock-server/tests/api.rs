use std::time::Duration;

use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Scenario};
use serde_json::{json, Value};
use tower::ServiceExt;

const WIDGET_URI: &str = "/widget.php?id=review&model_name=xbox_series_x&area=GB";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- default fixture ---

#[tokio::test]
async fn widget_serves_bundled_fixture() {
    let resp = app().oneshot(get(WIDGET_URI)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let offers = body["widget"]["data"]["offers"].as_array().unwrap();
    assert_eq!(offers.len(), 5);
    assert_eq!(offers[0]["offer"]["price"], "449.99");
}

#[tokio::test]
async fn widget_echoes_area() {
    let resp = app()
        .oneshot(get("/widget.php?id=review&model_name=xbox_series_x&area=US"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["area"], "US");
}

#[tokio::test]
async fn widget_requires_model_name() {
    let resp = app().oneshot(get("/widget.php?id=review&area=GB")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let resp = app().oneshot(get("/offers")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- scenarios ---

#[tokio::test]
async fn envelope_scenario_serves_given_json() {
    let envelope = json!({ "widget": { "data": { "offers": [] } } });
    let resp = app_with(Scenario::Envelope(envelope))
        .oneshot(get(WIDGET_URI))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["widget"]["data"]["offers"].as_array().unwrap().is_empty());
    assert_eq!(body["area"], "GB");
}

#[tokio::test]
async fn status_scenario_returns_status() {
    let resp = app_with(Scenario::Status(503))
        .oneshot(get(WIDGET_URI))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"Service Unavailable");
}

#[tokio::test]
async fn raw_scenario_is_labelled_json() {
    let resp = app_with(Scenario::Raw("{oops".to_string()))
        .oneshot(get(WIDGET_URI))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(&body_bytes(resp).await[..], b"{oops");
}

#[tokio::test(start_paused = true)]
async fn delayed_scenario_waits_before_answering() {
    let started = tokio::time::Instant::now();
    let resp = app_with(Scenario::Delayed(Duration::from_secs(15), json!({"ok": true})))
        .oneshot(get(WIDGET_URI))
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_secs(15));
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["ok"], true);
}
