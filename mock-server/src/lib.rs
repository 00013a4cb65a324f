use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::net::TcpListener;

/// Widget payload for `model_name=xbox_series_x`, trimmed from a real
/// response. Five offers, one of which has an empty merchant name.
pub const XBOX_SERIES_X_FIXTURE: &str = include_str!("../fixtures/xbox_series_x.json");

/// What `GET /widget.php` answers with.
#[derive(Clone, Debug)]
pub enum Scenario {
    /// 200 with the given JSON envelope.
    Envelope(Value),
    /// The given status with a short text body.
    Status(u16),
    /// 200 with the given envelope after sleeping.
    Delayed(Duration, Value),
    /// 200 with an arbitrary body labelled as JSON.
    Raw(String),
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Envelope(fixture())
    }
}

/// The bundled fixture as a JSON value.
pub fn fixture() -> Value {
    serde_json::from_str(XBOX_SERIES_X_FIXTURE).unwrap_or(Value::Null)
}

#[derive(Debug, Deserialize)]
pub struct WidgetQuery {
    pub id: Option<String>,
    pub model_name: Option<String>,
    pub area: Option<String>,
}

pub fn app() -> Router {
    app_with(Scenario::default())
}

pub fn app_with(scenario: Scenario) -> Router {
    Router::new()
        .route("/widget.php", get(widget))
        .with_state(Arc::new(scenario))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Scenario::default()).await
}

pub async fn run_with(listener: TcpListener, scenario: Scenario) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(scenario)).await
}

async fn widget(State(scenario): State<Arc<Scenario>>, Query(query): Query<WidgetQuery>) -> Response {
    let Some(model_name) = query.model_name else {
        return (StatusCode::BAD_REQUEST, "model_name is required").into_response();
    };
    tracing::info!(id = ?query.id, %model_name, area = ?query.area, "widget request");

    match scenario.as_ref() {
        Scenario::Envelope(envelope) => Json(echo_area(envelope.clone(), query.area)).into_response(),
        Scenario::Status(code) => {
            let status = StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, status.canonical_reason().unwrap_or("error")).into_response()
        }
        Scenario::Delayed(delay, envelope) => {
            tokio::time::sleep(*delay).await;
            Json(echo_area(envelope.clone(), query.area)).into_response()
        }
        Scenario::Raw(body) => {
            ([(header::CONTENT_TYPE, "application/json")], body.clone()).into_response()
        }
    }
}

/// Stamp the requested area onto object envelopes, as the live API does.
fn echo_area(mut envelope: Value, area: Option<String>) -> Value {
    if let (Some(map), Some(area)) = (envelope.as_object_mut(), area) {
        map.insert("area".to_string(), Value::String(area));
    }
    envelope
}
