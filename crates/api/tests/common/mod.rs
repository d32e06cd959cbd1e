#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{HeaderValue, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use climate_api::config::ServerConfig;
use climate_api::router::build_app_router;
use climate_api::state::AppState;
use climate_core::alert::{Alert, AlertEvaluator, AlertThresholds, AlertType};
use climate_core::device_secret::{SecretValidator, DEVICE_SECRET_HEADER};
use climate_core::error::CoreError;
use climate_core::reading::DeviceReadingRequest;

/// Secret accepted by [`FixedSecretValidator`].
pub const VALID_SECRET: &str = "secret-ABC-123-XYZ-001";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        device_secrets: vec![VALID_SECRET.to_string()],
        alert_thresholds: AlertThresholds::default(),
    }
}

/// Build the full application router with the given collaborators.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack.
pub fn build_test_app(
    secret_validator: Arc<dyn SecretValidator>,
    alert_evaluator: Arc<dyn AlertEvaluator>,
) -> Router {
    let state = AppState::new(secret_validator, alert_evaluator);
    build_app_router(state, &test_config())
}

/// Build the router with the default collaborators from [`test_config`].
pub fn build_default_app() -> Router {
    let config = test_config();
    let state = AppState::from_config(&config).unwrap();
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// Accepts exactly one secret and counts how often it was asked.
#[derive(Default)]
pub struct FixedSecretValidator {
    pub calls: Mutex<Vec<String>>,
}

impl SecretValidator for FixedSecretValidator {
    fn validate_device_secret(&self, secret: &str) -> bool {
        self.calls.lock().unwrap().push(secret.to_string());
        secret == VALID_SECRET
    }
}

/// Records every reading it receives and returns a canned result.
pub struct RecordingAlertEvaluator {
    pub calls: Mutex<Vec<DeviceReadingRequest>>,
    pub result: Vec<Alert>,
}

impl RecordingAlertEvaluator {
    pub fn new(result: Vec<Alert>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            result,
        }
    }

    pub fn with_one_alert() -> Self {
        Self::new(vec![Alert::from(AlertType::DangerousTemperatureLevel)])
    }

    pub fn calls(&self) -> Vec<DeviceReadingRequest> {
        self.calls.lock().unwrap().clone()
    }
}

impl AlertEvaluator for RecordingAlertEvaluator {
    fn get_alerts(&self, reading: &DeviceReadingRequest) -> Result<Vec<Alert>, CoreError> {
        self.calls.lock().unwrap().push(reading.clone());
        Ok(self.result.clone())
    }
}

/// Always fails.
pub struct FailingAlertEvaluator;

impl AlertEvaluator for FailingAlertEvaluator {
    fn get_alerts(&self, _reading: &DeviceReadingRequest) -> Result<Vec<Alert>, CoreError> {
        Err(CoreError::Internal("alert backend unreachable at 10.0.0.7".into()))
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a JSON body to `/readings/evaluate`, optionally with a device secret.
pub async fn post_reading(
    app: Router,
    secret: Option<&str>,
    body: &serde_json::Value,
) -> Response<Body> {
    post_raw_reading(app, secret, body.to_string()).await
}

/// POST a raw body to `/readings/evaluate` with a JSON content type.
pub async fn post_raw_reading(
    app: Router,
    secret: Option<&str>,
    body: String,
) -> Response<Body> {
    let secret = secret.map(|s| HeaderValue::from_str(s).unwrap());
    send_reading(app, secret, body).await
}

/// POST a reading with the secret header set to arbitrary bytes.
pub async fn post_reading_with_secret_bytes(
    app: Router,
    secret: &[u8],
    body: &serde_json::Value,
) -> Response<Body> {
    let secret = HeaderValue::from_bytes(secret).unwrap();
    send_reading(app, Some(secret), body.to_string()).await
}

async fn send_reading(app: Router, secret: Option<HeaderValue>, body: String) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/readings/evaluate")
        .header("content-type", "application/json");
    if let Some(secret) = secret {
        builder = builder.header(DEVICE_SECRET_HEADER, secret);
    }
    let request = builder.body(Body::from(body)).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A well-formed reading body.
pub fn reading_body(firmware_version: &str) -> serde_json::Value {
    serde_json::json!({
        "temperature": 21.5,
        "humidity": 45.0,
        "firmwareVersion": firmware_version,
    })
}
