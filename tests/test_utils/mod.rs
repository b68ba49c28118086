//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, body::Body};

use voice_scheduling::api::AppState;
use voice_scheduling::api::app;
use voice_scheduling::core::AppConfig;
use voice_scheduling::google::GoogleCalendar;

pub const CLIENT_SECRET: &str = "test-client-secret";
pub const REFRESH_TOKEN: &str = "1//test-refresh-token";

/// A fully configured app whose Google endpoints point at `mock_url`.
pub fn configured(mock_url: &str) -> AppConfig {
    AppConfig {
        google_client_id: Some(String::from("test-client-id.apps.googleusercontent.com")),
        google_client_secret: Some(String::from(CLIENT_SECRET)),
        google_refresh_token: Some(String::from(REFRESH_TOKEN)),
        google_calendar_id: Some(String::from("primary")),
        calendar_timezone: String::from("America/Toronto"),
        google_token_url: format!("{}/token", mock_url),
        google_calendar_api_url: mock_url.to_string(),
        http_timeout_secs: 5,
        ..AppConfig::default()
    }
}

/// Creates a test application router for the given configuration.
pub fn test_app(config: AppConfig) -> Router {
    let calendar = GoogleCalendar::new(
        &config.google_token_url,
        &config.google_calendar_api_url,
        Duration::from_secs(config.http_timeout_secs),
    )
    .expect("Failed to build calendar client");
    let app_state = AppState::new(config, Arc::new(calendar));
    app(Arc::new(app_state))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body was not utf-8")
}

pub async fn body_to_json(body: Body) -> serde_json::Value {
    serde_json::from_str(&body_to_string(body).await).expect("Body was not JSON")
}
