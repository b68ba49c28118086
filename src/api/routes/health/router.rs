//! Router for the health API

use axum::{Router, extract::State, response::Json};
use chrono::Utc;

use crate::api::state::SharedState;
use crate::core::time::format_utc;
use super::public::HealthResponse;

/// Always succeeds, even when the calendar is not configured
async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        service: state.config.service_name.clone(),
        utc: format_utc(&Utc::now()),
    })
}

/// Create the health router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(health))
}
