//! Router for the book API

use axum::{Json, Router, extract::State};

use crate::api::state::SharedState;
use crate::booking::{self, BookingError};
use super::public;

/// Create a calendar event for the request. Each call builds its own
/// credential from the startup config and makes at most one
/// authorization and one create call.
async fn book(
    State(state): State<SharedState>,
    Json(payload): Json<public::BookingRequest>,
) -> Result<Json<public::BookResponse>, BookingError> {
    let credential = state.config.calendar_credential();
    let result = booking::book(state.calendar.as_ref(), credential, payload).await?;

    Ok(Json(public::BookResponse::from(result)))
}

/// Create the book router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(book))
}
