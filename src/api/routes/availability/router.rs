//! Router for the availability API

use axum::{Json, Router, extract::State};

use crate::api::state::SharedState;
use crate::core::time::format_utc;
use super::public;

/// Offer open slots. Backed by a placeholder source until calendar
/// reads are wired up.
async fn availability(
    State(state): State<SharedState>,
    Json(payload): Json<public::AvailabilityRequest>,
) -> Json<public::AvailabilityResponse> {
    let available = state
        .availability
        .slots(&payload)
        .into_iter()
        .map(|slot| public::Slot {
            start: format_utc(&slot.start),
            end: format_utc(&slot.end),
        })
        .collect();

    Json(public::AvailabilityResponse {
        ok: true,
        received: payload,
        available,
    })
}

/// Create the availability router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::post(availability))
}
