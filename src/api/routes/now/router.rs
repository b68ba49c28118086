//! Router for the now API

use axum::{
    Router,
    extract::{Query, State},
    response::Json,
};
use chrono::SecondsFormat;

use crate::api::state::SharedState;
use crate::core::time::{format_utc, now_in_zone};
use super::public;

/// Report the current time in the calendar's timezone so callers can
/// resolve relative dates like "tomorrow at 3"
async fn now(
    State(state): State<SharedState>,
    Query(params): Query<public::NowQuery>,
) -> Json<public::NowResponse> {
    let preferred = params
        .timezone
        .as_deref()
        .map(str::trim)
        .filter(|tz| !tz.is_empty())
        .unwrap_or(state.config.calendar_timezone.as_str());

    let now = now_in_zone(preferred);

    Json(public::NowResponse {
        utc: format_utc(&now.utc),
        timezone: now.timezone,
        local: now.local.to_rfc3339_opts(SecondsFormat::Secs, false),
        local_date: now.local_date.format("%Y-%m-%d").to_string(),
        local_time: now.local_time.format("%H:%M:%S").to_string(),
    })
}

/// Create the now router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", axum::routing::get(now))
}
