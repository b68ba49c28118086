//! Google Calendar v3 event insertion.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::booking::error::redact_secrets;
use crate::booking::{BookingError, BookingResult, NormalizedBooking};
use crate::core::time::{UTC_ZONE_ID, format_utc};

use super::oauth::AuthorizedSession;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    pub date_time: String,
    pub time_zone: String,
}

/// Body of `POST /calendar/v3/calendars/{calendarId}/events`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventPayload {
    pub summary: String,
    pub description: String,
    pub start: EventDateTime,
    pub end: EventDateTime,
}

impl EventPayload {
    /// Instants always go out tagged as UTC. The booking's display
    /// timezone is not sent.
    pub fn from_booking(booking: &NormalizedBooking) -> Self {
        Self {
            summary: booking.title().to_string(),
            description: format!("Booked by voice scheduling agent for {}.", booking.name()),
            start: EventDateTime {
                date_time: format_utc(&booking.start()),
                time_zone: UTC_ZONE_ID.to_string(),
            },
            end: EventDateTime {
                date_time: format_utc(&booking.end()),
                time_zone: UTC_ZONE_ID.to_string(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedEvent {
    id: String,
    html_link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

pub fn events_url(api_url: &str, calendar_id: &str) -> String {
    format!(
        "{}/calendar/v3/calendars/{}/events",
        api_url.trim_end_matches('/'),
        urlencoding::encode(calendar_id)
    )
}

async fn insert_event(
    http: &Client,
    api_url: &str,
    session: &AuthorizedSession,
    payload: &EventPayload,
) -> Result<CreatedEvent, String> {
    let resp = http
        .post(events_url(api_url, session.calendar_id()))
        .bearer_auth(session.access_token())
        .json(payload)
        .send()
        .await
        .map_err(|e| format!("Calendar request failed: {}", e.without_url()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| format!("Failed to read calendar response: {}", e.without_url()))?;

    if !status.is_success() {
        let message = serde_json::from_str::<GoogleErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| format!("Calendar API returned {}: {}", status, body));
        return Err(message);
    }

    serde_json::from_str(&body).map_err(|e| format!("Invalid calendar response: {}", e))
}

/// Create one event for `booking`. Sent exactly once; a failure is
/// returned as is and never retried.
pub async fn create_event(
    http: &Client,
    api_url: &str,
    session: &AuthorizedSession,
    booking: &NormalizedBooking,
) -> Result<BookingResult, BookingError> {
    let payload = EventPayload::from_booking(booking);

    let created = insert_event(http, api_url, session, &payload)
        .await
        .map_err(|message| {
            BookingError::ExternalBooking(redact_secrets(
                &message,
                &[Some(session.access_token())],
            ))
        })?;

    Ok(BookingResult {
        booking_id: created.id,
        confirmation_link: created.html_link,
        confirmed: booking.clone(),
    })
}
