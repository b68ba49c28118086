//! Drives one booking from request to provider result.
//!
//! Each call walks `received → validated → authorized → submitted`
//! and ends in `confirmed` or `failed`. Validation runs before the
//! gateway is touched, and every external call is attempted exactly
//! once. A client that retries after a timeout can therefore create a
//! duplicate event; nothing here deduplicates.

use crate::google::{CalendarCredential, CalendarGateway};

use super::error::BookingError;
use super::models::{BookingRequest, BookingResult, BookingState};
use super::validate::validate;

struct BookingRun {
    state: BookingState,
}

impl BookingRun {
    fn new() -> Self {
        tracing::debug!("Booking {}", BookingState::Received);
        Self {
            state: BookingState::Received,
        }
    }

    fn advance(&mut self, next: BookingState) {
        tracing::debug!("Booking {} -> {}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, err: BookingError) -> BookingError {
        if err.is_client_error() {
            tracing::info!("Booking rejected while {}: {}", self.state, err);
        } else {
            tracing::error!("Booking failed while {}: {}", self.state, err);
        }
        self.state = BookingState::Failed;
        err
    }
}

/// Validate, authorize and create the calendar event for `request`.
pub async fn book(
    gateway: &dyn CalendarGateway,
    credential: CalendarCredential,
    request: BookingRequest,
) -> Result<BookingResult, BookingError> {
    let mut run = BookingRun::new();

    let validated = validate(&request).map_err(|e| run.fail(e))?;
    let booking = validated.normalize(&credential.timezone_id);
    run.advance(BookingState::Validated);

    let session = gateway
        .authorize(&credential)
        .await
        .map_err(|e| run.fail(e))?;
    run.advance(BookingState::Authorized);

    run.advance(BookingState::Submitted);
    let result = gateway
        .create_event(&session, &booking)
        .await
        .map_err(|e| run.fail(e))?;
    run.advance(BookingState::Confirmed);

    tracing::info!(
        "Booked {} for {} ({} to {})",
        result.booking_id,
        result.confirmed.name(),
        result.confirmed.start(),
        result.confirmed.end()
    );

    Ok(result)
}
