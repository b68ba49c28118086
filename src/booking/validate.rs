use crate::core::time::parse_utc;

use super::error::BookingError;
use super::models::{BookingRequest, ValidatedRequest};

/// Check a booking request. Rules run in order and the first failure
/// is returned: name, then both timestamps, then ordering.
pub fn validate(request: &BookingRequest) -> Result<ValidatedRequest, BookingError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(BookingError::validation("name", "required"));
    }

    let start = parse_utc(&request.start_utc)
        .map_err(|_| BookingError::validation("startUtc", "must be ISO-8601 UTC"))?;
    let end = parse_utc(&request.end_utc)
        .map_err(|_| BookingError::validation("endUtc", "must be ISO-8601 UTC"))?;

    if end <= start {
        return Err(BookingError::validation("endUtc", "must be after startUtc"));
    }

    Ok(ValidatedRequest {
        name: name.to_string(),
        title: request.title.clone(),
        start,
        end,
        timezone: request.timezone.clone(),
    })
}
