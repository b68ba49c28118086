//! Public types for the book API
use serde::{Deserialize, Serialize};

use crate::booking::{BookingResult, NormalizedBooking};
use crate::core::time::format_utc;

pub use crate::booking::BookingRequest;

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfirmedBooking {
    pub name: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub timezone: String,
}

impl From<&NormalizedBooking> for ConfirmedBooking {
    fn from(booking: &NormalizedBooking) -> Self {
        Self {
            name: booking.name().to_string(),
            title: booking.title().to_string(),
            start: format_utc(&booking.start()),
            end: format_utc(&booking.end()),
            timezone: booking.timezone_id().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub ok: bool,
    pub message: String,
    pub booking_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_link: Option<String>,
    pub confirmed: ConfirmedBooking,
}

impl From<BookingResult> for BookResponse {
    fn from(result: BookingResult) -> Self {
        Self {
            ok: true,
            message: String::from("Booked"),
            confirmed: ConfirmedBooking::from(&result.confirmed),
            booking_id: result.booking_id,
            html_link: result.confirmation_link,
        }
    }
}
