//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::{StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::booking::BookingError;

// Errors

/// Body of a rejected booking.
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub ok: bool,
    pub error: String,
    pub field: Option<String>,
}

/// `application/problem+json` body for server-side failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProblemDetails {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

pub const TITLE_NOT_CONFIGURED: &str = "Server not configured";
pub const TITLE_BOOKING_FAILED: &str = "Google Calendar booking failed";

fn problem(status: StatusCode, title: &str, detail: String) -> Response {
    let body = ProblemDetails {
        title: title.to_string(),
        status: status.as_u16(),
        detail,
    };
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        Json(body),
    )
        .into_response()
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        match self {
            BookingError::Validation { field, .. } => (
                StatusCode::BAD_REQUEST,
                Json(ValidationFailure {
                    ok: false,
                    error: detail,
                    field: Some(field.to_string()),
                }),
            )
                .into_response(),
            BookingError::Configuration { .. } => {
                problem(StatusCode::INTERNAL_SERVER_ERROR, TITLE_NOT_CONFIGURED, detail)
            }
            BookingError::ExternalAuth(_) | BookingError::ExternalBooking(_) => {
                problem(StatusCode::BAD_GATEWAY, TITLE_BOOKING_FAILED, detail)
            }
        }
    }
}

// Re-export public types from each route

pub mod availability {
    pub use crate::api::routes::availability::public::*;
}

pub mod book {
    pub use crate::api::routes::book::public::*;
}

pub mod health {
    pub use crate::api::routes::health::public::*;
}

pub mod now {
    pub use crate::api::routes::now::public::*;
}
