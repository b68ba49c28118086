//! Booking data as it moves from the HTTP body to the provider and back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw `/book` body. Missing and `null` fields deserialize as empty so
/// they are reported by validation instead of by the JSON extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BookingRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_empty")]
    pub start_utc: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub end_utc: String,
    pub timezone: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A request that passed validation, with both instants parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub name: String,
    pub title: Option<String>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub timezone: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl ValidatedRequest {
    /// Fill in the defaults. `default_timezone` is used when the caller
    /// did not name one.
    pub fn normalize(self, default_timezone: &str) -> NormalizedBooking {
        let title = non_blank(self.title.as_deref())
            .unwrap_or_else(|| format!("Meeting with {}", self.name));
        let timezone_id =
            non_blank(self.timezone.as_deref()).unwrap_or_else(|| default_timezone.to_string());

        NormalizedBooking {
            name: self.name,
            title,
            start: self.start,
            end: self.end,
            timezone_id,
        }
    }
}

/// A booking ready to send to the provider. Only built from a
/// [`ValidatedRequest`], so `end > start` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBooking {
    name: String,
    title: String,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    timezone_id: String,
}

impl NormalizedBooking {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Display timezone only; the instants sent to the provider are UTC.
    pub fn timezone_id(&self) -> &str {
        &self.timezone_id
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingResult {
    pub booking_id: String,
    pub confirmation_link: Option<String>,
    pub confirmed: NormalizedBooking,
}

/// Where a single booking call is. `Confirmed` and `Failed` are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    Received,
    Validated,
    Authorized,
    Submitted,
    Confirmed,
    Failed,
}

impl BookingState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Failed)
    }
}

impl fmt::Display for BookingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Received => "received",
            Self::Validated => "validated",
            Self::Authorized => "authorized",
            Self::Submitted => "submitted",
            Self::Confirmed => "confirmed",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

/// `/availability` body. Everything except `name` is optional and the
/// whole thing is echoed back to the caller.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub name: String,
    pub title: Option<String>,
    pub timezone: Option<String>,
    // e.g. "2026-02-19"
    pub date: Option<String>,
    pub range_start_utc: Option<String>,
    pub range_end_utc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilitySlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}
