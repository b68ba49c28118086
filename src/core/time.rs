//! Timestamp parsing and timezone resolution.
//!
//! Everything that crosses the HTTP boundary as a date-time goes
//! through [`parse_utc`] so the rest of the crate only ever sees
//! `DateTime<Utc>`.

use chrono::{
    DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc,
};
use chrono_tz::Tz;
use thiserror::Error;

pub const UTC_ZONE_ID: &str = "UTC";

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// City identifiers and the older regional alias tried after them.
const REGIONAL_ALIASES: &[(&str, &str)] = &[
    ("America/Toronto", "Canada/Eastern"),
    ("America/Vancouver", "Canada/Pacific"),
    ("America/New_York", "US/Eastern"),
    ("America/Chicago", "US/Central"),
    ("America/Denver", "US/Mountain"),
    ("America/Los_Angeles", "US/Pacific"),
    ("Europe/London", "GB"),
    ("Asia/Tokyo", "Japan"),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{input}` is not an ISO-8601 date-time")]
pub struct ParseError {
    input: String,
}

impl ParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// `0001-01-01T00:00:00Z`, the value an unset date-time collapses to.
fn zero_instant() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

fn parse_with_offset(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_naive(text: &str) -> Option<DateTime<Utc>> {
    // A trailing `Z` on an otherwise naive value still means UTC
    let text = text.strip_suffix(['Z', 'z']).unwrap_or(text);

    if let Some(dt) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt.and_utc());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Parse an ISO-8601 timestamp into a UTC instant.
///
/// Accepts a `Z` marker or a numeric offset. Values without any
/// offset are taken to already be in UTC.
pub fn parse_utc(text: &str) -> Result<DateTime<Utc>, ParseError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseError::new(text));
    }

    let parsed = parse_with_offset(trimmed)
        .or_else(|| parse_naive(trimmed))
        .ok_or_else(|| ParseError::new(text))?;

    if parsed <= zero_instant() {
        return Err(ParseError::new(text));
    }

    Ok(parsed)
}

/// Format an instant the way it goes over the wire: RFC 3339, second
/// precision, `Z` suffix.
pub fn format_utc(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The preferred zone followed by its regional alias, if one is known.
pub fn timezone_candidates(preferred: &str) -> Vec<String> {
    let preferred = preferred.trim();
    let mut candidates = vec![preferred.to_string()];
    if let Some((_, alias)) = REGIONAL_ALIASES
        .iter()
        .find(|(city, _)| city.eq_ignore_ascii_case(preferred))
    {
        candidates.push(alias.to_string());
    }
    candidates
}

/// Resolve the first candidate that names a known zone. Never fails:
/// when nothing resolves the answer is UTC.
pub fn resolve_timezone<S: AsRef<str>>(candidates: &[S]) -> (Tz, String) {
    for candidate in candidates {
        let candidate = candidate.as_ref().trim();
        match candidate.parse::<Tz>() {
            Ok(tz) => return (tz, tz.name().to_string()),
            Err(_) => tracing::debug!("Unknown timezone candidate {:?}", candidate),
        }
    }

    tracing::warn!("No timezone candidate resolved, falling back to UTC");
    (Tz::UTC, UTC_ZONE_ID.to_string())
}

/// "Now" expressed in a target timezone.
#[derive(Debug, Clone)]
pub struct ZonedNow {
    pub utc: DateTime<Utc>,
    pub timezone: String,
    pub local: DateTime<Tz>,
    pub local_date: NaiveDate,
    pub local_time: NaiveTime,
}

/// Express `instant` in the first resolvable candidate zone.
pub fn zoned_now<S: AsRef<str>>(instant: DateTime<Utc>, candidates: &[S]) -> ZonedNow {
    let (tz, timezone) = resolve_timezone(candidates);
    let local = tz.from_utc_datetime(&instant.naive_utc());

    ZonedNow {
        utc: instant,
        timezone,
        local_date: local.date_naive(),
        local_time: local.time(),
        local,
    }
}

/// Read the wall clock and express it in `target_timezone_id`,
/// falling back through its regional alias and then UTC.
pub fn now_in_zone(target_timezone_id: &str) -> ZonedNow {
    zoned_now(Utc::now(), &timezone_candidates(target_timezone_id))
}
