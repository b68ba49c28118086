use std::env;
use std::fmt;
use std::time::Duration;

use crate::google::oauth::CalendarCredential;

pub const DEFAULT_SERVICE_NAME: &str = "voice-scheduling-agent";
pub const DEFAULT_CALENDAR_TIMEZONE: &str = "America/Toronto";
pub const DEFAULT_GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_GOOGLE_CALENDAR_API_URL: &str = "https://www.googleapis.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Process configuration, read once at startup and handed to the
/// server. Handlers never look at the environment themselves.
///
/// The Google credential fields are optional so a half-configured
/// deployment still serves `/health`, `/now` and `/availability`;
/// `/book` reports the missing pieces as a configuration error.
#[derive(Clone)]
pub struct AppConfig {
    pub service_name: String,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_refresh_token: Option<String>,
    pub google_calendar_id: Option<String>,
    pub calendar_timezone: String,
    pub google_token_url: String,
    pub google_calendar_api_url: String,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            google_client_id: None,
            google_client_secret: None,
            google_refresh_token: None,
            google_calendar_id: None,
            calendar_timezone: DEFAULT_CALENDAR_TIMEZONE.to_string(),
            google_token_url: DEFAULT_GOOGLE_TOKEN_URL.to_string(),
            google_calendar_api_url: DEFAULT_GOOGLE_CALENDAR_API_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

/// Blank values count as unset.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let http_timeout_secs = match optional_var("SCHEDULER_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
                tracing::warn!(
                    "Ignoring invalid SCHEDULER_HTTP_TIMEOUT_SECS={}, using {}s",
                    raw,
                    DEFAULT_HTTP_TIMEOUT_SECS
                );
                DEFAULT_HTTP_TIMEOUT_SECS
            }),
            None => defaults.http_timeout_secs,
        };

        Self {
            service_name: optional_var("SCHEDULER_SERVICE_NAME").unwrap_or(defaults.service_name),
            google_client_id: optional_var("GOOGLE_CLIENT_ID"),
            google_client_secret: optional_var("GOOGLE_CLIENT_SECRET"),
            google_refresh_token: optional_var("GOOGLE_REFRESH_TOKEN"),
            google_calendar_id: optional_var("GOOGLE_CALENDAR_ID"),
            calendar_timezone: optional_var("GOOGLE_CALENDAR_TIMEZONE")
                .unwrap_or(defaults.calendar_timezone),
            google_token_url: optional_var("GOOGLE_TOKEN_URL").unwrap_or(defaults.google_token_url),
            google_calendar_api_url: optional_var("GOOGLE_CALENDAR_API_URL")
                .unwrap_or(defaults.google_calendar_api_url),
            http_timeout_secs,
        }
    }

    /// Build a fresh credential for one booking call. Each call gets
    /// its own copy so concurrent bookings never share one.
    pub fn calendar_credential(&self) -> CalendarCredential {
        CalendarCredential {
            client_id: self.google_client_id.clone(),
            client_secret: self.google_client_secret.clone(),
            refresh_token: self.google_refresh_token.clone(),
            calendar_id: self.google_calendar_id.clone(),
            timezone_id: self.calendar_timezone.clone(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "<set>" } else { "<unset>" }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("service_name", &self.service_name)
            .field("google_client_id", &self.google_client_id)
            .field("google_client_secret", &redact(&self.google_client_secret))
            .field("google_refresh_token", &redact(&self.google_refresh_token))
            .field("google_calendar_id", &self.google_calendar_id)
            .field("calendar_timezone", &self.calendar_timezone)
            .field("google_token_url", &self.google_token_url)
            .field("google_calendar_api_url", &self.google_calendar_api_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .finish()
    }
}
