//! Google Calendar integration: credential exchange and event creation.

pub mod gcal;
pub mod oauth;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use crate::booking::{BookingError, BookingResult, NormalizedBooking};
use crate::core::AppConfig;

pub use oauth::{AuthorizedSession, CalendarCredential};

/// The external calendar as the booking flow sees it.
#[async_trait]
pub trait CalendarGateway: Send + Sync {
    async fn authorize(
        &self,
        credential: &CalendarCredential,
    ) -> Result<AuthorizedSession, BookingError>;

    async fn create_event(
        &self,
        session: &AuthorizedSession,
        booking: &NormalizedBooking,
    ) -> Result<BookingResult, BookingError>;
}

/// Talks to the real Google endpoints. Holds no per-booking state, so
/// one instance serves every request.
#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    http: Client,
    token_url: String,
    api_url: String,
}

impl GoogleCalendar {
    pub fn new(token_url: &str, api_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            token_url: token_url.to_string(),
            api_url: api_url.to_string(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.google_token_url,
            &config.google_calendar_api_url,
            config.http_timeout(),
        )
    }
}

#[async_trait]
impl CalendarGateway for GoogleCalendar {
    async fn authorize(
        &self,
        credential: &CalendarCredential,
    ) -> Result<AuthorizedSession, BookingError> {
        oauth::authorize(&self.http, &self.token_url, credential).await
    }

    async fn create_event(
        &self,
        session: &AuthorizedSession,
        booking: &NormalizedBooking,
    ) -> Result<BookingResult, BookingError> {
        gcal::create_event(&self.http, &self.api_url, session, booking).await
    }
}
