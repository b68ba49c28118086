//! OAuth 2.0 against Google's token endpoint.
//!
//! The service only ever uses the refresh grant: a long-lived refresh
//! token plus the client identity buys one short-lived access token per
//! booking. New tokens are never written anywhere. The authorization
//! code grant is here for the offline `google-token-gen` utility.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::Deserialize;

use crate::booking::BookingError;
use crate::booking::error::redact_secrets;

pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const CALENDAR_EVENTS_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// The fixed identity the service books with. Secret fields never
/// show up in `Debug` output or error messages.
#[derive(Clone)]
pub struct CalendarCredential {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub refresh_token: Option<String>,
    pub calendar_id: Option<String>,
    pub timezone_id: String,
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).is_none_or(str::is_empty)
}

impl CalendarCredential {
    /// Names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("clientId", &self.client_id),
            ("clientSecret", &self.client_secret),
            ("refreshToken", &self.refresh_token),
            ("calendarId", &self.calendar_id),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| name)
        .collect()
    }
}

impl fmt::Debug for CalendarCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarCredential")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("calendar_id", &self.calendar_id)
            .field("timezone_id", &self.timezone_id)
            .finish()
    }
}

/// Fail with a configuration error before any network traffic when
/// the credential is incomplete.
pub fn check_credential(credential: &CalendarCredential) -> Result<(), BookingError> {
    let missing = credential.missing_fields();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(BookingError::Configuration { missing })
    }
}

/// Short-lived authorization to write events to one calendar.
#[derive(Clone)]
pub struct AuthorizedSession {
    access_token: String,
    calendar_id: String,
    expires_in: Option<i64>,
}

impl AuthorizedSession {
    pub fn new(access_token: &str, calendar_id: &str, expires_in: Option<i64>) -> Self {
        Self {
            access_token: access_token.to_string(),
            calendar_id: calendar_id.to_string(),
            expires_in,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in
    }

    pub fn scope(&self) -> &'static str {
        CALENDAR_EVENTS_SCOPE
    }
}

impl fmt::Debug for AuthorizedSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedSession")
            .field("access_token", &"<redacted>")
            .field("calendar_id", &self.calendar_id)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthErrorResponse {
    error: String,
    error_description: Option<String>,
}

/// POST a form to the token endpoint. The error side is the provider's
/// own explanation, unredacted.
async fn request_token(
    http: &Client,
    token_url: &str,
    params: &[(&str, &str)],
) -> Result<TokenResponse, String> {
    let resp = http
        .post(token_url)
        .form(params)
        .send()
        .await
        .map_err(|e| format!("Token request failed: {}", e.without_url()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| format!("Failed to read token response: {}", e.without_url()))?;

    if !status.is_success() {
        let message = match serde_json::from_str::<OAuthErrorResponse>(&body) {
            Ok(OAuthErrorResponse {
                error,
                error_description: Some(description),
            }) => format!("{}: {}", error, description),
            Ok(OAuthErrorResponse { error, .. }) => error,
            Err(_) => format!("Token endpoint returned {}: {}", status, body),
        };
        return Err(message);
    }

    serde_json::from_str(&body).map_err(|e| format!("Invalid token response: {}", e))
}

/// Exchange a refresh token for an access token.
pub async fn refresh_access_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    refresh_token: &str,
) -> Result<TokenResponse, String> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("refresh_token", refresh_token),
        ("grant_type", "refresh_token"),
    ];
    request_token(http, token_url, &params).await
}

/// Turn a credential into a session that can create events.
///
/// Configuration problems are reported without touching the network.
/// A rejected or unreachable token exchange is an `ExternalAuth` error.
pub async fn authorize(
    http: &Client,
    token_url: &str,
    credential: &CalendarCredential,
) -> Result<AuthorizedSession, BookingError> {
    check_credential(credential)?;

    let client_id = credential.client_id.as_deref().unwrap_or_default().trim();
    let client_secret = credential.client_secret.as_deref().unwrap_or_default().trim();
    let refresh_token = credential.refresh_token.as_deref().unwrap_or_default().trim();
    let calendar_id = credential.calendar_id.as_deref().unwrap_or_default().trim();

    let token = refresh_access_token(http, token_url, client_id, client_secret, refresh_token)
        .await
        .map_err(|message| {
            BookingError::ExternalAuth(redact_secrets(
                &message,
                &[Some(client_secret), Some(refresh_token)],
            ))
        })?;

    tracing::debug!("Refreshed access token for calendar {}", calendar_id);

    Ok(AuthorizedSession::new(
        &token.access_token,
        calendar_id,
        token.expires_in,
    ))
}

/// Consent page URL for the offline authorization code flow.
pub fn consent_url(client_id: &str, redirect_uri: &str, scope: &str) -> String {
    format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
        GOOGLE_AUTH_URL,
        urlencoding::encode(client_id),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(scope)
    )
}

/// Accept either the bare code or the whole redirect URL the browser
/// landed on and return just the code.
pub fn authorization_code_from(input: &str) -> String {
    let input = input.trim();
    reqwest::Url::parse(input)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "code")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_else(|| input.to_string())
}

/// Exchange an authorization code for tokens.
pub async fn exchange_code_for_token(
    http: &Client,
    token_url: &str,
    client_id: &str,
    client_secret: &str,
    code: &str,
    redirect_uri: &str,
) -> Result<TokenResponse> {
    let params = [
        ("client_id", client_id),
        ("client_secret", client_secret),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("grant_type", "authorization_code"),
    ];
    request_token(http, token_url, &params)
        .await
        .map_err(|message| anyhow!(redact_secrets(&message, &[Some(client_secret)])))
}

#[derive(Debug, Deserialize)]
struct OAuthClientSection {
    client_id: String,
    client_secret: String,
    redirect_uris: Option<Vec<String>>,
    token_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OAuthClientFile {
    installed: Option<OAuthClientSection>,
    web: Option<OAuthClientSection>,
}

/// Client identity as downloaded from the Google Cloud console.
#[derive(Clone)]
pub struct OAuthClientSecrets {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uris: Vec<String>,
    pub token_uri: Option<String>,
}

impl fmt::Debug for OAuthClientSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientSecrets")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uris", &self.redirect_uris)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl OAuthClientSecrets {
    /// Parse either the `installed` or the `web` client layout.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: OAuthClientFile =
            serde_json::from_str(json).context("OAuth client file is not valid JSON")?;
        let section = file
            .installed
            .or(file.web)
            .ok_or_else(|| anyhow!("OAuth client file has no `installed` or `web` section"))?;

        Ok(Self {
            client_id: section.client_id,
            client_secret: section.client_secret,
            redirect_uris: section.redirect_uris.unwrap_or_default(),
            token_uri: section.token_uri,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Missing {}", path.display()))?;
        Self::from_json(&json)
    }
}
