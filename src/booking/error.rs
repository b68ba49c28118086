use thiserror::Error;

/// Everything that can stop a booking.
///
/// Messages never carry credential values. `Configuration` only names
/// the fields that are missing and the external variants carry the
/// provider's text after secrets have been scrubbed from it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("{field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },
    #[error("Missing Google Calendar configuration: {}", missing.join(", "))]
    Configuration { missing: Vec<&'static str> },
    #[error("{0}")]
    ExternalAuth(String),
    #[error("{0}")]
    ExternalBooking(String),
}

impl BookingError {
    pub fn validation(field: &'static str, reason: &'static str) -> Self {
        Self::Validation { field, reason }
    }

    /// The request field at fault, for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    /// True when the caller can fix the problem by resubmitting.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Shorter values are not real credentials and would match ordinary words.
const MIN_SECRET_LEN: usize = 6;

/// Replace every occurrence of a secret in provider text with a
/// placeholder. Secrets shorter than six characters are skipped.
pub fn redact_secrets(message: &str, secrets: &[Option<&str>]) -> String {
    secrets
        .iter()
        .flatten()
        .filter(|secret| secret.len() >= MIN_SECRET_LEN)
        .fold(message.to_string(), |acc, secret| {
            acc.replace(secret, "[redacted]")
        })
}
