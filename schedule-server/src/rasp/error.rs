//! Schedules client error types.

use std::fmt;

/// Errors from the schedules HTTP client.
#[derive(Debug)]
pub enum RaspError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// JSON deserialization failed
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    Api { status: u16, message: String },

    /// Invalid API key or unauthorized
    Unauthorized,
}

impl RaspError {
    /// Whether this failure is a connectivity problem (no network path,
    /// connect failure, timeout) rather than a server-side or decoding one.
    ///
    /// Connectivity failures route the user to the offline state; every
    /// other failure is presented as a server error.
    pub fn is_connectivity(&self) -> bool {
        match self {
            RaspError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

impl fmt::Display for RaspError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaspError::Http(e) => write!(f, "HTTP error: {e}"),
            RaspError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            RaspError::Api { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            RaspError::Unauthorized => write!(f, "unauthorized (invalid API key)"),
        }
    }
}

impl std::error::Error for RaspError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RaspError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RaspError {
    fn from(err: reqwest::Error) -> Self {
        RaspError::Http(err)
    }
}
