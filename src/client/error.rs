//! Client error type
//!
//! Every failure a client call can produce maps onto [`ApiError`]. The
//! `Display` output is what the binary prints before exiting.

use thiserror::Error;

use super::auth;

/// Error returned by every client call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API key is missing
    #[error("TRELLO_API_KEY is not configured. Export it before running the helper.")]
    MissingKey,

    /// The access token is missing; carries the authorization instructions
    #[error(
        "TRELLO_TOKEN is not configured. The helper can build an authorization link so you can \
         create one.{instructions}"
    )]
    MissingToken {
        /// Instructions containing a ready-to-use authorization URL
        instructions: String,
    },

    /// The remote host could not be reached (DNS, connect, timeout)
    #[error("Unable to reach Trello: {reason}")]
    Unreachable {
        /// Transport-level reason
        reason: String,
    },

    /// The remote answered with a non-success status
    #[error("HTTP {status} calling {url}: {reason}.{instructions}")]
    Http {
        /// Status code
        status: u16,
        /// Full request URL
        url: String,
        /// Reason phrase
        reason: String,
        /// Authorization instructions for 401/403, empty otherwise
        instructions: String,
    },

    /// A success response whose body is not JSON
    #[error("Trello returned an invalid JSON response from {url}: {source}")]
    InvalidResponse {
        /// Full request URL
        url: String,
        /// Decoder error
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Build the error for a missing token, pointing at the authorization URL
    #[must_use]
    pub fn missing_token(key: &str, scope: &str) -> Self {
        Self::MissingToken {
            instructions: auth::authorization_instructions(key, scope),
        }
    }

    /// Build the error for an HTTP error status
    ///
    /// 401 and 403 usually mean the token is missing, invalid or expired, so
    /// those carry the authorization instructions as well.
    #[must_use]
    pub fn http(status: u16, url: impl Into<String>, reason: impl Into<String>, key: &str, scope: &str) -> Self {
        let instructions = if matches!(status, 401 | 403) {
            auth::authorization_instructions(key, scope)
        } else {
            String::new()
        };
        Self::Http {
            status,
            url: url.into(),
            reason: reason.into(),
            instructions,
        }
    }

    /// HTTP status code, if the error came from a response
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the error was raised before any network call
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::MissingKey | Self::MissingToken { .. })
    }
}
