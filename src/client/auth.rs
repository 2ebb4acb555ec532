//! Credentials and the out-of-band authorization link
//!
//! Trello tokens are granted by a human visiting an authorize page while
//! signed in. When a token is missing or rejected, errors carry a link built
//! here so the user can finish that grant and export the result.

use url::form_urlencoded;

use super::ApiError;
use crate::config::{Config, TOKEN_ENV};

/// Authorization page
pub const AUTHORIZATION_BASE: &str = "https://trello.com/1/authorize";

/// Tokens are requested without expiry
pub const AUTH_EXPIRATION: &str = "never";

/// Application name shown on the authorization page
pub const AUTH_APP_NAME: &str = "Trello Cards Helper";

/// A resolved key/token pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key
    pub key: String,
    /// Access token
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from config, key first
    ///
    /// A missing key short-circuits; a missing token yields an error that
    /// embeds the authorization URL for the configured key.
    pub fn resolve(config: &Config) -> Result<Self, ApiError> {
        let key = config.api_key.clone().ok_or(ApiError::MissingKey)?;
        let token = config
            .token
            .clone()
            .ok_or_else(|| ApiError::missing_token(&key, &config.auth_scope))?;
        Ok(Self { key, token })
    }
}

/// Build the authorization URL for a key and scope
#[must_use]
pub fn authorization_url(key: &str, scope: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("key", key)
        .append_pair("scope", scope)
        .append_pair("expiration", AUTH_EXPIRATION)
        .append_pair("name", AUTH_APP_NAME)
        .append_pair("response_type", "token")
        .finish();
    format!("{AUTHORIZATION_BASE}?{query}")
}

/// Human instructions for granting a token, with a leading space so they
/// can be appended to another sentence.
#[must_use]
pub fn authorization_instructions(key: &str, scope: &str) -> String {
    format!(
        " To grant access, open the following link while signed in as a board member, approve \
         the addon, and set {TOKEN_ENV} to the token Trello returns: {}",
        authorization_url(key, scope)
    )
}
