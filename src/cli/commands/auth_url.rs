//! Print the token authorization link

use trello_cards::client::{ApiError, authorization_url};
use trello_cards::config::Config;

/// Print the authorization URL for the configured API key
pub fn auth_url(config: &Config) -> anyhow::Result<()> {
    let key = config.api_key.as_deref().ok_or(ApiError::MissingKey)?;
    println!("{}", authorization_url(key, &config.auth_scope));
    Ok(())
}
