//! Tests for credentials and authorization links

use trello_cards::client::auth::{
    AUTH_APP_NAME, AUTHORIZATION_BASE, Credentials, authorization_instructions,
};
use trello_cards::client::{ApiError, authorization_url};
use trello_cards::config::Config;

fn query_of(url: &str) -> Vec<(String, String)> {
    let (base, query) = url.split_once('?').unwrap();
    assert_eq!(base, AUTHORIZATION_BASE);
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

#[test]
fn test_authorization_url_parameters() {
    let url = authorization_url("my-key", "read,write");
    assert_eq!(
        query_of(&url),
        [
            ("key".to_string(), "my-key".to_string()),
            ("scope".to_string(), "read,write".to_string()),
            ("expiration".to_string(), "never".to_string()),
            ("name".to_string(), AUTH_APP_NAME.to_string()),
            ("response_type".to_string(), "token".to_string()),
        ]
    );
}

#[test]
fn test_authorization_url_is_encoded() {
    let url = authorization_url("k", "read,write");
    assert_eq!(
        url,
        "https://trello.com/1/authorize?key=k&scope=read%2Cwrite&expiration=never\
         &name=Trello+Cards+Helper&response_type=token"
    );
}

#[test]
fn test_instructions_mention_token_variable_and_url() {
    let text = authorization_instructions("k", "read");
    assert!(text.starts_with(' '));
    assert!(text.contains("TRELLO_TOKEN"));
    assert!(text.ends_with(&authorization_url("k", "read")));
}

#[test]
fn test_resolve_requires_key_first() {
    let config = Config::default();
    let err = Credentials::resolve(&config).unwrap_err();
    assert!(matches!(err, ApiError::MissingKey));
    assert!(err.to_string().contains("TRELLO_API_KEY is not configured"));
}

#[test]
fn test_resolve_missing_token_includes_authorization_url() {
    let config = Config {
        api_key: Some("abc".to_string()),
        auth_scope: "read".to_string(),
        ..Config::default()
    };
    let err = Credentials::resolve(&config).unwrap_err();
    let message = err.to_string();
    assert!(err.is_config());
    assert!(message.starts_with("TRELLO_TOKEN is not configured."));
    assert!(message.contains(&authorization_url("abc", "read")));
    assert!(message.contains("expiration=never"));
    assert!(message.contains("response_type=token"));
}

#[test]
fn test_resolve_with_both() {
    let config = Config::default().with_credentials("k", "t");
    let creds = Credentials::resolve(&config).unwrap();
    assert_eq!(creds.key, "k");
    assert_eq!(creds.token, "t");
}

#[test]
fn test_credentials_debug_redacts_token() {
    let creds = Credentials {
        key: "k".to_string(),
        token: "secret-token".to_string(),
    };
    let debug = format!("{creds:?}");
    assert!(!debug.contains("secret-token"));
}
