//! OAuth2 session provider

mod oauth;

pub use oauth::OAuthAuthenticator;
