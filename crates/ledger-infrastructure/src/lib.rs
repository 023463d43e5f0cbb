//! # Ledger Infrastructure
//!
//! HTTP transport and OAuth2 authenticator (adapters for the core ports).

pub mod auth;
pub mod error;
pub mod http;

pub use auth::OAuthAuthenticator;
pub use error::InfraError;
pub use http::{build_http_client, HttpTransport};
