//! Shared reqwest client

use std::time::Duration;

use reqwest::{redirect, Client};

use crate::error::InfraError;

/// Client used for API calls and token exchange. Redirects are not followed
/// so credentials are never replayed to another host.
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, InfraError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .redirect(redirect::Policy::none())
        .build()?)
}
