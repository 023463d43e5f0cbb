// ============================================================================
// Ledger Infrastructure - OAuth2 Authenticator
// File: crates/ledger-infrastructure/src/auth/oauth.rs
// ============================================================================

use async_trait::async_trait;
use chrono::Utc;
use oauth2::basic::BasicClient;
use oauth2::{ClientId, ClientSecret, RequestTokenError, Scope, TokenResponse, TokenUrl};
use reqwest::Client;
use tracing::{error, info};

use ledger_core::error::TransportError;
use ledger_core::session::{Authenticator, Session};
use ledger_shared::utils::mask_secret;

use crate::error::InfraError;

/// Client-credentials grant against the configured token endpoint.
pub struct OAuthAuthenticator {
    http: Client,
    client_id: ClientId,
    client_secret: ClientSecret,
    token_url: TokenUrl,
    scopes: Vec<Scope>,
    tenant_id: Option<String>,
}

impl OAuthAuthenticator {
    pub fn new(
        http: Client,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: &str,
        scopes: Vec<String>,
    ) -> Result<Self, InfraError> {
        let token_url = TokenUrl::new(token_url.to_string()).map_err(|e| InfraError::InvalidUrl {
            url: token_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            http,
            client_id: ClientId::new(client_id.into()),
            client_secret: ClientSecret::new(client_secret.into()),
            token_url,
            scopes: scopes.into_iter().map(Scope::new).collect(),
            tenant_id: None,
        })
    }

    /// Tenant attached to every session this authenticator issues.
    pub fn with_tenant(mut self, tenant_id: Option<String>) -> Self {
        self.tenant_id = tenant_id.filter(|t| !t.is_empty());
        self
    }
}

#[async_trait]
impl Authenticator for OAuthAuthenticator {
    async fn begin_auth(&self) -> Result<Session, TransportError> {
        info!(
            client_id = %mask_secret(self.client_id.as_str()),
            token_url = %self.token_url.as_str(),
            "Requesting access token"
        );

        let client = BasicClient::new(self.client_id.clone())
            .set_client_secret(self.client_secret.clone())
            .set_token_uri(self.token_url.clone());

        let token = client
            .exchange_client_credentials()
            .add_scopes(self.scopes.iter().cloned())
            .request_async(&self.http)
            .await
            .map_err(|e| {
                error!(error = %e, "Token exchange failed");
                match e {
                    RequestTokenError::ServerResponse(response) => {
                        TransportError::Auth(response.to_string())
                    }
                    RequestTokenError::Request(inner) => TransportError::Network(inner.to_string()),
                    RequestTokenError::Parse(inner, _) => TransportError::Decode(inner.to_string()),
                    RequestTokenError::Other(message) => TransportError::Auth(message),
                }
            })?;

        let mut session = Session::new(token.access_token().secret().clone());
        if let Some(expires_in) = token.expires_in() {
            if let Ok(ttl) = chrono::Duration::from_std(expires_in) {
                session = session.with_expiry(Utc::now() + ttl);
            }
        }
        if let Some(tenant) = &self.tenant_id {
            session = session.with_tenant(tenant.clone());
        }

        info!(expires_at = ?session.expires_at(), "Access token issued");
        Ok(session)
    }
}
