use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};

use ledger_core::{Authenticator, ClientOptions, LedgerClient, RequestLimiter};
use ledger_infrastructure::{build_http_client, HttpTransport, OAuthAuthenticator};
use ledger_shared::config::AppConfig;
use ledger_shared::utils::mask_secret;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration (telemetry is configured from it, so report on stderr)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    ledger_shared::telemetry::init_telemetry(&config.logging)?;

    info!("Ledger sync starting...");

    // The client secret is mandatory; without it nothing below can run.
    let client_secret = match config.auth.resolve_client_secret() {
        Ok(secret) => secret,
        Err(e) => {
            error!("Failed to load client secret: {}", e);
            std::process::exit(1);
        }
    };

    let http = build_http_client(&config.api.user_agent, config.request_timeout())?;

    // Authenticate
    info!(
        "Authenticating client {} against {}",
        mask_secret(&config.auth.client_id),
        config.auth.token_url
    );
    let authenticator = OAuthAuthenticator::new(
        http.clone(),
        config.auth.client_id.clone(),
        client_secret,
        &config.auth.token_url,
        config.auth.scope_list(),
    )?
    .with_tenant(config.api.tenant_id.clone());
    let session = authenticator
        .begin_auth()
        .await
        .context("authentication failed")?;

    // Build client
    let limiter = Arc::new(RequestLimiter::new(config.request_period()));
    let transport = Arc::new(HttpTransport::new(http, config.api.base_url.clone()));
    let client = LedgerClient::new(
        transport,
        limiter,
        ClientOptions {
            seed_prefix: Some(config.seed.name_prefix.clone()),
            max_limiter_wait: None,
        },
    );

    client
        .verify_session(&session)
        .await
        .context("session verification failed")?;

    // Archive seeded contacts
    let outcome = client
        .contacts()
        .archive_seeded(&session, &config.seed.name_prefix, config.seed.archive_policy)
        .await
        .context("archiving seeded contacts failed")?;

    for failure in &outcome.failures {
        warn!("Could not archive '{}': {}", failure.name, failure.error);
    }
    info!(
        "Archived {} contacts ({} failed), {} still match '{}'",
        outcome.archived,
        outcome.failures.len(),
        outcome.remaining.len(),
        config.seed.name_prefix
    );
    info!("Ledger sync finished after {} requests", client.limiter().acquired());

    Ok(())
}
