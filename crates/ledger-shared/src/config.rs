//! Configuration management

use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::*;
use crate::credentials::read_secret_file;
use crate::error::AppError;
use crate::types::{ArchivePolicy, LogFormat};

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiSettings,
    pub auth: AuthSettings,
    pub limits: LimitSettings,
    pub seed: SeedSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub tenant_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub client_secret_path: Option<String>,
    /// Space separated, as sent in the token request.
    pub scopes: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LimitSettings {
    pub request_period_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeedSettings {
    pub name_prefix: String,
    pub archive_policy: ArchivePolicy,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub format: LogFormat,
    pub directory: Option<String>,
}

impl AppConfig {
    /// Defaults, then `config/default`, then `config/{APP_ENV}`, then
    /// `APP__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Build from an inline TOML document layered over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.base_url", DEFAULT_API_BASE_URL)?
            .set_default("api.user_agent", DEFAULT_USER_AGENT)?
            .set_default("api.request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
            .set_default("auth.token_url", DEFAULT_TOKEN_URL)?
            .set_default("auth.scopes", DEFAULT_SCOPES)?
            .set_default("limits.request_period_ms", DEFAULT_REQUEST_PERIOD_MS as i64)?
            .set_default("seed.name_prefix", DEFAULT_SEED_PREFIX)?
            .set_default("seed.archive_policy", ArchivePolicy::default().as_str())?
            .set_default("logging.format", "pretty")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs.max(1))
    }

    pub fn request_period(&self) -> Duration {
        Duration::from_millis(self.limits.request_period_ms)
    }
}

impl AuthSettings {
    /// Inline secret wins; otherwise the secret is read from
    /// `client_secret_path`.
    pub fn resolve_client_secret(&self) -> Result<String, AppError> {
        if let Some(secret) = self.client_secret.as_deref().filter(|s| !s.is_empty()) {
            return Ok(secret.to_string());
        }
        match self.client_secret_path.as_deref() {
            Some(path) => read_secret_file(path),
            None => Err(AppError::MissingClientSecret),
        }
    }

    pub fn scope_list(&self) -> Vec<String> {
        self.scopes.split_whitespace().map(str::to_string).collect()
    }
}
