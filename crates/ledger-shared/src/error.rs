//! Application error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("empty credential file path")]
    EmptyCredentialPath,

    #[error("could not read credential file {path}: {source}")]
    CredentialRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file {0} is empty")]
    EmptyCredential(String),

    #[error("no client secret configured (set auth.client_secret or auth.client_secret_path)")]
    MissingClientSecret,

    #[error("Telemetry error: {0}")]
    TelemetryError(String),
}
