//! Common types

use serde::Deserialize;

/// How the seeded-record archive reacts to a failed update mid-batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchivePolicy {
    /// Stop at the first failed update and return its error.
    #[default]
    FailFast,
    /// Record the failure and keep going with the rest of the batch.
    BestEffort,
}

impl ArchivePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchivePolicy::FailFast => "fail_fast",
            ArchivePolicy::BestEffort => "best_effort",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}
