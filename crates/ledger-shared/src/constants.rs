//! Application-wide constants

pub const DEFAULT_API_BASE_URL: &str = "https://api.xero.com/api.xro/2.0";
pub const DEFAULT_TOKEN_URL: &str = "https://identity.xero.com/connect/token";
pub const DEFAULT_SCOPES: &str = "accounting.transactions accounting.contacts accounting.settings";
pub const DEFAULT_USER_AGENT: &str = "ledger-sync/0.1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_PERIOD_MS: u64 = 1000;
pub const DEFAULT_SEED_PREFIX: &str = "HS ";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const LOG_FILE_PREFIX: &str = "ledger-sync";


/// Archive touches at most this many records per invocation so a single run
/// stays well inside the upstream per-minute quota.
pub const MAX_ARCHIVE_BATCH: usize = 31;
