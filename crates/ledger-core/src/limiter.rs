// ============================================================================
// Ledger Core - Request Limiter
// File: crates/ledger-core/src/limiter.rs
// Description: Pacing gate shared by every outbound request of a client
// ============================================================================

use std::future::Future;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tracing::debug;

use crate::error::LimiterError;

const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

/// One request per `period`, no burst.
///
/// The upstream API rejects clients that exceed its per-minute ceiling, so
/// every façade call waits here before touching the transport. Waiters are
/// not queued: whichever task polls first after the period elapses wins.
pub struct RequestLimiter {
    inner: DefaultDirectRateLimiter,
    period: Duration,
    acquired: AtomicU64,
}

impl RequestLimiter {
    pub fn new(period: Duration) -> Self {
        let period = if period.is_zero() { DEFAULT_PERIOD } else { period };
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
            .allow_burst(NonZeroU32::MIN);

        Self {
            inner: RateLimiter::direct(quota),
            period,
            acquired: AtomicU64::new(0),
        }
    }

    pub fn per_second() -> Self {
        Self::new(DEFAULT_PERIOD)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Tokens handed out so far.
    pub fn acquired(&self) -> u64 {
        self.acquired.load(Ordering::Relaxed)
    }

    /// Wait until another request may be issued. Never fails.
    pub async fn acquire(&self) -> Duration {
        let start = Instant::now();
        self.inner.until_ready().await;
        let waited = start.elapsed();
        let total = self.acquired.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(waited = ?waited, total, "Rate limiter token acquired");
        waited
    }

    /// Like [`acquire`](Self::acquire) but gives up at `deadline`.
    /// A wait that times out consumes no token.
    pub async fn acquire_until(&self, deadline: tokio::time::Instant) -> Result<Duration, LimiterError> {
        tokio::time::timeout_at(deadline, self.acquire())
            .await
            .map_err(|_| LimiterError::DeadlineExceeded)
    }

    pub async fn acquire_within(&self, max_wait: Duration) -> Result<Duration, LimiterError> {
        self.acquire_until(tokio::time::Instant::now() + max_wait).await
    }

    /// Race the wait against `cancel`; if `cancel` resolves first the wait is
    /// abandoned without consuming a token.
    pub async fn acquire_or_cancel<F>(&self, cancel: F) -> Result<Duration, LimiterError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            biased;
            _ = cancel => Err(LimiterError::Cancelled),
            waited = self.acquire() => Ok(waited),
        }
    }
}

impl Default for RequestLimiter {
    fn default() -> Self {
        Self::per_second()
    }
}

impl std::fmt::Debug for RequestLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLimiter")
            .field("period", &self.period)
            .field("acquired", &self.acquired())
            .finish()
    }
}
