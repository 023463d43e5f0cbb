//! # Ledger Core
//!
//! Domain records, the request limiter, transport/session ports and the
//! validated entity façades of the accounting API client.

pub mod domain;
pub mod services;
pub mod transport;
pub mod session;
pub mod limiter;
pub mod precision;
pub mod client;
pub mod error;

#[cfg(test)]
mod testing;

// Re-export domain entities
pub use domain::*;
pub use client::{ClientOptions, LedgerClient};
pub use error::{LedgerError, LimiterError, TransportError};
pub use limiter::RequestLimiter;
pub use session::{Authenticator, Session};
pub use transport::{Endpoint, Transport};
