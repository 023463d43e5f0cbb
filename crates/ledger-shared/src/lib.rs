//! # Ledger Shared
//!
//! Configuration, telemetry, credential loading and common types for the
//! accounting API client.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod credentials;
pub mod error;

pub use types::*;
pub use error::AppError;
