//! reqwest-backed transport

mod client;
mod transport;

pub use client::build_http_client;
pub use transport::{HttpTransport, TENANT_HEADER};
