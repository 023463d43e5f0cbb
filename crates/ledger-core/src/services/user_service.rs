// ============================================================================
// Ledger Core - User Service
// File: crates/ledger-core/src/services/user_service.rs
// ============================================================================

use super::gateway::Gateway;
use crate::domain::{ListQuery, User};
use crate::error::LedgerError;
use crate::session::Session;
use crate::transport::Transport;

/// Read-only access to organisation users
pub struct UserService<T: Transport> {
    gateway: Gateway<T>,
}

impl<T: Transport> UserService<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, session: &Session, query: ListQuery) -> Result<Vec<User>, LedgerError> {
        self.gateway.find_many(session, &query).await
    }
}
