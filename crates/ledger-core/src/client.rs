// ============================================================================
// Ledger Core - Client
// File: crates/ledger-core/src/client.rs
// Description: Entry point bundling every façade over one transport and limiter
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::ListQuery;
use crate::error::LedgerError;
use crate::limiter::RequestLimiter;
use crate::services::{
    ContactService, Gateway, HistoryService, InvoiceService, ItemService, PaymentService, UserService,
};
use crate::session::Session;
use crate::transport::Transport;

/// Client-wide knobs
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Prepended to contact names on write so seeded records can be swept.
    pub seed_prefix: Option<String>,
    /// Longest a call waits for a limiter token before failing with
    /// `LimiterError::DeadlineExceeded`. `None` waits as long as it takes.
    pub max_limiter_wait: Option<Duration>,
}

/// All façades share one transport and one limiter, so request pacing
/// holds across every entity.
pub struct LedgerClient<T: Transport> {
    limiter: Arc<RequestLimiter>,
    contacts: ContactService<T>,
    items: ItemService<T>,
    invoices: InvoiceService<T>,
    payments: PaymentService<T>,
    history: HistoryService<T>,
    users: UserService<T>,
}

impl<T: Transport> LedgerClient<T> {
    pub fn new(transport: Arc<T>, limiter: Arc<RequestLimiter>, options: ClientOptions) -> Self {
        let gateway = Gateway::new(transport, Arc::clone(&limiter), options.max_limiter_wait);

        Self {
            limiter,
            contacts: ContactService::new(gateway.clone(), options.seed_prefix),
            items: ItemService::new(gateway.clone()),
            invoices: InvoiceService::new(gateway.clone()),
            payments: PaymentService::new(gateway.clone()),
            history: HistoryService::new(gateway.clone()),
            users: UserService::new(gateway),
        }
    }

    pub fn contacts(&self) -> &ContactService<T> {
        &self.contacts
    }

    pub fn items(&self) -> &ItemService<T> {
        &self.items
    }

    pub fn invoices(&self) -> &InvoiceService<T> {
        &self.invoices
    }

    pub fn payments(&self) -> &PaymentService<T> {
        &self.payments
    }

    pub fn history(&self) -> &HistoryService<T> {
        &self.history
    }

    pub fn users(&self) -> &UserService<T> {
        &self.users
    }

    pub fn limiter(&self) -> &Arc<RequestLimiter> {
        &self.limiter
    }

    /// Confirm a fresh session can read the organisation by listing its
    /// users. An empty list means the tenant is not connected.
    pub async fn verify_session(&self, session: &Session) -> Result<usize, LedgerError> {
        let users = self.users.list(session, ListQuery::new()).await?;
        if users.is_empty() {
            return Err(LedgerError::SessionRejected(
                "no organisation users visible to this session".to_string(),
            ));
        }

        info!(users = users.len(), tenant = ?session.tenant_id(), "Session verified");
        Ok(users.len())
    }
}
