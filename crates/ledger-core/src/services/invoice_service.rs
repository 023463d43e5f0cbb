// ============================================================================
// Ledger Core - Invoice Service
// File: crates/ledger-core/src/services/invoice_service.rs
// ============================================================================
//! Receivable invoices. Every write is an authorised ACCREC invoice.

use tracing::info;
use uuid::Uuid;
use validator::Validate;

use super::gateway::Gateway;
use crate::domain::{Invoice, InvoiceDraft, ListQuery, OrderBy};
use crate::error::LedgerError;
use crate::precision::UnitDp;
use crate::session::Session;
use crate::transport::Transport;

pub struct InvoiceService<T: Transport> {
    gateway: Gateway<T>,
}

impl<T: Transport> InvoiceService<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, session: &Session, draft: InvoiceDraft) -> Result<Invoice, LedgerError> {
        draft.validate()?;
        info!(contact_id = %draft.contact_id, lines = draft.line_items.len(), "Creating invoice");

        self.gateway
            .create(session, draft.into_invoice(None), &ListQuery::new())
            .await
    }

    /// Replaces every line item. Lines keep their identity only when the
    /// draft re-supplies their `line_item_id` (see `LineItem::preserving`).
    pub async fn update(
        &self,
        session: &Session,
        invoice_id: Uuid,
        draft: InvoiceDraft,
    ) -> Result<Invoice, LedgerError> {
        if invoice_id.is_nil() {
            return Err(LedgerError::InvalidId("invoice"));
        }
        draft.validate()?;

        self.gateway
            .update(session, draft.into_invoice(Some(invoice_id)), &ListQuery::new())
            .await
    }

    pub async fn get(&self, session: &Session, invoice_id: Uuid) -> Result<Invoice, LedgerError> {
        self.gateway
            .find_one(session, invoice_id, ListQuery::new().unit_dp(UnitDp::Four))
            .await
    }

    /// `page` 0 leaves paging to upstream. Unless the caller chose otherwise,
    /// results use four decimals and come newest due date first.
    pub async fn list(
        &self,
        session: &Session,
        page: u32,
        mut query: ListQuery,
    ) -> Result<Vec<Invoice>, LedgerError> {
        if page > 0 {
            query.page = Some(page);
        }
        query.unit_dp.get_or_insert(UnitDp::Four);
        query.order.get_or_insert_with(|| OrderBy::desc("DueDate"));

        self.gateway.find_many(session, &query).await
    }
}
