// ============================================================================
// Ledger Core - History Service
// File: crates/ledger-core/src/services/history_service.rs
// ============================================================================

use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use super::gateway::Gateway;
use crate::domain::HistoryRequest;
use crate::error::LedgerError;
use crate::session::Session;
use crate::transport::{Endpoint, Transport};

const JSON: &str = "application/json";

pub struct HistoryService<T: Transport> {
    gateway: Gateway<T>,
}

impl<T: Transport> HistoryService<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self { gateway }
    }

    /// Attach a free-text note to a contact's history. The response body is
    /// only logged.
    pub async fn create_for_contact(
        &self,
        session: &Session,
        contact_id: Uuid,
        details: &str,
    ) -> Result<(), LedgerError> {
        if contact_id.is_nil() {
            return Err(LedgerError::InvalidId("contact"));
        }

        let request = HistoryRequest::single(details);
        for record in &request.history_records {
            record.validate()?;
        }

        let path = format!("{}/{}/History", Endpoint::Contacts.path(), contact_id);
        let headers = vec![
            ("Accept".to_string(), JSON.to_string()),
            ("Content-Type".to_string(), JSON.to_string()),
        ];
        let body = serde_json::to_vec(&request)?;

        let response = self.gateway.create_raw(session, path, headers, body).await?;
        debug!(
            contact_id = %contact_id,
            response = %String::from_utf8_lossy(&response),
            "History note created"
        );
        Ok(())
    }
}
