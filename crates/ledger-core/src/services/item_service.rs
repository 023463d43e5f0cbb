// ============================================================================
// Ledger Core - Item Service
// File: crates/ledger-core/src/services/item_service.rs
// ============================================================================

use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use super::gateway::Gateway;
use crate::domain::{Item, ItemDraft, ListQuery};
use crate::error::LedgerError;
use crate::precision::{unit_dp_for, UnitDp};
use crate::session::Session;
use crate::transport::Transport;

pub struct ItemService<T: Transport> {
    gateway: Gateway<T>,
}

impl<T: Transport> ItemService<T> {
    pub fn new(gateway: Gateway<T>) -> Self {
        Self { gateway }
    }

    pub async fn create(&self, session: &Session, draft: ItemDraft) -> Result<Item, LedgerError> {
        draft.validate()?;
        let query = precision_query(draft.unit_price);
        debug!(code = %draft.code, unit_dp = ?query.unit_dp, "Creating item");

        self.gateway.create(session, draft.into_item(None), &query).await
    }

    pub async fn update(&self, session: &Session, item_id: Uuid, draft: ItemDraft) -> Result<Item, LedgerError> {
        if item_id.is_nil() {
            return Err(LedgerError::InvalidId("item"));
        }
        draft.validate()?;
        let query = precision_query(draft.unit_price);

        self.gateway.update(session, draft.into_item(Some(item_id)), &query).await
    }

    pub async fn get(&self, session: &Session, item_id: Uuid) -> Result<Item, LedgerError> {
        self.gateway
            .find_one(session, item_id, ListQuery::new().unit_dp(UnitDp::Four))
            .await
    }

    /// Prices always come back with four decimals here.
    pub async fn list(&self, session: &Session, page: u32, query: ListQuery) -> Result<Vec<Item>, LedgerError> {
        let query = query.page(page).unit_dp(UnitDp::Four);
        self.gateway.find_many(session, &query).await
    }
}

fn precision_query(unit_price: f64) -> ListQuery {
    match unit_dp_for(unit_price) {
        Some(unit_dp) => ListQuery::new().unit_dp(unit_dp),
        None => ListQuery::new(),
    }
}
