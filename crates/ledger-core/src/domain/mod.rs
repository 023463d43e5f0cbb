//! # Ledger Core - Domain Module
//!
//! Upstream accounting records and the validated drafts used to write them.
//! Records keep the upstream PascalCase field names on the wire and ignore
//! fields this client does not model.

pub mod dates;
pub mod query;
pub mod contact;
pub mod item;
pub mod invoice;
pub mod payment;
pub mod history;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use validator::ValidationError;

use crate::transport::Endpoint;

// Re-export all entities and drafts
pub use contact::{tagged_account_number, Address, AddressType, Contact, ContactDraft, ContactStatus};
pub use item::{Item, ItemDraft, SalesDetails};
pub use invoice::{ContactRef, Invoice, InvoiceDraft, LineItem};
pub use payment::{AccountRef, InvoiceRef, Payment, PaymentDraft};
pub use history::{HistoryRecord, HistoryRequest};
pub use user::User;
pub use query::{Direction, Filter, ListQuery, OrderBy};

/// A record type stored under one upstream collection.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const ENDPOINT: Endpoint;
}

impl Resource for Contact {
    const ENDPOINT: Endpoint = Endpoint::Contacts;
}

impl Resource for Item {
    const ENDPOINT: Endpoint = Endpoint::Items;
}

impl Resource for Invoice {
    const ENDPOINT: Endpoint = Endpoint::Invoices;
}

impl Resource for Payment {
    const ENDPOINT: Endpoint = Endpoint::Payments;
}

impl Resource for User {
    const ENDPOINT: Endpoint = Endpoint::Users;
}

pub(crate) fn not_nil(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        return Err(ValidationError::new("nil_id").with_message("id cannot be blank".into()));
    }
    Ok(())
}

pub(crate) fn positive_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ValidationError::new("not_positive").with_message("must be above 0".into()));
    }
    Ok(())
}
