//! Transport port (implemented by the HTTP adapter)

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::session::Session;

/// Query string pairs in the order they should be sent.
pub type QueryParams = Vec<(String, String)>;

/// Remote collection a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Contacts,
    Items,
    Invoices,
    Payments,
    Users,
}

impl Endpoint {
    /// URL path segment below the API base.
    pub fn path(&self) -> &'static str {
        self.collection_key()
    }

    /// Key holding the record array in request and response envelopes.
    pub fn collection_key(&self) -> &'static str {
        match self {
            Endpoint::Contacts => "Contacts",
            Endpoint::Items => "Items",
            Endpoint::Invoices => "Invoices",
            Endpoint::Payments => "Payments",
            Endpoint::Users => "Users",
        }
    }

    /// Lowercase singular, for error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Endpoint::Contacts => "contact",
            Endpoint::Items => "item",
            Endpoint::Invoices => "invoice",
            Endpoint::Payments => "payment",
            Endpoint::Users => "user",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Create the records in `payload` (an envelope keyed by the collection).
    async fn create(
        &self,
        session: &Session,
        endpoint: Endpoint,
        payload: Value,
        query: QueryParams,
    ) -> Result<Value, TransportError>;

    /// Update the records in `payload`; each must carry its identity.
    async fn update(
        &self,
        session: &Session,
        endpoint: Endpoint,
        payload: Value,
        query: QueryParams,
    ) -> Result<Value, TransportError>;

    async fn find(
        &self,
        session: &Session,
        endpoint: Endpoint,
        query: QueryParams,
    ) -> Result<Value, TransportError>;

    /// Send a pre-encoded body to an arbitrary sub-resource path.
    async fn create_raw(
        &self,
        session: &Session,
        path: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError>;
}
