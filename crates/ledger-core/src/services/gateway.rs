//! Shared create / update / find template used by every façade.
//!
//! Each call takes one limiter token, wraps or unwraps the collection
//! envelope and enforces the single-record shape where one is expected.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{ListQuery, Resource};
use crate::error::{LedgerError, TransportError};
use crate::limiter::RequestLimiter;
use crate::session::Session;
use crate::transport::{Endpoint, Transport};

pub struct Gateway<T: Transport> {
    transport: Arc<T>,
    limiter: Arc<RequestLimiter>,
    max_wait: Option<Duration>,
}

impl<T: Transport> Clone for Gateway<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            limiter: Arc::clone(&self.limiter),
            max_wait: self.max_wait,
        }
    }
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: Arc<T>, limiter: Arc<RequestLimiter>, max_wait: Option<Duration>) -> Self {
        Self {
            transport,
            limiter,
            max_wait,
        }
    }

    async fn acquire(&self) -> Result<(), LedgerError> {
        match self.max_wait {
            Some(max_wait) => {
                self.limiter.acquire_within(max_wait).await?;
            }
            None => {
                self.limiter.acquire().await;
            }
        }
        Ok(())
    }

    pub async fn create<R: Resource>(
        &self,
        session: &Session,
        record: R,
        query: &ListQuery,
    ) -> Result<R, LedgerError> {
        self.acquire().await?;
        let payload = envelope(R::ENDPOINT, record)?;
        debug!(endpoint = R::ENDPOINT.path(), "Creating record");
        let response = self
            .transport
            .create(session, R::ENDPOINT, payload, query.to_params())
            .await?;
        single(R::ENDPOINT, response)
    }

    pub async fn update<R: Resource>(
        &self,
        session: &Session,
        record: R,
        query: &ListQuery,
    ) -> Result<R, LedgerError> {
        self.acquire().await?;
        let payload = envelope(R::ENDPOINT, record)?;
        debug!(endpoint = R::ENDPOINT.path(), "Updating record");
        let response = self
            .transport
            .update(session, R::ENDPOINT, payload, query.to_params())
            .await?;
        single(R::ENDPOINT, response)
    }

    /// Fetch exactly one record by id. `query` carries entity hints such as
    /// precision; the id filter is added here.
    pub async fn find_one<R: Resource>(
        &self,
        session: &Session,
        id: Uuid,
        query: ListQuery,
    ) -> Result<R, LedgerError> {
        if id.is_nil() {
            return Err(LedgerError::InvalidId(R::ENDPOINT.label()));
        }
        self.acquire().await?;
        let query = query.id(id);
        let response = self
            .transport
            .find(session, R::ENDPOINT, query.to_params())
            .await?;
        single(R::ENDPOINT, response)
    }

    pub async fn find_many<R: Resource>(
        &self,
        session: &Session,
        query: &ListQuery,
    ) -> Result<Vec<R>, LedgerError> {
        self.acquire().await?;
        let response = self
            .transport
            .find(session, R::ENDPOINT, query.to_params())
            .await?;
        let records = collection(R::ENDPOINT, response)?;
        debug!(endpoint = R::ENDPOINT.path(), count = records.len(), "Found records");
        Ok(records)
    }

    pub async fn create_raw(
        &self,
        session: &Session,
        path: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, LedgerError> {
        self.acquire().await?;
        Ok(self.transport.create_raw(session, path, headers, body).await?)
    }
}

fn envelope<R: Resource>(endpoint: Endpoint, record: R) -> Result<Value, LedgerError> {
    let mut map = Map::new();
    map.insert(
        endpoint.collection_key().to_string(),
        Value::Array(vec![serde_json::to_value(record)?]),
    );
    Ok(Value::Object(map))
}

fn collection<R: Resource>(endpoint: Endpoint, response: Value) -> Result<Vec<R>, LedgerError> {
    match response {
        Value::Null => Ok(Vec::new()),
        Value::Object(mut map) => match map.remove(endpoint.collection_key()) {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(records) => Ok(serde_json::from_value(records)?),
        },
        other => Err(TransportError::Decode(format!(
            "expected an object holding {}, got {}",
            endpoint.collection_key(),
            kind(&other)
        ))
        .into()),
    }
}

fn single<R: Resource>(endpoint: Endpoint, response: Value) -> Result<R, LedgerError> {
    let mut records: Vec<R> = collection(endpoint, response)?;
    if records.len() != 1 {
        return Err(LedgerError::ShapeMismatch {
            resource: endpoint.path(),
            count: records.len(),
        });
    }
    records.pop().ok_or(LedgerError::ShapeMismatch {
        resource: endpoint.path(),
        count: 0,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
