// ============================================================================
// Ledger Infrastructure - HTTP Transport
// File: crates/ledger-infrastructure/src/http/transport.rs
// ============================================================================

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::Value;
use tracing::{debug, error};

use ledger_core::error::TransportError;
use ledger_core::session::Session;
use ledger_core::transport::{Endpoint, QueryParams, Transport};

/// Header selecting the organisation a request acts on.
pub const TENANT_HEADER: &str = "xero-tenant-id";

const JSON: &str = "application/json";

/// create = PUT, update = POST, find = GET, all below `base_url`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .bearer_auth(session.access_token());

        match session.tenant_id() {
            Some(tenant) => builder.header(TENANT_HEADER, tenant),
            None => builder,
        }
    }

    async fn send_json(
        &self,
        method: Method,
        endpoint: Endpoint,
        session: &Session,
        payload: Option<Value>,
        query: QueryParams,
    ) -> Result<Value, TransportError> {
        let mut builder = self
            .request(method.clone(), endpoint.path(), session)
            .header(ACCEPT, JSON)
            .query(&query);
        if let Some(payload) = payload {
            builder = builder.json(&payload);
        }

        debug!(%method, endpoint = endpoint.path(), params = query.len(), "Sending request");
        let response = builder.send().await.map_err(network)?;
        let body = checked_body(response).await?;

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn create(
        &self,
        session: &Session,
        endpoint: Endpoint,
        payload: Value,
        query: QueryParams,
    ) -> Result<Value, TransportError> {
        self.send_json(Method::PUT, endpoint, session, Some(payload), query)
            .await
    }

    async fn update(
        &self,
        session: &Session,
        endpoint: Endpoint,
        payload: Value,
        query: QueryParams,
    ) -> Result<Value, TransportError> {
        self.send_json(Method::POST, endpoint, session, Some(payload), query)
            .await
    }

    async fn find(
        &self,
        session: &Session,
        endpoint: Endpoint,
        query: QueryParams,
    ) -> Result<Value, TransportError> {
        self.send_json(Method::GET, endpoint, session, None, query).await
    }

    async fn create_raw(
        &self,
        session: &Session,
        path: String,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, TransportError> {
        let mut builder = self.request(Method::PUT, &path, session);
        let has_content_type = headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()));
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !has_content_type {
            builder = builder.header(CONTENT_TYPE, JSON);
        }

        debug!(path = %path, bytes = body.len(), "Sending raw request");
        let response = builder.body(body).send().await.map_err(network)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(network)?;

        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            error!(status = status.as_u16(), path = %path, "Upstream rejected request");
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(bytes.to_vec())
    }
}

async fn checked_body(response: Response) -> Result<String, TransportError> {
    let status = response.status();
    let url = response.url().path().to_string();
    let body = response.text().await.map_err(network)?;

    if !status.is_success() {
        error!(status = status.as_u16(), path = %url, "Upstream rejected request");
        return Err(TransportError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::build_http_client;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(server: &MockServer) -> HttpTransport {
        let client = build_http_client("ledger-sync-test", Duration::from_secs(5)).unwrap();
        HttpTransport::new(client, format!("{}/api.xro/2.0/", server.uri()))
    }

    fn session() -> Session {
        Session::new("token-123").with_tenant("tenant-9")
    }

    #[tokio::test]
    async fn test_create_is_put_with_auth_and_tenant() {
        let server = MockServer::start().await;
        let payload = json!({ "Contacts": [{ "Name": "HS Acme" }] });

        Mock::given(method("PUT"))
            .and(path("/api.xro/2.0/Contacts"))
            .and(header("authorization", "Bearer token-123"))
            .and(header(TENANT_HEADER, "tenant-9"))
            .and(header("accept", JSON))
            .and(header("user-agent", "ledger-sync-test"))
            .and(body_json(&payload))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "Contacts": [{ "ContactID": "0b7b5f1e-5d38-4e36-a6b2-3b7a4d4fd111", "Name": "HS Acme" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = transport(&server)
            .create(&session(), Endpoint::Contacts, payload, Vec::new())
            .await
            .unwrap();

        assert_eq!(value["Contacts"][0]["Name"], "HS Acme");
    }

    #[tokio::test]
    async fn test_update_is_post_and_find_is_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api.xro/2.0/Items"))
            .and(query_param("unitdp", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Items": [] })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api.xro/2.0/Invoices"))
            .and(query_param("page", "2"))
            .and(query_param("order", "DueDate DESC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Invoices": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let transport = transport(&server);
        let session = session();
        transport
            .update(
                &session,
                Endpoint::Items,
                json!({ "Items": [] }),
                vec![("unitdp".into(), "4".into())],
            )
            .await
            .unwrap();
        transport
            .find(
                &session,
                Endpoint::Invoices,
                vec![("page".into(), "2".into()), ("order".into(), "DueDate DESC".into())],
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .mount(&server)
            .await;

        let err = transport(&server)
            .find(&session(), Endpoint::Contacts, Vec::new())
            .await
            .unwrap_err();

        match err {
            TransportError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "Rate limit exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bad_json_is_decode_error_and_empty_body_is_null() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api.xro/2.0/Users"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api.xro/2.0/Payments"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let transport = transport(&server);
        let session = session();

        let err = transport.find(&session, Endpoint::Users, Vec::new()).await.unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));

        let value = transport.find(&session, Endpoint::Payments, Vec::new()).await.unwrap();
        assert!(value.is_null());
    }

    #[tokio::test]
    async fn test_create_raw_puts_bytes_to_sub_path() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api.xro/2.0/Contacts/abc/History"))
            .and(header("content-type", JSON))
            .and(header(TENANT_HEADER, "tenant-9"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"HistoryRecords":[]}"#))
            .expect(1)
            .mount(&server)
            .await;

        let bytes = transport(&server)
            .create_raw(
                &session(),
                "Contacts/abc/History".to_string(),
                vec![
                    ("Accept".to_string(), JSON.to_string()),
                    ("Content-Type".to_string(), JSON.to_string()),
                ],
                br#"{"HistoryRecords":[{"Details":"hi"}]}"#.to_vec(),
            )
            .await
            .unwrap();

        assert_eq!(bytes, br#"{"HistoryRecords":[]}"#.to_vec());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = build_http_client("ledger-sync-test", Duration::from_secs(1)).unwrap();
        let transport = HttpTransport::new(client, "http://127.0.0.1:1");

        let err = transport
            .find(&session(), Endpoint::Contacts, Vec::new())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }
}
